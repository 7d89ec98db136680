pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use blink::presenter::{Banner, Scoreboard, Tone};

use crate::App;
use charting::{compute_bar_width, compute_chart_max, format_ms, format_spread};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const BAR_GAP: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board = self.game.presenter();
        let settings = self.game.settings();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(5),     // stage
                Constraint::Length(1),  // hint
                Constraint::Length(1),  // padding
                Constraint::Length(1),  // stats
                Constraint::Length(8),  // recent results
                Constraint::Length(1),  // settings
                Constraint::Length(1),  // legend
            ])
            .split(area);

        render_stage(board.banner(), chunks[0], buf);

        let hint = Paragraph::new(Span::styled(
            board.banner().hint.clone(),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);
        hint.render(chunks[1], buf);

        let scoreboard = board.scoreboard();
        let stats = Paragraph::new(Span::styled(
            format!(
                "last {}   best {}   avg {}   trials {}   spread {}",
                format_ms(scoreboard.last),
                format_ms(scoreboard.best),
                format_ms(scoreboard.average),
                scoreboard.trials,
                format_spread(scoreboard.spread),
            ),
            bold_style,
        ))
        .alignment(Alignment::Center);
        stats.render(chunks[3], buf);

        render_recent(scoreboard, chunks[4], buf);

        let (min_ms, max_ms) = settings.delay_mode.bounds();
        let settings_line = Paragraph::new(format!(
            "Delay: {} ({}-{} ms) | Rounds: {}",
            settings.delay_mode, min_ms, max_ms, settings.rounds_target
        ))
        .style(
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        settings_line.render(chunks[5], buf);

        let legend = Paragraph::new(Span::styled(
            "(s)tart / (space) react / (r)eset / (d)elay / (n) rounds / (esc)ape",
            italic_style,
        ));
        legend.render(chunks[6], buf);
    }
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Idle => Color::Blue,
        Tone::Wait => Color::Red,
        Tone::Go => Color::Green,
    }
}

fn render_stage(banner: &Banner, area: Rect, buf: &mut Buffer) {
    let color = tone_color(banner.tone);
    let border_style = if banner.too_soon {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(border_style)
        .style(Style::default().bg(color));
    let inner = block.inner(area);
    block.render(area, buf);

    // center the label vertically
    let mut lines = vec![Line::default(); (inner.height.saturating_sub(1) / 2) as usize];
    lines.push(Line::from(Span::styled(
        banner.label.clone(),
        Style::default()
            .fg(Color::White)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    )));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(inner, buf);
}

fn render_recent(scoreboard: &Scoreboard, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("recent (oldest first)");

    if scoreboard.recent.is_empty() {
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(Span::styled(
            "no rounds yet",
            Style::default().add_modifier(Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .render(inner, buf);
        return;
    }

    let best = scoreboard.best;
    let bars: Vec<Bar> = scoreboard
        .recent
        .iter()
        .enumerate()
        .map(|(idx, &ms)| {
            let style = if Some(ms) == best {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Magenta)
            };
            Bar::default()
                .value(u64::from(ms))
                .text_value(format!("{ms}"))
                .label(Line::from(format!("#{}", idx + 1)))
                .style(style)
        })
        .collect();

    let inner_width = area.width.saturating_sub(2);
    let chart = BarChart::default()
        .block(block)
        .bar_width(compute_bar_width(inner_width, bars.len(), BAR_GAP))
        .bar_gap(BAR_GAP)
        .max(compute_chart_max(&scoreboard.recent))
        .data(BarGroup::default().bars(&bars));

    chart.render(area, buf);
}
