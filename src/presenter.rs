/// Visual tone of the stage, one per game state family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Idle,
    Wait,
    Go,
}

/// Headline shown on the stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    pub label: String,
    pub tone: Tone,
    pub hint: String,
    pub too_soon: bool,
}

impl Banner {
    pub fn new(label: impl Into<String>, tone: Tone, hint: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tone,
            hint: hint.into(),
            too_soon: false,
        }
    }

    pub fn too_soon(mut self) -> Self {
        self.too_soon = true;
        self
    }
}

/// Numbers shown under the stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scoreboard {
    pub last: Option<u32>,
    pub best: Option<u32>,
    pub average: Option<u32>,
    pub trials: u32,
    pub recent: Vec<u32>,
    pub spread: Option<f64>,
}

/// Receives everything the game wants shown
pub trait Presenter {
    fn show_banner(&mut self, banner: &Banner);
    fn show_scoreboard(&mut self, scoreboard: &Scoreboard);
}

/// Presenter that keeps the latest snapshot for the renderer
#[derive(Debug, Clone, Default)]
pub struct Board {
    banner: Banner,
    scoreboard: Scoreboard,
    dirty: bool,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// True once after every update; the event loop redraws on it
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Presenter for Board {
    fn show_banner(&mut self, banner: &Banner) {
        self.banner = banner.clone();
        self.dirty = true;
    }

    fn show_scoreboard(&mut self, scoreboard: &Scoreboard) {
        self.scoreboard = scoreboard.clone();
        self.dirty = true;
    }
}
