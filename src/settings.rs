use std::{fmt, str::FromStr, time::Duration};

use clap::ValueEnum;
use rand::Rng;
use thiserror::Error;

/// Range the randomized wait before the signal is drawn from
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    ValueEnum,
    strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum DelayMode {
    Short,
    #[default]
    Medium,
    Long,
}

impl DelayMode {
    /// Inclusive bounds in milliseconds
    pub fn bounds(&self) -> (u64, u64) {
        match self {
            DelayMode::Short => (600, 1400),
            DelayMode::Medium => (1000, 3000),
            DelayMode::Long => (2000, 5000),
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let (min, max) = self.bounds();
        Duration::from_millis(rng.gen_range(min..=max))
    }

    pub fn next(&self) -> Self {
        match self {
            DelayMode::Short => DelayMode::Medium,
            DelayMode::Medium => DelayMode::Long,
            DelayMode::Long => DelayMode::Short,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("rounds must be a positive number or ∞, got {0:?}")]
    InvalidRounds(String),
}

/// How many rounds make up a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundsTarget {
    Finite(u32),
    Unbounded,
}

const UNBOUNDED_SENTINELS: [&str; 5] = ["∞", "inf", "infinite", "endless", "unbounded"];

impl RoundsTarget {
    /// A series has at least one round
    pub fn sanitized(self) -> Self {
        match self {
            RoundsTarget::Finite(0) => RoundsTarget::Finite(1),
            other => other,
        }
    }

    pub fn is_reached(&self, rounds_done: u32) -> bool {
        match self {
            RoundsTarget::Finite(target) => rounds_done >= *target,
            RoundsTarget::Unbounded => false,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            RoundsTarget::Finite(n) if *n < 3 => RoundsTarget::Finite(3),
            RoundsTarget::Finite(n) if *n < 5 => RoundsTarget::Finite(5),
            RoundsTarget::Finite(n) if *n < 10 => RoundsTarget::Finite(10),
            RoundsTarget::Finite(_) => RoundsTarget::Unbounded,
            RoundsTarget::Unbounded => RoundsTarget::Finite(3),
        }
    }
}

impl Default for RoundsTarget {
    fn default() -> Self {
        RoundsTarget::Finite(5)
    }
}

impl FromStr for RoundsTarget {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if UNBOUNDED_SENTINELS
            .iter()
            .any(|sentinel| sentinel.eq_ignore_ascii_case(trimmed))
        {
            return Ok(RoundsTarget::Unbounded);
        }

        match trimmed.parse::<u32>() {
            Ok(n) if n > 0 => Ok(RoundsTarget::Finite(n)),
            _ => Err(SettingsError::InvalidRounds(s.to_string())),
        }
    }
}

impl fmt::Display for RoundsTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundsTarget::Finite(n) => write!(f, "{n}"),
            RoundsTarget::Unbounded => write!(f, "∞"),
        }
    }
}

/// Per-run settings; never written to disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub delay_mode: DelayMode,
    pub rounds_target: RoundsTarget,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn sampled_delays_stay_within_inclusive_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for mode in [DelayMode::Short, DelayMode::Medium, DelayMode::Long] {
            let (min, max) = mode.bounds();
            for _ in 0..2_000 {
                let ms = mode.sample(&mut rng).as_millis() as u64;
                assert!(
                    (min..=max).contains(&ms),
                    "{mode} produced {ms}ms outside {min}..={max}"
                );
            }
        }
    }

    #[test]
    fn documented_bounds() {
        assert_eq!(DelayMode::Short.bounds(), (600, 1400));
        assert_eq!(DelayMode::Medium.bounds(), (1000, 3000));
        assert_eq!(DelayMode::Long.bounds(), (2000, 5000));
        assert_eq!(DelayMode::default(), DelayMode::Medium);
    }

    #[test]
    fn delay_mode_cycles() {
        assert_eq!(DelayMode::Short.next(), DelayMode::Medium);
        assert_eq!(DelayMode::Medium.next(), DelayMode::Long);
        assert_eq!(DelayMode::Long.next(), DelayMode::Short);
        assert_eq!(DelayMode::Long.to_string(), "long");
    }

    #[test]
    fn parse_finite_rounds() {
        assert_eq!("3".parse::<RoundsTarget>(), Ok(RoundsTarget::Finite(3)));
        assert_eq!(" 10 ".parse::<RoundsTarget>(), Ok(RoundsTarget::Finite(10)));
    }

    #[test]
    fn parse_unbounded_sentinels() {
        for s in ["∞", "inf", "INF", "Endless", "unbounded", "infinite"] {
            assert_eq!(s.parse::<RoundsTarget>(), Ok(RoundsTarget::Unbounded), "{s}");
        }
    }

    #[test]
    fn parse_rejects_zero_and_garbage() {
        assert_matches!("0".parse::<RoundsTarget>(), Err(SettingsError::InvalidRounds(_)));
        assert_matches!("-2".parse::<RoundsTarget>(), Err(SettingsError::InvalidRounds(_)));
        assert_matches!("many".parse::<RoundsTarget>(), Err(SettingsError::InvalidRounds(_)));
    }

    #[test]
    fn rounds_target_display_and_cycle() {
        assert_eq!(RoundsTarget::Unbounded.to_string(), "∞");
        assert_eq!(RoundsTarget::Finite(5).to_string(), "5");

        let mut target = RoundsTarget::Finite(3);
        let mut seen = vec![target];
        for _ in 0..4 {
            target = target.next();
            seen.push(target);
        }
        assert_eq!(
            seen,
            vec![
                RoundsTarget::Finite(3),
                RoundsTarget::Finite(5),
                RoundsTarget::Finite(10),
                RoundsTarget::Unbounded,
                RoundsTarget::Finite(3),
            ]
        );
    }

    #[test]
    fn zero_target_is_sanitized_to_one() {
        assert_eq!(RoundsTarget::Finite(0).sanitized(), RoundsTarget::Finite(1));
        assert_eq!(RoundsTarget::Finite(7).sanitized(), RoundsTarget::Finite(7));
        assert_eq!(RoundsTarget::Unbounded.sanitized(), RoundsTarget::Unbounded);
    }

    #[test]
    fn target_reached() {
        assert!(!RoundsTarget::Finite(3).is_reached(2));
        assert!(RoundsTarget::Finite(3).is_reached(3));
        assert!(!RoundsTarget::Unbounded.is_reached(u32::MAX));
    }
}
