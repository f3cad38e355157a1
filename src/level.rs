use std::{fmt::Display, str::FromStr};

/// Severity of a log call. `Max` is a sentinel that disables every level
/// when used as the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    Max = 4,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Max,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Level::Debug,
            1 => Level::Info,
            2 => Level::Warning,
            3 => Level::Error,
            _ => Level::Max,
        }
    }

    /// Whether a call at `self` passes a gate configured with `minimum`.
    pub fn passes(self, minimum: Level) -> bool {
        self.rank() >= minimum.rank()
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::Debug
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Debug => write!(f, "debug"),
            Level::Info => write!(f, "info"),
            Level::Warning => write!(f, "warning"),
            Level::Error => write!(f, "error"),
            Level::Max => write!(f, "max"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown log level '{0}', expected one of debug, info, warning, error, max")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "max" => Ok(Level::Max),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

impl From<Level> for log::LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Debug => log::LevelFilter::Trace,
            Level::Info => log::LevelFilter::Info,
            Level::Warning => log::LevelFilter::Warn,
            Level::Error => log::LevelFilter::Error,
            Level::Max => log::LevelFilter::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_matches_rank_comparison() {
        for level in Level::ALL {
            for minimum in Level::ALL {
                assert_eq!(
                    level.passes(minimum),
                    level.rank() >= minimum.rank(),
                    "{level} vs {minimum}"
                );
            }
        }
        assert!(!Level::Error.passes(Level::Max));
        assert!(Level::Debug.passes(Level::Debug));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("INFO".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!("Warning".parse::<Level>().unwrap(), Level::Warning);
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn rank_round_trips() {
        for level in Level::ALL {
            assert_eq!(Level::from_rank(level.rank()), level);
        }
    }

    #[test]
    fn maps_log_crate_levels() {
        assert_eq!(Level::from(log::Level::Trace), Level::Debug);
        assert_eq!(Level::from(log::Level::Warn), Level::Warning);
        assert_eq!(log::LevelFilter::from(Level::Max), log::LevelFilter::Off);
    }
}
