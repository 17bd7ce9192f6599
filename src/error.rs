//! Error type shared by the renderer, sprites and configuration.
//!
//! Off-buffer blit cells are not errors (they are clipped), so everything here
//! is either a construction-time precondition or an I/O failure at the edges.

use std::fmt::{self, Display};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A buffer or sprite was asked for with a zero width or height
    InvalidDimension {
        what: &'static str,
        width: u32,
        height: u32,
    },
    /// Backing data length does not match width * height
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Animation built with no frames or a zero frame duration
    EmptyAnimation,
    /// `current_sprite` was called on a finished one-shot animation
    AnimationExhausted,
    Config(String),
    Io(std::io::Error),
    /// Window/renderer failure reported by the display backend
    Display(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimension { what, width, height } => {
                write!(f, "invalid {what} dimensions {width}x{height}")
            },
            Error::LengthMismatch {
                what,
                expected,
                actual,
            } => write!(f, "{what} data has {actual} entries, expected {expected}"),
            Error::EmptyAnimation => {
                write!(f, "animation needs at least one frame and a non-zero frame duration")
            },
            Error::AnimationExhausted => write!(f, "animation has finished; no current sprite"),
            Error::Config(s) => write!(f, "config error: {s}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Display(s) => write!(f, "display error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
