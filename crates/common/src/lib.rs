//! Common types shared across KalaMang crates.

/// Simple 2D coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new [`Point`].
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Unified error type for game logic.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("invalid map dimensions {width}x{height} (land probability {land_probability})")]
    InvalidDimensions {
        width: u32,
        height: u32,
        land_probability: f64,
    },
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("invalid operation")]
    InvalidOperation,
    #[error("unknown {category}: {name}")]
    UnknownItem { category: String, name: String },
    #[error("not enough money: {name} costs {price}, you have {money}")]
    CannotAfford { name: String, price: u32, money: u32 },
    #[error("you already have {0}")]
    AlreadyOwned(String),
    #[error("you can only buy boats or skills at a harbor location")]
    NotAtShop,
    #[error("{0}")]
    Command(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
}

pub type GameResult<T> = Result<T, GameError>;
