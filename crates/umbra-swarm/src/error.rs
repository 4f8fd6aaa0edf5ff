use std::fmt;

/// Invalid parameters for a regular polygon.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A polygon needs at least three sides.
    TooFewSides { sides: usize },
    /// Radius must be finite and strictly positive.
    InvalidRadius { radius: f32 },
    /// Center must be finite.
    InvalidCenter { x: f32, y: f32 },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewSides { sides } => {
                write!(f, "polygon needs at least 3 sides, got {sides}")
            }
            Self::InvalidRadius { radius } => {
                write!(f, "polygon radius must be finite and > 0, got {radius}")
            }
            Self::InvalidCenter { x, y } => {
                write!(f, "polygon center must be finite, got ({x}, {y})")
            }
        }
    }
}

impl std::error::Error for ShapeError {}

/// A rejected `SwarmConfig` field.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub field: &'static str,
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(field: &'static str, msg: impl Into<String>) -> Self {
        Self { field, message: msg.into() }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid swarm config `{}`: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Failure to set up a swarm.
#[derive(Debug, Clone, PartialEq)]
pub enum SwarmError {
    Config(ConfigError),
    Shape(ShapeError),
    /// The viewport is empty or not finite.
    Viewport { width: f32, height: f32 },
}

impl fmt::Display for SwarmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => e.fmt(f),
            Self::Shape(e) => e.fmt(f),
            Self::Viewport { width, height } => {
                write!(f, "viewport {width}x{height} is not usable")
            }
        }
    }
}

impl std::error::Error for SwarmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Shape(e) => Some(e),
            Self::Viewport { .. } => None,
        }
    }
}

impl From<ConfigError> for SwarmError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ShapeError> for SwarmError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}
