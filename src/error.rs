use thiserror::Error;

/// Main error type for the RGB-split library
///
/// The rendering core (`noise`, `algorithms`, `composition`, `export`) never
/// produces these; they surface only from config I/O, strict content parsing
/// and preset lookup.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Content-specific errors
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("No content provided")]
    Empty,

    #[error("Malformed SVG markup: {reason}")]
    MalformedMarkup { reason: String },

    #[error("Root element is <{found}>, expected <svg>")]
    NotSvg { found: String },
}

/// Preset-specific errors
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Preset not found: {name}")]
    NotFound { name: String },

    #[error("Color profile not found: {name}")]
    ProfileNotFound { name: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using SplitError
pub type Result<T> = std::result::Result<T, SplitError>;

impl SplitError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // IO errors might be temporary
            Self::Io(_) => true,
            Self::Config(ConfigError::FileNotFound { .. }) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Content(ContentError::MalformedMarkup { .. }) => {
                "The SVG markup could not be parsed. Please check it is a complete <svg> document.".to_string()
            }
            Self::Preset(PresetError::NotFound { name }) => {
                format!(
                    "Preset '{}' not found. Available presets: {}",
                    name,
                    crate::presets::PRESET_NAMES.join(", ")
                )
            }
            Self::Preset(PresetError::ProfileNotFound { name }) => {
                format!("Color profile '{}' not found. Available profiles: rgb, cmy, custom", name)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
