// src/convert/types.rs
// Request/result records for a single conversion

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const NO_TEXT_PROVIDED: &str = "No text provided";
pub const INVALID_MODE: &str = "Invalid mode";

/// How the caller wants the input treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Auto,
    ToEmoji,
    ToText,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Auto => "auto",
            Mode::ToEmoji => "to_emoji",
            Mode::ToText => "to_text",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized mode '{0}'")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Mode::Auto),
            "to_emoji" => Ok(Mode::ToEmoji),
            "to_text" => Ok(Mode::ToText),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Kind of output a conversion produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// text -> emoji
    Emoji,
    /// emoji -> text
    Text,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Emoji => "emoji",
            Direction::Text => "text",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incoming conversion call, as it arrives on the wire.
///
/// `mode` stays a raw string so that an unrecognized value can be reported as a
/// result instead of a decode failure. Absent means auto.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub mode: Option<String>,
}

impl ConversionRequest {
    pub fn new(text: impl Into<String>, mode: Mode) -> Self {
        Self {
            text: text.into(),
            mode: Some(mode.as_str().to_string()),
        }
    }

    pub fn auto(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: None,
        }
    }
}

/// Outcome of one conversion. Exactly one variant, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    Success { output: String, direction: Direction },
    Failure { message: String },
}

impl ConversionResult {
    pub fn success(output: impl Into<String>, direction: Direction) -> Self {
        ConversionResult::Success {
            output: output.into(),
            direction,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ConversionResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ConversionResult::Success { .. })
    }

    pub fn output(&self) -> Option<&str> {
        match self {
            ConversionResult::Success { output, .. } => Some(output),
            ConversionResult::Failure { .. } => None,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            ConversionResult::Success { direction, .. } => Some(*direction),
            ConversionResult::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ConversionResult::Success { .. } => None,
            ConversionResult::Failure { message } => Some(message),
        }
    }
}
