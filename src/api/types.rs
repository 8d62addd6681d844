// src/api/types.rs

use serde::{Deserialize, Serialize};

use crate::convert::{ConversionResult, Direction};

/// Body returned by POST /convert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ConversionResult> for ConvertResponse {
    fn from(result: ConversionResult) -> Self {
        match result {
            ConversionResult::Success { output, direction } => Self {
                success: true,
                result: Some(output),
                kind: Some(direction),
                error: None,
            },
            ConversionResult::Failure { message } => Self {
                success: false,
                result: None,
                kind: None,
                error: Some(message),
            },
        }
    }
}

/// Body returned by GET /api/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub oracle: String,
    pub model: String,
    pub timestamp: String,
}
