// src/convert/mod.rs
// Conversion dispatcher: validate, pick a direction, prompt the oracle, wrap the reply

pub mod detect;
pub mod prompt;
pub mod types;

pub use detect::{EMOJI_RANGES, EmojiDetectionRule, EmojiRange};
pub use prompt::build_prompt;
pub use types::{
    ConversionRequest, ConversionResult, Direction, INVALID_MODE, Mode, NO_TEXT_PROVIDED,
    UnknownMode,
};

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::oracle::Oracle;

/// Pick the output direction for already-trimmed input.
///
/// In auto mode a single emoji anywhere sends the whole string emoji -> text.
pub fn resolve_direction(text: &str, mode: Mode) -> Direction {
    match mode {
        Mode::ToEmoji => Direction::Emoji,
        Mode::ToText => Direction::Text,
        Mode::Auto => {
            if EmojiDetectionRule.matches(text) {
                Direction::Text
            } else {
                Direction::Emoji
            }
        }
    }
}

/// Stateless apart from the oracle handle; safe to share across tasks.
#[derive(Clone)]
pub struct Dispatcher {
    oracle: Arc<dyn Oracle>,
}

impl Dispatcher {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    pub fn oracle_name(&self) -> &'static str {
        self.oracle.name()
    }

    /// Run one conversion. Always yields a result record; nothing is propagated.
    pub async fn convert(&self, request: ConversionRequest) -> ConversionResult {
        let text = request.text.trim();
        if text.is_empty() {
            return ConversionResult::failure(NO_TEXT_PROVIDED);
        }

        let mode = match request.mode.as_deref().map(str::parse::<Mode>).transpose() {
            Ok(mode) => mode.unwrap_or_default(),
            Err(e) => {
                warn!("Rejecting conversion request: {}", e);
                return ConversionResult::failure(INVALID_MODE);
            }
        };

        let direction = resolve_direction(text, mode);
        if mode == Mode::Auto {
            match EmojiDetectionRule.first_match(text) {
                Some(trigger) => debug!("Auto mode: emoji {:?} found, converting to text", trigger),
                None => debug!("Auto mode: no emoji found, converting to emoji"),
            }
        }
        let prompt = build_prompt(direction, text);

        info!(
            oracle = self.oracle.name(),
            %mode,
            %direction,
            "Making API request for: {}",
            text
        );

        match self.oracle.generate(&prompt).await {
            Ok(output) => ConversionResult::success(output, direction),
            Err(e) => {
                warn!("Conversion failed ({}): {}", direction, e);
                ConversionResult::failure(e.to_string())
            }
        }
    }
}
