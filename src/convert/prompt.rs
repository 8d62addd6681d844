// src/convert/prompt.rs

use super::types::Direction;

/// Build the instruction sent to the oracle for the requested output direction.
pub fn build_prompt(direction: Direction, text: &str) -> String {
    match direction {
        Direction::Emoji => format!(
            "Convert the following text to appropriate emojis. \
             Keep the meaning intact and use relevant emojis that represent the text. \
             If it's a sentence, convert each meaningful word to emojis. \
             Only respond with emojis, no explanations: '{text}'"
        ),
        Direction::Text => format!(
            "Convert the following emojis to meaningful text/words. \
             Interpret what the emojis represent and provide a clear, readable text. \
             Be concise and accurate: '{text}'"
        ),
    }
}
