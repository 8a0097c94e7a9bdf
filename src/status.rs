//! Status messages
//!
//! The engine reports what happened as data; translation into the player's
//! language is done by the presentation layer. `Display` gives the English
//! wording used in logs and the headless driver.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::PowerUpKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusMessage {
    Initial,
    Paused,
    WordTooShort { min: usize },
    TrayInvalid,
    Checking { word: String },
    NoValidWord,
    GreatWord {
        word: String,
        points: u32,
        combo: f32,
        double_word: bool,
    },
    TimeUp { round: u32 },
    ScoreRequired { goal: u32 },
    PowerUpActivated { kind: PowerUpKind },
    BombRefreshComplete,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::Initial => write!(f, "Tap flying letters to build a word."),
            StatusMessage::Paused => write!(f, "Paused."),
            StatusMessage::WordTooShort { min } => {
                write!(f, "Word must have at least {} letters.", min)
            }
            StatusMessage::TrayInvalid => write!(f, "Current tray is not a valid word."),
            StatusMessage::Checking { word } => write!(f, "Checking \"{}\"...", word),
            StatusMessage::NoValidWord => {
                write!(f, "No valid dictionary word for this letter set.")
            }
            StatusMessage::GreatWord {
                word,
                points,
                combo,
                double_word,
            } => {
                write!(f, "Great word: {} (+{})", word, points)?;
                if *combo > 1.0 {
                    write!(f, " combo x{:.2}", combo)?;
                }
                if *double_word {
                    write!(f, " with Double Word")?;
                }
                Ok(())
            }
            StatusMessage::TimeUp { round } => write!(f, "Round {} complete. Time is up.", round),
            StatusMessage::ScoreRequired { goal } => {
                write!(f, "Time is up. {} points were required.", goal)
            }
            StatusMessage::PowerUpActivated { kind } => match kind {
                PowerUpKind::Bomb => write!(f, "Bomb triggered. Refreshing letters..."),
                PowerUpKind::Multiplier => write!(f, "x2 activated."),
                PowerUpKind::Freeze => write!(f, "Freeze activated."),
                PowerUpKind::Shield => write!(f, "Shield activated."),
                PowerUpKind::Wall => write!(f, "Wall activated."),
                PowerUpKind::Wild => write!(f, "Wildcard added to tray."),
                PowerUpKind::Reroll => write!(f, "Rerolled low-value letters."),
                PowerUpKind::Slow => write!(f, "Slow Time activated."),
                PowerUpKind::Double => write!(f, "Double Word ready for next valid submit."),
                PowerUpKind::Magnet => write!(f, "Magnet activated."),
                PowerUpKind::ExtraTime => write!(f, "+10 seconds added."),
                PowerUpKind::Lock => write!(f, "Lock charge added to next collected letter."),
                PowerUpKind::Purge => write!(f, "Purged rare letters."),
            },
            StatusMessage::BombRefreshComplete => write!(f, "Bomb refresh complete."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_great_word_text() {
        let msg = StatusMessage::GreatWord {
            word: "GAME".into(),
            points: 12,
            combo: 1.5,
            double_word: true,
        };
        assert_eq!(msg.to_string(), "Great word: GAME (+12) combo x1.50 with Double Word");
    }

    #[test]
    fn test_serializes_as_tagged_data() {
        let json = serde_json::to_string(&StatusMessage::ScoreRequired { goal: 60 }).unwrap();
        assert_eq!(json, r#"{"type":"score_required","goal":60}"#);
    }
}
