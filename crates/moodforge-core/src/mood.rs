//! The mood set and its prompt table.
//!
//! A mood selects a fixed positive prompt; all moods share one negative
//! prompt. Unknown mood ids fall back to [`DEFAULT_PROMPT`] so prompt
//! resolution is total.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive prompt used when a mood id is not recognized.
pub const DEFAULT_PROMPT: &str = "expressive face, high quality, youtube thumbnail style";

/// Negative prompt shared by every mood.
pub const NEGATIVE_PROMPT: &str = "blurry, low quality, distorted, bad anatomy, extra fingers, \
     cartoon, illustration, painting, drawing, bad eyes, deformation";

/// An enumerated expression style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Wide eyes, open mouth.
    Shock,

    /// Furious shouting face.
    Anger,

    /// Hysterical laughter.
    Laugh,

    /// Horror-movie scream.
    Fear,
}

impl Mood {
    /// All moods, in display order.
    pub const ALL: [Self; 4] = [Self::Shock, Self::Anger, Self::Laugh, Self::Fear];

    /// The stable string id of this mood.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Shock => "shock",
            Self::Anger => "anger",
            Self::Laugh => "laugh",
            Self::Fear => "fear",
        }
    }

    /// Human-readable label for display layers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shock => "Ultra Shock",
            Self::Anger => "Rage Mode",
            Self::Laugh => "Hysterical",
            Self::Fear => "Terrified",
        }
    }

    /// The positive prompt for this mood.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Shock => {
                "extreme shock, wide eyes, open mouth, youtube thumbnail style, hyper-expressive, \
                 4k, detailed skin texture, studio lighting, highly detailed"
            }
            Self::Anger => {
                "furious rage, angry shouting face, glowing red eyes, veins popping, intense \
                 emotion, youtube thumbnail style, 4k"
            }
            Self::Laugh => {
                "hysterical laughter, crying with joy, extreme happiness, tears of joy, youtube \
                 thumbnail style, 4k"
            }
            Self::Fear => {
                "terrified, horror movie scream, pale face, sweating, extreme fear, youtube \
                 thumbnail style, 4k"
            }
        }
    }

    /// Parse a mood id. Returns `None` for unknown ids.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "shock" => Some(Self::Shock),
            "anger" => Some(Self::Anger),
            "laugh" => Some(Self::Laugh),
            "fear" => Some(Self::Fear),
            _ => None,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Resolve the positive prompt for a mood id, falling back to
/// [`DEFAULT_PROMPT`] for unknown ids.
#[must_use]
pub fn prompt_for_id(id: &str) -> &'static str {
    Mood::from_id(id).map_or(DEFAULT_PROMPT, Mood::prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_id_roundtrip() {
        for mood in Mood::ALL {
            assert_eq!(Mood::from_id(mood.id()), Some(mood));
        }
    }

    #[test]
    fn unknown_id_falls_back_to_default_prompt() {
        assert_eq!(prompt_for_id("zen"), DEFAULT_PROMPT);
        assert_eq!(prompt_for_id(""), DEFAULT_PROMPT);
    }

    #[test]
    fn known_id_resolves_mood_prompt() {
        assert_eq!(prompt_for_id("anger"), Mood::Anger.prompt());
    }

    #[test]
    fn mood_serde_uses_snake_case_id() {
        let json = serde_json::to_string(&Mood::Shock).unwrap();
        assert_eq!(json, "\"shock\"");
        let parsed: Mood = serde_json::from_str("\"laugh\"").unwrap();
        assert_eq!(parsed, Mood::Laugh);
    }
}
