use serde::Serialize;

/// One entry of the fixed tone catalog.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tone {
    Confident,
    Kind,
    #[default]
    Flirty,
    Professional,
    #[serde(rename = "Gen Z")]
    GenZ,
}

impl Tone {
    /// Catalog order, which is also the order controls are rendered in.
    pub const ALL: [Tone; 5] = [
        Tone::Confident,
        Tone::Kind,
        Tone::Flirty,
        Tone::Professional,
        Tone::GenZ,
    ];

    /// Stable identifier sent to the backend.
    pub fn key(self) -> &'static str {
        match self {
            Self::Confident => "Confident",
            Self::Kind => "Kind",
            Self::Flirty => "Flirty",
            Self::Professional => "Professional",
            Self::GenZ => "Gen Z",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Confident => "Direct and assertive",
            Self::Kind => "Warm and gentle",
            Self::Flirty => "Playful and charming",
            Self::Professional => "Polished and courteous",
            Self::GenZ => "Cool and trendy",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Confident => "💪",
            Self::Kind => "🤗",
            Self::Flirty => "😉",
            Self::Professional => "👔",
            Self::GenZ => "✨",
        }
    }

    /// Visible text of the tone control, e.g. "😉 Flirty".
    pub fn label(self) -> String {
        format!("{} {}", self.glyph(), self.key())
    }

    /// Case-insensitive lookup by identifier.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|tone| tone.key().eq_ignore_ascii_case(key))
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keys_are_unique_and_round_trip() {
        for tone in Tone::ALL {
            assert_eq!(Tone::from_key(tone.key()), Some(tone));
        }
        let mut keys: Vec<_> = Tone::ALL.iter().map(|t| t.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Tone::ALL.len());
    }

    #[test]
    fn from_key_ignores_case_and_padding() {
        assert_eq!(Tone::from_key("gen z"), Some(Tone::GenZ));
        assert_eq!(Tone::from_key("  PROFESSIONAL "), Some(Tone::Professional));
        assert_eq!(Tone::from_key("sarcastic"), None);
    }

    #[test]
    fn label_puts_glyph_before_key() {
        assert_eq!(Tone::Kind.label(), "🤗 Kind");
        assert_eq!(Tone::GenZ.label(), "✨ Gen Z");
    }

    #[test]
    fn serializes_as_catalog_key() {
        assert_eq!(serde_json::to_string(&Tone::GenZ).unwrap(), "\"Gen Z\"");
        assert_eq!(Tone::default(), Tone::Flirty);
    }
}
