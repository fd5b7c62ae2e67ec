use crate::tone::Tone;

/// Situation context sent with each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Situation {
    /// A predefined tag taken verbatim from the situation selector.
    Preset(String),
    /// Free-form text typed into the custom situation input.
    Custom(String),
}

impl Situation {
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl Default for Situation {
    fn default() -> Self {
        Self::Preset(String::new())
    }
}

/// What the user has picked so far. Owned by the controller, discarded with
/// the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub tone: Tone,
    pub situation: Situation,
}

impl SelectionState {
    pub fn new(tone: Tone) -> Self {
        Self {
            tone,
            situation: Situation::default(),
        }
    }
}

/// Raw field values read from the host page at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub message: String,
    /// Current situation selector value, possibly the custom sentinel.
    pub situation: String,
    pub custom_situation: String,
}

/// Options shown for the most recent request. Replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub options: Vec<String>,
}

impl GenerationResult {
    pub fn clear(&mut self) {
        self.options.clear();
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }
}
