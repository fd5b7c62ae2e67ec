//! What the widget wants on screen, computed without touching the DOM.
//!
//! Handlers return a list of [`Effect`]s; a [`Surface`](crate::surface::Surface)
//! applies them to real elements.

use std::time::Duration;

use crate::config::LabelConfig;
use crate::tone::Tone;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneButton {
    pub tone: Tone,
    pub label: String,
    /// Tooltip text.
    pub title: String,
    pub active: bool,
}

/// One clickable option. `text` is the literal option, copied byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBlock {
    pub index: usize,
    pub heading: String,
    pub hint: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub disabled: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace every tone control.
    RenderTones(Vec<ToneButton>),
    SetError(String),
    ClearError,
    ClearResults,
    /// Replace the results area with these blocks.
    RenderResults(Vec<ResultBlock>),
    SetCustomSituationVisible(bool),
    ClearCustomSituation,
    FocusCustomSituation,
    SetSubmit(SubmitButton),
    /// Swap the block's content for `content`, then rebuild it from `block`
    /// after `restore_after`. Overlapping confirmations on one block still
    /// end on the option content.
    ShowCopied {
        block: ResultBlock,
        content: String,
        restore_after: Duration,
    },
}

pub fn tone_buttons(selected: Tone) -> Vec<ToneButton> {
    Tone::ALL
        .into_iter()
        .map(|tone| ToneButton {
            tone,
            label: tone.label(),
            title: tone.description().to_string(),
            active: tone == selected,
        })
        .collect()
}

pub fn result_block(index: usize, text: &str, labels: &LabelConfig) -> ResultBlock {
    ResultBlock {
        index,
        heading: format!("{} {}", labels.option_heading, index + 1),
        hint: labels.copy_hint.clone(),
        text: text.to_string(),
    }
}

pub fn result_blocks(options: &[String], labels: &LabelConfig) -> Vec<ResultBlock> {
    options
        .iter()
        .enumerate()
        .map(|(index, text)| result_block(index, text, labels))
        .collect()
}

pub fn submit_idle(labels: &LabelConfig) -> SubmitButton {
    SubmitButton {
        disabled: false,
        label: labels.submit_idle.clone(),
    }
}

pub fn submit_busy(labels: &LabelConfig) -> SubmitButton {
    SubmitButton {
        disabled: true,
        label: labels.submit_busy.clone(),
    }
}
