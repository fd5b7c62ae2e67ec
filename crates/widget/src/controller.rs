use tracing::{debug, info, warn};

use crate::api::{Backend, GenerationRequest};
use crate::config::Config;
use crate::error::WidgetError;
use crate::state::{FormInput, GenerationResult, SelectionState, Situation};
use crate::surface::{Clipboard, Surface};
use crate::tone::Tone;
use crate::ui::{self, Effect};

/// Outcome of starting a submission: the effects to apply right away and,
/// unless validation failed, the request to send.
#[derive(Debug)]
pub struct Submission {
    pub effects: Vec<Effect>,
    pub request: Result<GenerationRequest, WidgetError>,
}

/// Owns the selection and the current results, and decides what every user
/// action does to the page.
///
/// Submitting and copying are split around their single suspension point
/// (`begin_submit`/`finish_submit`, `on_result_click`/`finish_copy`) so an
/// event-loop host can release the controller while the await is pending.
/// `submit_generation` and `copy_result` run both halves against a
/// [`Surface`] for hosts that can hold it across the await.
pub struct Controller {
    config: Config,
    selection: SelectionState,
    result: GenerationResult,
}

impl Controller {
    pub fn new(config: Config) -> Self {
        let selection = SelectionState::new(config.tones.initial());
        Self {
            config,
            selection,
            result: GenerationResult::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn results(&self) -> &[String] {
        &self.result.options
    }

    fn is_custom(&self, selected: &str) -> bool {
        selected == self.config.elements.custom_sentinel
    }

    /// Take the situation the page currently shows as the selection.
    fn sync_situation(&mut self, form: &FormInput) {
        self.selection.situation = if self.is_custom(&form.situation) {
            Situation::Custom(form.custom_situation.clone())
        } else {
            Situation::Preset(form.situation.clone())
        };
    }

    /// Adopt whatever the page already shows (e.g. a form restored by the
    /// browser) and draw the tone controls.
    pub fn initialize(&mut self, form: &FormInput) -> Vec<Effect> {
        self.sync_situation(form);
        let mut effects = self.render_tone_options();
        effects.push(Effect::SetCustomSituationVisible(self.selection.situation.is_custom()));
        effects.push(Effect::SetSubmit(ui::submit_idle(&self.config.labels)));
        effects
    }

    pub fn render_tone_options(&self) -> Vec<Effect> {
        vec![Effect::RenderTones(ui::tone_buttons(self.selection.tone))]
    }

    pub fn select_tone(&mut self, tone: Tone) -> Vec<Effect> {
        debug!(%tone, "tone selected");
        self.selection.tone = tone;
        self.render_tone_options()
    }

    /// Tone control click carrying a catalog key. Unknown keys change nothing.
    pub fn select_tone_key(&mut self, key: &str) -> Vec<Effect> {
        match Tone::from_key(key) {
            Some(tone) => self.select_tone(tone),
            None => {
                warn!(key, "ignoring click on unknown tone");
                Vec::new()
            }
        }
    }

    pub fn on_situation_mode_change(&mut self, selected: &str) -> Vec<Effect> {
        if self.is_custom(selected) {
            self.selection.situation = Situation::Custom(String::new());
            vec![
                Effect::SetCustomSituationVisible(true),
                Effect::ClearCustomSituation,
                Effect::FocusCustomSituation,
            ]
        } else {
            self.selection.situation = Situation::Preset(selected.to_string());
            vec![
                Effect::SetCustomSituationVisible(false),
                Effect::ClearCustomSituation,
            ]
        }
    }

    pub fn on_custom_situation_input(&mut self, text: &str) {
        debug!(len = text.len(), "custom situation edited");
        if let Situation::Custom(current) = &mut self.selection.situation {
            *current = text.to_string();
        }
    }

    /// Build the request from `message` and the current selection.
    fn validate(&self, message: &str) -> Result<GenerationRequest, WidgetError> {
        let labels = &self.config.labels;

        let message = message.trim();
        if message.is_empty() {
            return Err(WidgetError::Validation(labels.empty_message.clone()));
        }

        let situation = match &self.selection.situation {
            Situation::Preset(tag) => tag.clone(),
            Situation::Custom(text) => {
                let custom = text.trim();
                if custom.is_empty() {
                    return Err(WidgetError::Validation(labels.empty_custom_situation.clone()));
                }
                custom.to_string()
            }
        };

        Ok(GenerationRequest {
            message: message.to_string(),
            situation,
            tone: self.selection.tone.key().to_string(),
        })
    }

    /// Clear the previous outcome, validate, and lock the submit control if
    /// a request is going out.
    pub fn begin_submit(&mut self, form: &FormInput) -> Submission {
        self.sync_situation(form);
        self.result.clear();

        let mut effects = vec![Effect::ClearError, Effect::ClearResults];
        let request = self.validate(&form.message);
        match &request {
            Ok(request) => {
                info!(
                    tone = %request.tone,
                    situation = %request.situation,
                    message_len = request.message.len(),
                    "submitting generation request"
                );
                effects.push(Effect::SetSubmit(ui::submit_busy(&self.config.labels)));
            }
            Err(e) => {
                debug!("validation failed: {e}");
                effects.push(Effect::SetError(e.to_string()));
            }
        }

        Submission { effects, request }
    }

    /// Render the settled request. The submit control is restored on every
    /// outcome.
    pub fn finish_submit(&mut self, outcome: Result<Vec<String>, WidgetError>) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        match outcome {
            Ok(mut options) => {
                let received = options.len();
                options.truncate(self.config.results.max_options);
                info!(received, shown = options.len(), "generation succeeded");
                self.result.options = options;
                effects.push(Effect::RenderResults(ui::result_blocks(
                    &self.result.options,
                    &self.config.labels,
                )));
            }
            Err(e) => {
                warn!(kind = e.kind(), "generation failed: {e}");
                self.result.clear();
                effects.push(Effect::SetError(e.to_string()));
            }
        }
        effects.push(Effect::SetSubmit(ui::submit_idle(&self.config.labels)));
        effects
    }

    /// Run one full submission against `surface`. Returns the number of
    /// blocks rendered.
    pub async fn submit_generation<B, S>(&mut self, backend: &B, surface: &mut S) -> Result<usize, WidgetError>
    where
        B: Backend,
        S: Surface,
    {
        let form = surface.read_form();
        let submission = self.begin_submit(&form);
        surface.apply_all(&submission.effects);
        let request = submission.request?;

        let outcome = backend.generate(&request).await;
        let failure = outcome.as_ref().err().cloned();
        let effects = self.finish_submit(outcome);
        surface.apply_all(&effects);

        match failure {
            Some(e) => Err(e),
            None => Ok(self.result.options.len()),
        }
    }

    /// Resolve a click in the results area to the block index and the text it
    /// carries. `None` when the click missed every block.
    pub fn on_result_click(&self, index: Option<usize>) -> Option<(usize, String)> {
        let index = index?;
        self.result.get(index).map(|text| (index, text.to_string()))
    }

    /// Feedback for a settled clipboard write of `copied`, taken from block
    /// `index`. No confirmation is shown if that block no longer holds
    /// `copied` (results were replaced while the write was pending).
    pub fn finish_copy(&self, index: usize, copied: &str, outcome: Result<(), WidgetError>) -> Vec<Effect> {
        match outcome {
            Ok(()) => {
                if self.result.get(index) != Some(copied) {
                    debug!(index, "results changed during copy, skipping confirmation");
                    return Vec::new();
                }
                debug!(index, "copied option to clipboard");
                vec![Effect::ShowCopied {
                    block: ui::result_block(index, copied, &self.config.labels),
                    content: self.config.labels.copied.clone(),
                    restore_after: self.config.results.copy_feedback(),
                }]
            }
            Err(e) => {
                warn!("Failed to copy: {e}");
                vec![Effect::SetError(self.config.labels.copy_failed.clone())]
            }
        }
    }

    /// Copy the clicked block's text and show feedback on `surface`.
    pub async fn copy_result<C, S>(&self, clipboard: &C, surface: &mut S, index: Option<usize>)
    where
        C: Clipboard,
        S: Surface,
    {
        let Some((index, text)) = self.on_result_click(index) else {
            return;
        };
        let outcome = clipboard.write_text(&text).await;
        surface.apply_all(&self.finish_copy(index, &text, outcome));
    }
}
