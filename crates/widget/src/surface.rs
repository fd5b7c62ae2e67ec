use crate::error::WidgetError;
use crate::state::FormInput;
use crate::ui::Effect;

/// The host page as the controller sees it: field values to read and
/// effects to apply.
pub trait Surface {
    fn read_form(&self) -> FormInput;

    fn apply(&mut self, effect: &Effect);

    fn apply_all(&mut self, effects: &[Effect]) {
        for effect in effects {
            self.apply(effect);
        }
    }
}

/// System clipboard.
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), WidgetError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::api::{Backend, GenerationRequest};
    use crate::ui::{ResultBlock, SubmitButton, ToneButton};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FakeBlock {
        pub data_text: String,
        pub content: String,
    }

    /// In-memory page: keeps the element state a browser would.
    #[derive(Debug, Default)]
    pub struct FakeSurface {
        pub form: FormInput,
        pub tones: Vec<ToneButton>,
        pub error: String,
        pub blocks: Vec<FakeBlock>,
        pub custom_visible: bool,
        pub custom_focused: bool,
        pub submit: Option<SubmitButton>,
        pub pending_restores: Vec<ResultBlock>,
        pub applied: Vec<Effect>,
    }

    impl FakeSurface {
        pub fn with_form(message: &str, situation: &str, custom_situation: &str) -> Self {
            Self {
                form: FormInput {
                    message: message.into(),
                    situation: situation.into(),
                    custom_situation: custom_situation.into(),
                },
                ..Self::default()
            }
        }

        /// Run every scheduled restore, as if the feedback delay elapsed.
        /// A block replaced by a later render is left alone, like a detached
        /// element in the browser.
        pub fn fire_timers(&mut self) {
            for restore in std::mem::take(&mut self.pending_restores) {
                if let Some(block) = self.blocks.get_mut(restore.index) {
                    if block.data_text == restore.text {
                        block.content = block_content(&restore);
                    }
                }
            }
        }
    }

    fn block_content(block: &ResultBlock) -> String {
        format!("{}\n{}\n{}", block.heading, block.hint, block.text)
    }

    impl Surface for FakeSurface {
        fn read_form(&self) -> FormInput {
            self.form.clone()
        }

        fn apply(&mut self, effect: &Effect) {
            self.applied.push(effect.clone());
            match effect {
                Effect::RenderTones(buttons) => self.tones = buttons.clone(),
                Effect::SetError(message) => self.error = message.clone(),
                Effect::ClearError => self.error.clear(),
                Effect::ClearResults => self.blocks.clear(),
                Effect::RenderResults(blocks) => {
                    self.blocks = blocks
                        .iter()
                        .map(|b| FakeBlock {
                            data_text: b.text.clone(),
                            content: block_content(b),
                        })
                        .collect();
                }
                Effect::SetCustomSituationVisible(visible) => self.custom_visible = *visible,
                Effect::ClearCustomSituation => self.form.custom_situation.clear(),
                Effect::FocusCustomSituation => self.custom_focused = true,
                Effect::SetSubmit(button) => self.submit = Some(button.clone()),
                Effect::ShowCopied { block, content, .. } => {
                    if let Some(shown) = self.blocks.get_mut(block.index) {
                        shown.content = content.clone();
                        self.pending_restores.push(block.clone());
                    }
                }
            }
        }
    }

    /// Backend returning a canned outcome and recording what it was sent.
    pub struct FakeBackend {
        outcome: Result<Vec<String>, WidgetError>,
        pub calls: Cell<usize>,
        pub last_request: RefCell<Option<GenerationRequest>>,
    }

    impl FakeBackend {
        pub fn returning(options: &[&str]) -> Self {
            Self::with_outcome(Ok(options.iter().map(|s| s.to_string()).collect()))
        }

        pub fn with_outcome(outcome: Result<Vec<String>, WidgetError>) -> Self {
            Self {
                outcome,
                calls: Cell::new(0),
                last_request: RefCell::new(None),
            }
        }
    }

    impl Backend for FakeBackend {
        async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>, WidgetError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_request.borrow_mut() = Some(request.clone());
            self.outcome.clone()
        }
    }

    #[derive(Default)]
    pub struct FakeClipboard {
        pub denied: bool,
        pub contents: RefCell<Option<String>>,
    }

    impl Clipboard for FakeClipboard {
        async fn write_text(&self, text: &str) -> Result<(), WidgetError> {
            if self.denied {
                return Err(WidgetError::Clipboard("NotAllowedError: write permission denied".into()));
            }
            *self.contents.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }
}
