//! SentSay reply widget.
//!
//! Collects a message, a situation and a tone, asks the backend for reply
//! options and renders up to three of them as click-to-copy blocks. The
//! [`Controller`] holds all state and decides every change to the page as a
//! list of [`Effect`]s; on `wasm32` the `dom` module applies them to the host
//! page and wires its events.

pub mod api;
pub mod config;
pub mod controller;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod error;
pub mod logging;
pub mod state;
pub mod surface;
pub mod tone;
pub mod ui;

pub use api::{interpret_response, Backend, GenerationRequest, GenerationResponse, HttpBackend};
pub use config::Config;
pub use controller::{Controller, Submission};
pub use error::WidgetError;
pub use state::{FormInput, GenerationResult, SelectionState, Situation};
pub use surface::{Clipboard, Surface};
pub use tone::Tone;
pub use ui::{Effect, ResultBlock, SubmitButton, ToneButton};
