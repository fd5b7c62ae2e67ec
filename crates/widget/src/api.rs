use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::WidgetError;

// --- Wire types ---

/// Body of `POST /api/generate`. Built fresh for every submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub message: String,
    pub situation: String,
    pub tone: String,
}

/// Both success (`options`) and failure (`error`) bodies. Anything else the
/// backend adds is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub options: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl GenerationResponse {
    /// Non-empty `error` text, if the payload carries one.
    fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Options in backend order. Anything other than an array counts as none.
    fn into_options(self) -> Vec<String> {
        let Some(Value::Array(items)) = self.options else {
            return Vec::new();
        };
        items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect()
    }
}

/// Turn a status flag and raw body into the options to render.
///
/// The body is parsed before the status is looked at, so an unparseable body
/// is a transport failure whatever the status. A failure status, or an
/// `error` field on any status, is a request failure carrying the payload's
/// message or `fallback`.
pub fn interpret_response(
    success: bool,
    body: &str,
    fallback: &str,
) -> Result<Vec<String>, WidgetError> {
    let parsed: GenerationResponse = serde_json::from_str(body)
        .map_err(|e| WidgetError::Transport(format!("Unexpected response: {e}")))?;

    if let Some(message) = parsed.error_message() {
        return Err(WidgetError::Request(message));
    }
    if !success {
        return Err(WidgetError::Request(fallback.to_string()));
    }
    Ok(parsed.into_options())
}

// --- Backend seam ---

/// Something that can answer a generation request.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>, WidgetError>;
}

/// `reqwest`-backed client for the generation endpoint. No timeout: a request
/// runs until the backend or the network settles it.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    url: Url,
    fallback_error: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, endpoint: &str, fallback_error: &str) -> Result<Self, WidgetError> {
        let base = Url::parse(base_url)
            .map_err(|e| WidgetError::Transport(format!("Invalid base URL {base_url}: {e}")))?;
        let url = base
            .join(endpoint)
            .map_err(|e| WidgetError::Transport(format!("Invalid endpoint {endpoint}: {e}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            url,
            fallback_error: fallback_error.to_string(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Backend for HttpBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>, WidgetError> {
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| WidgetError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WidgetError::Transport(e.to_string()))?;
        debug!(%status, bytes = body.len(), "generate response");

        interpret_response(status.is_success(), &body, &self.fallback_error)
    }
}
