use gloo_net::http::Request;
use thiserror::Error;
use web_sys::FormData;

use crate::config::AppConfig;
use crate::model::{Flow, GenerateResponse, Generated, Submission, Unusable};

const CONNECTION_MESSAGE: &str = "An error occurred. Please check your connection and try again.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("backend answered HTTP {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("backend reported failure")]
    Rejected,
    #[error("response carried no generated content")]
    MissingContent,
}

impl ApiError {
    /// Text shown to the user when `flow` ends with this error.
    pub fn banner_text(&self, flow: Flow) -> &'static str {
        match self {
            ApiError::Network(_) | ApiError::Decode(_) => CONNECTION_MESSAGE,
            ApiError::Status(_) | ApiError::Rejected | ApiError::MissingContent => {
                flow.failure_message()
            }
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

impl From<Unusable> for ApiError {
    fn from(u: Unusable) -> Self {
        match u {
            Unusable::Rejected => ApiError::Rejected,
            Unusable::MissingContent => ApiError::MissingContent,
        }
    }
}

/// Anything that can turn a submission into generated text.
pub trait Backend {
    async fn generate(&self, submission: &Submission) -> Result<Generated, ApiError>;
}

/// Posts multipart forms to the generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpBackend {
    script_endpoint: String,
    cases_endpoint: String,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            script_endpoint: config.script_endpoint.clone(),
            cases_endpoint: config.cases_endpoint.clone(),
        }
    }

    pub fn endpoint(&self, flow: Flow) -> &str {
        match flow {
            Flow::Script => &self.script_endpoint,
            Flow::Cases => &self.cases_endpoint,
        }
    }
}

fn form_data(submission: &Submission) -> Result<FormData, ApiError> {
    let js_err = |e: wasm_bindgen::JsValue| ApiError::Network(format!("{e:?}"));
    let data = FormData::new().map_err(js_err)?;
    for (name, value) in submission.fields() {
        data.append_with_str(name, value).map_err(js_err)?;
    }
    Ok(data)
}

impl Backend for HttpBackend {
    async fn generate(&self, submission: &Submission) -> Result<Generated, ApiError> {
        let flow = submission.flow();
        let body = form_data(submission)?;
        let resp = Request::post(self.endpoint(flow)).body(body)?.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        decode_reply(flow, status, &text)
    }
}

/// Interprets a raw reply. The body must parse before the status counts, so an
/// HTML error page from a proxy reads as a transport problem.
pub fn decode_reply(flow: Flow, status: u16, body: &str) -> Result<Generated, ApiError> {
    let parsed = serde_json::from_str::<GenerateResponse>(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    if !(200..300).contains(&status) {
        return Err(ApiError::Status(status));
    }
    Ok(parsed.into_generated(flow)?)
}
