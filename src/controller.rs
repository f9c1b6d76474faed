//! Event handling that does not need the DOM: the awaited submission flow,
//! the download guard and keyboard shortcut mapping.

use thiserror::Error;

use crate::api::Backend;
use crate::model::{Flow, Submission};
use crate::state::{Action, BannerKind, UiState};

const BUSY_MESSAGE: &str = "A request is already running. Please wait for it to finish.";

/// What happened to one submit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReport {
    /// Another request was still in flight.
    Busy,
    Invalid,
    Generated,
    Failed(String),
}

/// Runs one form submission to completion.
///
/// Every path that reaches the network dispatches exactly one `Finished`, so the
/// loading state is always cleared.
pub async fn submit<B, D>(
    backend: &B,
    busy: bool,
    submission: Submission,
    dispatch: D,
) -> SubmitReport
where
    B: Backend,
    D: Fn(Action),
{
    if busy {
        dispatch(Action::Notify(BannerKind::Error, BUSY_MESSAGE.to_string()));
        return SubmitReport::Busy;
    }
    if let Err(e) = submission.validate() {
        dispatch(Action::Notify(BannerKind::Error, e.to_string()));
        return SubmitReport::Invalid;
    }

    let flow = submission.flow();
    dispatch(Action::Started(flow));
    let outcome = backend.generate(&submission).await;
    let report = match &outcome {
        Ok(_) => SubmitReport::Generated,
        Err(e) => SubmitReport::Failed(e.to_string()),
    };
    dispatch(Action::Finished { flow, outcome });
    report
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("Invalid download type.")]
    UnknownKind,
    #[error("No content to download. Please generate something first.")]
    NothingToDownload,
    #[error("Could not start the download.")]
    Dom(String),
}

/// The hidden form posted to the download endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPayload {
    pub action: String,
    pub content: String,
    pub filename: String,
}

impl DownloadPayload {
    pub fn fields(&self) -> [(&'static str, &str); 2] {
        [
            ("script_content", self.content.as_str()),
            ("filename", self.filename.as_str()),
        ]
    }
}

pub fn prepare_download(
    state: &UiState,
    kind: &str,
    action: &str,
) -> Result<DownloadPayload, DownloadError> {
    let flow = Flow::from_kind(kind).ok_or(DownloadError::UnknownKind)?;
    let generated = state
        .slot(flow)
        .filter(|g| !g.content.is_empty())
        .ok_or(DownloadError::NothingToDownload)?;
    Ok(DownloadPayload {
        action: action.to_string(),
        content: generated.content.clone(),
        filename: generated.filename.clone(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    SubmitActive,
    HideOverlay,
}

/// Ctrl/Cmd+Enter submits the active form, Escape hides the loading overlay.
pub fn shortcut(key: &str, ctrl: bool, meta: bool) -> Option<Shortcut> {
    match key {
        "Enter" if ctrl || meta => Some(Shortcut::SubmitActive),
        "Escape" => Some(Shortcut::HideOverlay),
        _ => None,
    }
}
