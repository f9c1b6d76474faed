use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Clipboard, HtmlDocument, HtmlTextAreaElement};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no document")]
    NoDocument,
    #[error("nothing to copy")]
    Empty,
    #[error("fallback copy failed: {0}")]
    Fallback(String),
}

impl ClipboardError {
    pub fn banner_text(&self) -> &'static str {
        match self {
            ClipboardError::Empty => "Nothing to copy yet.",
            _ => "Failed to copy to clipboard.",
        }
    }
}

/// Which mechanism ended up writing the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    Native,
    Fallback,
}

/// Copies the text currently shown in `element_id`.
pub async fn copy_displayed(element_id: &str) -> Result<CopyPath, ClipboardError> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or(ClipboardError::NoDocument)?;
    let text = copyable(doc.get_element_by_id(element_id).and_then(|el| el.text_content()))?;
    copy_text(&text).await
}

/// Text worth copying, or `Empty` when the element is missing or blank.
fn copyable(text: Option<String>) -> Result<String, ClipboardError> {
    text.filter(|t| !t.is_empty()).ok_or(ClipboardError::Empty)
}

pub async fn copy_text(text: &str) -> Result<CopyPath, ClipboardError> {
    match write_native(text).await {
        Ok(()) => Ok(CopyPath::Native),
        Err(reason) => {
            gloo::console::warn!(format!(
                "Clipboard API unavailable ({reason}), trying execCommand"
            ));
            copy_with_selection(text)?;
            Ok(CopyPath::Fallback)
        }
    }
}

// navigator.clipboard is undefined outside secure contexts, so probe it before use.
async fn write_native(text: &str) -> Result<(), String> {
    let win = window().ok_or("no window")?;
    let nav = win.navigator();
    let clip = js_sys::Reflect::get(&nav, &JsValue::from_str("clipboard"))
        .map_err(|_| "clipboard lookup failed".to_string())?;
    if clip.is_undefined() || clip.is_null() {
        return Err("clipboard not available".to_string());
    }
    let clip: Clipboard = clip.unchecked_into();
    JsFuture::from(clip.write_text(text))
        .await
        .map_err(|_| "clipboard write rejected".to_string())?;
    Ok(())
}

fn copy_with_selection(text: &str) -> Result<(), ClipboardError> {
    let fail = |what: &str| ClipboardError::Fallback(what.to_string());
    let doc = window()
        .and_then(|w| w.document())
        .ok_or(ClipboardError::NoDocument)?;
    let body = doc.body().ok_or(ClipboardError::NoDocument)?;

    let area: HtmlTextAreaElement = doc
        .create_element("textarea")
        .map_err(|_| fail("could not create textarea"))?
        .dyn_into()
        .map_err(|_| fail("could not cast textarea"))?;
    area.set_value(text);
    let style = area.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("left", "-999999px");
    let _ = style.set_property("top", "-999999px");

    body.append_child(&area)
        .map_err(|_| fail("could not attach textarea"))?;
    let _ = area.focus();
    area.select();

    let copied = match doc.dyn_ref::<HtmlDocument>() {
        Some(html_doc) => html_doc
            .exec_command("copy")
            .map_err(|e| fail(&format!("{e:?}"))),
        None => Err(fail("document has no execCommand")),
    };
    let _ = body.remove_child(&area);

    match copied? {
        true => Ok(()),
        false => Err(fail("copy command refused")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ClipboardError::Empty, "Nothing to copy yet.")]
    #[case(ClipboardError::NoDocument, "Failed to copy to clipboard.")]
    #[case(
        ClipboardError::Fallback("copy command refused".into()),
        "Failed to copy to clipboard."
    )]
    fn errors_map_to_banner_text(#[case] err: ClipboardError, #[case] text: &str) {
        assert_eq!(err.banner_text(), text);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    fn missing_or_blank_result_is_not_copied(#[case] text: Option<String>) {
        assert!(matches!(copyable(text), Err(ClipboardError::Empty)));
    }

    #[test]
    fn rendered_text_is_copied_verbatim() {
        let text = "Feature: Login\n  Scenario: valid user\n".to_string();
        assert_eq!(copyable(Some(text.clone())).unwrap(), text);
    }
}
