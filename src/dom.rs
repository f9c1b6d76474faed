//! Thin wrappers over the handful of DOM calls the components need.

use wasm_bindgen::JsCast;
use web_sys::{
    window, Document, FormData, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
    ScrollBehavior, ScrollIntoViewOptions,
};

use crate::controller::{DownloadError, DownloadPayload};
use crate::model::{CaseRequest, Flow, ScriptRequest, Submission};

fn document() -> Option<Document> {
    window()?.document()
}

fn field(data: &FormData, name: &str) -> Option<String> {
    data.get(name).as_string()
}

/// Builds a submission from the live values of a generation form.
pub fn read_submission(flow: Flow, form: &HtmlFormElement) -> Submission {
    let data = FormData::new_with_form(form).ok();
    let get = |name: &str| data.as_ref().and_then(|d| field(d, name));
    match flow {
        Flow::Script => {
            let defaults = ScriptRequest::default();
            Submission::Script(ScriptRequest {
                prompt: get("prompt").unwrap_or_default(),
                browser: get("browser").unwrap_or(defaults.browser),
                language: get("language").unwrap_or(defaults.language),
            })
        }
        Flow::Cases => {
            let defaults = CaseRequest::default();
            Submission::Cases(CaseRequest {
                user_story: get("user_story").unwrap_or_default(),
                format_style: get("format_style").unwrap_or(defaults.format_style),
            })
        }
    }
}

/// Posts the payload through a throwaway `<form>` so the browser handles the file response.
pub fn submit_download(payload: &DownloadPayload) -> Result<(), DownloadError> {
    let dom_err = |what: &str| DownloadError::Dom(what.to_string());
    let doc = document().ok_or_else(|| dom_err("no document"))?;
    let body = doc.body().ok_or_else(|| dom_err("no body"))?;

    let form: HtmlFormElement = doc
        .create_element("form")
        .map_err(|_| dom_err("could not create form"))?
        .dyn_into()
        .map_err(|_| dom_err("could not cast form"))?;
    form.set_method("POST");
    form.set_action(&payload.action);

    for (name, value) in payload.fields() {
        let input: HtmlInputElement = doc
            .create_element("input")
            .map_err(|_| dom_err("could not create input"))?
            .dyn_into()
            .map_err(|_| dom_err("could not cast input"))?;
        input.set_type("hidden");
        input.set_name(name);
        input.set_value(value);
        form.append_child(&input)
            .map_err(|_| dom_err("could not attach input"))?;
    }

    body.append_child(&form)
        .map_err(|_| dom_err("could not attach form"))?;
    let submitted = form.submit().map_err(|_| dom_err("form submit failed"));
    let _ = body.remove_child(&form);
    submitted?;

    gloo::console::log!(format!("Download requested: {}", payload.filename));
    Ok(())
}

/// Fires a submit event on the form inside the visible tab panel.
pub fn submit_active_form() {
    let Some(doc) = document() else { return };
    let Ok(Some(el)) = doc.query_selector(".tab-content.active form") else {
        return;
    };
    if let Ok(form) = el.dyn_into::<HtmlFormElement>() {
        if let Err(e) = form.request_submit() {
            gloo::console::error!(format!("requestSubmit failed: {e:?}"));
        }
    }
}

pub fn scroll_into_view(id: &str) {
    let Some(el) = document().and_then(|d| d.get_element_by_id(id)) else {
        return;
    };
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    el.scroll_into_view_with_scroll_into_view_options(&opts);
}

/// Grows a textarea to fit its content.
pub fn autosize(area: &HtmlTextAreaElement) {
    let style = area.style();
    let _ = style.set_property("height", "auto");
    let _ = style.set_property("height", &format!("{}px", area.scroll_height()));
}
