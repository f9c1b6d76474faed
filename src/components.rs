use gloo::events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlFormElement, HtmlTextAreaElement, KeyboardEvent};
use yew::prelude::*;

use crate::api::HttpBackend;
use crate::clipboard::{self, CopyPath};
use crate::config::AppConfig;
use crate::controller::{self, Shortcut, SubmitReport};
use crate::dom;
use crate::model::{Flow, Generated, Submission, Tab, BROWSERS, FORMAT_STYLES, LANGUAGES};
use crate::state::{Action, Banner, BannerKind, Dismissal, UiState};

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(AppConfig::load);
    let state = use_reducer(UiState::default);

    // Global shortcuts: Ctrl/Cmd+Enter submits the visible form, Escape hides the overlay.
    {
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            let listener = window().map(|w| {
                EventListener::new(&w, "keydown", move |event| {
                    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    match controller::shortcut(&event.key(), event.ctrl_key(), event.meta_key()) {
                        Some(Shortcut::SubmitActive) => {
                            event.prevent_default();
                            dom::submit_active_form();
                        }
                        Some(Shortcut::HideOverlay) => dispatcher.dispatch(Action::HideOverlay),
                        None => {}
                    }
                })
            });
            move || drop(listener)
        });
    }

    let on_submit = {
        let state = state.clone();
        let config = config.clone();
        Callback::from(move |submission: Submission| {
            let busy = state.is_busy();
            let dispatcher = state.dispatcher();
            let backend = HttpBackend::new(&config);
            spawn_local(async move {
                let flow = submission.flow();
                let report =
                    controller::submit(&backend, busy, submission, |a| dispatcher.dispatch(a))
                        .await;
                match report {
                    SubmitReport::Failed(detail) => {
                        let kind = flow.kind();
                        gloo::console::error!(format!("{kind} generation failed: {detail}"))
                    }
                    SubmitReport::Busy => {
                        gloo::console::log!("Submission refused: a request is already running.")
                    }
                    SubmitReport::Invalid | SubmitReport::Generated => {}
                }
            });
        })
    };

    let on_tab = {
        let dispatcher = state.dispatcher();
        Callback::from(move |tab: Tab| dispatcher.dispatch(Action::SelectTab(tab)))
    };

    let on_copy = {
        let dispatcher = state.dispatcher();
        Callback::from(move |flow: Flow| {
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                let action = match clipboard::copy_displayed(flow.code_id()).await {
                    Ok(path) => {
                        if path == CopyPath::Fallback {
                            gloo::console::log!("Copied with execCommand fallback.");
                        }
                        Action::Notify(BannerKind::Success, "Copied to clipboard!".to_string())
                    }
                    Err(e) => {
                        gloo::console::error!(format!("Failed to copy: {e}"));
                        Action::Notify(BannerKind::Error, e.banner_text().to_string())
                    }
                };
                dispatcher.dispatch(action);
            });
        })
    };

    let on_download = {
        let state = state.clone();
        let config = config.clone();
        Callback::from(move |kind: String| {
            let result = controller::prepare_download(&state, &kind, &config.download_endpoint)
                .and_then(|payload| dom::submit_download(&payload));
            if let Err(e) = result {
                gloo::console::error!(format!("Download refused: {e:?}"));
                state.dispatch(Action::Notify(BannerKind::Error, e.to_string()));
            }
        })
    };

    let on_dismiss = {
        let dispatcher = state.dispatcher();
        Callback::from(move |d: Dismissal| dispatcher.dispatch(d.action()))
    };

    let busy = state.is_busy();
    let panel_class =
        |tab: Tab| classes!("tab-content", (state.tab == tab).then_some("active"));

    html! {
        <div class="container">
            <header class="header">
                <h1>{"QA Copilot AI"}</h1>
                <p class="subtitle">
                    {"Turn plain-language scenarios into Selenium scripts and BDD test cases."}
                </p>
            </header>

            <main class="main-content">
                <BannerView
                    banner={state.banner.clone()}
                    delay_ms={config.banner_ms}
                    on_dismiss={on_dismiss}
                />

                <TabBar active={state.tab} on_select={on_tab} />

                <section id={Tab::Selenium.panel_id()} class={panel_class(Tab::Selenium)}>
                    <ScriptForm busy={busy} on_submit={on_submit.clone()} />
                    <ResultPanel
                        flow={Flow::Script}
                        title={"Generated Selenium Script"}
                        generated={state.script.clone()}
                        revision={state.revision(Flow::Script)}
                        on_copy={on_copy.clone()}
                        on_download={on_download.clone()}
                    />
                </section>

                <section id={Tab::Bdd.panel_id()} class={panel_class(Tab::Bdd)}>
                    <CaseForm busy={busy} on_submit={on_submit} />
                    <ResultPanel
                        flow={Flow::Cases}
                        title={"Generated BDD Test Cases"}
                        generated={state.cases.clone()}
                        revision={state.revision(Flow::Cases)}
                        on_copy={on_copy}
                        on_download={on_download}
                    />
                </section>
            </main>

            <LoadingOverlay visible={state.overlay} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TabBarProps {
    active: Tab,
    on_select: Callback<Tab>,
}

#[function_component(TabBar)]
fn tab_bar(props: &TabBarProps) -> Html {
    html! {
        <nav class="tabs">
            { for Tab::ALL.iter().map(|&tab| {
                let on_select = props.on_select.clone();
                let onclick = Callback::from(move |_: MouseEvent| on_select.emit(tab));
                html! {
                    <button
                        type="button"
                        class={classes!("tab-button", (props.active == tab).then_some("active"))}
                        data-tab={tab.key()}
                        {onclick}
                    >
                        { tab.label() }
                    </button>
                }
            }) }
        </nav>
    }
}

fn form_submit(flow: Flow, on_submit: Callback<Submission>) -> Callback<SubmitEvent> {
    Callback::from(move |e: SubmitEvent| {
        e.prevent_default();
        let form: HtmlFormElement = e.target_unchecked_into();
        on_submit.emit(dom::read_submission(flow, &form));
    })
}

fn autosize_input() -> Callback<InputEvent> {
    Callback::from(|e: InputEvent| {
        let area: HtmlTextAreaElement = e.target_unchecked_into();
        dom::autosize(&area);
    })
}

fn options(choices: &[(&'static str, &'static str)], default: &str) -> Html {
    html! {
        { for choices.iter().map(|&(value, label)| html! {
            <option {value} selected={value == default}>{ label }</option>
        }) }
    }
}

const SCRIPT_PLACEHOLDER: &str =
    "e.g. Open the login page, sign in with valid credentials and check the dashboard loads";
const STORY_PLACEHOLDER: &str =
    "As a shopper, I want to save items to a wishlist so that I can buy them later";

#[derive(Properties, PartialEq)]
struct FormProps {
    busy: bool,
    on_submit: Callback<Submission>,
}

#[function_component(ScriptForm)]
fn script_form(props: &FormProps) -> Html {
    let onsubmit = form_submit(Flow::Script, props.on_submit.clone());
    html! {
        <form id="selenium-form" class="generator-form" {onsubmit}>
            <label for="prompt">{"Describe the test scenario"}</label>
            <textarea
                id="prompt"
                name="prompt"
                rows="5"
                placeholder={SCRIPT_PLACEHOLDER}
                oninput={autosize_input()}
            />
            <div class="form-row">
                <label>
                    {"Browser"}
                    <select name="browser">{ options(BROWSERS, "chrome") }</select>
                </label>
                <label>
                    {"Language"}
                    <select name="language">{ options(LANGUAGES, "python") }</select>
                </label>
            </div>
            <button type="submit" class="primary" disabled={props.busy}>{"Generate Script"}</button>
        </form>
    }
}

#[function_component(CaseForm)]
fn case_form(props: &FormProps) -> Html {
    let onsubmit = form_submit(Flow::Cases, props.on_submit.clone());
    html! {
        <form id="bdd-form" class="generator-form" {onsubmit}>
            <label for="user_story">{"User story or product requirement"}</label>
            <textarea
                id="user_story"
                name="user_story"
                rows="5"
                placeholder={STORY_PLACEHOLDER}
                oninput={autosize_input()}
            />
            <div class="form-row">
                <label>
                    {"Format"}
                    <select name="format_style">{ options(FORMAT_STYLES, "gherkin") }</select>
                </label>
            </div>
            <button type="submit" class="primary" disabled={props.busy}>
                {"Generate Test Cases"}
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct ResultPanelProps {
    flow: Flow,
    title: AttrValue,
    generated: Option<Generated>,
    revision: u64,
    on_copy: Callback<Flow>,
    on_download: Callback<String>,
}

#[function_component(ResultPanel)]
fn result_panel(props: &ResultPanelProps) -> Html {
    let flow = props.flow;

    // Bring fresh output into view once it has been rendered.
    use_effect_with(props.revision, move |revision| {
        if *revision > 0 {
            dom::scroll_into_view(flow.result_id());
        }
        || ()
    });

    let on_copy = {
        let cb = props.on_copy.clone();
        Callback::from(move |_: MouseEvent| cb.emit(flow))
    };
    let on_download = {
        let cb = props.on_download.clone();
        Callback::from(move |_: MouseEvent| cb.emit(flow.kind().to_string()))
    };

    let (style, content, filename) = match &props.generated {
        Some(g) => ("display:block", g.content.clone(), g.filename.clone()),
        None => ("display:none", String::new(), String::new()),
    };

    html! {
        <div id={flow.result_id()} class="result-container" {style}>
            <div class="result-header">
                <h3>{ props.title.clone() }</h3>
                <span class="filename">{ filename }</span>
                <div class="result-actions">
                    <button type="button" onclick={on_copy}>{"Copy"}</button>
                    <button type="button" onclick={on_download}>{"Download"}</button>
                </div>
            </div>
            <pre class="code-block"><code id={flow.code_id()}>{ content }</code></pre>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct BannerProps {
    banner: Option<Banner>,
    delay_ms: u32,
    on_dismiss: Callback<Dismissal>,
}

#[function_component(BannerView)]
fn banner_view(props: &BannerProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        let pending = props.banner.as_ref().map(|b| b.dismissal(props.delay_ms));
        // Re-armed per banner; dropping the Timeout cancels the previous one.
        use_effect_with(pending, move |pending| {
            let timer = pending.map(|d| Timeout::new(d.delay_ms, move || on_dismiss.emit(d)));
            move || drop(timer)
        });
    }

    let Some(banner) = props.banner.clone() else {
        return html! {};
    };
    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        let now = banner.dismissal(0);
        Callback::from(move |_: MouseEvent| on_dismiss.emit(now))
    };

    html! {
        <div class={banner.kind.class()} role="status">
            { banner.text }
            <button type="button" class="message-close" aria-label="Dismiss" onclick={on_close}>
                {"×"}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct OverlayProps {
    visible: bool,
}

#[function_component(LoadingOverlay)]
fn loading_overlay(props: &OverlayProps) -> Html {
    let style = if props.visible { "display:flex" } else { "display:none" };
    html! {
        <div id="loading-overlay" class="loading-overlay" {style}>
            <div class="spinner"></div>
            <p>{"Generating… press Esc to hide"}</p>
        </div>
    }
}
