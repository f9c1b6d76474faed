use serde::Deserialize;
use web_sys::window;

/// Id of the optional `<script type="application/json">` block that overrides defaults.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub script_endpoint: String,
    pub cases_endpoint: String,
    pub download_endpoint: String,
    /// How long a banner stays up, in milliseconds.
    pub banner_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            script_endpoint: "/generate-selenium".to_string(),
            cases_endpoint: "/generate-bdd".to_string(),
            download_endpoint: "/download-script".to_string(),
            banner_ms: 5000,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads the embedded config block. Missing block means defaults; a broken one is logged.
    pub fn load() -> Self {
        let Some(json) = config_json_from_dom() else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(cfg) => cfg,
            Err(e) => {
                gloo::console::error!(format!("app-config parse error: {e}"));
                Self::default()
            }
        }
    }
}

fn config_json_from_dom() -> Option<String> {
    let doc = window()?.document()?;
    let el = doc.get_element_by_id(CONFIG_ELEMENT_ID)?;
    let text = el.text_content().unwrap_or_default();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
