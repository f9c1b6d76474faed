use serde::Deserialize;
use thiserror::Error;

/// The two generation paths the page offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Script,
    Cases,
}

impl Flow {
    /// Parses the download discriminator used by the result panels.
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "selenium" => Some(Flow::Script),
            "bdd" => Some(Flow::Cases),
            _ => None,
        }
    }

    pub fn kind(self) -> &'static str {
        match self {
            Flow::Script => "selenium",
            Flow::Cases => "bdd",
        }
    }

    /// Id of the element holding the rendered text.
    pub fn code_id(self) -> &'static str {
        match self {
            Flow::Script => "selenium-code",
            Flow::Cases => "bdd-code",
        }
    }

    pub fn result_id(self) -> &'static str {
        match self {
            Flow::Script => "selenium-result",
            Flow::Cases => "bdd-result",
        }
    }

    pub fn default_filename(self) -> &'static str {
        match self {
            Flow::Script => "test_script.txt",
            Flow::Cases => "test_cases.feature",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Flow::Script => "Selenium script generated successfully!",
            Flow::Cases => "BDD test cases generated successfully!",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Flow::Script => "Failed to generate script. Please try again.",
            Flow::Cases => "Failed to generate BDD cases. Please try again.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Selenium,
    Bdd,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Selenium, Tab::Bdd];

    pub fn key(self) -> &'static str {
        match self {
            Tab::Selenium => "selenium",
            Tab::Bdd => "bdd",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Selenium => "Selenium Script",
            Tab::Bdd => "BDD Test Cases",
        }
    }

    pub fn panel_id(self) -> String {
        format!("{}-tab", self.key())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptRequest {
    pub prompt: String,
    pub browser: String,
    pub language: String,
}

impl Default for ScriptRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            browser: "chrome".to_string(),
            language: "python".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseRequest {
    pub user_story: String,
    pub format_style: String,
}

impl Default for CaseRequest {
    fn default() -> Self {
        Self {
            user_story: String::new(),
            format_style: "gherkin".to_string(),
        }
    }
}

pub const BROWSERS: &[(&str, &str)] = &[("chrome", "Chrome"), ("firefox", "Firefox")];
pub const LANGUAGES: &[(&str, &str)] = &[("python", "Python"), ("javascript", "JavaScript")];
pub const FORMAT_STYLES: &[(&str, &str)] = &[
    ("gherkin", "Gherkin (Given/When/Then)"),
    ("checklist", "Checklist"),
    ("plain", "Plain text"),
];

/// One form's worth of input, ready to be posted.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Script(ScriptRequest),
    Cases(CaseRequest),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a test scenario description.")]
    EmptyPrompt,
    #[error("Please enter a user story or product requirement.")]
    EmptyUserStory,
}

impl Submission {
    pub fn flow(&self) -> Flow {
        match self {
            Submission::Script(_) => Flow::Script,
            Submission::Cases(_) => Flow::Cases,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Submission::Script(r) if r.prompt.trim().is_empty() => {
                Err(ValidationError::EmptyPrompt)
            }
            Submission::Cases(r) if r.user_story.trim().is_empty() => {
                Err(ValidationError::EmptyUserStory)
            }
            _ => Ok(()),
        }
    }

    /// Multipart field names and values, in the order the backend declares them.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            Submission::Script(r) => vec![
                ("prompt", r.prompt.as_str()),
                ("browser", r.browser.as_str()),
                ("language", r.language.as_str()),
            ],
            Submission::Cases(r) => vec![
                ("user_story", r.user_story.as_str()),
                ("format_style", r.format_style.as_str()),
            ],
        }
    }
}

/// Text returned by the backend plus the filename it suggested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub content: String,
    pub filename: String,
}

/// Wire shape shared by both generation endpoints.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub bdd_cases: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Why a decoded response could not become a [`Generated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unusable {
    Rejected,
    MissingContent,
}

impl GenerateResponse {
    pub fn into_generated(self, flow: Flow) -> Result<Generated, Unusable> {
        if !self.success {
            return Err(Unusable::Rejected);
        }
        let content = match flow {
            Flow::Script => self.script,
            Flow::Cases => self.bdd_cases,
        };
        let content = content
            .filter(|c| !c.is_empty())
            .ok_or(Unusable::MissingContent)?;
        let filename = self
            .filename
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| flow.default_filename().to_string());
        Ok(Generated { content, filename })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case("   \n\t", false)]
    #[case("Log in with valid credentials", true)]
    fn script_prompt_must_have_text(#[case] prompt: &str, #[case] ok: bool) {
        let sub = Submission::Script(ScriptRequest {
            prompt: prompt.to_string(),
            ..Default::default()
        });
        assert_eq!(sub.validate().is_ok(), ok);
    }

    #[test]
    fn empty_user_story_has_its_own_message() {
        let sub = Submission::Cases(CaseRequest::default());
        let err = sub.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please enter a user story or product requirement."
        );
    }

    #[test]
    fn script_fields_follow_form_names() {
        let sub = Submission::Script(ScriptRequest {
            prompt: "search for shoes".to_string(),
            browser: "firefox".to_string(),
            language: "javascript".to_string(),
        });
        assert_eq!(
            sub.fields(),
            vec![
                ("prompt", "search for shoes"),
                ("browser", "firefox"),
                ("language", "javascript"),
            ]
        );
    }

    #[rstest]
    #[case("selenium", Some(Flow::Script))]
    #[case("bdd", Some(Flow::Cases))]
    #[case("pdf", None)]
    #[case("", None)]
    fn download_kind_parsing(#[case] kind: &str, #[case] expected: Option<Flow>) {
        assert_eq!(Flow::from_kind(kind), expected);
    }

    #[test]
    fn script_response_picks_script_field() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"success":true,"script":"print('hi')","filename":"test_20250101_120000.python"}"#,
        )
        .unwrap();
        let g = resp.into_generated(Flow::Script).unwrap();
        assert_eq!(g.content, "print('hi')");
        assert_eq!(g.filename, "test_20250101_120000.python");
    }

    #[test]
    fn case_response_without_filename_gets_default() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"success":true,"bdd_cases":"Feature: Login"}"#).unwrap();
        let g = resp.into_generated(Flow::Cases).unwrap();
        assert_eq!(g.filename, "test_cases.feature");
    }

    #[test]
    fn error_body_without_success_flag_is_rejected() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"detail":"upstream timeout"}"#).unwrap();
        assert_eq!(resp.into_generated(Flow::Script), Err(Unusable::Rejected));
    }

    #[test]
    fn success_with_wrong_field_is_missing_content() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"success":true,"script":"x"}"#).unwrap();
        assert_eq!(
            resp.into_generated(Flow::Cases),
            Err(Unusable::MissingContent)
        );
    }
}
