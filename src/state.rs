use std::rc::Rc;

use yew::Reducible;

use crate::api::ApiError;
use crate::model::{Flow, Generated, Tab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn class(self) -> &'static str {
        match self {
            BannerKind::Success => "message success",
            BannerKind::Error => "message error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub kind: BannerKind,
    pub text: String,
}

/// A pending auto-dismiss: which banner to drop and after how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dismissal {
    pub id: u64,
    pub delay_ms: u32,
}

impl Dismissal {
    pub fn action(self) -> Action {
        Action::DismissBanner(self.id)
    }
}

impl Banner {
    pub fn dismissal(&self, delay_ms: u32) -> Dismissal {
        Dismissal {
            id: self.id,
            delay_ms,
        }
    }
}

/// Everything the page remembers between events.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    pub tab: Tab,
    pub script: Option<Generated>,
    pub cases: Option<Generated>,
    /// Flow whose request is awaiting a response.
    pub in_flight: Option<Flow>,
    pub overlay: bool,
    pub banner: Option<Banner>,
    next_banner: u64,
    script_rev: u64,
    cases_rev: u64,
}

pub enum Action {
    SelectTab(Tab),
    Started(Flow),
    Finished {
        flow: Flow,
        outcome: Result<Generated, ApiError>,
    },
    Notify(BannerKind, String),
    DismissBanner(u64),
    HideOverlay,
}

impl UiState {
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn slot(&self, flow: Flow) -> Option<&Generated> {
        match flow {
            Flow::Script => self.script.as_ref(),
            Flow::Cases => self.cases.as_ref(),
        }
    }

    /// Bumped on every successful generation for `flow`, identical output included.
    pub fn revision(&self, flow: Flow) -> u64 {
        match flow {
            Flow::Script => self.script_rev,
            Flow::Cases => self.cases_rev,
        }
    }

    fn store(&mut self, flow: Flow, generated: Generated) {
        match flow {
            Flow::Script => {
                self.script = Some(generated);
                self.script_rev += 1;
            }
            Flow::Cases => {
                self.cases = Some(generated);
                self.cases_rev += 1;
            }
        }
    }

    fn notify(&mut self, kind: BannerKind, text: impl Into<String>) {
        self.next_banner += 1;
        self.banner = Some(Banner {
            id: self.next_banner,
            kind,
            text: text.into(),
        });
    }

    pub fn apply(mut self, action: Action) -> Self {
        match action {
            Action::SelectTab(tab) => self.tab = tab,
            Action::Started(flow) => {
                if self.in_flight.is_none() {
                    self.in_flight = Some(flow);
                    self.overlay = true;
                }
            }
            Action::Finished { flow, outcome } => {
                self.in_flight = None;
                self.overlay = false;
                match outcome {
                    Ok(generated) => {
                        self.store(flow, generated);
                        self.notify(BannerKind::Success, flow.success_message());
                    }
                    Err(e) => self.notify(BannerKind::Error, e.banner_text(flow)),
                }
            }
            Action::Notify(kind, text) => self.notify(kind, text),
            Action::DismissBanner(id) => {
                if self.banner.as_ref().is_some_and(|b| b.id == id) {
                    self.banner = None;
                }
            }
            Action::HideOverlay => self.overlay = false,
        }
        self
    }
}

impl Reducible for UiState {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).clone().apply(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(content: &str, filename: &str) -> Generated {
        Generated {
            content: content.to_string(),
            filename: filename.to_string(),
        }
    }

    #[test]
    fn starts_idle_on_selenium_tab() {
        let s = UiState::default();
        assert_eq!(s.tab, Tab::Selenium);
        assert!(!s.is_busy());
        assert!(!s.overlay);
        assert!(s.banner.is_none());
    }

    #[test]
    fn select_tab_switches_panel() {
        let s = UiState::default().apply(Action::SelectTab(Tab::Bdd));
        assert_eq!(s.tab, Tab::Bdd);
    }

    #[test]
    fn successful_finish_caches_and_returns_to_idle() {
        let s = UiState::default()
            .apply(Action::Started(Flow::Script))
            .apply(Action::Finished {
                flow: Flow::Script,
                outcome: Ok(generated("driver.get(url)", "test_1.python")),
            });
        assert!(!s.is_busy());
        assert!(!s.overlay);
        assert_eq!(s.script, Some(generated("driver.get(url)", "test_1.python")));
        assert!(s.cases.is_none());
        let banner = s.banner.unwrap();
        assert_eq!(banner.kind, BannerKind::Success);
        assert_eq!(banner.text, "Selenium script generated successfully!");
    }

    #[test]
    fn failed_finish_keeps_previous_content() {
        let s = UiState::default()
            .apply(Action::Finished {
                flow: Flow::Cases,
                outcome: Ok(generated("Feature: A", "a.feature")),
            })
            .apply(Action::Started(Flow::Cases))
            .apply(Action::Finished {
                flow: Flow::Cases,
                outcome: Err(ApiError::Rejected),
            });
        assert_eq!(s.cases, Some(generated("Feature: A", "a.feature")));
        assert!(!s.is_busy());
        assert_eq!(s.banner.unwrap().kind, BannerKind::Error);
    }

    #[test]
    fn later_success_overwrites_slot() {
        let s = UiState::default()
            .apply(Action::Finished {
                flow: Flow::Script,
                outcome: Ok(generated("one", "1.py")),
            })
            .apply(Action::Finished {
                flow: Flow::Script,
                outcome: Ok(generated("two", "2.py")),
            });
        assert_eq!(s.script, Some(generated("two", "2.py")));
    }

    #[test]
    fn second_start_does_not_replace_in_flight_flow() {
        let s = UiState::default()
            .apply(Action::Started(Flow::Script))
            .apply(Action::Started(Flow::Cases));
        assert_eq!(s.in_flight, Some(Flow::Script));
    }

    #[test]
    fn only_one_banner_at_a_time() {
        let s = UiState::default()
            .apply(Action::Notify(BannerKind::Success, "first".into()))
            .apply(Action::Notify(BannerKind::Error, "second".into()));
        let banner = s.banner.unwrap();
        assert_eq!(banner.text, "second");
        assert_eq!(banner.id, 2);
    }

    #[test]
    fn stale_dismissal_leaves_newer_banner() {
        let s = UiState::default().apply(Action::Notify(BannerKind::Success, "first".into()));
        let first_id = s.banner.as_ref().unwrap().id;
        let s = s
            .apply(Action::Notify(BannerKind::Error, "second".into()))
            .apply(Action::DismissBanner(first_id));
        assert_eq!(s.banner.unwrap().text, "second");
    }

    #[test]
    fn dismissal_removes_matching_banner() {
        let s = UiState::default().apply(Action::Notify(BannerKind::Success, "ok".into()));
        let id = s.banner.as_ref().unwrap().id;
        let s = s.apply(Action::DismissBanner(id));
        assert!(s.banner.is_none());
    }

    #[test]
    fn identical_regeneration_still_bumps_revision() {
        let finish = || Action::Finished {
            flow: Flow::Script,
            outcome: Ok(generated("same", "same.py")),
        };
        let s = UiState::default().apply(finish());
        assert_eq!(s.revision(Flow::Script), 1);
        let s = s.apply(finish());
        assert_eq!(s.revision(Flow::Script), 2);
        assert_eq!(s.revision(Flow::Cases), 0);
    }

    #[test]
    fn failure_does_not_bump_revision() {
        let s = UiState::default().apply(Action::Finished {
            flow: Flow::Cases,
            outcome: Err(ApiError::Rejected),
        });
        assert_eq!(s.revision(Flow::Cases), 0);
    }

    #[test]
    fn banner_timer_removes_its_own_banner() {
        let s = UiState::default().apply(Action::Notify(BannerKind::Success, "done".into()));
        let dismissal = s.banner.as_ref().unwrap().dismissal(5000);
        assert_eq!(dismissal.delay_ms, 5000);

        let s = s.apply(dismissal.action());
        assert!(s.banner.is_none());
    }

    #[test]
    fn replaced_banner_timer_is_harmless() {
        let s = UiState::default().apply(Action::Notify(BannerKind::Success, "first".into()));
        let stale = s.banner.as_ref().unwrap().dismissal(5000);
        let s = s.apply(Action::Notify(BannerKind::Error, "second".into()));
        let fresh = s.banner.as_ref().unwrap().dismissal(5000);
        assert_ne!(stale.id, fresh.id);

        let s = s.apply(stale.action());
        assert_eq!(s.banner.as_ref().unwrap().text, "second");
        let s = s.apply(fresh.action());
        assert!(s.banner.is_none());
    }

    #[test]
    fn escape_hides_overlay_but_request_stays_in_flight() {
        let s = UiState::default()
            .apply(Action::Started(Flow::Cases))
            .apply(Action::HideOverlay);
        assert!(!s.overlay);
        assert!(s.is_busy());
    }
}
