// Session state for the recommendation flow
//
// Owns the single piece of application state (theme buffer, loading flag,
// last response, last error) and the transition rules between the four
// visual states: form, spinner, error panel, result list. Rendering is a
// pure function of the state cell; commands in commands::recommend drive
// the transitions.

use serde::{Deserialize, Serialize};

use crate::ai::gemini_client::RecommendationResponse;
use crate::ai::Category;

/// Fixed user-facing message when a fetch fails. The underlying cause is
/// logged, never shown.
pub const FETCH_ERROR_MESSAGE: &str = "추천을 가져오는 중 오류가 발생했습니다. 다시 시도해 주세요.";

/// Blocking notice when submit is attempted with an empty theme.
pub const EMPTY_THEME_MESSAGE: &str = "음악 테마나 장르를 입력해주세요.";

/// Submit guard failure
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitError {
    EmptyTheme,
}

/// One row of the rendered result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    /// 1-based display position
    pub position: usize,
    pub title: String,
    pub artist: String,
    pub category: Category,
    pub reason: String,
    pub youtube_url: String,
}

/// View model handed to the frontend. Exactly one variant is active at a
/// time; precedence is loading, then error, then results, then form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum ViewState {
    Form { theme: String },
    Loading,
    Error { message: String },
    Results { date: String, theme: String, rows: Vec<ResultRow> },
}

/// The application-state cell. One per app, lives behind a mutex in the
/// managed `RecommenderState`.
#[derive(Debug, Default)]
pub struct Session {
    theme: String,
    loading: bool,
    data: Option<RecommendationResponse>,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sync the theme input buffer.
    pub fn set_theme(&mut self, theme: &str) {
        self.theme = theme.to_string();
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn data(&self) -> Option<&RecommendationResponse> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit transition (form -> loading). Rejects when the trimmed theme
    /// is empty, leaving the state untouched. On success returns the theme
    /// to fetch with.
    pub fn begin_submit(&mut self) -> Result<String, SubmitError> {
        if self.theme.trim().is_empty() {
            return Err(SubmitError::EmptyTheme);
        }
        self.enter_loading();
        Ok(self.theme.clone())
    }

    /// Retry transition (success/failure -> loading). The theme was already
    /// validated when it was first submitted, so there is no guard.
    pub fn begin_retry(&mut self) -> String {
        self.enter_loading();
        self.theme.clone()
    }

    /// Loading always starts from a clean slate: stale results and stale
    /// errors can never coexist with each other or with a fresh outcome.
    fn enter_loading(&mut self) {
        self.data = None;
        self.error = None;
        self.loading = true;
    }

    /// Fetch resolved: store the list, leave loading.
    pub fn complete_success(&mut self, response: RecommendationResponse) {
        self.data = Some(response);
        self.loading = false;
    }

    /// Fetch rejected: store the fixed user-facing message, leave loading.
    pub fn complete_failure(&mut self) {
        self.error = Some(FETCH_ERROR_MESSAGE.to_string());
        self.loading = false;
    }

    /// Back to the initial empty form.
    pub fn reset(&mut self) {
        *self = Session::new();
    }

    /// Map the state cell to its view model. Pure; no side effects.
    pub fn view(&self) -> ViewState {
        debug_assert!(
            !(self.data.is_some() && self.error.is_some()),
            "data and error must never both be present"
        );

        if self.loading {
            return ViewState::Loading;
        }
        if let Some(ref message) = self.error {
            return ViewState::Error {
                message: message.clone(),
            };
        }
        if let Some(ref data) = self.data {
            return ViewState::Results {
                date: data.date.clone(),
                theme: data.theme.clone(),
                rows: data
                    .songs
                    .iter()
                    .enumerate()
                    .map(|(index, song)| ResultRow {
                        position: index + 1,
                        title: song.title.clone(),
                        artist: song.artist.clone(),
                        category: song.category,
                        reason: song.reason.clone(),
                        youtube_url: song.youtube_url.clone(),
                    })
                    .collect(),
            };
        }
        ViewState::Form {
            theme: self.theme.clone(),
        }
    }
}
