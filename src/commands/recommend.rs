// Tauri commands for the recommendation flow
//
// Wires webview events (theme edits, submit, retry, reset) to session
// transitions and the recommendation source. Every command returns the
// refreshed view model so the frontend can render without a second call.

use std::sync::{Arc, Mutex};

use tauri::State;

use crate::ai::RecommendationSource;
use crate::session::{Session, SubmitError, ViewState, EMPTY_THEME_MESSAGE};

/// Recommendation state shared across commands
pub struct RecommenderState {
    pub source: Arc<dyn RecommendationSource>,
    pub session: Mutex<Session>,
    pub key_configured: bool,
}

impl RecommenderState {
    pub fn new(source: Arc<dyn RecommendationSource>, key_configured: bool) -> Self {
        Self {
            source,
            session: Mutex::new(Session::new()),
            key_configured,
        }
    }

    fn lock_session(&self) -> Result<std::sync::MutexGuard<'_, Session>, String> {
        self.session
            .lock()
            .map_err(|e| format!("Failed to lock session: {}", e))
    }

    /// Run one fetch for `theme` and fold the outcome into the session.
    /// The session lock is NOT held across the await.
    async fn run_fetch(&self, theme: String) -> Result<ViewState, String> {
        let outcome = self.source.fetch_recommendations(&theme).await;

        let mut session = self.lock_session()?;
        match outcome {
            Ok(response) => session.complete_success(response),
            Err(e) => {
                eprintln!("[recommend] Fetch failed for theme {:?}: {}", theme, e);
                session.complete_failure();
            }
        }
        Ok(session.view())
    }

    pub async fn submit(&self) -> Result<ViewState, String> {
        let theme = {
            let mut session = self.lock_session()?;
            match session.begin_submit() {
                Ok(theme) => theme,
                Err(SubmitError::EmptyTheme) => return Err(EMPTY_THEME_MESSAGE.to_string()),
            }
        };
        self.run_fetch(theme).await
    }

    pub async fn retry(&self) -> Result<ViewState, String> {
        let theme = self.lock_session()?.begin_retry();
        self.run_fetch(theme).await
    }
}

// ─── Tauri Commands ───

/// Sync the theme input buffer into the session.
#[tauri::command]
pub fn update_theme(state: State<RecommenderState>, theme: String) -> Result<ViewState, String> {
    let mut session = state.lock_session()?;
    session.set_theme(&theme);
    Ok(session.view())
}

/// Submit the current theme: validate, enter loading, fetch, and settle on
/// success or failure. An empty theme rejects with the blocking notice and
/// changes nothing.
#[tauri::command]
pub async fn submit_theme(state: State<'_, RecommenderState>) -> Result<ViewState, String> {
    state.submit().await
}

/// Re-fetch with the previously submitted theme (retry / "new list").
#[tauri::command]
pub async fn retry_recommendations(
    state: State<'_, RecommenderState>,
) -> Result<ViewState, String> {
    state.retry().await
}

/// Clear theme, results, and error; back to the initial form.
#[tauri::command]
pub fn reset_session(state: State<RecommenderState>) -> Result<ViewState, String> {
    let mut session = state.lock_session()?;
    session.reset();
    Ok(session.view())
}

/// Read-only render of the current session.
#[tauri::command]
pub fn get_view_state(state: State<RecommenderState>) -> Result<ViewState, String> {
    Ok(state.lock_session()?.view())
}

/// Whether an API key was found at startup.
#[tauri::command]
pub fn get_api_key_status(state: State<RecommenderState>) -> Result<bool, String> {
    Ok(state.key_configured)
}
