// Modules
pub mod ai;
pub mod commands;
pub mod session;

use std::sync::Arc;

use ai::{ApiCredentials, GeminiClient};
use commands::RecommenderState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // The credential is read once here; the client handle is built once and
    // shared for the lifetime of the app.
    let credentials = ApiCredentials::from_env();
    if !credentials.is_configured() {
        eprintln!("[startup] No Gemini API key in environment; requests will fail at the provider");
    }
    let key_configured = credentials.is_configured();
    let client: Arc<dyn ai::RecommendationSource> = Arc::new(GeminiClient::new(credentials));

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(RecommenderState::new(client, key_configured))
        .invoke_handler(tauri::generate_handler![
            // Recommendation commands
            commands::recommend::update_theme,
            commands::recommend::submit_theme,
            commands::recommend::retry_recommendations,
            commands::recommend::reset_session,
            commands::recommend::get_view_state,
            commands::recommend::get_api_key_status,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
