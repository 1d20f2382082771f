//! Tauri Commands for Settings and app-level maintenance

use tauri::{AppHandle, Emitter, State};
use nackle_store::SettingsMap;
use super::report;
use crate::AppState;

/// Event carrying the full settings map after every save
pub const SETTINGS_UPDATED: &str = "settings-updated";

#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> Result<SettingsMap, String> {
    report("get_settings", state.repos.settings.get_all().await)
}

#[tauri::command]
pub async fn get_setting(state: State<'_, AppState>, key: String) -> Result<Option<String>, String> {
    report("get_setting", state.repos.settings.get(&key).await)
}

/// Upsert one key, restyle the window and push the full map to the UI
#[tauri::command]
pub async fn save_setting(
    app: AppHandle,
    state: State<'_, AppState>,
    key: String,
    value: String,
) -> Result<(), String> {
    report("save_setting", state.repos.settings.save(&key, &value).await)?;
    let settings = report("save_setting", state.repos.settings.get_all().await)?;

    if let Err(e) = state.apply_chrome(&settings) {
        log::warn!("Failed to apply window chrome: {}", e);
    }
    app.emit(SETTINGS_UPDATED, &settings).map_err(|e| e.to_string())
}

/// Delete every task and collection; the inbox is recreated
#[tauri::command]
pub async fn wipe_all_data(state: State<'_, AppState>) -> Result<(), String> {
    log::warn!("Wiping all data in {}", state.db_path.display());
    report("wipe_all_data", state.repos.maintenance.wipe_all().await)
}

#[tauri::command]
pub fn get_app_version(app: AppHandle) -> String {
    app.package_info().version.to_string()
}
