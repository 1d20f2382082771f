//! Nackle Backend
//!
//! Layered architecture:
//! - nackle-store: domain entities and SQLite repositories
//! - commands: Tauri command handlers
//! - window_chrome: native window styling driven by settings

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use tauri::{AppHandle, Manager};

use nackle_store::{Repositories, SettingsMap, StoreConfig, WindowAppearance};

mod commands;
mod window_chrome;

use window_chrome::{TauriWindowChrome, WindowChrome};

/// Overrides the database location (portable installs, manual testing)
pub const DB_PATH_ENV: &str = "NACKLE_DB_PATH";
const DB_FILE_NAME: &str = "nackle.db";

/// Application state shared across commands
pub struct AppState {
    pub repos: Repositories,
    /// Where `repos` lives; reported by destructive commands
    pub db_path: PathBuf,
    pub chrome: Arc<dyn WindowChrome>,
}

impl AppState {
    /// Restyle the window from a settings map
    pub fn apply_chrome(&self, settings: &SettingsMap) -> Result<(), String> {
        self.chrome.apply(&WindowAppearance::from_settings(settings))
    }
}

/// A non-empty override wins; otherwise the database lives in the data dir
fn resolve_db_path(override_path: Option<OsString>, data_dir: impl FnOnce() -> tauri::Result<PathBuf>) -> tauri::Result<PathBuf> {
    match override_path.filter(|p| !p.is_empty()) {
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(data_dir()?.join(DB_FILE_NAME)),
    }
}

/// Get database path from the environment or the app data dir
fn get_db_path(app_handle: &AppHandle) -> tauri::Result<PathBuf> {
    resolve_db_path(std::env::var_os(DB_PATH_ENV), || app_handle.path().app_data_dir())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.unminimize();
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            rolling_logger::init_logger(app_handle.path().app_log_dir()?, "Nackle")?;

            let db_path = get_db_path(&app_handle)?;
            log::info!("Opening database at {}", db_path.display());

            // Commands need the store from the first call, so open it before managing state
            let repos = tauri::async_runtime::block_on(Repositories::open(&StoreConfig::new(&db_path)))?;
            let state = AppState {
                repos,
                db_path,
                chrome: Arc::new(TauriWindowChrome::new(app_handle.clone())),
            };

            match tauri::async_runtime::block_on(state.repos.settings.get_all()) {
                Ok(settings) => {
                    if let Err(e) = state.apply_chrome(&settings) {
                        log::warn!("Failed to apply window chrome: {}", e);
                    }
                }
                Err(e) => log::error!("Failed to read settings: {}", e),
            }

            app.manage(state);
            let _ = rolling_logger::info("App setup complete");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Collections
            commands::get_collections,
            commands::get_archived_collections,
            commands::add_collection,
            commands::rename_collection,
            commands::archive_collection,
            commands::restore_collection,
            commands::delete_collection,
            // Tasks
            commands::get_tasks,
            commands::get_archived_tasks,
            commands::add_task,
            commands::toggle_task,
            commands::update_task_text,
            commands::set_task_priority,
            commands::move_task,
            commands::archive_task,
            commands::restore_task,
            commands::delete_task,
            commands::delete_task_forever,
            commands::reorder_tasks,
            commands::clear_completed,
            commands::empty_archive,
            // Settings & app
            commands::get_settings,
            commands::get_setting,
            commands::save_setting,
            commands::wipe_all_data,
            commands::get_app_version,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
