//! Settings Commands

use serde::Serialize;

use super::{call_unit, fetch, invoke, js_error};
use crate::models::SettingsMap;
use wasm_bindgen::JsValue;

/// Push event carrying the full settings map
pub const SETTINGS_UPDATED: &str = "settings-updated";

#[derive(Serialize)]
struct SaveSettingArgs<'a> {
    key: &'a str,
    value: &'a str,
}

pub async fn get_settings() -> Result<SettingsMap, String> {
    fetch("get_settings").await
}

pub async fn save_setting(key: &str, value: &str) -> Result<(), String> {
    call_unit("save_setting", &SaveSettingArgs { key, value }).await
}

pub async fn wipe_all_data() -> Result<(), String> {
    invoke("wipe_all_data", JsValue::NULL).await.map_err(js_error)?;
    Ok(())
}

pub async fn get_app_version() -> Result<String, String> {
    fetch("get_app_version").await
}
