//! Native window chrome
//!
//! Applies the frameless and blur settings to the main window.

use nackle_store::WindowAppearance;
use tauri::AppHandle;

/// Something that can restyle the application window
pub trait WindowChrome: Send + Sync {
    fn apply(&self, appearance: &WindowAppearance) -> Result<(), String>;
}

/// Chrome for the `main` webview window
pub struct TauriWindowChrome {
    app: AppHandle,
}

impl TauriWindowChrome {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl WindowChrome for TauriWindowChrome {
    #[cfg(desktop)]
    fn apply(&self, appearance: &WindowAppearance) -> Result<(), String> {
        use tauri::utils::config::WindowEffectsConfig;
        use tauri::window::{Effect, EffectsBuilder};
        use tauri::Manager;

        let window = self.app.get_webview_window("main").ok_or("Window not found")?;
        window.set_decorations(!appearance.frameless).map_err(|e| e.to_string())?;

        if appearance.transparent && appearance.blur {
            let effect = if cfg!(target_os = "macos") {
                Effect::UnderWindowBackground
            } else {
                Effect::Blur
            };
            let effects = EffectsBuilder::new()
                .effect(effect)
                .radius(f64::from(appearance.blur_radius))
                .build();
            window.set_effects(effects).map_err(|e| e.to_string())?;
        } else {
            window.set_effects(None::<WindowEffectsConfig>).map_err(|e| e.to_string())?;
        }

        log::info!(
            "Applied window chrome: frameless={} opacity={} blur={}",
            appearance.frameless,
            appearance.opacity,
            appearance.blur
        );
        Ok(())
    }

    #[cfg(mobile)]
    fn apply(&self, _appearance: &WindowAppearance) -> Result<(), String> {
        let _ = &self.app;
        Ok(())
    }
}
