//! Keyboard Shortcuts
//!
//! Global Ctrl/Cmd chords handled by the app shell.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    QuickCapture,
    ToggleSidebar,
    Palette,
    Settings,
}

/// Chord for `key` pressed with Ctrl or Cmd held
pub fn shortcut_for(key: &str, ctrl_or_meta: bool) -> Option<Shortcut> {
    if !ctrl_or_meta {
        return None;
    }
    match key {
        "n" | "N" => Some(Shortcut::QuickCapture),
        "b" | "B" => Some(Shortcut::ToggleSidebar),
        "p" | "P" => Some(Shortcut::Palette),
        "," => Some(Shortcut::Settings),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chords_need_modifier() {
        assert_eq!(shortcut_for("n", false), None);
        assert_eq!(shortcut_for("n", true), Some(Shortcut::QuickCapture));
        assert_eq!(shortcut_for("B", true), Some(Shortcut::ToggleSidebar));
        assert_eq!(shortcut_for("p", true), Some(Shortcut::Palette));
        assert_eq!(shortcut_for(",", true), Some(Shortcut::Settings));
        assert_eq!(shortcut_for("x", true), None);
    }
}
