//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO database dependencies beyond error conversion.

mod entity;
mod collection;
mod task;
mod setting;

pub use entity::{Entity, DomainError, DomainResult, now_millis, new_id};
pub use collection::{Collection, is_inbox, INBOX_ID, INBOX_NAME, INBOX_ICON, DEFAULT_ICON, DEFAULT_COLOR};
pub use task::{Task, SortUpdate, ClearScope, DEFAULT_PRIORITY};
pub use setting::{
    WindowAppearance, SettingsMap, DEFAULT_SETTINGS, DEFAULT_THEME,
    KEY_FRAMELESS, KEY_BACKGROUND_OPACITY, KEY_BACKGROUND_BLUR, KEY_BACKGROUND_BLUR_RADIUS, KEY_THEME,
};
