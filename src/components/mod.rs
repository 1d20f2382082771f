//! UI Components
//!
//! Leptos components for the app shell.

mod archive_view;
mod command_palette;
mod delete_confirm_button;
mod quick_capture;
mod settings_panel;
mod sidebar;
mod task_item;
mod task_list;
mod top_bar;

pub use archive_view::ArchiveView;
pub use command_palette::CommandPalette;
pub use delete_confirm_button::DeleteConfirmButton;
pub use quick_capture::QuickCapture;
pub use settings_panel::SettingsPanel;
pub use sidebar::Sidebar;
pub use task_item::TaskItem;
pub use task_list::TaskList;
pub use top_bar::TopBar;
