pub mod dialogs;
pub mod form_field;
pub mod keybindings;
pub mod panels;
pub mod screens;
pub mod terminal_guard;

pub use dialogs::HelpDialog;
pub use screens::{Screen, ScreenAction};
