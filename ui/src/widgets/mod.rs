mod confirm_modal;
mod directory_table;
mod login;
mod status_line;
mod toolbar;

pub use confirm_modal::confirm_modal;
pub use directory_table::{TableAction, apply_action, directory_table};
pub use login::login_widget;
pub use status_line::status_line;
pub use toolbar::toolbar;
