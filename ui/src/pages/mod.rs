//! Pages shown by the app, chosen by the session:
//! - `login_page`: login form while logged out
//! - `directory_page`: the editable directory once logged in

mod directory_page;
mod login_page;

pub use directory_page::directory_page;
pub use login_page::login_page;
