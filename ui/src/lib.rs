#![warn(clippy::all, rust_2018_idioms)]
//! Desktop editor for the directory service.

pub mod app;
pub mod pages;
pub mod state;
pub mod utils;
pub mod widgets;

pub use app::{DirectoryApp, IS_LOGGED_IN_KEY};
