mod app;
mod login;
pub mod theme;

pub use app::KeygateApp;
pub use login::{LoginAction, LoginView};
