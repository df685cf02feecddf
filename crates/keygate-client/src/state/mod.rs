pub mod controller;
pub mod forms;
pub mod message;
pub mod mode;

pub use controller::{FormController, Session, Submission};
pub use forms::{FormError, LoginForm, RegisterForm};
pub use message::{MessageDisplay, MessageKind, StatusMessage};
pub use mode::UiMode;
