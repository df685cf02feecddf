/// Which of the two forms is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Login,
    Register,
}

impl UiMode {
    pub fn toggled(self) -> Self {
        match self {
            UiMode::Login => UiMode::Register,
            UiMode::Register => UiMode::Login,
        }
    }

    /// Label of the button that leaves this mode.
    pub fn switch_label(self) -> &'static str {
        match self {
            UiMode::Login => "Switch to Register",
            UiMode::Register => "Switch to Login",
        }
    }
}
