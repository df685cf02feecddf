//! Form controller
//!
//! Owns every piece of mutable UI state: the current mode, both forms, the
//! status line, the signed-in session and the pending auto-switch. Submit
//! handlers take `&mut self` across their one await point, so a second
//! submission cannot start while one is in flight.

use std::time::{Duration, Instant};

use keygate_protocol::AuthResponse;

use crate::network::{AuthApi, CallResult};

use super::forms::{LoginForm, RegisterForm};
use super::message::{MessageDisplay, MessageKind, StatusMessage};
use super::mode::UiMode;

pub const REGISTRATION_SUCCEEDED: &str = "Registration successful! You can now login.";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const LOGIN_FAILED: &str = "Login failed";

/// How a submit handler ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Validation failed; no request was sent.
    Invalid,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
}

pub struct FormController {
    mode: UiMode,
    login: LoginForm,
    register: RegisterForm,
    message: MessageDisplay,
    session: Option<Session>,
    auto_switch_at: Option<Instant>,
    auto_switch_delay: Duration,
}

impl FormController {
    pub fn new(auto_switch_delay: Duration) -> Self {
        Self {
            mode: UiMode::default(),
            login: LoginForm::default(),
            register: RegisterForm::default(),
            message: MessageDisplay::default(),
            session: None,
            auto_switch_at: None,
            auto_switch_delay,
        }
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn switch_label(&self) -> &'static str {
        self.mode.switch_label()
    }

    /// Flip between the login and register forms.
    ///
    /// Clears the status line and cancels any scheduled auto-switch.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.auto_switch_at = None;
        self.clear_message();
        tracing::debug!("Switched to {:?} form", self.mode);
    }

    pub fn show_message(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.message.show(text, kind);
    }

    pub fn clear_message(&mut self) {
        self.message.clear();
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.current()
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    pub fn login_form_mut(&mut self) -> &mut LoginForm {
        &mut self.login
    }

    pub fn register_form(&self) -> &RegisterForm {
        &self.register
    }

    pub fn register_form_mut(&mut self) -> &mut RegisterForm {
        &mut self.register
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!("Signed out {}", session.username);
        }
        self.clear_message();
    }

    /// Deadline of the pending switch back to the login form, if any.
    pub fn auto_switch_at(&self) -> Option<Instant> {
        self.auto_switch_at
    }

    /// Apply the post-registration switch once `now` reaches its deadline.
    ///
    /// Returns true when the mode changed.
    pub fn poll_auto_switch(&mut self, now: Instant) -> bool {
        match self.auto_switch_at {
            Some(deadline) if now >= deadline => {
                self.toggle_mode();
                true
            }
            _ => false,
        }
    }

    pub async fn submit_login<A: AuthApi + ?Sized>(&mut self, api: &A) -> Submission {
        let request = match self.login.request() {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("Login not sent: {}", e);
                self.show_message(e.to_string(), MessageKind::Error);
                return Submission::Invalid;
            }
        };

        tracing::info!("Logging in as {}", request.username);
        let result = api.login(&request).await;

        if result.success {
            let username = result
                .data
                .as_ref()
                .map(AuthResponse::from_value)
                .and_then(|response| response.username)
                .unwrap_or(request.username);

            self.show_message(
                format!("Login successful! Welcome, {}.", username),
                MessageKind::Success,
            );
            self.login.password.clear();
            self.session = Some(Session { username });
            Submission::Succeeded
        } else {
            self.report_failure("Login", &result, LOGIN_FAILED);
            Submission::Failed
        }
    }

    pub async fn submit_register<A: AuthApi + ?Sized>(&mut self, api: &A) -> Submission {
        self.submit_register_at(api, Instant::now).await
    }

    async fn submit_register_at<A, F>(&mut self, api: &A, now: F) -> Submission
    where
        A: AuthApi + ?Sized,
        F: FnOnce() -> Instant,
    {
        let request = match self.register.request() {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("Registration not sent: {}", e);
                self.show_message(e.to_string(), MessageKind::Error);
                return Submission::Invalid;
            }
        };

        tracing::info!("Registering {}", request.username);
        let result = api.register(&request).await;

        if result.success {
            self.show_message(REGISTRATION_SUCCEEDED, MessageKind::Success);
            self.register.reset();
            self.auto_switch_at = Some(now() + self.auto_switch_delay);
            Submission::Succeeded
        } else {
            self.report_failure("Registration", &result, REGISTRATION_FAILED);
            Submission::Failed
        }
    }

    fn report_failure(&mut self, action: &str, result: &CallResult, fallback: &str) {
        if result.is_network_error() {
            tracing::warn!(
                "{} request failed: {}",
                action,
                result.error.as_deref().unwrap_or("unknown error")
            );
        } else {
            tracing::info!("{} rejected with status {}", action, result.status);
        }

        let text = result.detail().unwrap_or_else(|| fallback.to_string());
        self.show_message(text, MessageKind::Error);
    }
}
