use std::time::Instant;

use eframe::egui;

use crate::config::ClientConfig;
use crate::network::NetworkClient;
use crate::state::FormController;

use super::login::{LoginAction, LoginView};

pub struct KeygateApp {
    controller: FormController,
    network: NetworkClient,
    runtime: tokio::runtime::Runtime,
    login_view: LoginView,
    auto_login: Option<(String, String)>,
}

impl KeygateApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &ClientConfig,
        network: NetworkClient,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        cc.egui_ctx.set_style(style);

        Self {
            controller: FormController::new(config.auto_switch_delay()),
            login_view: LoginView::new(network.base_url()),
            network,
            runtime,
            auto_login: config.auto_login(),
        }
    }

    fn handle(&mut self, action: LoginAction) {
        match action {
            LoginAction::ToggleMode => self.controller.toggle_mode(),
            LoginAction::SignOut => self.controller.sign_out(),
            LoginAction::SubmitLogin => {
                self.runtime
                    .block_on(self.controller.submit_login(&self.network));
            }
            LoginAction::SubmitRegister => {
                self.runtime
                    .block_on(self.controller.submit_register(&self.network));
            }
        }
    }

    /// One-shot login with credentials from the environment.
    fn try_auto_login(&mut self) {
        let Some((username, password)) = self.auto_login.take() else {
            return;
        };

        tracing::info!("Attempting auto-login as {}", username);
        let form = self.controller.login_form_mut();
        form.username = username;
        form.password = password;
        self.handle(LoginAction::SubmitLogin);
    }
}

impl eframe::App for KeygateApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.try_auto_login();
        self.controller.poll_auto_switch(Instant::now());

        if let Some(action) = self.login_view.show(ctx, &mut self.controller) {
            self.handle(action);
        }

        if let Some(deadline) = self.controller.auto_switch_at() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}
