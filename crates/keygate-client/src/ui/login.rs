use eframe::egui;

use crate::state::{FormController, UiMode};

use super::theme;

/// What the user asked for during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    SubmitLogin,
    SubmitRegister,
    ToggleMode,
    SignOut,
}

/// Draws whichever form the controller says is visible, plus the status line.
pub struct LoginView {
    api_base: String,
}

impl LoginView {
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.to_string(),
        }
    }

    pub fn show(&self, ctx: &egui::Context, controller: &mut FormController) -> Option<LoginAction> {
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(100.0);

                ui.heading("Keygate");
                ui.colored_label(theme::TEXT_MUTED, &self.api_base);
                ui.add_space(20.0);

                ui.group(|ui| {
                    ui.set_width(300.0);

                    if let Some(session) = controller.session() {
                        ui.label(format!("Signed in as {}", session.username));
                        ui.add_space(10.0);
                        if ui.button("Sign out").clicked() {
                            action = Some(LoginAction::SignOut);
                        }
                    } else {
                        match controller.mode() {
                            UiMode::Login => {
                                let form = controller.login_form_mut();

                                ui.horizontal(|ui| {
                                    ui.label("Username:");
                                    ui.text_edit_singleline(&mut form.username);
                                });

                                ui.horizontal(|ui| {
                                    ui.label("Password:");
                                    ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
                                });

                                ui.add_space(10.0);

                                if ui.button("Login").clicked() {
                                    action = Some(LoginAction::SubmitLogin);
                                }
                            }
                            UiMode::Register => {
                                let form = controller.register_form_mut();

                                ui.horizontal(|ui| {
                                    ui.label("Username:");
                                    ui.text_edit_singleline(&mut form.username);
                                });

                                ui.horizontal(|ui| {
                                    ui.label("Email:");
                                    ui.text_edit_singleline(&mut form.email);
                                });

                                ui.horizontal(|ui| {
                                    ui.label("Password:");
                                    ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
                                });

                                ui.add_space(10.0);

                                if ui.button("Register").clicked() {
                                    action = Some(LoginAction::SubmitRegister);
                                }
                            }
                        }

                        ui.add_space(5.0);

                        if ui.link(controller.switch_label()).clicked() {
                            action = Some(LoginAction::ToggleMode);
                        }
                    }

                    if let Some(message) = controller.message() {
                        ui.add_space(10.0);
                        ui.colored_label(theme::message_color(message.kind), &message.text);
                    }
                });
            });
        });

        action
    }
}
