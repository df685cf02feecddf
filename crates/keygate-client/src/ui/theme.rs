use eframe::egui::Color32;

use crate::state::MessageKind;

pub const TEXT_NORMAL: Color32 = Color32::from_rgb(220, 221, 222);  // Info text
pub const TEXT_MUTED: Color32 = Color32::from_rgb(142, 146, 151);   // Hints

pub const GREEN: Color32 = Color32::from_rgb(59, 165, 93);          // Success
pub const RED: Color32 = Color32::from_rgb(237, 66, 69);            // Error

pub fn message_color(kind: MessageKind) -> Color32 {
    match kind {
        MessageKind::Info => TEXT_NORMAL,
        MessageKind::Success => GREEN,
        MessageKind::Error => RED,
    }
}
