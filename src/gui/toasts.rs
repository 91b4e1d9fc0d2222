use crate::notifier::impl_toast::Toast;
use crate::notifier::interface::{Position, Severity};
use eframe::egui;

const EDGE: f32 = 12.0;

fn anchor(position: Position) -> (egui::Align2, egui::Vec2) {
    match position {
        Position::TopLeft => (egui::Align2::LEFT_TOP, egui::vec2(EDGE, EDGE)),
        Position::TopCenter => (egui::Align2::CENTER_TOP, egui::vec2(0.0, EDGE)),
        Position::TopRight => (egui::Align2::RIGHT_TOP, egui::vec2(-EDGE, EDGE)),
        Position::BottomLeft => (egui::Align2::LEFT_BOTTOM, egui::vec2(EDGE, -EDGE)),
        Position::BottomCenter => (egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -EDGE)),
        Position::BottomRight => (egui::Align2::RIGHT_BOTTOM, egui::vec2(-EDGE, -EDGE)),
    }
}

pub fn background(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Error => egui::Color32::from_rgb(0xFF, 0x6F, 0x61),
        Severity::Normal => egui::Color32::from_rgb(0x00, 0x80, 0x00),
    }
}

/// Paints toasts grouped by their position, oldest on top.
pub fn show(ctx: &egui::Context, toasts: &[Toast]) {
    let mut positions: Vec<Position> = Vec::new();
    for toast in toasts {
        if !positions.contains(&toast.notification.position) {
            positions.push(toast.notification.position);
        }
    }

    for position in positions {
        let (align, offset) = anchor(position);

        egui::Area::new(egui::Id::new(("toasts", position as u8)))
            .anchor(align, offset)
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                for toast in toasts.iter().filter(|t| t.notification.position == position) {
                    egui::Frame::none()
                        .fill(background(toast.notification.severity))
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(14.0, 8.0))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(&toast.notification.message)
                                    .color(egui::Color32::WHITE)
                                    .size(15.0),
                            );
                        });
                    ui.add_space(6.0);
                }
            });
    }
}
