use std::time::{Duration, Instant};

use egui::{Context, RichText, TopBottomPanel};

use crate::theme::{error_color, success_color, warning_color};

/// How long info messages stay on screen. Errors and warnings stay until the
/// next run replaces them.
const INFO_LIFETIME: Duration = Duration::from_secs(6);

/// Something the user picked from the menu bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    OpenFile,
    UseSample,
    LoadSettings,
    SaveSettings,
    ResetSettings,
    ExportPng,
    ExportSvg,
    ToggleDarkMode,
    Exit,
}

/// Render the main menu bar
pub fn menu_bar(ctx: &Context, source_label: &str, dark_mode: bool) -> Option<MenuAction> {
    let mut action = None;

    TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            let mut item = |ui: &mut egui::Ui, label: &str, picked: MenuAction| {
                if ui.button(label).clicked() {
                    action = Some(picked);
                    ui.close_menu();
                }
            };

            ui.menu_button("File", |ui| {
                item(ui, "Open survey file...", MenuAction::OpenFile);
                item(ui, "Use sample data", MenuAction::UseSample);
                ui.separator();
                item(ui, "Export charts as PNG...", MenuAction::ExportPng);
                item(ui, "Export charts as SVG...", MenuAction::ExportSvg);
                ui.separator();
                item(ui, "Exit", MenuAction::Exit);
            });

            ui.menu_button("Settings", |ui| {
                item(ui, "Load settings...", MenuAction::LoadSettings);
                item(ui, "Save settings...", MenuAction::SaveSettings);
                ui.separator();
                item(ui, "Reset to defaults", MenuAction::ResetSettings);
            });

            ui.menu_button("View", |ui| {
                let label = if dark_mode { "Light mode" } else { "Dark mode" };
                item(ui, label, MenuAction::ToggleDarkMode);
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(source_label).weak());
            });
        });
    });

    action
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Error,
    Warning,
    Info,
}

/// Message shown in the banner area above the results
#[derive(Debug, Clone)]
pub struct UiMessage {
    pub level: MessageLevel,
    pub message: String,
    pub timestamp: Instant,
}

impl UiMessage {
    pub fn new(level: MessageLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(MessageLevel::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, message)
    }

    fn expired(&self, now: Instant) -> bool {
        self.level == MessageLevel::Info && now.duration_since(self.timestamp) >= INFO_LIFETIME
    }
}

/// Drop expired info messages and draw the rest.
pub fn show_messages(ui: &mut egui::Ui, messages: &mut Vec<UiMessage>) {
    let now = Instant::now();
    messages.retain(|msg| !msg.expired(now));

    for msg in messages.iter() {
        message_banner(ui, msg);
    }
}

/// Draw one message as a colored banner.
pub fn message_banner(ui: &mut egui::Ui, msg: &UiMessage) {
    let (icon, color) = match msg.level {
        MessageLevel::Error => ("⚠", error_color()),
        MessageLevel::Warning => ("ℹ", warning_color()),
        MessageLevel::Info => ("✔", success_color()),
    };

    egui::Frame::none()
        .fill(color.linear_multiply(0.15))
        .stroke(egui::Stroke::new(1.0, color))
        .rounding(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(icon).color(color));
                ui.label(&msg.message);
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_info_messages_expire() {
        let later = Instant::now() + INFO_LIFETIME + Duration::from_secs(1);
        assert!(UiMessage::info("saved").expired(later));
        assert!(!UiMessage::error("Column 'Question9' not found in the dataset").expired(later));
        assert!(!UiMessage::warning("truncated").expired(later));
    }
}
