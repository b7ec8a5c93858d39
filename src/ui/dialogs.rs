// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Modal label-entry and notification dialogs.
//!
//! At most one dialog is open at a time. While one is open the app
//! ignores canvas and toolbar input.

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

/// Currently open dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dialog {
    #[default]
    None,
    LabelEntry {
        text: String,
        focus_requested: bool,
    },
    Notice {
        kind: NoticeKind,
        title: String,
        message: String,
    },
}

impl Dialog {
    pub fn label_entry() -> Self {
        Dialog::LabelEntry {
            text: String::new(),
            focus_requested: false,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Dialog::Notice {
            kind: NoticeKind::Warning,
            title: "Warning".to_string(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Dialog::Notice {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::None)
    }
}

/// What the user did with the dialog this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    None,
    /// Label entry confirmed with the raw (untrimmed) text.
    LabelEntered(String),
    Closed,
}

/// Show the open dialog, if any. Closes it on confirm, cancel or dismiss.
pub fn show(ctx: &egui::Context, dialog: &mut Dialog) -> DialogOutcome {
    let outcome = match dialog {
        Dialog::None => DialogOutcome::None,
        Dialog::LabelEntry {
            text,
            focus_requested,
        } => show_label_entry(ctx, text, focus_requested),
        Dialog::Notice {
            kind,
            title,
            message,
        } => show_notice(ctx, *kind, title, message),
    };

    if outcome != DialogOutcome::None {
        *dialog = Dialog::None;
    }
    outcome
}

fn modal_window(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
}

fn show_label_entry(
    ctx: &egui::Context,
    text: &mut String,
    focus_requested: &mut bool,
) -> DialogOutcome {
    let mut outcome = DialogOutcome::None;

    modal_window("Object Name").show(ctx, |ui| {
        ui.label("Enter object label:");
        let edit = ui.text_edit_singleline(text);
        if !*focus_requested {
            edit.request_focus();
            *focus_requested = true;
        }

        let enter = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let escape = ui.input(|i| i.key_pressed(egui::Key::Escape));

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("OK").clicked() || enter {
                outcome = DialogOutcome::LabelEntered(text.clone());
            }
            if ui.button("Cancel").clicked() || escape {
                outcome = DialogOutcome::Closed;
            }
        });
    });

    outcome
}

fn show_notice(
    ctx: &egui::Context,
    kind: NoticeKind,
    title: &str,
    message: &str,
) -> DialogOutcome {
    let mut outcome = DialogOutcome::None;

    modal_window(title).show(ctx, |ui| {
        let color = match kind {
            NoticeKind::Info => ui.visuals().text_color(),
            NoticeKind::Warning => ui.visuals().warn_fg_color,
        };
        ui.label(egui::RichText::new(message).color(color));

        ui.add_space(6.0);
        let dismiss = ui.input(|i| {
            i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)
        });
        if ui.button("OK").clicked() || dismiss {
            outcome = DialogOutcome::Closed;
        }
    });

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_constructors() {
        assert!(!Dialog::None.is_open());
        assert!(Dialog::label_entry().is_open());

        match Dialog::warning("No image loaded.") {
            Dialog::Notice { kind, title, message } => {
                assert_eq!(kind, NoticeKind::Warning);
                assert_eq!(title, "Warning");
                assert_eq!(message, "No image loaded.");
            }
            other => panic!("unexpected dialog {:?}", other),
        }
    }
}
