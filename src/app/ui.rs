use std::time::Instant;

use super::PdfManager;
use crate::documents::{resolve_click, CardAction, DocumentCard, ListView, DELETE_CONFIRMATION};
use crate::notify::{AlertKind, Message};
use eframe::egui::{self, Align2, Color32, RichText, Stroke};

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const SUCCESS: Color32 = Color32::from_rgb(0, 180, 0);
const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
const MUTED: Color32 = Color32::from_rgb(150, 150, 150);
const INFO: Color32 = Color32::from_rgb(60, 130, 220);

fn kind_color(kind: AlertKind) -> Color32 {
    match kind {
        AlertKind::Success => SUCCESS,
        AlertKind::Error => ERROR,
        AlertKind::Info => INFO,
    }
}

fn status_color(status: &str) -> Color32 {
    match status {
        "completed" => SUCCESS,
        "failed" => ERROR,
        "processing" => INFO,
        "pending" => Color32::from_rgb(230, 160, 30),
        _ => MUTED,
    }
}

impl PdfManager {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                self.render_alerts(ui);

                ui.vertical_centered(|ui| {
                    ui.heading("PDF Documents");
                    ui.add_space(3.0);
                    ui.label(
                        RichText::new("Upload PDFs for processing and manage your documents")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(15.0);
                self.render_session(ui);
                ui.add_space(15.0);
                self.render_upload_form(ui);
                ui.add_space(20.0);
                self.render_documents(ui);
                ui.add_space(20.0);
            });
        });

        self.render_delete_confirmation(ctx);
    }

    fn render_alerts(&self, ui: &mut egui::Ui) {
        if self.alerts.is_empty() {
            return;
        }
        for alert in self.alerts.iter() {
            message_frame(ui, &alert.message);
            ui.add_space(4.0);
        }
    }

    fn render_session(&mut self, ui: &mut egui::Ui) {
        let base_url = self.client.session().base_url().to_string();
        let has_csrf = self.client.session().csrf_token().is_some();

        egui::CollapsingHeader::new(format!("Server: {}", base_url))
            .default_open(!has_csrf)
            .show(ui, |ui| {
                if !has_csrf {
                    ui.colored_label(
                        MUTED,
                        "No CSRF cookie in this session; uploads and deletes may be rejected.",
                    );
                }
                ui.horizontal(|ui| {
                    ui.label("Paste a request copied from the browser (Copy as cURL)");
                    ui.label("ℹ").on_hover_text_at_pointer(
                        "1. Open the documents page in your browser\n\
                         2. Open Developer Tools (F12) and go to the Network tab\n\
                         3. Reload and find the 'documents/' request\n\
                         4. Right-click and Copy as cURL",
                    );
                });
                ui.add(
                    egui::TextEdit::multiline(&mut self.session_form.curl_text)
                        .desired_width(ui.available_width())
                        .desired_rows(4)
                        .font(egui::TextStyle::Monospace)
                        .hint_text(
                            "curl 'http://127.0.0.1:8000/api/pdf/documents/' -H 'Cookie: ...'",
                        ),
                );
                ui.add_enabled_ui(!self.session_form.curl_text.trim().is_empty(), |ui| {
                    if ui.button("Use this session").clicked() {
                        self.apply_session();
                    }
                });
                if let Some(error) = &self.session_form.error {
                    ui.colored_label(ERROR, error);
                }
            });
    }

    fn render_upload_form(&mut self, ui: &mut egui::Ui) {
        let now = Instant::now();

        ui.group(|ui| {
            ui.label(RichText::new("Upload PDF").strong());
            ui.add_space(8.0);

            let active = self.form.drop_zone.is_active();
            let stroke = if active || self.form.display.has_file() {
                Stroke::new(2.0, ACCENT)
            } else {
                Stroke::new(1.0, MUTED)
            };
            let fill = if active {
                ACCENT.gamma_multiply(0.15)
            } else {
                ui.visuals().extreme_bg_color
            };

            let zone = egui::Frame::none()
                .stroke(stroke)
                .fill(fill)
                .rounding(6.0)
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        ui.label("📄");
                        ui.label(self.form.display.text());
                        ui.label(RichText::new(self.form.display.hint()).small().color(MUTED));
                    });
                })
                .response
                .interact(egui::Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            if zone.clicked() {
                self.pick_file(now);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Title (optional)");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.title)
                        .hint_text("Defaults to the file name")
                        .desired_width(ui.available_width()),
                );
            });

            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                let submitting = self.upload.is_submitting();
                ui.add_enabled_ui(!submitting, |ui| {
                    if submitting {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Uploading...");
                        });
                    } else {
                        let button =
                            egui::Button::new("📤 Upload PDF").min_size(egui::vec2(200.0, 36.0));
                        if ui.add(button).clicked() {
                            self.submit_upload(now);
                        }
                    }
                });
            });

            if let Some(message) = self.upload_message.visible() {
                ui.add_space(6.0);
                message_frame(ui, message);
            }
        });
    }

    fn render_documents(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Your documents").strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let refreshing = self.documents.is_refreshing();
                let label = self.documents.refresh_label();
                if ui.add_enabled(!refreshing, egui::Button::new(label)).clicked() {
                    self.refresh();
                }
            });
        });
        ui.add_space(8.0);

        let mut actions = Vec::new();
        match self.documents.view() {
            ListView::Cards(cards) => {
                for card in cards {
                    let deleting = self.documents.is_deleting(&card.document_id);
                    if let Some(action) = render_card(ui, card, deleting) {
                        actions.push(action);
                    }
                    ui.add_space(6.0);
                }
            }
            view => {
                if let Some(text) = view.placeholder() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(10.0);
                        ui.colored_label(MUTED, text);
                        ui.add_space(10.0);
                    });
                }
            }
        }

        for action in actions {
            self.card_action(action);
        }
    }

    fn render_delete_confirmation(&mut self, ctx: &egui::Context) {
        if self.documents.pending_confirmation().is_none() {
            return;
        }

        let mut answer = None;
        egui::Window::new("Delete document")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(DELETE_CONFIRMATION);
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                    let label = RichText::new("Delete").color(Color32::WHITE);
                    let delete = egui::Button::new(label).fill(ERROR);
                    if ui.add(delete).clicked() {
                        answer = Some(true);
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            answer = Some(false);
        }
        if let Some(accepted) = answer {
            self.answer_delete_confirmation(accepted);
        }
    }
}

fn message_frame(ui: &mut egui::Ui, message: &Message) {
    let color = kind_color(message.kind);
    egui::Frame::none()
        .stroke(Stroke::new(1.0, color))
        .fill(color.gamma_multiply(0.1))
        .rounding(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(color, &message.text);
        });
}

/// Draws one card and reports what the user clicked, if anything.
fn render_card(ui: &mut egui::Ui, card: &DocumentCard, deleting: bool) -> Option<CardAction> {
    let mut delete_clicked = false;
    let mut actions_rect = egui::Rect::NOTHING;

    let frame = egui::Frame::group(ui.style())
        .rounding(6.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&card.title).strong());
                    ui.horizontal_wrapped(|ui| {
                        let color = status_color(&card.status);
                        egui::Frame::none()
                            .fill(color.gamma_multiply(0.2))
                            .rounding(8.0)
                            .inner_margin(egui::vec2(6.0, 1.0))
                            .show(ui, |ui| {
                                ui.colored_label(color, &card.status_label);
                            })
                            .response
                            .on_hover_text(&card.status_class);
                        ui.label(&card.size);
                        if let Some(pages) = &card.pages {
                            ui.label(pages);
                        }
                        ui.label(&card.uploaded);
                    });
                    if let Some(error) = &card.error {
                        ui.colored_label(ERROR, error);
                    }
                });

                actions_rect = ui
                    .with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let button = egui::Button::new("Delete").small();
                        delete_clicked = ui.add_enabled(!deleting, button).clicked();
                    })
                    .response
                    .rect;
            });
        });

    let response = frame
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);
    let in_actions = response
        .interact_pointer_pos()
        .is_some_and(|pos| actions_rect.contains(pos));

    resolve_click(&card.document_id, response.clicked(), in_actions, delete_clicked)
}
