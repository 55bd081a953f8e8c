use super::{DriveDropApp, View};
use crate::upload::ItemStatus;
use crate::utils::FileSizeUtils;
use eframe::egui::{self, Align2, Color32, RichText, Stroke};
use rfd::FileDialog;

const ACCENT: Color32 = Color32::from_rgb(66, 133, 244);
const SUCCESS: Color32 = Color32::from_rgb(0, 180, 0);
const FAILURE: Color32 = Color32::from_rgb(220, 50, 50);
const MUTED: Color32 = Color32::from_rgb(150, 150, 150);

impl DriveDropApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                ui.heading("Drive Drop");
                ui.add_space(5.0);
                ui.label(
                    RichText::new("Upload files and get shareable download links")
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                );
            });
            ui.add_space(20.0);

            match self.state.view {
                View::Default => self.render_default(ui),
                View::Progress => self.render_progress(ui),
                View::Success => self.render_success(ui),
                View::Error => self.render_error(ui),
            }
        });

        self.render_alert(ctx);
    }

    fn render_default(&mut self, ui: &mut egui::Ui) {
        let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        let stroke_color = if hovering { ACCENT } else { MUTED };

        let zone = egui::Frame::none()
            .stroke(Stroke::new(2.0, stroke_color))
            .rounding(8.0)
            .inner_margin(30.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("📁").size(32.0));
                    ui.add_space(8.0);
                    ui.label("Drag & drop files here, or click to browse");
                });
            });

        let clicked = zone
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand)
            .clicked();

        ui.add_space(15.0);
        let button = ui.vertical_centered(|ui| {
            ui.add(egui::Button::new("📤 Select Files").min_size(egui::vec2(200.0, 40.0)))
                .clicked()
        });

        if clicked || button.inner {
            if let Some(paths) = FileDialog::new().pick_files() {
                self.start_upload(paths);
            }
        }
    }

    fn render_progress(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label(RichText::new(&self.state.title).strong());
            ui.add(
                egui::ProgressBar::new(self.state.overall_progress())
                    .show_percentage()
                    .animate(true)
                    .fill(ACCENT),
            );
        });

        ui.add_space(10.0);
        egui::ScrollArea::vertical().show(ui, |ui| {
            for row in &self.state.rows {
                ui.horizontal(|ui| {
                    ui.label(&row.name);
                    ui.label(
                        RichText::new(FileSizeUtils::format_size(row.size)).color(MUTED),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.colored_label(status_color(&row.status), row.status.label());
                    });
                });
                ui.add(
                    egui::ProgressBar::new(row.status.progress()).fill(status_color(&row.status)),
                );
                ui.add_space(6.0);
            }
        });
    }

    fn render_success(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.colored_label(SUCCESS, "✅ Upload complete!");
        });
        ui.add_space(10.0);

        egui::ScrollArea::vertical()
            .max_height(link_list_height(ui.available_height()))
            .show(ui, |ui| {
                egui::Frame::none()
                    .fill(ui.style().visuals.extreme_bg_color)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        for file in &self.state.uploaded_files {
                            ui.horizontal(|ui| {
                                ui.label(&file.name);
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.link("Download").on_hover_text(&file.url).clicked() {
                                            if let Err(e) = open::that(&file.url) {
                                                tracing::warn!(url = %file.url, error = %e, "Failed to open link");
                                            }
                                        }
                                    },
                                );
                            });
                            ui.add_space(4.0);
                        }
                    });
            });

        ui.add_space(15.0);
        ui.vertical_centered(|ui| {
            if ui.button("Upload another").clicked() {
                self.state.return_to_default();
            }
        });
    }

    fn render_error(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.colored_label(FAILURE, "❌ Something went wrong");
            if let Some(message) = &self.state.error_message {
                ui.add_space(5.0);
                ui.label(message);
            }
            ui.add_space(15.0);
            if ui.button("Try again").clicked() {
                self.state.return_to_default();
            }
        });
    }

    /// Oldest queued alert as a modal window
    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.state.alerts.front().cloned() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.state.alerts.pop_front();
        }
    }
}

/// Room for the download list, leaving space for the button below it
fn link_list_height(available: f32) -> f32 {
    (available - 60.0).max(0.0)
}

fn status_color(status: &ItemStatus) -> Color32 {
    match status {
        ItemStatus::Waiting => MUTED,
        ItemStatus::Processing | ItemStatus::Shortening => ACCENT,
        ItemStatus::Complete => SUCCESS,
        ItemStatus::Failed(_) => FAILURE,
    }
}
