//! Main application UI.
//! Draws the current `DeckView` and turns button presses into controller actions.

use chrono::{DateTime, Local};
use eframe::egui;
use flashcards_app::config::AppConfig;
use flashcards_app::models::view::{EMPTY_DECK_MESSAGE, EMPTY_DECK_SUBTITLE, EMPTY_DECK_TITLE};
use flashcards_app::models::{Answer, CardView, DeckView, NewCard, Outcome, Phase};
use flashcards_app::{FlashcardError, StudyController};
use std::time::SystemTime;

/// Main application state
pub struct MyApp {
    controller: StudyController,
    config: AppConfig,

    show_confirmation_dialog: bool,
    allowed_to_close: bool,

    show_creator: bool,
    new_card: NewCard,

    show_result_dialog: bool,
    result_message: String,
}

/// Formats SystemTime as HH:MM:SS in local time
fn format_system_time(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%H:%M:%S").to_string()
}

fn phase_color(phase: Phase) -> egui::Color32 {
    match phase {
        Phase::New => egui::Color32::GRAY,
        Phase::Reviewing => egui::Color32::from_rgb(230, 126, 34),
        Phase::Consolidating => egui::Color32::from_rgb(241, 196, 15),
        Phase::Mastered => egui::Color32::from_rgb(46, 204, 113),
    }
}

/// Deferred user actions, applied after the frame is laid out
#[derive(Default)]
struct Actions {
    reveal: bool,
    grade: Option<Outcome>,
    advance: bool,
    add_card: bool,
    export: bool,
    import: bool,
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = self.controller.view();
        let mut actions = Actions::default();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_header(ui, &view);
            ui.separator();
            render_card(ui, &view);
            ui.add_space(10.0);
            render_study_controls(ui, &view, &mut actions);
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Create new card").clicked() {
                    self.show_creator = true;
                }
                if ui.button("Export deck").clicked() {
                    actions.export = true;
                }
                if ui.button("Import deck").clicked() {
                    actions.import = true;
                }
            });
        });

        if self.show_creator {
            self.render_creator(ctx, &mut actions);
        }

        self.apply(actions);

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_confirmation_dialog = true;
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = false;
                        }

                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }

        if self.show_result_dialog {
            egui::Window::new("Flashcards")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.result_message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_result_dialog = false;
                    }
                });
        }
    }
}

fn render_card(ui: &mut egui::Ui, view: &DeckView) {
    ui.group(|ui| {
        ui.set_min_height(260.0);
        ui.vertical_centered(|ui| match &view.card {
            Some(card) => render_card_sides(ui, card, view.flipped),
            None => {
                ui.heading(EMPTY_DECK_TITLE);
                ui.label(EMPTY_DECK_SUBTITLE);
                ui.add_space(20.0);
                ui.label(EMPTY_DECK_MESSAGE);
            }
        });
    });
}

fn render_card_sides(ui: &mut egui::Ui, card: &CardView, flipped: bool) {
    ui.label(&card.subject);
    ui.label(&card.topic);
    ui.colored_label(phase_color(card.phase.phase), card.phase.to_string());
    ui.add_space(20.0);

    ui.heading(&card.statement);
    if !card.hint.is_empty() {
        ui.label(egui::RichText::new(&card.hint).italics());
    }
    ui.add_space(20.0);

    if flipped {
        let color = if card.answer == Answer::True.label() {
            egui::Color32::from_rgb(46, 204, 113)
        } else {
            egui::Color32::from_rgb(231, 76, 60)
        };
        ui.label(egui::RichText::new(&card.answer).heading().color(color));
        ui.label(&card.explanation);
        if !card.mnemonic.is_empty() {
            ui.label(egui::RichText::new(&card.mnemonic).monospace());
        }
    } else {
        ui.label("(Click 'Flip card' to reveal the answer)");
    }
}

fn render_study_controls(ui: &mut egui::Ui, view: &DeckView, actions: &mut Actions) {
    let controls = view.controls;
    ui.horizontal(|ui| {
        if ui
            .add_enabled(controls.can_reveal, egui::Button::new("Flip card"))
            .clicked()
        {
            actions.reveal = true;
        }
        if ui
            .add_enabled(controls.can_grade, egui::Button::new("Correct"))
            .clicked()
        {
            actions.grade = Some(Outcome::Correct);
        }
        if ui
            .add_enabled(controls.can_grade, egui::Button::new("Incorrect"))
            .clicked()
        {
            actions.grade = Some(Outcome::Incorrect);
        }
        if ui
            .add_enabled(controls.can_advance, egui::Button::new("Next card"))
            .clicked()
        {
            actions.advance = true;
        }
    });
}

impl MyApp {
    pub fn new(controller: StudyController, config: AppConfig) -> Self {
        Self {
            controller,
            config,
            show_confirmation_dialog: false,
            allowed_to_close: false,
            show_creator: false,
            new_card: NewCard::default(),
            show_result_dialog: false,
            result_message: String::new(),
        }
    }

    fn render_header(&self, ui: &mut egui::Ui, view: &DeckView) {
        ui.horizontal(|ui| {
            ui.strong(view.score_text());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let saved = self
                    .controller
                    .last_saved()
                    .map(|t| format!("Saved at {}", format_system_time(t)))
                    .unwrap_or_default();
                ui.label(saved);
                ui.label(format!("{} cards", view.deck_size));
            });
        });
    }

    /// Renders the card creation form
    fn render_creator(&mut self, ctx: &egui::Context, actions: &mut Actions) {
        let mut close = false;
        let form = &mut self.new_card;

        egui::Window::new("Create New Card")
            .collapsible(false)
            .resizable(true)
            .show(ctx, |ui| {
                egui::Grid::new("new_card_form")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Subject:");
                        ui.text_edit_singleline(&mut form.subject);
                        ui.end_row();

                        ui.label("Topic:");
                        ui.text_edit_singleline(&mut form.topic);
                        ui.end_row();

                        ui.label("Statement:");
                        ui.text_edit_multiline(&mut form.statement);
                        ui.end_row();

                        ui.label("Hint:");
                        ui.text_edit_singleline(&mut form.hint);
                        ui.end_row();

                        ui.label("Answer:");
                        egui::ComboBox::from_id_source("new_card_answer")
                            .selected_text(form.answer.as_str())
                            .show_ui(ui, |ui| {
                                for answer in [Answer::True, Answer::False] {
                                    ui.selectable_value(
                                        &mut form.answer,
                                        answer.label().to_string(),
                                        answer.label(),
                                    );
                                }
                            });
                        ui.end_row();

                        ui.label("Explanation:");
                        ui.text_edit_multiline(&mut form.explanation);
                        ui.end_row();

                        ui.label("Mnemonic:");
                        ui.text_edit_singleline(&mut form.mnemonic);
                        ui.end_row();
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Add card").clicked() {
                        actions.add_card = true;
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });

        if close {
            self.show_creator = false;
        }
    }

    /// Executes deferred actions
    fn apply(&mut self, actions: Actions) {
        if actions.reveal {
            self.controller.reveal();
        }
        if let Some(outcome) = actions.grade {
            if let Err(e) = self.controller.grade(outcome) {
                self.show_message(format!("Could not save your progress: {}", e));
            }
        }
        if actions.advance {
            self.controller.advance();
        }
        if actions.add_card {
            self.handle_add_card();
        }
        if actions.export {
            self.handle_export();
        }
        if actions.import {
            self.handle_import();
        }
    }

    fn show_message(&mut self, message: String) {
        self.result_message = message;
        self.show_result_dialog = true;
    }

    /// Adds the card from the form; the form is kept open on failure
    fn handle_add_card(&mut self) {
        match self.controller.add_card(self.new_card.clone()) {
            Ok(_) => {
                self.new_card = NewCard::default();
                self.show_creator = false;
                self.show_message("Card added successfully!".to_string());
            }
            // The card is already in the deck, so the form is cleared either way
            Err(e @ FlashcardError::PersistFailed { .. }) => {
                self.new_card = NewCard::default();
                self.show_creator = false;
                self.show_message(format!(
                    "Card added, but the deck could not be saved.\n\n{}",
                    e
                ));
            }
            Err(e) => {
                tracing::info!("Rejected new card: {}", e);
                self.show_message(format!(
                    "Please fill in the statement and the answer.\n\n{}",
                    e
                ));
            }
        }
    }

    /// Handles deck export to JSON file
    fn handle_export(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(self.config.export_file_name.as_str())
            .add_filter("JSON files", &["json"])
            .save_file()
        {
            match self.controller.export_file(&path) {
                Ok(_) => self.show_message(format!(
                    "Deck exported successfully with {} cards!",
                    self.controller.store().len()
                )),
                Err(e) => {
                    tracing::error!("Export failed: {}", e);
                    self.show_message(format!("Export failed: {}", e));
                }
            }
        }
    }

    /// Handles deck import from JSON file
    fn handle_import(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        {
            match self.controller.import_file(&path) {
                Ok(count) => self.show_message(format!("Success! {} cards imported.", count)),
                Err(FlashcardError::PersistFailed { applied, source }) => {
                    self.show_message(format!(
                        "{} cards imported, but the deck could not be saved.\n\n{}",
                        applied, source
                    ));
                }
                Err(e) => {
                    tracing::warn!("Import of {} failed: {}", path.display(), e);
                    self.show_message(format!(
                        "Import failed: {}\n\nThe file must be a JSON array of cards, each with \
                         at least a \"statement\" and an \"answer\" (TRUE or FALSE).",
                        e
                    ));
                }
            }
        }
    }
}
