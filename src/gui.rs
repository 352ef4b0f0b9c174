use crate::config::Config;
use crate::editor::PrefsEditor;
use crate::native::PlistPrefs;
use crate::session::{CommitOutcome, PendingField};
use crate::statics;
use crate::store::PrefStore;
use crate::value::{PrefEntry, PrefType};
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::{path::PathBuf, time::Instant};

pub fn run_gui(config: Config) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 600.0])
            .with_min_inner_size([250.0, 300.0]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(PpeApp::new(config)))),
    )
}

/// Window state. All preference logic lives in `PrefsEditor`; this only draws it.
struct PpeApp {
    editor: PrefsEditor<PlistPrefs>,
    config: Config,
    status: String,
    about_open: bool,
    theme_dark: bool,
}

impl PpeApp {
    fn new(config: Config) -> Self {
        let editor = Self::build_editor(&config);
        Self {
            editor,
            status: format!("Loaded {}", config.plist_path.display()),
            config,
            about_open: false,
            theme_dark: true,
        }
    }

    fn build_editor(config: &Config) -> PrefsEditor<PlistPrefs> {
        let store = PrefStore::new(
            config.plist_path.clone(),
            PlistPrefs::new(config.plist_path.clone()),
        );
        let mut editor = PrefsEditor::new(store, config.reload_interval, Instant::now());
        editor.set_debug(config.debug);
        editor
    }

    fn open_file(&mut self) {
        let mut dlg = rfd::FileDialog::new().add_filter(
            statics::EN_FILTER_PLIST,
            &[statics::PP_PLIST_EXTENSION],
        );
        if let Some(dir) = self.config.plist_path.parent() {
            dlg = dlg.set_directory(dir);
        }
        let Some(path) = dlg.pick_file() else {
            return;
        };
        self.switch_to(path);
    }

    fn switch_to(&mut self, path: PathBuf) {
        let debug = self.editor.debug();
        self.config = Config {
            plist_path: path,
            debug,
            ..self.config.clone()
        };
        self.editor = Self::build_editor(&self.config);
        self.status = format!("Loaded {}", self.config.plist_path.display());
    }

    fn render_set_pref(&mut self, ui: &mut egui::Ui) {
        ui.strong(statics::EN_HEADING_SET_PREF);

        let mut key = self.editor.pending().pending_key.clone();
        let mut value = self.editor.pending().pending_value.clone();
        let mut ty = self.editor.pending().pending_type;

        ui.horizontal(|ui| {
            ui.label(statics::EN_LABEL_KEY);
            if ui.text_edit_singleline(&mut key).changed() {
                self.editor.on_field_changed(PendingField::Key(key.clone()));
            }
        });

        ui.horizontal(|ui| {
            ui.label(statics::EN_LABEL_VALUE);
            if ui
                .add(egui::TextEdit::singleline(&mut value).desired_width(140.0))
                .changed()
            {
                self.editor
                    .on_field_changed(PendingField::Value(value.clone()));
            }

            egui::ComboBox::from_id_salt("pending_type")
                .selected_text(ty.name())
                .width(70.0)
                .show_ui(ui, |ui| {
                    for candidate in PrefType::SELECTABLE {
                        ui.selectable_value(&mut ty, candidate, candidate.name());
                    }
                });
            if ty != self.editor.pending().pending_type {
                self.editor.on_field_changed(PendingField::Type(ty));
            }

            let set = egui::Button::new(statics::EN_BTN_SET).fill(egui::Color32::from_rgb(60, 120, 60));
            if ui.add(set).clicked() {
                match self.editor.on_commit() {
                    CommitOutcome::Success(v) => {
                        self.status = format!("Set {} = {v}", self.editor.pending().pending_key);
                    }
                    CommitOutcome::Failure(_) => {}
                }
            }
        });

        if let Some(err) = self.editor.error_state() {
            ui.colored_label(egui::Color32::from_rgb(220, 80, 80), err);
        }
    }

    fn render_existing(&mut self, ui: &mut egui::Ui) {
        ui.strong(statics::EN_HEADING_EXISTING);

        // Materialized snapshot; deletes are queued and applied after the pass.
        let Some(entries) = self.editor.display_set() else {
            ui.label(statics::EN_NO_PREFS_FILE);
            return;
        };
        if entries.is_empty() {
            ui.label(statics::EN_NO_PREFS);
            return;
        }

        let mut selected: Option<PrefEntry> = None;
        let row_h = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
        ui.push_id("prefs_table", |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::initial(140.0).resizable(true))
                .column(Column::initial(45.0).resizable(false))
                .column(Column::remainder().resizable(true))
                .column(Column::initial(70.0).resizable(false))
                .header(row_h, |mut header| {
                    header.col(|ui| {
                        ui.strong(statics::EN_COL_KEY);
                    });
                    header.col(|ui| {
                        ui.strong(statics::EN_COL_TYPE);
                    });
                    header.col(|ui| {
                        ui.strong(statics::EN_COL_VALUE);
                    });
                    header.col(|_ui| {});
                })
                .body(|mut body| {
                    for entry in &entries {
                        body.row(row_h, |mut row| {
                            row.col(|ui| {
                                ui.label(entry.key.as_str());
                            });
                            row.col(|ui| {
                                ui.label(entry.value.pref_type().name());
                            });
                            row.col(|ui| {
                                ui.monospace(entry.value.to_string());
                            });
                            row.col(|ui| {
                                if ui.small_button(statics::EN_BTN_EDIT).clicked() {
                                    selected = Some(entry.clone());
                                }
                                if ui.small_button(statics::EN_BTN_DELETE).clicked() {
                                    self.editor.on_delete_requested(&entry.key);
                                }
                            });
                        });
                    }
                });
        });

        if let Some(entry) = selected {
            self.editor.on_entry_selected(&entry);
        }
    }

    fn render_about(&mut self, ctx: &egui::Context) {
        let mut open = self.about_open;
        egui::Window::new(statics::EN_WINDOW_ABOUT)
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading(statics::EN_ABOUT_HEADING);
                ui.label(format!(
                    "{} {}",
                    statics::EN_ABOUT_VERSION,
                    env!("CARGO_PKG_VERSION")
                ));
                ui.label(statics::EN_ABOUT_DEBUG);
            });
        self.about_open = open;
    }
}

impl eframe::App for PpeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let generation = self.editor.cache().generation();
        self.editor.tick(Instant::now());

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button(statics::EN_BTN_OPEN).clicked() {
                    self.open_file();
                }
                if ui.button(statics::EN_BTN_RELOAD).clicked() {
                    self.editor.reload(Instant::now());
                }

                let mut debug = self.editor.debug();
                if ui.checkbox(&mut debug, statics::EN_CHECKBOX_DEBUG).changed() {
                    self.editor.set_debug(debug);
                }

                if ui.button(statics::EN_BTN_TOGGLE_THEME).clicked() {
                    self.theme_dark = !self.theme_dark;
                    if self.theme_dark {
                        ctx.set_visuals(egui::Visuals::dark());
                    } else {
                        ctx.set_visuals(egui::Visuals::light());
                    }
                }
                if ui.button(statics::EN_BTN_ABOUT).clicked() {
                    self.about_open = true;
                }
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(statics::EN_LABEL_FILE);
                ui.monospace(self.editor.store().path().display().to_string());
            });
            if !self.status.is_empty() {
                ui.label(self.status.as_str());
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_set_pref(ui);
            ui.separator();
            self.render_existing(ui);
        });

        if self.about_open {
            self.render_about(ctx);
        }

        self.editor.end_frame();

        if self.editor.cache().generation() != generation {
            ctx.request_repaint();
        }
        // Keep the time-driven reload going while the window is idle.
        ctx.request_repaint_after(self.editor.cache().interval());
    }
}
