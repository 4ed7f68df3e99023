// ui.rs
use crate::autostart::{platform_store, AutostartStore};
use crate::config_store::ConfigStore;
use crate::icon::window_icon;
use crate::launcher::Launcher;
use crate::session::{Session, SessionState};
use crate::settings::Settings;
use eframe::egui;
use native_dialog::{FileDialog, MessageDialog, MessageType};
use std::path::PathBuf;

pub fn run(settings: Settings) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([500.0, 300.0])
            .with_min_inner_size([400.0, 240.0])
            .with_icon(window_icon()),
        ..Default::default()
    };

    eframe::run_native(
        "Startup App Selector",
        options,
        Box::new(move |cc| Box::new(LauncherApp::new(cc, settings))),
    )
}

pub struct LauncherApp {
    session: Session,
    store: ConfigStore,
    autostart: Box<dyn AutostartStore>,
    launcher: Launcher,
    settings: Settings,
    status: Option<String>,
    warned: bool,
}

impl LauncherApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let store = ConfigStore::new(&settings.config_path);
        Self {
            session: Session::open(&store),
            store,
            autostart: platform_store(&settings),
            launcher: Launcher::new(),
            settings,
            status: None,
            warned: false,
        }
    }

    fn report_load_warning(&mut self) {
        if self.warned {
            return;
        }
        self.warned = true;
        if let Some(warning) = self.session.load_warning() {
            show_message(MessageType::Error, "Config Error", warning);
        }
    }

    fn add_app(&mut self) {
        if let Some(path) = pick_executable() {
            if !self.session.add(path) {
                log::debug!("Pick ignored: already listed");
            }
        }
    }

    fn save(&mut self) {
        match self.session.save(
            &self.store,
            self.autostart.as_ref(),
            &self.settings,
            &self.launcher,
        ) {
            Ok(outcome) => {
                let kind = if outcome.is_clean() {
                    MessageType::Info
                } else {
                    MessageType::Warning
                };
                show_message(kind, "Success", &outcome.summary());
                self.status = Some(format!("Saved {} app(s)", self.session.apps().len()));
            }
            Err(e) => {
                show_message(MessageType::Error, "Error", &e.to_string());
                self.status = Some("Save failed".to_string());
            }
        }
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.report_load_warning();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Startup App Selector");

            if let Some(warning) = self.session.load_warning() {
                ui.colored_label(egui::Color32::from_rgb(220, 120, 0), warning);
            }

            ui.separator();
            self.show_app_list(ui);
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("➕ Add App").clicked() {
                    self.add_app();
                }
                if ui.button("➖ Remove Selected").clicked() {
                    self.session.remove_selected();
                }
                if ui.button("💾 Save & Enable on Startup").clicked() {
                    self.save();
                }
            });

            if self.session.state() == SessionState::Editing {
                ui.label("Unsaved changes");
            } else if let Some(status) = &self.status {
                ui.label(status);
            }
        });
    }
}

impl LauncherApp {
    fn show_app_list(&mut self, ui: &mut egui::Ui) {
        let mut clicked = None;

        egui::ScrollArea::vertical()
            .max_height(180.0)
            .show(ui, |ui| {
                for (idx, app) in self.session.apps().iter().enumerate() {
                    let is_selected = self.session.selected() == Some(idx);
                    if ui
                        .selectable_label(is_selected, app.display().to_string())
                        .clicked()
                    {
                        clicked = Some(idx);
                    }
                }
            });

        if let Some(idx) = clicked {
            self.session.select(idx);
        }
    }
}

/// `None` when the user cancels the picker.
fn pick_executable() -> Option<PathBuf> {
    let dialog = FileDialog::new();
    #[cfg(target_os = "windows")]
    let dialog = dialog.add_filter("Executables", &["exe"]);

    match dialog.show_open_single_file() {
        Ok(path) => path,
        Err(e) => {
            log::error!("File picker failed: {}", e);
            None
        }
    }
}

fn show_message(kind: MessageType, title: &str, text: &str) {
    MessageDialog::new()
        .set_type(kind)
        .set_title(title)
        .set_text(text)
        .show_alert()
        .ok();
}
