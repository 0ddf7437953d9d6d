//! Survey charts window

use std::path::Path;

use eframe::egui::{self, Context, DragValue, RichText, ScrollArea, Ui};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use sc_core::SurveySettings;
use sc_data::{DataError, FileConfig};
use sc_ui::{apply_theme, icons, menu_bar, message_banner, show_messages, MenuAction, SurveyForm, Theme, UiMessage};
use sc_views::{
    build_views, export_plan, ExportFormat, SummaryStatsView, SurveyView, TableConfig, TableView,
};

use crate::run::RunOutput;
use crate::session::Session;

const APP_KEY: &str = "survey-charts";

const DELIMITERS: [(u8, &str); 4] = [(b',', "Comma"), (b';', "Semicolon"), (b'\t', "Tab"), (b'|', "Pipe")];

/// What survives a restart
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct PersistedState {
    form: SurveyForm,
    theme: Theme,
    file_config: FileConfig,
}

/// Result of the latest run, with the views built from it
struct RunState {
    output: RunOutput,
    charts: Vec<Box<dyn SurveyView>>,
    summary: SummaryStatsView,
}

pub struct SurveyChartsApp {
    form: SurveyForm,
    theme: Theme,

    session: Session,
    preview: Option<TableView>,
    /// Text box for adding a missing-value marker
    new_missing_pattern: String,

    /// Latest run; the error text replaces the charts when the run aborted.
    current: Result<RunState, String>,
    dirty: bool,

    messages: Vec<UiMessage>,
}

impl SurveyChartsApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        let persisted: PersistedState = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, APP_KEY))
            .unwrap_or_default();
        apply_theme(&cc.egui_ctx, &persisted.theme);

        let mut session = Session::new(persisted.file_config);
        session.use_sample()?;
        info!("Starting with the sample survey");

        let mut app = Self {
            form: persisted.form,
            theme: persisted.theme,
            session,
            preview: None,
            new_missing_pattern: String::new(),
            current: Err(String::new()),
            dirty: true,
            messages: Vec::new(),
        };
        app.refresh_preview();
        Ok(app)
    }

    fn refresh_preview(&mut self) {
        let config = TableConfig {
            max_rows_displayed: self.session.file_config.preview_rows,
            ..TableConfig::default()
        };
        self.preview = self
            .session
            .table()
            .map(|table| TableView::new(egui::Id::new("data_preview"), table, config));
    }

    fn table_loaded(&mut self) {
        self.refresh_preview();
        self.dirty = true;
    }

    /// Drop every view of the previous survey and show why.
    fn load_failed(&mut self, context: String, e: DataError) {
        error!("{}: {}", context, e);
        self.refresh_preview();
        self.current = Err(format!("{}: {}", context, e));
        self.dirty = false;
    }

    /// Recompute everything from the table and the form.
    fn rerun(&mut self) {
        let settings = self.form.settings();
        self.current = match self.session.run(&settings) {
            Ok(output) => {
                for notice in &output.report.notices {
                    warn!("{}", notice);
                }
                let charts = build_views(&output.plan, &settings.chart);
                let summary = SummaryStatsView::new(egui::Id::new("summary"), output.report.summary.clone());
                Ok(RunState { output, charts, summary })
            }
            Err(e) => {
                warn!("Run aborted: {}", e);
                Err(e.to_string())
            }
        };
        self.dirty = false;
    }

    fn open_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Survey files", &["csv", "xlsx", "xls"])
            .add_filter("CSV files", &["csv", "txt"])
            .add_filter("Excel workbooks", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
            .pick_file()
        else {
            return;
        };
        self.open_path(&path);
    }

    fn open_path(&mut self, path: &Path) {
        match self.session.open(path) {
            Ok(()) => {
                if let Some(table) = self.session.table() {
                    self.messages.push(UiMessage::info(format!(
                        "Loaded {} ({} rows)",
                        table.name(),
                        table.num_rows()
                    )));
                }
                self.table_loaded();
            }
            Err(e) => self.load_failed(format!("Could not read {}", path.display()), e),
        }
    }

    fn reload(&mut self) {
        match self.session.reload() {
            Ok(true) => self.table_loaded(),
            Ok(false) => {}
            Err(e) => self.load_failed("Could not reload the survey".to_string(), e),
        }
    }

    fn use_sample(&mut self) {
        match self.session.use_sample() {
            Ok(()) => self.table_loaded(),
            Err(e) => self.load_failed("Could not build the sample survey".to_string(), e),
        }
    }

    /// Delimiter, missing-value markers and preview length.
    fn file_options_ui(&mut self, ui: &mut Ui) {
        let before = self.session.file_config.clone();
        let config = &mut self.session.file_config;
        let new_pattern = &mut self.new_missing_pattern;

        egui::CollapsingHeader::new(format!("{} File options", icons::FOLDER))
            .default_open(false)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Delimiter");
                    let selected = DELIMITERS
                        .iter()
                        .find(|(d, _)| *d == config.delimiter)
                        .map(|(_, label)| *label)
                        .unwrap_or("Custom");
                    egui::ComboBox::from_id_source("delimiter")
                        .selected_text(selected)
                        .show_ui(ui, |ui| {
                            for (delimiter, label) in DELIMITERS {
                                ui.selectable_value(&mut config.delimiter, delimiter, label);
                            }
                        });
                });

                ui.label("Treat as missing:");
                let markers: Vec<String> = config
                    .null_config
                    .patterns
                    .iter()
                    .map(|p| if p.is_empty() { "(empty)".to_string() } else { p.clone() })
                    .collect();
                ui.label(RichText::new(markers.join("  ")).weak().small());
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(new_pattern);
                    if ui.button("Add").clicked() && !new_pattern.trim().is_empty() {
                        config.null_config.add_pattern(new_pattern.trim());
                        new_pattern.clear();
                    }
                });
                ui.checkbox(&mut config.null_config.case_sensitive, "Match case");

                ui.horizontal(|ui| {
                    ui.label("Preview rows");
                    ui.add(DragValue::new(&mut config.preview_rows).clamp_range(1..=500));
                });
            });

        let after = &self.session.file_config;
        if after.delimiter != before.delimiter || after.null_config != before.null_config {
            info!("File options changed; reloading");
            self.reload();
        } else if after.preview_rows != before.preview_rows {
            self.refresh_preview();
        }
    }

    fn save_settings(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Settings", &["json"])
            .set_file_name("survey-settings.json")
            .save_file()
        else {
            return;
        };

        let result = self
            .form
            .settings()
            .to_json()
            .map_err(anyhow::Error::from)
            .and_then(|json| std::fs::write(&path, json).map_err(anyhow::Error::from));
        match result {
            Ok(()) => self.messages.push(UiMessage::info(format!("Saved settings to {}", path.display()))),
            Err(e) => {
                error!("Failed to save settings: {}", e);
                self.messages.push(UiMessage::error(format!("Could not save settings: {}", e)));
            }
        }
    }

    fn load_settings(&mut self) {
        let Some(path) = rfd::FileDialog::new().add_filter("Settings", &["json"]).pick_file() else {
            return;
        };

        let result = std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|json| SurveySettings::from_json(&json).map_err(anyhow::Error::from));
        match result {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                self.form = SurveyForm::from_settings(&settings);
                self.dirty = true;
            }
            Err(e) => {
                error!("Failed to load settings: {}", e);
                self.messages.push(UiMessage::error(format!("Could not load settings: {}", e)));
            }
        }
    }

    fn export(&mut self, format: ExportFormat) {
        let Ok(state) = &self.current else {
            self.messages.push(UiMessage::warning("There are no charts to export"));
            return;
        };
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        let chart = self.form.chart_config();
        let stem = state.output.report.question_column.clone();
        match export_plan(&state.output.plan, &chart, &dir, &stem, format) {
            Ok(paths) => self.messages.push(UiMessage::info(format!(
                "Exported {} {} file(s) to {}",
                paths.len(),
                format.extension(),
                dir.display()
            ))),
            Err(e) => {
                error!("Export failed: {}", e);
                self.messages.push(UiMessage::error(format!("Export failed: {}", e)));
            }
        }
    }

    fn handle_menu(&mut self, ctx: &Context, action: MenuAction) {
        match action {
            MenuAction::OpenFile => self.open_file(),
            MenuAction::UseSample => self.use_sample(),
            MenuAction::LoadSettings => self.load_settings(),
            MenuAction::SaveSettings => self.save_settings(),
            MenuAction::ResetSettings => {
                self.form = SurveyForm::default();
                self.dirty = true;
            }
            MenuAction::ExportPng => self.export(ExportFormat::Png),
            MenuAction::ExportSvg => self.export(ExportFormat::Svg),
            MenuAction::ToggleDarkMode => {
                self.theme = if self.theme.dark_mode { Theme::default() } else { Theme::dark() };
                apply_theme(ctx, &self.theme);
            }
            MenuAction::Exit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn results_ui(&mut self, ui: &mut Ui) {
        show_messages(ui, &mut self.messages);

        match &mut self.current {
            Err(message) => {
                if !message.is_empty() {
                    message_banner(ui, &UiMessage::error(message.clone()));
                }
            }
            Ok(state) => {
                for notice in &state.output.report.notices {
                    message_banner(ui, &UiMessage::warning(notice.to_string()));
                }

                ui.heading(format!("{} Charts", icons::CHART));
                for view in state.charts.iter_mut() {
                    ui.push_id(view.id(), |ui| view.ui(ui));
                    ui.add_space(12.0);
                }

                ui.separator();
                state.summary.ui(ui);
            }
        }

        ui.separator();
        egui::CollapsingHeader::new(format!("{} Data preview", icons::TABLE))
            .default_open(false)
            .show(ui, |ui| match &mut self.preview {
                Some(preview) => preview.ui(ui),
                None => {
                    ui.label("No survey loaded");
                }
            });
    }
}

impl eframe::App for SurveyChartsApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if let Some(action) = menu_bar(ctx, self.session.label(), self.theme.dark_mode) {
            self.handle_menu(ctx, action);
        }

        egui::SidePanel::left("survey_form")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                ScrollArea::vertical().id_source("form_scroll").show(ui, |ui| {
                    ui.label(RichText::new(format!("{} {}", icons::FOLDER, self.session.label())).strong());
                    self.file_options_ui(ui);
                    ui.separator();
                    if self.form.ui(ui) {
                        self.dirty = true;
                    }
                });
            });

        if self.dirty {
            self.rerun();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::both().id_source("results_scroll").show(ui, |ui| self.results_ui(ui));
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let state = PersistedState {
            form: self.form.clone(),
            theme: self.theme.clone(),
            file_config: self.session.file_config.clone(),
        };
        eframe::set_value(storage, APP_KEY, &state);
    }
}
