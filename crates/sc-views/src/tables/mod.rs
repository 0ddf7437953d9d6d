//! Data preview table

use egui::{Id, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use sc_data::SurveyTable;

use crate::SurveyView;

/// Configuration for the preview table
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub show_row_numbers: bool,
    pub striped_rows: bool,
    pub max_rows_displayed: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            show_row_numbers: true,
            striped_rows: true,
            max_rows_displayed: 10,
        }
    }
}

/// First rows of the loaded survey, as text
pub struct TableView {
    id: Id,
    title: String,
    pub config: TableConfig,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    total_rows: usize,
}

impl TableView {
    pub fn new(id: Id, table: &SurveyTable, config: TableConfig) -> Self {
        Self {
            id,
            title: format!("Data preview: {}", table.name()),
            headers: table.column_names(),
            rows: table.preview(config.max_rows_displayed),
            total_rows: table.num_rows(),
            config,
        }
    }
}

impl SurveyView for TableView {
    fn id(&self) -> Id {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "TableView"
    }

    fn ui(&mut self, ui: &mut Ui) {
        ui.heading(&self.title);
        ui.label(
            RichText::new(format!("Showing {} of {} rows", self.rows.len(), self.total_rows)).weak(),
        );

        ScrollArea::horizontal()
            .id_source(self.id.with("scroll"))
            .show(ui, |ui| {
                let mut builder = TableBuilder::new(ui)
                    .striped(self.config.striped_rows)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center));

                if self.config.show_row_numbers {
                    builder = builder.column(Column::initial(40.0).at_least(30.0));
                }
                for _ in &self.headers {
                    builder = builder.column(
                        Column::initial(100.0)
                            .at_least(60.0)
                            .at_most(300.0)
                            .clip(true),
                    );
                }

                builder
                    .header(20.0, |mut header| {
                        if self.config.show_row_numbers {
                            header.col(|ui| { ui.strong("#"); });
                        }
                        for name in &self.headers {
                            header.col(|ui| { ui.strong(name); });
                        }
                    })
                    .body(|mut body| {
                        for (row_idx, row) in self.rows.iter().enumerate() {
                            body.row(18.0, |mut table_row| {
                                if self.config.show_row_numbers {
                                    table_row.col(|ui| { ui.label(row_idx.to_string()); });
                                }
                                for cell in row {
                                    table_row.col(|ui| { ui.label(cell); });
                                }
                            });
                        }
                    });
            });
    }
}
