//! Summary statistics view implementation

use egui::{Id, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use sc_core::SummaryTable;

use crate::SurveyView;

/// Descriptive statistics: one row per question, or one per group of a split
pub struct SummaryStatsView {
    id: Id,
    title: String,
    table: SummaryTable,
}

impl SummaryStatsView {
    /// Create a new summary statistics view
    pub fn new(id: Id, table: SummaryTable) -> Self {
        Self {
            id,
            title: "Summary statistics".to_string(),
            table,
        }
    }
}

impl SurveyView for SummaryStatsView {
    fn id(&self) -> Id {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "SummaryStatsView"
    }

    fn ui(&mut self, ui: &mut Ui) {
        ui.heading(&self.title);

        if self.table.is_empty() {
            ui.label(RichText::new("No data to summarize").weak());
            return;
        }

        let headers = self.table.headers();
        ScrollArea::horizontal()
            .id_source(self.id.with("scroll"))
            .show(ui, |ui| {
                let mut builder = TableBuilder::new(ui)
                    .striped(true)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::initial(120.0).at_least(80.0)); // Row label

                for _ in headers {
                    builder = builder.column(Column::initial(80.0).at_least(60.0));
                }

                builder
                    .header(20.0, |mut header| {
                        header.col(|ui| { ui.strong(""); });
                        for name in headers {
                            header.col(|ui| { ui.strong(*name); });
                        }
                    })
                    .body(|mut body| {
                        for row in self.table.rows() {
                            body.row(18.0, |mut table_row| {
                                table_row.col(|ui| { ui.strong(&row.label); });
                                for cell in row.stats.cells() {
                                    table_row.col(|ui| { ui.label(cell); });
                                }
                            });
                        }
                    });
            });
    }
}
