//! Result table. Renders whatever records it is handed; it never issues
//! requests.

use eframe::egui;
use serde_json::Value;
use shared::domain::ResultRecord;

/// Column used for records that are not JSON objects.
pub const VALUE_COLUMN: &str = "value";

/// Union of record keys in first-seen order.
pub fn table_columns(records: &[ResultRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    let mut push = |name: &str| {
        if !columns.iter().any(|existing| existing == name) {
            columns.push(name.to_string());
        }
    };
    for record in records {
        match record.as_value() {
            Value::Object(map) => map.keys().for_each(|key| push(key.as_str())),
            _ => push(VALUE_COLUMN),
        }
    }
    columns
}

pub fn cell_text(record: &ResultRecord, column: &str) -> String {
    let cell = match record.as_value() {
        Value::Object(map) => map.get(column),
        other if column == VALUE_COLUMN => Some(other),
        _ => None,
    };
    match cell {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn show_results(ui: &mut egui::Ui, records: &[ResultRecord]) {
    if records.is_empty() {
        ui.weak("No results.");
        return;
    }

    let columns = table_columns(records);
    egui::ScrollArea::both()
        .id_salt("results_scroll")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            egui::Grid::new("results_table")
                .striped(true)
                .spacing(egui::vec2(16.0, 6.0))
                .show(ui, |ui| {
                    for column in &columns {
                        ui.label(egui::RichText::new(column).strong());
                    }
                    ui.end_row();

                    for record in records {
                        for column in &columns {
                            ui.label(cell_text(record, column));
                        }
                        ui.end_row();
                    }
                });
        });
}
