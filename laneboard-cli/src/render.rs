//! Human-readable output

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use laneboard::{BoardStore, LogEntry};
use serde_json::Value;

const TABLE_WIDTH: u16 = 120;

/// The board as a table: one table column per board column, cards top to bottom
pub fn board_table(store: &BoardStore) -> String {
    let columns = store.columns_sorted();
    if columns.is_empty() {
        return "(no columns)".to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(TABLE_WIDTH);
    table.set_header(
        columns
            .iter()
            .map(|c| format!("{} ({})", c.title, store.card_count(&c.id)))
            .collect::<Vec<_>>(),
    );

    let cards: Vec<_> = columns.iter().map(|c| store.cards_of(&c.id)).collect();
    let depth = cards.iter().map(Vec::len).max().unwrap_or(0);
    for row in 0..depth {
        table.add_row(
            cards
                .iter()
                .map(|column| column.get(row).map(|c| c.title.clone()).unwrap_or_default())
                .collect::<Vec<_>>(),
        );
    }
    table.to_string()
}

/// One line describing a command result
pub fn summary(verb: &str, value: &Value) -> String {
    if value.get("deleted").and_then(Value::as_bool) == Some(false) {
        return format!("nothing to delete: {} not found", text(&value["id"]));
    }

    let title = text(&value["title"]);
    let id = text(&value["id"]);
    match value.get("position").and_then(Value::as_u64) {
        Some(position) if verb == "moved" => format!("{verb} {title} ({id}) to position {position}"),
        _ if title.is_empty() => format!("{verb} {id}"),
        _ => format!("{verb} {title} ({id})"),
    }
}

/// Activity entries as `timestamp  actor  op  detail` lines
pub fn activity_lines(entries: &[LogEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let actor = entry.actor.as_deref().unwrap_or("-");
            let detail = if entry.is_failure() {
                format!("failed: {}", text(&entry.output["error"]))
            } else {
                text(&entry.output["title"])
            };
            format!(
                "{}  {:<10}  {:<14}  {}",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                actor,
                entry.op,
                detail
            )
        })
        .collect()
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
