use comfy_table::{presets, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::app::GlobalOptions;

/// Print `data` as JSON (if `--json`) or call `display_fn` for human-readable output.
pub fn print_output<T: Serialize>(
    data: &T,
    opts: &GlobalOptions,
    display_fn: impl FnOnce(&T),
) -> anyhow::Result<()> {
    if opts.json {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        display_fn(data);
    }
    Ok(())
}

/// Borderless table with a header row. `right` lists the columns holding numbers.
pub fn table(headers: &[&str], right: &[usize]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    align(&mut table, headers.len(), right);
    table
}

/// Label/value block: one row per present value, labels followed by a colon.
pub fn fields(rows: &[(&str, Option<String>)]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    for (label, value) in rows {
        if let Some(value) = value {
            table.add_row(vec![format!("{label}:"), value.clone()]);
        }
    }
    align(&mut table, 2, &[]);
    table
}

fn align(table: &mut Table, columns: usize, right: &[usize]) {
    let last = columns.saturating_sub(1);
    for index in 0..columns {
        if let Some(column) = table.column_mut(index) {
            if right.contains(&index) {
                column.set_cell_alignment(CellAlignment::Right);
            }
            // Two spaces between columns, none at the outer edges
            column.set_padding((u16::from(index != 0), u16::from(index != last)));
        }
    }
}

/// Render `table` without trailing whitespace.
pub fn render(table: &Table) -> String {
    table
        .to_string()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}
