//! Result rendering using comfy-table.
//!
//! A one-by-one result prints as a bare value; anything else becomes a grid
//! with a header row, including empty results. Numbers are right-aligned.

use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell as GridCell, CellAlignment, ContentArrangement, Table, TableComponent};

use crate::execute::{Cell, QueryResult};

/// Render a query result for standard output
pub fn render(result: &QueryResult) -> String {
    match result.scalar() {
        Some(Cell::Null) => "None".to_string(),
        Some(cell) => cell.to_string(),
        None => render_grid(result),
    }
}

fn render_grid(result: &QueryResult) -> String {
    let header = result.columns.iter().enumerate().map(|(idx, name)| {
        let cell = GridCell::new(name);
        if is_numeric_column(result, idx) {
            cell.set_alignment(CellAlignment::Right)
        } else {
            cell
        }
    });

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_style(TableComponent::MiddleHeaderIntersections, '+')
        .set_style(TableComponent::LeftBorderIntersections, '+')
        .set_style(TableComponent::RightBorderIntersections, '+')
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(header);

    for row in &result.rows {
        table.add_row(row.iter().map(grid_cell));
    }

    table.to_string()
}

fn grid_cell(cell: &Cell) -> GridCell {
    match cell {
        Cell::Integer(_) | Cell::Real(_) => {
            GridCell::new(cell.to_string()).set_alignment(CellAlignment::Right)
        }
        _ => GridCell::new(cell.to_string()),
    }
}

/// At least one number and nothing but numbers or NULL
fn is_numeric_column(result: &QueryResult, idx: usize) -> bool {
    let mut values = result
        .rows
        .iter()
        .filter_map(|row| row.get(idx))
        .filter(|cell| **cell != Cell::Null)
        .peekable();

    values.peek().is_some() && values.all(|cell| matches!(cell, Cell::Integer(_) | Cell::Real(_)))
}
