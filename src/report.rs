//! Plain-text and CSV renderings of the results table.

use std::{fs::File, io::Write, path::Path};

use anyhow::{Context, Result};

use crate::calculator::ResultRow;
use crate::format::format_currency;

pub const HEADERS: [&str; 6] = [
    "Mortgage Amount",
    "Down Payment",
    "Closing Costs",
    "Buyer's Agent",
    "Seller's Agent",
    "Total",
];

/// The six display cells of a row, currency formatted.
pub fn row_cells(row: &ResultRow) -> [String; 6] {
    [
        format_currency(row.mortgage_amount),
        format_currency(row.down_payment),
        format_currency(row.closing_cost),
        format_currency(row.buyer_agent_commission),
        format_currency(row.seller_agent_commission),
        format_currency(row.total),
    ]
}

/// Right-aligned text table; the entered amount's row is marked with `>`.
pub fn text_table(rows: &[ResultRow]) -> String {
    let cells: Vec<[String; 6]> = rows.iter().map(row_cells).collect();
    let mut widths = HEADERS.map(str::len);
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{h:>w$}"))
        .collect();
    out.push_str(&format!("  {}\n", header.join("  ")));

    for (row, line) in rows.iter().zip(&cells) {
        let marker = if row.is_current_amount { '>' } else { ' ' };
        let padded: Vec<String> = line
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{c:>w$}"))
            .collect();
        out.push_str(&format!("{marker} {}\n", padded.join("  ")));
    }
    out
}

pub fn write_csv<W: Write>(mut out: W, rows: &[ResultRow]) -> Result<()> {
    writeln!(
        out,
        "Mortgage Amount,Down Payment,Closing Cost,Buyer Agent Commission,Seller Agent Commission,Total,Current"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{}",
            row.mortgage_amount,
            row.down_payment,
            row.closing_cost,
            row.buyer_agent_commission,
            row.seller_agent_commission,
            row.total,
            row.is_current_amount
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn export_to_csv(path: &Path, rows: &[ResultRow]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    write_csv(file, rows).with_context(|| format!("cannot write {}", path.display()))
}
