//! Pure text rendering for matrices and reported sums.

use crate::matrix::Matrix;
use crate::types::Element;

/// Matrices wider than this are split into column blocks when rendered.
pub const DEFAULT_COLUMNS_PER_BLOCK: usize = 8;

/// Section rule separating the demo's output blocks.
pub fn rule(title: &str) -> String {
    format!("==== {title} ====")
}

/// One labeled result line for a phase-two worker.
pub fn format_sum_line(label: &str, value: Option<Element>) -> String {
    match value {
        Some(sum) => format!("{label}: principal diagonal sum = {sum}"),
        None => format!("{label}: principal diagonal sum is not available"),
    }
}

/// Render a matrix as fixed-width rows, split into blocks of at most
/// `columns_per_block` columns so wide matrices stay readable. Each block
/// ends with a blank line.
pub fn format_matrix(title: &str, matrix: &Matrix, columns_per_block: usize) -> String {
    let side = matrix.side();
    if side == 0 {
        return format!("{title}: empty matrix\n");
    }
    let total_columns = matrix.rows()[0].len();
    let columns_per_block = columns_per_block.clamp(1, total_columns);

    // Cells and column headers share one width so the grid lines up.
    let mut cell_width = 2;
    for row in matrix.rows() {
        for value in row {
            cell_width = cell_width.max(value.to_string().len());
        }
    }
    cell_width = cell_width.max(format!("C{total_columns}").len());
    let row_width = "row".len().max(side.to_string().len());

    let mut out = String::new();
    let mut start = 0;
    while start < total_columns {
        let end = (start + columns_per_block).min(total_columns);
        if total_columns > columns_per_block {
            out.push_str(&format!("{title} (columns {}-{})\n", start + 1, end));
        } else {
            out.push_str(title);
            out.push('\n');
        }

        out.push_str(&format!("{:>row_width$} |", "row"));
        for column in start..end {
            out.push_str(&format!(" {:>cell_width$}", format!("C{}", column + 1)));
        }
        out.push('\n');
        out.push_str(&"-".repeat(row_width + 1));
        out.push('+');
        out.push_str(&"-".repeat((end - start) * (cell_width + 1)));
        out.push('\n');

        for (index, row) in matrix.rows().iter().enumerate() {
            out.push_str(&format!("{:>row_width$} |", index + 1));
            for column in start..end {
                match row.get(column) {
                    Some(value) => out.push_str(&format!(" {value:>cell_width$}")),
                    None => out.push_str(&" ".repeat(cell_width + 1)),
                }
            }
            out.push('\n');
        }
        out.push('\n');
        start = end;
    }
    out
}
