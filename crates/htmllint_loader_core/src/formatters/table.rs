//! Plain-text table layout measured on visible width.

use console::measure_text_width;

/// Horizontal gap between cells.
const COLUMN_GAP: &str = "  ";

/// Cell alignment within its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Align {
    #[default]
    Left,
    Right,
    Center,
}

/// Lays out `rows` as aligned text, one line per row.
///
/// Widths ignore ANSI escape sequences, so styled cells line up with their
/// unstyled neighbours. Columns without an entry in `align` are left-aligned.
/// Trailing whitespace is trimmed from every line.
pub(crate) fn render(rows: &[Vec<String>], align: &[Align]) -> String {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let width = measure_text_width(cell);
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    rows.iter()
        .map(|row| {
            let line = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let pad = widths[i] - measure_text_width(cell);
                    pad_cell(cell, pad, align.get(i).copied().unwrap_or_default())
                })
                .collect::<Vec<_>>()
                .join(COLUMN_GAP);
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn pad_cell(cell: &str, pad: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{}{}", cell, " ".repeat(pad)),
        Align::Right => format!("{}{}", " ".repeat(pad), cell),
        Align::Center => {
            let left = pad.div_ceil(2);
            format!("{}{}{}", " ".repeat(left), cell, " ".repeat(pad - left))
        }
    }
}
