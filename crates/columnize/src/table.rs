use std::io::{self, Write};

use crate::color::{Color, colorize};

/// One table cell: display text plus the color it should be wrapped in
/// at flush time. Colorizing happens after padding so escape bytes never
/// count toward column widths.
#[derive(Debug, Clone)]
pub struct Cell {
    pub text: String,
    pub color: Color,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            color: Color::None,
        }
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Cell {
            text: text.into(),
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    /// Right-pad numeric-ish columns and drop columns that are empty in
    /// every row. Used for long listings.
    Right,
}

/// Buffered column-aligned writer. Rows accumulate until `flush`, which
/// computes one width per column over the whole buffer and emits aligned
/// lines. One instance per directory group; construct, fill, flush, drop.
pub struct Columnizer<W: Write> {
    out: W,
    align: Alignment,
    gutter: usize,
    rows: Vec<Vec<Cell>>,
}

impl<W: Write> Columnizer<W> {
    /// Standard left-aligned table with a two-space gutter.
    pub fn new(out: W) -> Self {
        Columnizer {
            out,
            align: Alignment::Left,
            gutter: 2,
            rows: Vec::new(),
        }
    }

    /// Right-aligned compact table: single-space gutter, all-empty
    /// columns discarded.
    pub fn align_right(out: W) -> Self {
        Columnizer {
            out,
            align: Alignment::Right,
            gutter: 1,
            rows: Vec::new(),
        }
    }

    pub fn emit_row(&mut self, cells: Vec<Cell>) {
        self.rows.push(cells);
    }

    /// Emit `texts` as one row with the cell at `highlight` colorized and
    /// the rest plain.
    pub fn emit_highlighted(&mut self, texts: Vec<String>, highlight: usize, color: Color) {
        let cells = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                if i == highlight {
                    Cell::colored(text, color)
                } else {
                    Cell::plain(text)
                }
            })
            .collect();
        self.emit_row(cells);
    }

    /// Write out every buffered row, aligned, and clear the buffer.
    pub fn flush(&mut self) -> io::Result<()> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return Ok(());
        }

        let mut widths = vec![0usize; columns];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.text.chars().count());
            }
        }

        let keep: Vec<bool> = match self.align {
            Alignment::Left => vec![true; columns],
            Alignment::Right => widths.iter().map(|&w| w > 0).collect(),
        };

        for row in self.rows.drain(..) {
            let mut line = String::new();
            let last = row
                .iter()
                .enumerate()
                .rev()
                .find(|(i, _)| keep[*i])
                .map(|(i, _)| i);
            for (i, cell) in row.into_iter().enumerate() {
                if !keep[i] {
                    continue;
                }
                let width = widths[i];
                let len = cell.text.chars().count();
                // The trailing cell of each line is never padded.
                if Some(i) == last {
                    line.push_str(&colorize(cell.color, &cell.text));
                    break;
                }
                match self.align {
                    Alignment::Left => {
                        line.push_str(&colorize(cell.color, &cell.text));
                        line.extend(std::iter::repeat_n(' ', width - len));
                    }
                    Alignment::Right => {
                        line.extend(std::iter::repeat_n(' ', width - len));
                        line.push_str(&colorize(cell.color, &cell.text));
                    }
                }
                line.extend(std::iter::repeat_n(' ', self.gutter));
            }
            writeln!(self.out, "{line}")?;
        }

        self.out.flush()
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
