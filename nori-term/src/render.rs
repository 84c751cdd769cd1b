//! Painting the grid back out as ANSI.
//!
//! The renderer walks the grid through its public iteration contract, so
//! rows shorter than the width read as blanks. Colors are emitted as
//! 256-color SGR sequences; the inverse attribute is resolved here by
//! swapping the color pair rather than forwarding SGR 7.

use std::io::{self, Write};

use nori_core::{Attrs, Grid};

/// Paint every cell of the grid, one line per row.
pub fn render<W: Write>(grid: &Grid, out: &mut W) -> io::Result<()> {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = grid.cell(x, y);
            let (fg, bg) = if cell.attr.contains(Attrs::INVERSE) {
                (cell.bg, cell.fg)
            } else {
                (cell.fg, cell.bg)
            };
            write!(out, "\x1b[38;5;{fg}m\x1b[48;5;{bg}m")?;
            if cell.attr.contains(Attrs::BOLD) {
                write!(out, "\x1b[1m")?;
            }
            if cell.attr.contains(Attrs::ITALIC) {
                write!(out, "\x1b[3m")?;
            }
            if cell.attr.contains(Attrs::UNDERLINE) {
                write!(out, "\x1b[4m")?;
            }
            let rune = if cell.rune.is_control() { ' ' } else { cell.rune };
            write!(out, "{rune}\x1b[0m")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// The grid as plain text, one line per row, trailing blanks trimmed.
pub fn screen_text(grid: &Grid) -> String {
    let mut out = String::new();
    for y in 0..grid.height() {
        out.push_str(&grid.row_text(y));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nori_core::{Cell, Grid};

    fn rendered(grid: &Grid) -> String {
        let mut out = Vec::new();
        render(grid, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_every_position_of_every_row() {
        let grid = Grid::new(4, 3);
        let text = rendered(&grid);
        assert_eq!(text.lines().count(), 3);
        // 4 cells per line, each wrapped in color set + reset.
        assert_eq!(text.matches("\x1b[0m").count(), 12);
    }

    #[test]
    fn default_cells_use_the_default_palette_pair() {
        let grid = Grid::new(1, 1);
        let text = rendered(&grid);
        assert!(text.contains("\x1b[38;5;7m"));
        assert!(text.contains("\x1b[48;5;0m"));
    }

    #[test]
    fn inverse_swaps_the_color_pair() {
        let mut grid = Grid::new(1, 1);
        let mut cell = Cell::new('x');
        cell.fg = 3;
        cell.bg = 5;
        cell.attr.insert(Attrs::INVERSE);
        grid.put(cell);

        let text = rendered(&grid);
        assert!(text.contains("\x1b[38;5;5m"));
        assert!(text.contains("\x1b[48;5;3m"));
    }

    #[test]
    fn attributes_are_forwarded() {
        let mut grid = Grid::new(1, 1);
        let mut cell = Cell::new('x');
        cell.attr.insert(Attrs::BOLD);
        cell.attr.insert(Attrs::UNDERLINE);
        grid.put(cell);

        let text = rendered(&grid);
        assert!(text.contains("\x1b[1m"));
        assert!(text.contains("\x1b[4m"));
        assert!(!text.contains("\x1b[3m"));
    }

    #[test]
    fn screen_text_snapshot() {
        let mut grid = Grid::new(10, 2);
        for ch in "ok".chars() {
            grid.put(Cell::new(ch));
        }
        assert_eq!(screen_text(&grid), "ok\n\n");
    }
}
