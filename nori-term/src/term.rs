//! Terminal state: parser events applied to the grid.
//!
//! [`Terminal`] owns the escape parser, a streaming UTF-8 decoder, and a
//! [`Performer`] holding the grid and the pen. The performer implements the
//! parser's sink: carriage return, line feed, and tab act on the grid, SGR
//! updates the pen, and everything else is logged and dropped.

use log::{debug, trace};
use nori_core::{Attrs, Cell, Grid, DEFAULT_BG, DEFAULT_FG};
use nori_parser::action::c0;
use nori_parser::{Actions, Decoded, Parser, Utf8Decoder};

pub struct Terminal {
    parser: Parser,
    decoder: Utf8Decoder,
    performer: Performer,
}

impl Terminal {
    pub fn new(w: usize, h: usize) -> Self {
        Terminal {
            parser: Parser::new(),
            decoder: Utf8Decoder::new(),
            performer: Performer {
                grid: Grid::new(w, h),
                pen: Cell::default(),
            },
        }
    }

    /// Feed raw bytes from the PTY.
    pub fn process(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            match self.decoder.feed(byte) {
                Decoded::Pending => {}
                Decoded::Rune(ch) => self.advance(ch),
                Decoded::Malformed => self.advance(char::REPLACEMENT_CHARACTER),
            }
        }
    }

    /// Feed one already-decoded codepoint.
    pub fn advance(&mut self, ch: char) {
        if !self.parser.consume(ch as u32, &mut self.performer) {
            // Fast path: a printable rune the parser declined.
            self.performer.print(ch);
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.performer.grid
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.performer.grid.resize(w, h);
    }

    #[cfg(test)]
    fn pen(&self) -> &Cell {
        &self.performer.pen
    }
}

/// Applies parser events to the grid.
struct Performer {
    grid: Grid,
    pen: Cell,
}

impl Performer {
    fn print(&mut self, ch: char) {
        self.grid.put(self.pen.styled(ch));
    }

    /// Fold SGR parameters into the pen, left to right.
    fn sgr(&mut self, args: &[u16]) {
        // The extended-color forms are recognized only as exact triples.
        if args.len() == 3 && args[0] == 38 && args[1] == 5 {
            self.pen.fg = if args[2] < 256 { args[2] as u8 } else { DEFAULT_FG };
            return;
        }
        if args.len() == 3 && args[0] == 48 && args[1] == 5 {
            self.pen.bg = if args[2] < 256 { args[2] as u8 } else { DEFAULT_BG };
            return;
        }
        if args.is_empty() {
            self.pen = Cell::default();
            return;
        }
        for &a in args {
            match a {
                0 => self.pen = Cell::default(),
                1 => self.pen.attr.insert(Attrs::BOLD),
                // 2 is faint; the closest rendition we have is un-bold.
                2 | 22 => self.pen.attr.remove(Attrs::BOLD),
                3 => self.pen.attr.insert(Attrs::ITALIC),
                23 => self.pen.attr.remove(Attrs::ITALIC),
                // 21 is double underline; single is the best fit.
                4 | 21 => self.pen.attr.insert(Attrs::UNDERLINE),
                24 => self.pen.attr.remove(Attrs::UNDERLINE),
                7 => self.pen.attr.insert(Attrs::INVERSE),
                27 => self.pen.attr.remove(Attrs::INVERSE),
                // Blink, hidden, strikethrough and their resets: accepted,
                // not rendered.
                5 | 8 | 9 | 25 | 28 | 29 => {}
                30..=37 => self.pen.fg = (a - 30) as u8,
                39 => self.pen.fg = DEFAULT_FG,
                40..=47 => self.pen.bg = (a - 40) as u8,
                49 => self.pen.bg = DEFAULT_BG,
                90..=97 => self.pen.fg = 8 + (a - 90) as u8,
                100..=107 => self.pen.bg = 8 + (a - 100) as u8,
                _ => trace!("skipping unrecognized SGR code {a}"),
            }
        }
    }
}

impl Actions for Performer {
    fn control(&mut self, byte: u8) {
        match byte {
            c0::CR => self.grid.carriage_return(),
            // The PTY runs in cooked mode where NL is the line terminator.
            c0::LF => {
                self.grid.carriage_return();
                self.grid.line_feed();
            }
            c0::HT => self.grid.tab(self.pen.styled(' ')),
            _ => trace!("ignoring control 0x{byte:02x}"),
        }
    }

    fn escape(&mut self, command: &str) {
        debug!("ignoring ESC {command}");
    }

    fn csi(&mut self, command: &str, args: &[u16]) {
        if command == "m" {
            self.sgr(args);
        } else {
            debug!("ignoring CSI {command} {args:?}");
        }
    }

    fn dcs(&mut self, command: &str, args: &[u16], payload: &str) {
        debug!(
            "ignoring DCS {command} {args:?} ({payload_len} payload bytes)",
            payload_len = payload.len()
        );
    }

    fn osc(&mut self, payload: &str) {
        debug!("ignoring OSC {payload}");
    }
}
