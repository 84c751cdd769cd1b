//! End-to-end tests: byte streams in, screen state out.
//!
//! Each test feeds a literal escape-sequence stream to a fresh terminal and
//! checks the resulting grid, the way a renderer would read it.

use nori_core::{Attrs, Cell, DEFAULT_FG};
use nori_term::render::screen_text;
use nori_term::Terminal;

fn term_with(cols: usize, rows: usize, input: &[u8]) -> Terminal {
    let mut term = Terminal::new(cols, rows);
    term.process(input);
    term
}

#[test]
fn plain_text() {
    let term = term_with(80, 25, b"hi");
    assert_eq!(term.grid().cell(0, 0).rune, 'h');
    assert_eq!(term.grid().cell(1, 0).rune, 'i');
    assert_eq!(term.grid().cursor(), (2, 0));
}

#[test]
fn soft_wrap_at_the_last_column() {
    let term = term_with(5, 2, b"abcdef");
    assert_eq!(term.grid().row_text(0), "abcde");
    assert_eq!(term.grid().cell(0, 1).rune, 'f');
    assert_eq!(term.grid().cursor(), (1, 1));
}

#[test]
fn sgr_then_text() {
    let term = term_with(80, 25, b"\x1b[31;1mX");
    let cell = term.grid().cell(0, 0);
    assert_eq!(cell.rune, 'X');
    assert_eq!(cell.fg, 1);
    assert!(cell.attr.contains(Attrs::BOLD));
}

#[test]
fn indexed_256_color_and_out_of_range_snap() {
    let term = term_with(80, 25, b"\x1b[38;5;200mY\x1b[38;5;300mZ");
    assert_eq!(term.grid().cell(0, 0).fg, 200);
    assert_eq!(term.grid().cell(1, 0).fg, DEFAULT_FG);
}

#[test]
fn private_marker_csi_leaves_the_grid_alone() {
    let term = term_with(80, 25, b"\x1b[?25h");
    assert_eq!(term.grid().cursor(), (0, 0));
    for y in 0..term.grid().height() {
        assert_eq!(term.grid().row_text(y), "");
    }
}

#[test]
fn osc_title_is_swallowed() {
    // The single-byte string terminator is the codepoint U+009C, which a
    // UTF-8 byte stream carries as C2 9C.
    let term = term_with(80, 25, "\x1b]0;title\u{9c}after".as_bytes());
    assert_eq!(term.grid().row_text(0), "after");
}

#[test]
fn scroll_on_overflow() {
    let term = term_with(3, 2, b"AB\nCD\nEF");
    assert_eq!(term.grid().row_text(0), "CD");
    assert_eq!(term.grid().row_text(1), "EF");
}

#[test]
fn crlf_streams_render_like_nl_streams() {
    let nl = term_with(10, 4, b"one\ntwo\nthree");
    let crlf = term_with(10, 4, b"one\r\ntwo\r\nthree");
    assert_eq!(screen_text(nl.grid()), screen_text(crlf.grid()));
}

#[test]
fn colored_prompt_line() {
    // A shell-style prompt: green user, default text, styled command.
    let term = term_with(40, 5, b"\x1b[32muser\x1b[0m$ \x1b[1mls\x1b[0m\n");
    assert_eq!(term.grid().row_text(0), "user$ ls");
    assert_eq!(term.grid().cell(0, 0).fg, 2);
    assert_eq!(term.grid().cell(4, 0).fg, DEFAULT_FG);
    assert!(term.grid().cell(6, 0).attr.contains(Attrs::BOLD));
    assert_eq!(term.grid().cursor(), (0, 1));
}

#[test]
fn tabs_align_columns() {
    let term = term_with(40, 3, b"a\tb\nxx\tc");
    assert_eq!(term.grid().cell(8, 0).rune, 'b');
    assert_eq!(term.grid().cell(8, 1).rune, 'c');
}

#[test]
fn progress_bar_overwrites_in_place() {
    let term = term_with(20, 2, b"50%\r75%\r100%");
    assert_eq!(term.grid().row_text(0), "100%");
    assert_eq!(term.grid().cursor(), (4, 0));
}

#[test]
fn long_output_keeps_only_the_visible_tail() {
    let mut input = Vec::new();
    for i in 0..50 {
        input.extend_from_slice(format!("line {i}\n").as_bytes());
    }
    input.extend_from_slice(b"end");
    let term = term_with(20, 5, &input);
    assert_eq!(term.grid().row_text(0), "line 46");
    assert_eq!(term.grid().row_text(3), "line 49");
    assert_eq!(term.grid().row_text(4), "end");
}

#[test]
fn resize_taller_then_back() {
    let mut term = Terminal::new(20, 4);
    term.process(b"aa\nbb\ncc\ndd");
    term.resize(20, 8);
    assert_eq!(term.grid().row_text(4), "aa");
    assert_eq!(term.grid().row_text(7), "dd");

    term.resize(20, 4);
    assert_eq!(term.grid().row_text(0), "aa");
    assert_eq!(term.grid().row_text(3), "dd");

    // The terminal keeps working after the round trip.
    term.process(b"!");
    assert_eq!(term.grid().row_text(3), "dd!");
}

#[test]
fn mixed_utf8_and_sequences() {
    let term = term_with(40, 3, "\x1b[35mλ\x1b[0m calc 世界\n".as_bytes());
    assert_eq!(term.grid().row_text(0), "λ calc 世界");
    assert_eq!(term.grid().cell(0, 0).fg, 5);
}

#[test]
fn default_cells_compare_equal_to_a_fresh_cell() {
    let term = term_with(10, 3, b"x");
    assert_eq!(term.grid().cell(5, 2), Cell::default());
}
