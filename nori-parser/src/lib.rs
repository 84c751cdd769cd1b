//! Nori Terminal Parser
//!
//! This crate implements a DEC/ANSI escape sequence parser as a deterministic
//! state machine over Unicode codepoints. It classifies the stream into
//! printable runes, C0/C1 control bytes, and the structured sequence families
//! (ESC, CSI, DCS, OSC, SOS/PM/APC), dispatching them to an [`Actions`] sink.
//!
//! The state machine follows the DEC parser described at
//! <https://vt100.net/emu/dec_ansi_parser>. OSC and DCS payloads are not
//! interpreted here; they are accumulated and handed to the sink whole.
//!
//! Callers feed codepoints one at a time through [`Parser::consume`]. The
//! return value tells the caller whether the codepoint was swallowed by the
//! machine or should be printed as-is; the common case of printable ASCII in
//! the ground state never enters the state machine at all.

pub mod action;
pub mod parser;
pub mod utf8;

pub use action::Actions;
pub use parser::Parser;
pub use utf8::{Decoded, Utf8Decoder};
