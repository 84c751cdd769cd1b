//! The escape sequence state machine.
//!
//! Fourteen states, driven one codepoint at a time. Each transition runs the
//! old state's exit action, an optional transition action, and the new
//! state's entry action, in that order. String-accumulating states emit their
//! payload from the exit action, so any byte that forces them out (a string
//! terminator, ESC, CAN) flushes what was collected.

use crate::action::{c0, c1, Actions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    OscString,
    SosPmApcString,
    Escape,
    EscapeIntermediate,
    CsiEntry,
    CsiIntermediate,
    CsiParam,
    CsiIgnore,
    DcsEntry,
    DcsIntermediate,
    DcsParam,
    DcsPassthrough,
    DcsIgnore,
}

pub struct Parser {
    state: State,
    command: String,
    args: Vec<u16>,
    payload: String,
    arg_in_progress: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            state: State::Ground,
            command: String::new(),
            args: Vec::new(),
            payload: String::new(),
            arg_in_progress: false,
        }
    }

    /// Feed one codepoint.
    ///
    /// Returns `true` if the parser consumed it; `false` means the caller
    /// should print the codepoint as-is. Printable codepoints in the ground
    /// state take the `false` path without touching the state machine, which
    /// is the hot case for ordinary text output.
    #[inline]
    pub fn consume<S: Actions>(&mut self, rune: u32, sink: &mut S) -> bool {
        if self.state == State::Ground && (matches!(rune, 0x20..=0x7E) || rune >= 0xA0) {
            return false;
        }
        self.handle(rune, sink);
        true
    }

    /// Drop any partial sequence and return to the ground state.
    pub fn reset(&mut self) {
        self.state = State::Ground;
        self.clear();
    }

    fn handle<S: Actions>(&mut self, rune: u32, sink: &mut S) {
        // Fold codepoints at or above 0xA0 onto the 7-bit range. C1 controls
        // (0x80..0x9F) pass through unfolded so they can be recognized below.
        let c = if rune >= 0xA0 {
            (rune & 0x7F) as u8
        } else {
            rune as u8
        };

        // Bytes handled the same way in every state.
        match c {
            c0::ESC => return self.transition(sink, State::Escape),
            c1::DCS => return self.transition(sink, State::DcsEntry),
            c1::CSI => return self.transition(sink, State::CsiEntry),
            c1::ST => return self.transition(sink, State::Ground),
            c1::OSC => return self.transition(sink, State::OscString),
            c1::SOS | c1::PM | c1::APC => {
                return self.transition(sink, State::SosPmApcString);
            }
            c0::CAN | c0::SUB | 0x80..=0x8F | 0x91..=0x97 | 0x99 | 0x9A => {
                return self.transition_with(sink, State::Ground, |_, sink| sink.control(c));
            }
            c0::DEL if self.state != State::OscString => return,
            _ => {}
        }

        // Remaining C0 controls have uniform rules per state.
        if c < 0x20 {
            match self.state {
                State::Ground
                | State::Escape
                | State::EscapeIntermediate
                | State::CsiEntry
                | State::CsiIntermediate
                | State::CsiParam
                | State::CsiIgnore => sink.control(c),
                State::DcsPassthrough => self.payload.push(c as char),
                _ => {}
            }
            return;
        }

        match self.state {
            // Printables in ground never reach handle(); see consume().
            State::Ground => {}
            State::Escape => self.escape(c, sink),
            State::EscapeIntermediate => self.escape_tail(c, sink),
            State::CsiEntry => self.csi_entry(c, sink),
            State::CsiParam => self.csi_param(c, sink),
            State::CsiIntermediate => self.csi_intermediate(c, sink),
            State::CsiIgnore => {
                if c >= 0x40 {
                    self.transition(sink, State::Ground);
                }
            }
            State::DcsEntry => self.dcs_entry(c, sink),
            State::DcsParam => self.dcs_param(c, sink),
            State::DcsIntermediate => self.dcs_intermediate(c, sink),
            State::DcsPassthrough => self.payload.push(c as char),
            State::DcsIgnore => {}
            State::OscString => self.payload.push(c as char),
            State::SosPmApcString => {}
        }
    }

    fn escape<S: Actions>(&mut self, c: u8, sink: &mut S) {
        match c {
            0x50 => self.transition(sink, State::DcsEntry),
            0x5B => self.transition(sink, State::CsiEntry),
            0x5D => self.transition(sink, State::OscString),
            0x58 | 0x5E | 0x5F => self.transition(sink, State::SosPmApcString),
            _ => self.escape_tail(c, sink),
        }
    }

    /// Intermediate-or-final handling shared by Escape and EscapeIntermediate.
    fn escape_tail<S: Actions>(&mut self, c: u8, sink: &mut S) {
        if c < 0x30 {
            self.transition_with(sink, State::EscapeIntermediate, |p, _| {
                p.command.push(c as char);
            });
        } else {
            self.transition_with(sink, State::Ground, |p, sink| {
                p.command.push(c as char);
                sink.escape(&p.command);
            });
        }
    }

    fn csi_entry<S: Actions>(&mut self, c: u8, sink: &mut S) {
        // 0x3B..=0x3F: private marker bytes. This range admits `;`, which the
        // DEC chart treats as a parameter separator; observed emulators fold
        // a leading `;` into the command, and we match them.
        if c > 0x3A && c < 0x40 {
            self.transition_with(sink, State::CsiParam, |p, _| p.command.push(c as char));
        } else {
            self.csi_param(c, sink);
        }
    }

    fn csi_param<S: Actions>(&mut self, c: u8, sink: &mut S) {
        if self.param_parse(c) {
            self.transition(sink, State::CsiParam);
        } else {
            self.csi_intermediate(c, sink);
        }
    }

    fn csi_intermediate<S: Actions>(&mut self, c: u8, sink: &mut S) {
        self.command.push(c as char);
        if c >= 0x40 {
            self.transition_with(sink, State::Ground, |p, sink| {
                sink.csi(&p.command, &p.args);
            });
        } else if c < 0x30 {
            self.transition(sink, State::CsiIntermediate);
        } else {
            self.transition(sink, State::CsiIgnore);
        }
    }

    fn dcs_entry<S: Actions>(&mut self, c: u8, sink: &mut S) {
        if c > 0x3A && c < 0x40 {
            self.transition_with(sink, State::DcsParam, |p, _| p.command.push(c as char));
        } else {
            self.dcs_param(c, sink);
        }
    }

    fn dcs_param<S: Actions>(&mut self, c: u8, sink: &mut S) {
        if self.param_parse(c) {
            self.transition(sink, State::DcsParam);
        } else {
            self.dcs_intermediate(c, sink);
        }
    }

    fn dcs_intermediate<S: Actions>(&mut self, c: u8, sink: &mut S) {
        if c >= 0x40 {
            // The final byte opens the passthrough body.
            self.transition_with(sink, State::DcsPassthrough, |p, _| {
                p.payload.push(c as char);
            });
        } else if c < 0x30 {
            self.transition_with(sink, State::DcsIntermediate, |p, _| {
                p.command.push(c as char);
            });
        } else {
            self.transition(sink, State::DcsIgnore);
        }
    }

    /// Accumulate one parameter byte. Returns false if `c` is not a
    /// parameter byte and the caller should treat it as an intermediate.
    fn param_parse(&mut self, c: u8) -> bool {
        if c == b';' {
            self.arg_in_progress = false;
            return true;
        }
        if c.is_ascii_digit() {
            if !self.arg_in_progress {
                self.args.push(0);
                self.arg_in_progress = true;
            }
            if let Some(last) = self.args.last_mut() {
                *last = last.saturating_mul(10).saturating_add((c - b'0') as u16);
            }
            return true;
        }
        false
    }

    fn transition<S: Actions>(&mut self, sink: &mut S, next: State) {
        self.transition_with(sink, next, |_, _| {});
    }

    /// Exit action of the old state, then `action`, then entry action of the
    /// new state. The exit action observes the old state; the entry action
    /// observes the new one.
    fn transition_with<S: Actions>(
        &mut self,
        sink: &mut S,
        next: State,
        action: impl FnOnce(&mut Self, &mut S),
    ) {
        self.exit(sink);
        action(self, sink);
        self.enter(next);
        self.state = next;
    }

    fn enter(&mut self, state: State) {
        match state {
            State::Ground | State::Escape | State::CsiEntry | State::DcsEntry => self.clear(),
            _ => {}
        }
    }

    fn exit<S: Actions>(&mut self, sink: &mut S) {
        match self.state {
            State::OscString => sink.osc(&self.payload),
            State::DcsPassthrough => sink.dcs(&self.command, &self.args, &self.payload),
            _ => {}
        }
    }

    fn clear(&mut self) {
        self.command.clear();
        self.payload.clear();
        self.args.clear();
        self.arg_in_progress = false;
    }
}
