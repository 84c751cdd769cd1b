//! The callback interface the parser drives, plus C0/C1 byte names.

/// Sink for parser events.
///
/// One sequence family per method. `command` carries the intermediate bytes
/// and the final byte of an ESC/CSI/DCS sequence (for CSI this includes a
/// leading private marker such as `?` when present); `args` holds the parsed
/// numeric parameters; `payload` is the accumulated body of an OSC or DCS
/// string.
///
/// Implementations must not reenter [`crate::Parser::consume`] from inside a
/// callback; the parser's accumulation buffers are live across the call.
pub trait Actions {
    /// A C0 or C1 control byte (BEL, BS, HT, LF, CR, ...).
    fn control(&mut self, byte: u8);

    /// An ESC sequence; the final byte is the last byte of `command`.
    fn escape(&mut self, command: &str);

    /// A control sequence (CSI).
    fn csi(&mut self, command: &str, args: &[u16]);

    /// A device control string (DCS).
    fn dcs(&mut self, command: &str, args: &[u16], payload: &str);

    /// An operating system command (OSC).
    fn osc(&mut self, payload: &str);
}

pub mod c0 {
    pub const BEL: u8 = 0x07;
    pub const BS: u8 = 0x08;
    pub const HT: u8 = 0x09;
    pub const LF: u8 = 0x0A;
    pub const VT: u8 = 0x0B;
    pub const FF: u8 = 0x0C;
    pub const CR: u8 = 0x0D;
    pub const CAN: u8 = 0x18;
    pub const SUB: u8 = 0x1A;
    pub const ESC: u8 = 0x1B;
    pub const DEL: u8 = 0x7F;
}

pub mod c1 {
    pub const DCS: u8 = 0x90;
    pub const SOS: u8 = 0x98;
    pub const CSI: u8 = 0x9B;
    pub const ST: u8 = 0x9C;
    pub const OSC: u8 = 0x9D;
    pub const PM: u8 = 0x9E;
    pub const APC: u8 = 0x9F;
}
