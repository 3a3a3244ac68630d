//! The primitive and extended opcode set.
//!
//! Discriminants are pinned to `examples/original_source/src/opcodes.h`, the single
//! retrieved copy of the historical opcode table, byte for byte (see the decision
//! recorded in `SPEC_FULL.md` §9). Decoding a byte into an [`Opcode`] is total: a byte
//! that names a defined instruction or one of the original's `UNDEF_n` placeholders
//! becomes [`Opcode::Known`]; any other byte — one of the ranges the original table
//! never assigned at all — becomes [`Opcode::Unassigned`], carrying the byte itself so
//! no information is lost. [`crate::state::State::single_step`] traps on either kind of
//! undefined byte the same way; only this module distinguishes them.

use strum::FromRepr;

/// A byte that names a defined instruction in the retrieved table, including the
/// original's own `UNDEF_n` placeholder slots and its two required sentinels
/// (`UNDEFINED = 0x7f`, `NEXTFF = 0xff`).
///
/// Primitive opcodes occupy `0x00..=0x60` plus the `Undefined` trap at `0x7f`; extended
/// opcodes (host I/O and argv access) occupy `0x80..=0x90`, with `NextFf` closing the
/// space at `0xff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
#[repr(u8)]
pub enum Known {
    Next00,
    Dup,
    Drop,
    Swap,
    Over,
    Rot,
    Undef40,
    Undef41,
    Undef42,
    Pick,
    Roll,
    Undef0,
    ToR,
    RFrom,
    RFetch,
    Less,
    Undef1,
    Equal,
    Undef2,
    Undef3,
    Undef4,
    Undef5,
    Undef6,
    ULess,
    Undef7,
    Undef8,
    Undef9,
    Undef10,
    Undef11,
    Undef12,
    Plus,
    Undef13,
    Undef14,
    Undef15,
    Undef16,
    Undef17,
    Undef18,
    Star,
    Slash,
    Mod,
    SlashMod,
    USlashMod,
    SSlashRem,
    Undef19,
    Undef20,
    Undef21,
    Negate,
    Undef22,
    Undef23,
    Invert,
    And,
    Or,
    Xor,
    LShift,
    RShift,
    Undef24,
    Undef25,
    Fetch,
    Store,
    CFetch,
    CStore,
    Undef26,
    SpFetch,
    SpStore,
    RpFetch,
    RpStore,
    EpFetch,
    S0Fetch,
    HashS,
    R0Fetch,
    HashR,
    ThrowFetch,
    ThrowStore,
    MemoryFetch,
    BadFetch,
    NotAddressFetch,
    Branch,
    Undef27,
    QBranch,
    Undef28,
    Execute,
    Undef29,
    Call,
    Undef,
    Exit,
    Undef30,
    Undef31,
    Undef32,
    Undef33,
    Undef34,
    Undef35,
    J,
    Literal,
    Undef36,
    Throw,
    Halt,
    Link,
    /// Explicit undefined-instruction trap.
    Undefined = 0x7f,
    /// `argc`.
    OxArgc = 0x80,
    /// `argv[n]`.
    OxArg,
    /// Standard input file descriptor.
    OxStdin,
    /// Standard output file descriptor.
    OxStdout,
    /// Standard error file descriptor.
    OxStderr,
    OxOpenFile,
    OxCloseFile,
    OxReadFile,
    OxWriteFile,
    OxFilePosition,
    OxRepositionFile,
    OxFlushFile,
    OxRenameFile,
    OxDeleteFile,
    OxFileSize,
    OxResizeFile,
    OxFileStatus,
    /// Closes the extended-opcode space; reserved like the low-range `Undef*` slots.
    NextFf = 0xff,
}

impl Known {
    /// The table's own gaps: slots the original named but left unimplemented.
    pub const fn is_reserved(self) -> bool {
        matches!(self, Self::Undefined | Self::NextFf)
            || matches!(
                self,
                Self::Undef0
                    | Self::Undef1
                    | Self::Undef2
                    | Self::Undef3
                    | Self::Undef4
                    | Self::Undef5
                    | Self::Undef6
                    | Self::Undef7
                    | Self::Undef8
                    | Self::Undef9
                    | Self::Undef10
                    | Self::Undef11
                    | Self::Undef12
                    | Self::Undef13
                    | Self::Undef14
                    | Self::Undef15
                    | Self::Undef16
                    | Self::Undef17
                    | Self::Undef18
                    | Self::Undef19
                    | Self::Undef20
                    | Self::Undef21
                    | Self::Undef22
                    | Self::Undef23
                    | Self::Undef24
                    | Self::Undef25
                    | Self::Undef26
                    | Self::Undef27
                    | Self::Undef28
                    | Self::Undef29
                    | Self::Undef30
                    | Self::Undef31
                    | Self::Undef32
                    | Self::Undef33
                    | Self::Undef34
                    | Self::Undef35
                    | Self::Undef36
                    | Self::Undef40
                    | Self::Undef41
                    | Self::Undef42
                    | Self::Undef
            )
    }
}

/// One opcode byte, decoded totally: either a [`Known`] value, or a byte the retrieved
/// table never assigned at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// A byte the table assigns a name to, defined or reserved.
    Known(Known),
    /// A byte outside every range the table assigns, carried unchanged.
    Unassigned(u8),
}

impl Opcode {
    /// Decode `byte`. Always succeeds: unassigned ranges become `Unassigned(byte)`
    /// rather than a decode error, since dispatch — not this module — decides what to
    /// do with an undefined instruction.
    pub fn decode(byte: u8) -> Self {
        match Known::from_repr(byte) {
            Some(known) => Self::Known(known),
            None => Self::Unassigned(byte),
        }
    }

    /// The byte this opcode decoded from.
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Known(known) => known as u8,
            Self::Unassigned(byte) => byte,
        }
    }

    /// Whether dispatch should treat this byte as an undefined instruction: true for
    /// every `Unassigned` byte, and for the reserved subset of `Known` values.
    pub const fn is_reserved(self) -> bool {
        match self {
            Self::Known(known) => known.is_reserved(),
            Self::Unassigned(_) => true,
        }
    }
}

impl From<u8> for Opcode {
    fn from(byte: u8) -> Self {
        Self::decode(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_range_boundaries_match_the_retrieved_table() {
        assert_eq!(Opcode::decode(0x00), Opcode::Known(Known::Next00));
        assert_eq!(Opcode::decode(0x60), Opcode::Known(Known::Link));
        assert_eq!(Opcode::decode(0x7f), Opcode::Known(Known::Undefined));
    }

    #[test]
    fn low_gap_between_primitives_and_undefined_is_unassigned() {
        assert_eq!(Opcode::decode(0x61), Opcode::Unassigned(0x61));
        assert_eq!(Opcode::decode(0x7e), Opcode::Unassigned(0x7e));
    }

    #[test]
    fn extended_range_boundaries_match_the_retrieved_table() {
        assert_eq!(Opcode::decode(0x80), Opcode::Known(Known::OxArgc));
        assert_eq!(Opcode::decode(0x90), Opcode::Known(Known::OxFileStatus));
        assert_eq!(Opcode::decode(0xff), Opcode::Known(Known::NextFf));
    }

    #[test]
    fn high_gap_between_extended_and_nextff_is_unassigned() {
        assert_eq!(Opcode::decode(0x91), Opcode::Unassigned(0x91));
        assert_eq!(Opcode::decode(0xfe), Opcode::Unassigned(0xfe));
    }

    #[test]
    fn decode_is_total_over_every_byte_value() {
        for byte in 0..=u8::MAX {
            let opcode = Opcode::decode(byte);
            assert_eq!(opcode.as_byte(), byte);
        }
    }

    #[test]
    fn reserved_slots_are_flagged_whether_named_or_unassigned() {
        assert!(Opcode::Known(Known::Undef0).is_reserved());
        assert!(Opcode::Known(Known::Undefined).is_reserved());
        assert!(Opcode::Unassigned(0x61).is_reserved());
        assert!(!Opcode::Known(Known::Dup).is_reserved());
    }
}
