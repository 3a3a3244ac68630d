//! Crate-wide error taxonomy.
//!
//! Every operation that can fail returns a typed [`Result`]; nothing in this crate panics
//! or throws on a recoverable condition. The legacy C interface this core replaces
//! reported failures as small negative integers, and some downstream tooling still
//! matches on those exact values, so every variant also exposes a [`legacy_code`] mapping
//! for callers that need bit-for-bit compatibility with the historical ABI.
//!
//! [`legacy_code`]: VmError::legacy_code

use thiserror::Error;

/// Address or range fell outside the bounds of a buffer.
pub const CODE_OUT_OF_BOUNDS: i64 = -9;
/// A word access was not aligned to the word size.
pub const CODE_MISALIGNED: i64 = -23;
/// Allocation, I/O, or a short read failed.
pub const CODE_IO: i64 = -1;
/// `single_step` needs a fetch before it has anything to dispatch.
pub const CODE_INSTRUCTION_FETCH_NEEDED: i64 = -259;

/// Errors raised by [`crate::memory::Memory`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    /// `addr` (or `addr + length`) fell outside `[0, MEMORY)`.
    #[error("address {addr:#x} out of bounds (memory size {memory_size:#x})")]
    OutOfBounds {
        /// The address that was rejected.
        addr: crate::word::UWord,
        /// The memory size at the time of the access.
        memory_size: crate::word::UWord,
    },
    /// A word access was not aligned to `WORD_SIZE`.
    #[error("address {addr:#x} is not word-aligned")]
    Misaligned {
        /// The address that was rejected.
        addr: crate::word::UWord,
    },
    /// The requested word count exceeds the addressable range, or its byte size would
    /// overflow a `usize`.
    #[error("{requested_words} words exceeds the addressable range")]
    Overflow {
        /// The word count requested.
        requested_words: crate::word::UWord,
    },
    /// The size check passed but the allocator itself refused the request.
    #[error("failed to allocate {requested_words} words")]
    Alloc {
        /// The word count requested.
        requested_words: crate::word::UWord,
    },
}

impl MemoryError {
    /// Map to the legacy negative status code.
    pub const fn legacy_code(&self) -> i64 {
        match self {
            Self::OutOfBounds { .. } => CODE_OUT_OF_BOUNDS,
            Self::Misaligned { .. } => CODE_MISALIGNED,
            Self::Overflow { .. } | Self::Alloc { .. } => CODE_IO,
        }
    }
}

/// Errors raised by the stack substrate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// The requested index was not within `[0, F0 + FRAME_DEPTH)`.
    #[error("stack index {index:#x} out of bounds (frame top {frame_top:#x})")]
    OutOfBounds {
        /// The index that was rejected.
        index: crate::word::UWord,
        /// `F0 + FRAME_DEPTH` at the time of the access.
        frame_top: crate::word::UWord,
    },
}

impl StackError {
    /// Map to the legacy negative status code.
    pub const fn legacy_code(&self) -> i64 {
        CODE_OUT_OF_BOUNDS
    }
}

/// Errors raised by the instruction codec.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// The underlying byte sink or source failed.
    #[error("instruction codec I/O failed: {0}")]
    Io(#[from] IoError),
    /// A load through VM memory failed.
    #[error("instruction codec memory access failed: {0}")]
    Memory(#[from] MemoryError),
    /// A NUMBER or ACTION ran past the widest value a [`crate::word::Word`] can hold
    /// without a terminator, indicating a corrupt or truncated stream.
    #[error("instruction exceeded the maximum encoded length without a terminator")]
    Overlong,
}

impl CodecError {
    /// Map to the legacy negative status code.
    pub const fn legacy_code(&self) -> i64 {
        match self {
            Self::Io(e) => e.legacy_code(),
            Self::Memory(e) => e.legacy_code(),
            Self::Overlong => CODE_IO,
        }
    }
}

/// A short read or other host I/O failure, carrying no native `std::io::Error` payload so
/// that `CodecError`/`VmError` stay `Copy` and comparable in tests.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IoError {
    /// End of stream reached before an instruction was fully decoded.
    #[error("end of file while decoding instruction")]
    UnexpectedEof,
}

impl IoError {
    /// Map to the legacy negative status code.
    pub const fn legacy_code(&self) -> i64 {
        CODE_IO
    }
}

/// Errors raised while building a predictor table from a trace.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TraceError {
    /// A trace byte was not a valid primitive opcode in `[0, NUM_OPCODES)`.
    #[error("trace contains opcode {opcode:#04x}, which is not < {}", crate::predictor::NUM_OPCODES)]
    InvalidOpcode {
        /// The offending byte.
        opcode: u8,
    },
}

/// The top-level error type for state and codec operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VmError {
    /// See [`MemoryError`].
    #[error(transparent)]
    Memory(#[from] MemoryError),
    /// See [`StackError`].
    #[error(transparent)]
    Stack(#[from] StackError),
    /// See [`CodecError`].
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// `single_step` was called with no instruction yet loaded; the caller must call it
    /// again to begin dispatching.
    #[error("instruction fetch needed before dispatch")]
    InstructionFetchNeeded,
}

impl VmError {
    /// Map to the legacy negative status code.
    pub const fn legacy_code(&self) -> i64 {
        match self {
            Self::Memory(e) => e.legacy_code(),
            Self::Stack(e) => e.legacy_code(),
            Self::Codec(e) => e.legacy_code(),
            Self::InstructionFetchNeeded => CODE_INSTRUCTION_FETCH_NEEDED,
        }
    }
}

impl From<IoError> for VmError {
    fn from(e: IoError) -> Self {
        Self::Codec(CodecError::Io(e))
    }
}
