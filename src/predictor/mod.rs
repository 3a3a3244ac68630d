//! Offline predictor generation: fold an opcode trace into a hashed history value, count
//! per-history successor opcodes, and emit the frequently observed subset as a sparse
//! transition table.
//!
//! Grounded on `examples/original_source/src/features/gen-predictor.c` in full — the
//! parameters, step function, counting/indexing/emission passes, and output formatting
//! below are a direct port of that file's algorithm, restructured as an owned
//! [`PredictorBuilder`] value instead of the original's file-scope statics (per the design
//! note in `SPEC_FULL.md` §9).

mod builder;
mod format;
mod step;

pub use builder::PredictorBuilder;
pub use step::StepFunction;

/// Width of a history value, in bits.
pub const HISTORY_BITS: u32 = 20;
/// Number of distinct history values, `2^HISTORY_BITS`.
pub const NUM_HISTORIES: usize = 1 << HISTORY_BITS;
/// Number of `next_random_20()` draws AND-ed together to build each opcode's `or_mask`.
pub const SPARSITY: usize = 3;
/// The predictor only ever sees primitive opcodes in `[0, NUM_OPCODES)`.
pub const NUM_OPCODES: usize = 32;
/// A history qualifies as "common" once its total successor count reaches this.
pub const COUNT_THRESHOLD: u64 = 100;

/// A hashed history value, always held truncated to [`HISTORY_BITS`] bits.
pub type History = u32;
