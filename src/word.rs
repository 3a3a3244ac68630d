//! Word-sized integer types and the bit-level helpers the rest of the crate builds on.
//!
//! The VM's word width is fixed at build time by exactly one of the `word32`/`word64`
//! features (default `word64`), mirroring the original C build's `WORD_SIZE` macro.

#[cfg(all(feature = "word32", feature = "word64"))]
compile_error!("enable exactly one of the `word32`/`word64` features");

#[cfg(feature = "word32")]
mod width {
    pub type Word = i32;
    pub type UWord = u32;
}

#[cfg(not(feature = "word32"))]
mod width {
    pub type Word = i64;
    pub type UWord = u64;
}

pub use width::{UWord, Word};

/// Size of a [`Word`] in bytes.
pub const WORD_SIZE: usize = std::mem::size_of::<Word>();

/// Size of a [`Word`] in bits.
pub const WORD_BIT: u32 = (WORD_SIZE * 8) as u32;

/// Size of a byte in bits, named for parity with `WORD_BIT`.
pub const BYTE_BIT: u32 = 8;

/// Maximum memory size, in words: half the address space.
pub const MAX_MEMORY_SIZE: UWord = (1 as UWord).wrapping_shl(WORD_BIT - 1) / WORD_SIZE as UWord;

/// Maximum stack size, in words.
pub const MAX_STACK_SIZE: UWord = (1 as UWord).wrapping_shl(WORD_BIT - 4) / WORD_SIZE as UWord;

/// Default memory size, in words, carried over from `smite_default_memory_size`.
pub const DEFAULT_MEMORY_SIZE: UWord = 0x100000;

/// Default stack size, in words, carried over from `smite_default_stack_size`.
pub const DEFAULT_STACK_SIZE: UWord = 16384;

/// Arithmetic right shift, preserving the sign bit of `v`.
///
/// `Word`'s native `>>` is already arithmetic in Rust, so this is mostly a documented
/// name for call sites that care about the distinction from a logical shift.
#[inline]
pub const fn arshift(v: Word, bits: u32) -> Word {
    if bits >= WORD_BIT {
        if v < 0 {
            -1
        } else {
            0
        }
    } else {
        v >> bits
    }
}

/// Position of the highest set bit of `v`, plus one, treating `v` as a two's-complement
/// value whose sign bit extends infinitely leftward (so negative numbers are sized by
/// their leading run of set bits, not their leading zeros).
///
/// Returns `0` for `v == 0` or `v == -1` (both need zero magnitude bits to round-trip).
pub const fn find_msbit(v: Word) -> u32 {
    if v >= 0 {
        WORD_BIT - v.leading_zeros()
    } else {
        WORD_BIT - (!v).leading_zeros()
    }
}

/// Round `addr` up to the next word boundary.
#[inline]
pub const fn align(addr: UWord) -> UWord {
    (addr.wrapping_add(WORD_SIZE as UWord - 1)) & !(WORD_SIZE as UWord - 1)
}

/// Whether `addr` is already word-aligned.
#[inline]
pub const fn is_aligned(addr: UWord) -> bool {
    addr & (WORD_SIZE as UWord - 1) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_is_total() {
        for addr in 0..4 * WORD_SIZE as UWord {
            assert!(align(addr) >= addr);
            assert!(align(addr) - addr < WORD_SIZE as UWord);
            assert!(is_aligned(align(addr)));
        }
    }

    #[test]
    fn msbit_of_zero_and_minus_one() {
        assert_eq!(find_msbit(0), 0);
        assert_eq!(find_msbit(-1), 0);
        assert_eq!(find_msbit(1), 1);
        assert_eq!(find_msbit(63), 6);
        assert_eq!(find_msbit(64), 7);
        assert_eq!(find_msbit(-64), 6);
        assert_eq!(find_msbit(-65), 7);
    }

    #[quickcheck_macros::quickcheck]
    fn arshift_matches_native_shr(v: Word, bits: u8) -> bool {
        let bits = (bits % 64) as u32;
        arshift(v, bits) == if bits >= WORD_BIT { if v < 0 { -1 } else { 0 } } else { v >> bits }
    }
}
