//! Word-addressable linear memory.

use crate::error::MemoryError;
use crate::word::{self, UWord, Word, WORD_SIZE};

/// A resizable byte array addressed by byte offset, with word-granularity load/store
/// subject to alignment, and byte-granularity load/store subject only to bounds.
#[derive(Debug, Clone)]
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    /// Allocate `size_words` words of zeroed memory.
    #[tracing::instrument(level = "debug")]
    pub fn new(size_words: UWord) -> Result<Self, MemoryError> {
        let mut mem = Self { bytes: Vec::new() };
        mem.realloc(size_words)?;
        Ok(mem)
    }

    /// Current size, in bytes.
    pub fn len(&self) -> UWord {
        self.bytes.len() as UWord
    }

    /// Whether the memory is empty (zero words).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Grow or shrink the memory to `size_words` words.
    ///
    /// Newly exposed bytes on growth are zeroed. Shrinking truncates and discards.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn realloc(&mut self, size_words: UWord) -> Result<(), MemoryError> {
        if size_words > word::MAX_MEMORY_SIZE {
            return Err(MemoryError::Overflow {
                requested_words: size_words,
            });
        }
        let size_bytes = (size_words as usize)
            .checked_mul(WORD_SIZE)
            .ok_or(MemoryError::Overflow {
                requested_words: size_words,
            })?;
        if size_bytes > self.bytes.len() {
            self.bytes
                .try_reserve_exact(size_bytes - self.bytes.len())
                .map_err(|_| MemoryError::Alloc {
                    requested_words: size_words,
                })?;
        }
        self.bytes.resize(size_bytes, 0);
        Ok(())
    }

    /// A host slice over `[addr, addr + length)`, or `None` if `addr` isn't itself a valid
    /// offset (`addr < MEMORY`) or the range would run past `MEMORY`.
    pub fn native_address_of_range(&self, addr: UWord, length: UWord) -> Option<&[u8]> {
        if addr as usize >= self.bytes.len() || length as usize > self.bytes.len() - addr as usize {
            return None;
        }
        let (addr, length) = (addr as usize, length as usize);
        Some(&self.bytes[addr..addr + length])
    }

    /// Mutable counterpart of [`Memory::native_address_of_range`].
    pub fn native_address_of_range_mut(&mut self, addr: UWord, length: UWord) -> Option<&mut [u8]> {
        if addr as usize >= self.bytes.len() || length as usize > self.bytes.len() - addr as usize {
            return None;
        }
        let (addr, length) = (addr as usize, length as usize);
        Some(&mut self.bytes[addr..addr + length])
    }

    fn check_bounds(&self, addr: UWord) -> Result<(), MemoryError> {
        if addr >= self.len() {
            return Err(MemoryError::OutOfBounds {
                addr,
                memory_size: self.len(),
            });
        }
        Ok(())
    }

    fn check_word_bounds(&self, addr: UWord) -> Result<(), MemoryError> {
        if addr.saturating_add(WORD_SIZE as UWord) > self.len() {
            return Err(MemoryError::OutOfBounds {
                addr,
                memory_size: self.len(),
            });
        }
        if !word::is_aligned(addr) {
            return Err(MemoryError::Misaligned { addr });
        }
        Ok(())
    }

    /// Load the word at `addr`.
    pub fn load_word(&self, addr: UWord) -> Result<Word, MemoryError> {
        self.check_word_bounds(addr)?;
        let start = addr as usize;
        let bytes: [u8; WORD_SIZE] = self.bytes[start..start + WORD_SIZE].try_into().expect("checked above");
        Ok(Word::from_ne_bytes(bytes))
    }

    /// Store `value` at `addr`.
    pub fn store_word(&mut self, addr: UWord, value: Word) -> Result<(), MemoryError> {
        self.check_word_bounds(addr)?;
        let start = addr as usize;
        self.bytes[start..start + WORD_SIZE].copy_from_slice(&value.to_ne_bytes());
        Ok(())
    }

    /// Load the byte at `addr`.
    pub fn load_byte(&self, addr: UWord) -> Result<u8, MemoryError> {
        self.check_bounds(addr)?;
        Ok(self.bytes[addr as usize])
    }

    /// Store `value` at `addr`.
    pub fn store_byte(&mut self, addr: UWord, value: u8) -> Result<(), MemoryError> {
        self.check_bounds(addr)?;
        self.bytes[addr as usize] = value;
        Ok(())
    }
}
