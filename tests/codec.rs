//! Round-trip and virtual-memory codec tests.

use smite_vm::instruction::{self, Instruction, MemoryCursor, NativeReader, NativeWriter};
use smite_vm::memory::Memory;
use smite_vm::word::{UWord, Word};

#[test]
fn native_round_trip_consumes_exactly_the_produced_bytes() {
    for v in [0, 1, -1, 63, 64, -64, -65, Word::MIN, Word::MAX] {
        let mut w = NativeWriter::new();
        let written = instruction::encode(&mut w, Instruction::Number(v)).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(written as usize, bytes.len());

        let mut r = NativeReader::new(&bytes);
        let (decoded, consumed) = instruction::decode(&mut r).unwrap();
        assert_eq!(decoded, Instruction::Number(v));
        assert_eq!(consumed as usize, bytes.len());
        assert_eq!(r.position(), bytes.len());
    }
}

#[test]
fn virtual_round_trip_through_memory_yields_the_same_final_address() {
    let mut mem = Memory::new(64).unwrap();
    let start: UWord = 16;

    let written = {
        let mut cursor = MemoryCursor::new(&mut mem, start);
        instruction::encode(&mut cursor, Instruction::Number(-65)).unwrap();
        cursor.address()
    };

    let mut cursor = MemoryCursor::new(&mut mem, start);
    let (decoded, consumed) = instruction::decode(&mut cursor).unwrap();
    assert_eq!(decoded, Instruction::Number(-65));
    assert_eq!(start + consumed, written);
    assert_eq!(cursor.address(), written);
}

#[test]
fn action_values_outside_six_bits_still_round_trip() {
    for v in [0u8, 63, 64, 127, 200, 255] {
        let mut w = NativeWriter::new();
        instruction::encode(&mut w, Instruction::Action(v)).unwrap();
        let bytes = w.into_bytes();
        let mut r = NativeReader::new(&bytes);
        assert_eq!(instruction::decode(&mut r).unwrap().0, Instruction::Action(v));
    }
}

#[test]
fn worst_case_continuation_chain_round_trips_word_extrema() {
    // ceil(WORD_BIT / 6) continuation bytes, sign extended over the full width.
    for v in [Word::MIN, Word::MAX] {
        let mut w = NativeWriter::new();
        instruction::encode(&mut w, Instruction::Number(v)).unwrap();
        let bytes = w.into_bytes();
        let mut r = NativeReader::new(&bytes);
        assert_eq!(instruction::decode(&mut r).unwrap().0, Instruction::Number(v));
    }
}
