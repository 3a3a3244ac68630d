//! Frame and memory-resize scenarios driven through `State`.

use smite_vm::error::{MemoryError, VmError};
use smite_vm::state::State;

#[test]
fn frame_push_pop_round_trips() {
    let mut state = State::new(64, 64).unwrap();
    state.push_frame(10).unwrap();
    state.push_frame(20).unwrap();
    assert_eq!(state.pop_frame(), Ok(20));
    assert_eq!(state.pop_frame(), Ok(10));
    assert_eq!(state.registers().frame_depth(), 0);
}

#[test]
fn memory_resize_then_access_succeeds() {
    use smite_vm::word::{UWord, WORD_SIZE};

    let word_size = WORD_SIZE as UWord;
    let mut state = State::new(4096 / word_size, 16).unwrap();
    assert!(matches!(
        state.memory_mut().store_word(4096, 0xDEAD),
        Err(MemoryError::OutOfBounds { .. })
    ));
    state.memory_mut().realloc(8192 / word_size).unwrap();
    state.memory_mut().store_word(4096, 0xDEAD).unwrap();
    assert_eq!(state.memory().load_word(4096), Ok(0xDEAD));
}

#[test]
fn out_of_bounds_stack_access_surfaces_as_a_vm_error() {
    let state = State::new(64, 4).unwrap();
    assert!(matches!(state.load_stack_address(0), Err(VmError::Stack(_))));
}
