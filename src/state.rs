//! The VM state: memory, stack, registers, and the single-step fetch loop.
//!
//! Grounded on `examples/original_source/src/storage.c` (`smite_state`'s layout,
//! `smite_load_frame`/`smite_store_frame`/`smite_push_frame`/`smite_pop_frame`) and
//! `tests/branch.c` (the `single_step() == -259` first-call contract). Opcode dispatch
//! itself — what each `Action` actually does — is an external collaborator; this module
//! only fetches, decodes, inline-executes `NUMBER` pushes, and hands `ACTION` opcodes to
//! whatever [`Dispatch`] implementation the caller supplies.

use tracing::instrument;

use crate::error::{MemoryError, VmError};
use crate::instruction::{self, Instruction, MemoryCursor};
use crate::memory::Memory;
use crate::registers::Registers;
use crate::stack::Stack;
use crate::word::{UWord, Word};

/// Handles the effect of one `ACTION` opcode. Implemented by whatever consumes this
/// core; the core itself only ever constructs the `Instruction` and hands it over.
pub trait Dispatch {
    /// Execute `instruction` (always an `Action`) against `state`.
    fn dispatch(&mut self, state: &mut State, instruction: Instruction) -> Result<(), VmError>;
}

/// Owns a VM's memory, stack, and registers, and drives the fetch/dispatch loop.
pub struct State {
    memory: Memory,
    stack: Stack,
    registers: Registers,
    /// The instruction fetched but not yet handled; `None` only before the first
    /// [`State::single_step`] call.
    pending: Option<Instruction>,
}

impl State {
    /// Allocate a state with `memory_words` words of memory and `stack_words` words of
    /// stack. Mirrors `init`: fails if either allocation would overflow.
    #[instrument(level = "debug")]
    pub fn new(memory_words: UWord, stack_words: UWord) -> Result<Self, MemoryError> {
        Ok(Self {
            memory: Memory::new(memory_words)?,
            stack: Stack::new(stack_words)?,
            registers: Registers::new(),
            pending: None,
        })
    }

    /// Shared access to memory.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable access to memory, e.g. to load a bytecode image before running.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Shared access to the register file.
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    fn frame_top(&self) -> UWord {
        self.registers.f0() + self.registers.frame_depth()
    }

    /// Load the word at absolute stack index `index`, valid below `F0 + FRAME_DEPTH`.
    pub fn load_stack_address(&self, index: UWord) -> Result<Word, VmError> {
        Ok(self.stack.load_stack_address(index, self.frame_top())?)
    }

    /// Store `value` at absolute stack index `index`, valid below `F0 + FRAME_DEPTH`.
    pub fn store_stack_address(&mut self, index: UWord, value: Word) -> Result<(), VmError> {
        Ok(self.stack.store_stack_address(index, value, self.frame_top())?)
    }

    /// Move `depth` words from `from` to `to` within `[0, F0 + FRAME_DEPTH)`.
    pub fn copy_stack_address(&mut self, from: UWord, to: UWord, depth: UWord) -> Result<(), VmError> {
        Ok(self.stack.copy_stack_address(from, to, depth, self.frame_top())?)
    }

    /// Load the word `pos` entries below the top of the current frame (`pos == 0` is the
    /// top itself).
    pub fn load_frame(&self, pos: UWord) -> Result<Word, VmError> {
        let frame_depth = self.registers.frame_depth();
        if pos >= frame_depth {
            return Err(crate::error::StackError::OutOfBounds {
                index: pos,
                frame_top: frame_depth,
            }
            .into());
        }
        let index = self.registers.f0() + (frame_depth - pos - 1);
        self.load_stack_address(index)
    }

    /// Store `value` at the position `pos` entries below the top of the current frame.
    pub fn store_frame(&mut self, pos: UWord, value: Word) -> Result<(), VmError> {
        let frame_depth = self.registers.frame_depth();
        if pos >= frame_depth {
            return Err(crate::error::StackError::OutOfBounds {
                index: pos,
                frame_top: frame_depth,
            }
            .into());
        }
        let index = self.registers.f0() + (frame_depth - pos - 1);
        self.store_stack_address(index, value)
    }

    /// Push `value` onto the current frame.
    ///
    /// `FRAME_DEPTH` is incremented first, matching the original: a failed store (from a
    /// full stack) still leaves `FRAME_DEPTH` bumped, since the original never rolls it
    /// back either.
    pub fn push_frame(&mut self, value: Word) -> Result<(), VmError> {
        self.registers.set_frame_depth(self.registers.frame_depth() + 1);
        self.store_frame(0, value)
    }

    /// Pop and return the top of the current frame.
    ///
    /// `FRAME_DEPTH` is decremented unconditionally afterward, including past zero, which
    /// silently wraps (`UWord` is unsigned) — this matches the original's unchecked
    /// `S->FRAME_DEPTH--` and is a known sharp edge, not a defect introduced here.
    pub fn pop_frame(&mut self) -> Result<Word, VmError> {
        let value = self.load_frame(0)?;
        self.registers.set_frame_depth(self.registers.frame_depth().wrapping_sub(1));
        Ok(value)
    }

    fn fetch(&mut self) -> Result<Instruction, VmError> {
        let pc = self.registers.pc();
        let mut cursor = MemoryCursor::new(&mut self.memory, pc);
        let (instruction, consumed) = instruction::decode(&mut cursor)?;
        self.registers.set_pc(pc.wrapping_add(consumed));
        self.registers.set_i(match instruction {
            Instruction::Number(v) => v,
            Instruction::Action(op) => op as Word,
        });
        Ok(instruction)
    }

    /// Advance the VM by one instruction.
    ///
    /// The first call after construction only fetches the first instruction and returns
    /// [`VmError::InstructionFetchNeeded`] — there is nothing yet to dispatch. Every
    /// subsequent call handles the previously fetched instruction (inline-pushing a
    /// `Number`, or handing an `Action` to `dispatcher`), then fetches the next one.
    #[instrument(level = "trace", skip(self, dispatcher))]
    pub fn single_step<D: Dispatch>(&mut self, dispatcher: &mut D) -> Result<(), VmError> {
        match self.pending.take() {
            None => {
                let instr = self.fetch()?;
                self.pending = Some(instr);
                Err(VmError::InstructionFetchNeeded)
            }
            Some(Instruction::Number(v)) => {
                self.push_frame(v)?;
                let instr = self.fetch()?;
                self.pending = Some(instr);
                Ok(())
            }
            Some(action @ Instruction::Action(_)) => {
                dispatcher.dispatch(self, action)?;
                let instr = self.fetch()?;
                self.pending = Some(instr);
                Ok(())
            }
        }
    }
}
