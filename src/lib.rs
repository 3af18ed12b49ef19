//! # 6502 CPU Emulator Core
//!
//! A cycle-counted NMOS 6502 CPU core for NES-style emulators.
//!
//! The crate provides the CPU state machine, a trait-based memory bus
//! abstraction, and a table-driven opcode metadata layer. Everything the
//! CPU touches outside its own registers goes through the [`MemoryBus`]
//! trait, so mappers, mirrored RAM, and memory-mapped registers live
//! entirely on the host side.
//!
//! ## Quick Start
//!
//! ```rust
//! use nes6502::{CPU, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//!
//! // Load a tiny program: LDA #$80
//! memory.write(0x8000, 0xA9);
//! memory.write(0x8001, 0x80);
//!
//! // Initialize CPU - it will load PC from the reset vector
//! let mut cpu = CPU::new(memory);
//! assert_eq!(cpu.pc(), 0x8000);
//!
//! let cycles = cpu.step().unwrap();
//! assert_eq!(cycles, 2);
//! assert_eq!(cpu.a(), 0x80);
//! ```
//!
//! ## Execution Model
//!
//! One call to [`CPU::step`] fetches exactly one opcode and fully
//! executes it, returning the number of clock cycles consumed (including
//! page-crossing and branch penalties). An external scheduler interleaves
//! CPU steps with other emulated hardware based on those counts.
//!
//! ## Modules
//!
//! - `cpu` - CPU state, PC/stack unit, addressing resolver, execution loop
//! - `memory` - MemoryBus trait and the FlatMemory implementation
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing mode enumeration
//! - `status` - Status register flags

pub mod addressing;
pub mod cpu;
pub mod memory;
pub mod opcodes;
pub mod status;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::CPU;
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{Mnemonic, OpcodeMetadata, OPCODE_TABLE};
pub use status::Status;

use thiserror::Error;

/// Errors that can occur during CPU execution.
///
/// Every error is fatal to the current instruction only: the CPU
/// guarantees that no register, flag, or PC mutation from the failed
/// instruction is left behind, so the caller can decide whether to halt
/// or skip and continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// An undocumented opcode byte was fetched. PC is restored to the
    /// opcode address before this is returned.
    #[error("illegal opcode 0x{0:02X}")]
    IllegalOpcode(u8),

    /// An instruction was dispatched with an addressing mode it does not
    /// support. This indicates a corrupted opcode table entry and is
    /// checked before any operand byte is consumed.
    #[error("{mnemonic} does not support {mode:?} addressing")]
    InvalidAddressingMode {
        /// Mnemonic of the rejecting instruction.
        mnemonic: &'static str,
        /// The offending addressing mode.
        mode: AddressingMode,
    },

    /// The addressing resolver was asked to produce an effective address
    /// for a mode that has none (Implicit, Accumulator, Immediate,
    /// Relative). A programming-contract violation, never silently zero.
    #[error("{0:?} cannot be resolved to an effective address")]
    UnaddressableMode(AddressingMode),
}
