//! Instruction handler implementations, grouped by category.
//!
//! Each handler receives the CPU and the opcode byte, validates the
//! addressing mode against the set it supports, consumes its operand
//! bytes through the CPU's fetch/resolve methods, and returns the cycle
//! count it consumed (base cost plus any dynamic penalty).
//!
//! Handlers never advance PC by a precomputed instruction size; PC
//! movement falls out of the operand fetches themselves.

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::addressing::AddressingMode;
use crate::cpu::CPU;
use crate::memory::MemoryBus;
use crate::opcodes::{OpcodeMetadata, OPCODE_TABLE};
use crate::ExecutionError;

/// Identifies which CPU register an instruction operates on.
///
/// Lets one handler body serve an instruction family (LDA/LDX/LDY,
/// CMP/CPX/CPY, INX/INY/DEX/DEY) instead of three near-identical copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Register {
    A,
    X,
    Y,
}

impl Register {
    pub(crate) fn read<M: MemoryBus>(self, cpu: &CPU<M>) -> u8 {
        match self {
            Register::A => cpu.a,
            Register::X => cpu.x,
            Register::Y => cpu.y,
        }
    }

    pub(crate) fn write<M: MemoryBus>(self, cpu: &mut CPU<M>, value: u8) {
        match self {
            Register::A => cpu.a = value,
            Register::X => cpu.x = value,
            Register::Y => cpu.y = value,
        }
    }
}

/// Looks up the table entry for an opcode byte. Entries are small and
/// `Copy`, so they are handed out by value.
pub(crate) fn metadata(opcode: u8) -> OpcodeMetadata {
    OPCODE_TABLE[opcode as usize]
}

/// Builds the rejection error for a handler that was dispatched with an
/// addressing mode outside its supported set.
pub(crate) fn invalid_mode(meta: OpcodeMetadata) -> ExecutionError {
    ExecutionError::InvalidAddressingMode {
        mnemonic: meta.mnemonic.name(),
        mode: meta.addressing_mode,
    }
}

/// Validates that an implied-operand instruction was decoded as such.
pub(crate) fn implied(opcode: u8) -> Result<OpcodeMetadata, ExecutionError> {
    let meta = metadata(opcode);
    if meta.addressing_mode != AddressingMode::Implicit {
        return Err(invalid_mode(meta));
    }
    Ok(meta)
}

/// +1 cycle when an indexed read crossed a page boundary.
pub(crate) fn page_penalty(crossed: bool) -> u8 {
    if crossed {
        1
    } else {
        0
    }
}
