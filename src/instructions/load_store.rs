//! Load and store instructions: LDA, LDX, LDY, STA, STX, STY.

use super::{invalid_mode, metadata, page_penalty, Register};
use crate::addressing::AddressingMode;
use crate::cpu::CPU;
use crate::memory::MemoryBus;
use crate::ExecutionError;

/// LDA / LDX / LDY - load a register from memory.
///
/// Sets Zero and Negative from the value written to the destination
/// register. Indexed reads that cross a page boundary cost one extra
/// cycle.
pub(crate) fn execute_load<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    register: Register,
) -> Result<u8, ExecutionError> {
    let meta = metadata(opcode);
    match meta.addressing_mode {
        AddressingMode::Immediate
        | AddressingMode::ZeroPage
        | AddressingMode::ZeroPageX
        | AddressingMode::ZeroPageY
        | AddressingMode::Absolute
        | AddressingMode::AbsoluteX
        | AddressingMode::AbsoluteY
        | AddressingMode::IndirectX
        | AddressingMode::IndirectY => {}
        _ => return Err(invalid_mode(meta)),
    }

    let (value, page_crossed) = cpu.get_operand_value(meta.addressing_mode)?;
    register.write(cpu, value);
    cpu.set_zn(value);

    Ok(meta.base_cycles + page_penalty(page_crossed))
}

/// STA / STX / STY - store a register to memory.
///
/// No flags are affected. Stores never take the page-crossing penalty;
/// the indexed variants pay their full cost unconditionally.
pub(crate) fn execute_store<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    register: Register,
) -> Result<u8, ExecutionError> {
    let meta = metadata(opcode);
    match meta.addressing_mode {
        AddressingMode::ZeroPage
        | AddressingMode::ZeroPageX
        | AddressingMode::ZeroPageY
        | AddressingMode::Absolute
        | AddressingMode::AbsoluteX
        | AddressingMode::AbsoluteY
        | AddressingMode::IndirectX
        | AddressingMode::IndirectY => {}
        _ => return Err(invalid_mode(meta)),
    }

    let (addr, _) = cpu.get_effective_address(meta.addressing_mode)?;
    let value = register.read(cpu);
    cpu.memory.write(addr, value);

    Ok(meta.base_cycles)
}
