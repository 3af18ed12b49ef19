//! Increment and decrement instructions: INC, DEC, INX, INY, DEX, DEY.
//!
//! The memory forms are read-modify-write and pay their full cycle cost
//! unconditionally; there is no page-crossing penalty. All six update
//! Zero and Negative from the result; Carry and Overflow are untouched,
//! so wrapping 0xFF -> 0x00 leaves Carry alone.

use super::{implied, invalid_mode, metadata, Register};
use crate::addressing::AddressingMode;
use crate::cpu::CPU;
use crate::memory::MemoryBus;
use crate::ExecutionError;

/// INC - increment a memory location.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    execute_rmw_adjust(cpu, opcode, 1)
}

/// DEC - decrement a memory location.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    execute_rmw_adjust(cpu, opcode, -1)
}

fn execute_rmw_adjust<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    delta: i8,
) -> Result<u8, ExecutionError> {
    let meta = metadata(opcode);
    match meta.addressing_mode {
        AddressingMode::ZeroPage
        | AddressingMode::ZeroPageX
        | AddressingMode::Absolute
        | AddressingMode::AbsoluteX => {}
        _ => return Err(invalid_mode(meta)),
    }

    let (addr, _) = cpu.get_effective_address(meta.addressing_mode)?;
    let value = cpu.memory.read(addr).wrapping_add(delta as u8);
    cpu.memory.write(addr, value);
    cpu.set_zn(value);

    Ok(meta.base_cycles)
}

/// INX / INY / DEX / DEY - adjust an index register by one.
pub(crate) fn execute_adjust_register<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    register: Register,
    delta: i8,
) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;

    let value = register.read(cpu).wrapping_add(delta as u8);
    register.write(cpu, value);
    cpu.set_zn(value);

    Ok(meta.base_cycles)
}
