//! Shift and rotate instructions: ASL, LSR, ROL, ROR.
//!
//! Each supports an accumulator form and four memory (read-modify-write)
//! forms. Carry always receives the bit shifted out of the operand that
//! was actually shifted, whether that operand came from A or from memory.
//! No page-crossing penalty applies.

use super::{invalid_mode, metadata};
use crate::addressing::AddressingMode;
use crate::cpu::CPU;
use crate::memory::MemoryBus;
use crate::status::Status;
use crate::ExecutionError;

/// ASL - arithmetic shift left. Carry takes bit 7, bit 0 becomes zero.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    execute_shift(cpu, opcode, |value, _carry_in| (value << 1, value & 0x80 != 0))
}

/// LSR - logical shift right. Carry takes bit 0, bit 7 becomes zero.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    execute_shift(cpu, opcode, |value, _carry_in| (value >> 1, value & 0x01 != 0))
}

/// ROL - rotate left through Carry: bit 0 takes the old Carry, Carry
/// takes bit 7.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    execute_shift(cpu, opcode, |value, carry_in| {
        ((value << 1) | carry_in as u8, value & 0x80 != 0)
    })
}

/// ROR - rotate right through Carry: bit 7 takes the old Carry, Carry
/// takes bit 0.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    execute_shift(cpu, opcode, |value, carry_in| {
        ((value >> 1) | ((carry_in as u8) << 7), value & 0x01 != 0)
    })
}

fn execute_shift<M, F>(cpu: &mut CPU<M>, opcode: u8, shift: F) -> Result<u8, ExecutionError>
where
    M: MemoryBus,
    F: Fn(u8, bool) -> (u8, bool),
{
    let meta = metadata(opcode);
    let carry_in = cpu.p.contains(Status::CARRY);

    let result = match meta.addressing_mode {
        AddressingMode::Accumulator => {
            let (result, carry_out) = shift(cpu.a, carry_in);
            cpu.a = result;
            cpu.p.set(Status::CARRY, carry_out);
            result
        }
        AddressingMode::ZeroPage
        | AddressingMode::ZeroPageX
        | AddressingMode::Absolute
        | AddressingMode::AbsoluteX => {
            let (addr, _) = cpu.get_effective_address(meta.addressing_mode)?;
            let value = cpu.memory.read(addr);
            let (result, carry_out) = shift(value, carry_in);
            cpu.memory.write(addr, result);
            cpu.p.set(Status::CARRY, carry_out);
            result
        }
        _ => return Err(invalid_mode(meta)),
    };

    cpu.set_zn(result);
    Ok(meta.base_cycles)
}
