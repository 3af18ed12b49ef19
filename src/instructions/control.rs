//! Control flow instructions: JMP, JSR, RTS, BRK, RTI, NOP.

use super::{implied, invalid_mode, metadata};
use crate::addressing::AddressingMode;
use crate::cpu::{CPU, IRQ_VECTOR};
use crate::memory::MemoryBus;
use crate::status::Status;
use crate::ExecutionError;

/// JMP - unconditional jump.
///
/// Absolute loads PC with the operand address. Indirect dereferences a
/// full 16-bit pointer anywhere in memory, reproducing the hardware
/// page-boundary bug when the pointer low byte is 0xFF.
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = metadata(opcode);
    match meta.addressing_mode {
        AddressingMode::Absolute | AddressingMode::Indirect => {}
        _ => return Err(invalid_mode(meta)),
    }

    let (target, _) = cpu.get_effective_address(meta.addressing_mode)?;
    cpu.set_pc(target);

    Ok(meta.base_cycles)
}

/// JSR - jump to subroutine.
///
/// Pushes the address of the last byte of the JSR instruction (PC - 1
/// after both operand fetches), high byte first, then jumps. RTS undoes
/// this by popping and incrementing.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = metadata(opcode);
    if meta.addressing_mode != AddressingMode::Absolute {
        return Err(invalid_mode(meta));
    }

    let low = cpu.fetch_pc() as u16;
    let high = cpu.fetch_pc() as u16;
    let target = (high << 8) | low;

    let return_addr = cpu.pc().wrapping_sub(1);
    cpu.push((return_addr >> 8) as u8);
    cpu.push(return_addr as u8);

    cpu.set_pc(target);
    Ok(meta.base_cycles)
}

/// RTS - return from subroutine.
///
/// Pops the address JSR pushed (low byte first, reversing push order)
/// and increments it to land on the instruction after the JSR.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;

    let low = cpu.pop() as u16;
    let high = cpu.pop() as u16;
    cpu.set_pc((high << 8) | low);
    cpu.increment_pc();

    Ok(meta.base_cycles)
}

/// BRK - software interrupt.
///
/// Pushes PC (already past the BRK opcode) high byte first, then the
/// status byte with BREAK forced set, sets IRQ-disable, and loads PC
/// from the IRQ/BRK vector at 0xFFFE/0xFFFF.
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;

    let pc = cpu.pc();
    cpu.push((pc >> 8) as u8);
    cpu.push(pc as u8);
    cpu.push((cpu.status() | Status::BREAK).bits());

    cpu.set_flag(Status::IRQ_DISABLE, true);

    let low = cpu.memory.read(IRQ_VECTOR) as u16;
    let high = cpu.memory.read(IRQ_VECTOR + 1) as u16;
    cpu.set_pc((high << 8) | low);

    Ok(meta.base_cycles)
}

/// RTI - return from interrupt.
///
/// Pops the status byte (restored verbatim, every bit as pushed), then
/// PC low and high. Unlike RTS there is no increment; the pushed PC is
/// used as-is.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;

    let status = Status::from_bits_retain(cpu.pop());
    cpu.set_status(status);

    let low = cpu.pop() as u16;
    let high = cpu.pop() as u16;
    cpu.set_pc((high << 8) | low);

    Ok(meta.base_cycles)
}

/// NOP - no operation.
pub(crate) fn execute_nop<M: MemoryBus>(_cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;
    Ok(meta.base_cycles)
}
