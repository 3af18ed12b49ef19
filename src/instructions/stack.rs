//! Stack push/pull instructions: PHA, PHP, PLA, PLP.
//!
//! PHP pushes the status byte with BREAK and the unused bit forced set,
//! matching what BRK pushes; the live register is not modified. PLP
//! restores the register verbatim from the popped byte.

use super::implied;
use crate::cpu::CPU;
use crate::memory::MemoryBus;
use crate::status::Status;
use crate::ExecutionError;

pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;
    let a = cpu.a;
    cpu.push(a);
    Ok(meta.base_cycles)
}

pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;
    let byte = (cpu.status() | Status::BREAK | Status::UNUSED).bits();
    cpu.push(byte);
    Ok(meta.base_cycles)
}

pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;
    let value = cpu.pop();
    cpu.a = value;
    cpu.set_zn(value);
    Ok(meta.base_cycles)
}

pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;
    let byte = cpu.pop();
    cpu.set_status(Status::from_bits_retain(byte));
    Ok(meta.base_cycles)
}
