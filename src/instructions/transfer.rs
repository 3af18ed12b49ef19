//! Register transfer instructions: TAX, TAY, TSX, TXA, TXS, TYA.
//!
//! All are implied-mode, 2-cycle instructions. Every transfer except TXS
//! sets Zero and Negative from the copied value; TXS writes the stack
//! pointer without touching any flag.

use super::implied;
use crate::cpu::CPU;
use crate::memory::MemoryBus;
use crate::ExecutionError;

pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;
    cpu.x = cpu.a;
    cpu.set_zn(cpu.x);
    Ok(meta.base_cycles)
}

pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;
    cpu.y = cpu.a;
    cpu.set_zn(cpu.y);
    Ok(meta.base_cycles)
}

pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;
    cpu.x = cpu.sp;
    cpu.set_zn(cpu.x);
    Ok(meta.base_cycles)
}

pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;
    cpu.a = cpu.x;
    cpu.set_zn(cpu.a);
    Ok(meta.base_cycles)
}

/// TXS is the one transfer that affects no flags.
pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;
    cpu.sp = cpu.x;
    Ok(meta.base_cycles)
}

pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;
    cpu.a = cpu.y;
    cpu.set_zn(cpu.a);
    Ok(meta.base_cycles)
}
