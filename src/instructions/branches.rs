//! Conditional branch instructions: BCC, BCS, BEQ, BNE, BMI, BPL,
//! BVC, BVS.
//!
//! All eight share one body; the dispatcher supplies the flag under test
//! and the polarity that takes the branch.

use super::{invalid_mode, metadata};
use crate::addressing::AddressingMode;
use crate::cpu::CPU;
use crate::memory::MemoryBus;
use crate::status::Status;
use crate::ExecutionError;

/// Executes a conditional branch.
///
/// The offset byte is consumed whether or not the branch is taken, and
/// it is signed (-128..=+127) relative to the PC after the full 2-byte
/// instruction. Cycles: 2 if not taken, +1 if taken, +1 more if the
/// target lands on a different page than the instruction end.
pub(crate) fn execute_branch<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    flag: Status,
    branch_when: bool,
) -> Result<u8, ExecutionError> {
    let meta = metadata(opcode);
    if meta.addressing_mode != AddressingMode::Relative {
        return Err(invalid_mode(meta));
    }

    let offset = cpu.fetch_pc() as i8;
    let mut cycles = meta.base_cycles;

    if cpu.p.contains(flag) == branch_when {
        let base = cpu.pc;
        let target = base.wrapping_add(offset as i16 as u16);

        cycles += 1;
        if (base & 0xFF00) != (target & 0xFF00) {
            cycles += 1;
        }

        cpu.set_pc(target);
    }

    Ok(cycles)
}
