//! Flag control instructions: CLC, CLD, CLI, CLV, SEC, SED, SEI.
//!
//! One body serves all seven; the dispatcher names the flag and the
//! value to force. There is no SEV on the 6502, so OVERFLOW only ever
//! arrives here with `on = false`.

use super::implied;
use crate::cpu::CPU;
use crate::memory::MemoryBus;
use crate::status::Status;
use crate::ExecutionError;

pub(crate) fn execute_set_flag<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    flag: Status,
    on: bool,
) -> Result<u8, ExecutionError> {
    let meta = implied(opcode)?;
    cpu.p.set(flag, on);
    Ok(meta.base_cycles)
}
