//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor
//! state and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of the next byte to fetch
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status register** (P): [`Status`] flags byte
//! - **Cycle counter**: u64 monotonically increasing cycle count
//!
//! ## Execution Model
//!
//! The CPU executes instructions via:
//! - `step()`: Execute one instruction, returning its cycle cost
//! - `run_for_cycles()`: Execute until a cycle budget is exhausted
//!
//! Every opcode byte, operand byte, and branch offset is consumed through
//! `fetch_pc()`, which reads at PC and then increments it. Instruction
//! handlers rely on that ordering for sequential decode.

use log::{debug, warn};

use crate::addressing::AddressingMode;
use crate::instructions::Register;
use crate::memory::MemoryBus;
use crate::opcodes::{Mnemonic, OPCODE_TABLE};
use crate::status::Status;
use crate::ExecutionError;

/// Address of the stack page. SP is an offset into this page.
pub(crate) const STACK_PAGE: u16 = 0x0100;

/// Reset vector location (low byte; high byte at +1).
pub(crate) const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector location (low byte; high byte at +1).
pub(crate) const IRQ_VECTOR: u16 = 0xFFFE;

/// 6502 CPU state and execution context.
///
/// The CPU struct contains all processor state including registers,
/// flags, program counter, stack pointer, and cycle counter. It is
/// generic over the memory implementation via the [`MemoryBus`] trait;
/// pass a `&mut B` to lend a bus that is shared with other components.
///
/// # Examples
///
/// ```
/// use nes6502::{CPU, FlatMemory, MemoryBus, Status};
///
/// // Create memory and set reset vector
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Low byte
/// memory.write(0xFFFD, 0x80); // High byte (PC = 0x8000)
///
/// // Initialize CPU - loads PC from reset vector
/// let cpu = CPU::new(memory);
///
/// // Inspect initial state
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0x00);
/// assert_eq!(cpu.cycles(), 0);
/// assert!(!cpu.flag(Status::CARRY));
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next byte to fetch)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Status register
    pub(crate) p: Status,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// Number of pushes attempted while the stack page was full
    stack_overflows: u64,

    /// Number of pops attempted while the stack page was empty
    stack_underflows: u64,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the given memory bus.
    ///
    /// The CPU is initialized to power-on state:
    /// - PC is loaded from the reset vector at 0xFFFC/0xFFFD (little-endian)
    /// - SP is zeroed (stack page empty)
    /// - Status register has only the unused bit set
    /// - Registers A, X, Y are zeroed
    /// - Cycle counter is reset to 0
    ///
    /// # Examples
    ///
    /// ```
    /// use nes6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    ///
    /// let cpu = CPU::new(mem);
    /// assert_eq!(cpu.pc(), 0x8000);
    /// ```
    pub fn new(memory: M) -> Self {
        let pc_low = memory.read(RESET_VECTOR) as u16;
        let pc_high = memory.read(RESET_VECTOR + 1) as u16;

        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: (pc_high << 8) | pc_low,
            sp: 0x00,
            p: Status::power_on(),
            cycles: 0,
            stack_overflows: 0,
            stack_underflows: 0,
            memory,
        }
    }

    /// Reloads PC from the reset vector at 0xFFFC/0xFFFD.
    ///
    /// Registers, flags, and the cycle counter are left untouched; only
    /// the program counter is forced, matching the external-vector-load
    /// model of the reset line.
    pub fn reset(&mut self) {
        let pc_low = self.memory.read(RESET_VECTOR) as u16;
        let pc_high = self.memory.read(RESET_VECTOR + 1) as u16;
        self.pc = (pc_high << 8) | pc_low;

        debug!("PC initialized to 0x{:04X} from reset vector", self.pc);
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Fetch the opcode byte at PC (advancing PC)
    /// 2. Look up instruction metadata in the opcode table
    /// 3. Dispatch to the instruction handler
    /// 4. Add the handler's cycle count to the running total
    ///
    /// On any error the PC is restored to the opcode address and no
    /// register or flag mutation from the failed instruction survives,
    /// so the caller's halt/skip/log policy sees a consistent machine.
    ///
    /// # Returns
    ///
    /// - `Ok(cycles)` - clock cycles the instruction consumed, including
    ///   page-crossing and branch-taken penalties
    /// - `Err(ExecutionError)` - decode failure, state unchanged
    ///
    /// # Examples
    ///
    /// ```
    /// use nes6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.write(0x8000, 0xEA); // NOP
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.step().unwrap(), 2);
    /// assert_eq!(cpu.pc(), 0x8001);
    /// ```
    pub fn step(&mut self) -> Result<u8, ExecutionError> {
        let pc_at_opcode = self.pc;
        let opcode = self.fetch_pc();

        let result = self.dispatch(opcode);

        match result {
            Ok(cycles) => {
                self.cycles += cycles as u64;
                Ok(cycles)
            }
            Err(e) => {
                // All-or-nothing: leave PC at the opcode byte
                self.pc = pc_at_opcode;
                Err(e)
            }
        }
    }

    fn dispatch(&mut self, opcode: u8) -> Result<u8, ExecutionError> {
        use crate::instructions::{
            alu, branches, control, flags, inc_dec, load_store, shifts, stack, transfer,
        };

        let mnemonic = OPCODE_TABLE[opcode as usize].mnemonic;

        match mnemonic {
            Mnemonic::Lda => load_store::execute_load(self, opcode, Register::A),
            Mnemonic::Ldx => load_store::execute_load(self, opcode, Register::X),
            Mnemonic::Ldy => load_store::execute_load(self, opcode, Register::Y),
            Mnemonic::Sta => load_store::execute_store(self, opcode, Register::A),
            Mnemonic::Stx => load_store::execute_store(self, opcode, Register::X),
            Mnemonic::Sty => load_store::execute_store(self, opcode, Register::Y),

            Mnemonic::Tax => transfer::execute_tax(self, opcode),
            Mnemonic::Tay => transfer::execute_tay(self, opcode),
            Mnemonic::Tsx => transfer::execute_tsx(self, opcode),
            Mnemonic::Txa => transfer::execute_txa(self, opcode),
            Mnemonic::Txs => transfer::execute_txs(self, opcode),
            Mnemonic::Tya => transfer::execute_tya(self, opcode),

            Mnemonic::Adc => alu::execute_adc(self, opcode),
            Mnemonic::Sbc => alu::execute_sbc(self, opcode),
            Mnemonic::And => alu::execute_and(self, opcode),
            Mnemonic::Ora => alu::execute_ora(self, opcode),
            Mnemonic::Eor => alu::execute_eor(self, opcode),
            Mnemonic::Cmp => alu::execute_compare(self, opcode, Register::A),
            Mnemonic::Cpx => alu::execute_compare(self, opcode, Register::X),
            Mnemonic::Cpy => alu::execute_compare(self, opcode, Register::Y),
            Mnemonic::Bit => alu::execute_bit(self, opcode),

            Mnemonic::Inc => inc_dec::execute_inc(self, opcode),
            Mnemonic::Dec => inc_dec::execute_dec(self, opcode),
            Mnemonic::Inx => inc_dec::execute_adjust_register(self, opcode, Register::X, 1),
            Mnemonic::Iny => inc_dec::execute_adjust_register(self, opcode, Register::Y, 1),
            Mnemonic::Dex => inc_dec::execute_adjust_register(self, opcode, Register::X, -1),
            Mnemonic::Dey => inc_dec::execute_adjust_register(self, opcode, Register::Y, -1),

            Mnemonic::Asl => shifts::execute_asl(self, opcode),
            Mnemonic::Lsr => shifts::execute_lsr(self, opcode),
            Mnemonic::Rol => shifts::execute_rol(self, opcode),
            Mnemonic::Ror => shifts::execute_ror(self, opcode),

            Mnemonic::Bcc => branches::execute_branch(self, opcode, Status::CARRY, false),
            Mnemonic::Bcs => branches::execute_branch(self, opcode, Status::CARRY, true),
            Mnemonic::Beq => branches::execute_branch(self, opcode, Status::ZERO, true),
            Mnemonic::Bne => branches::execute_branch(self, opcode, Status::ZERO, false),
            Mnemonic::Bmi => branches::execute_branch(self, opcode, Status::NEGATIVE, true),
            Mnemonic::Bpl => branches::execute_branch(self, opcode, Status::NEGATIVE, false),
            Mnemonic::Bvs => branches::execute_branch(self, opcode, Status::OVERFLOW, true),
            Mnemonic::Bvc => branches::execute_branch(self, opcode, Status::OVERFLOW, false),

            Mnemonic::Clc => flags::execute_set_flag(self, opcode, Status::CARRY, false),
            Mnemonic::Cld => flags::execute_set_flag(self, opcode, Status::DECIMAL, false),
            Mnemonic::Cli => flags::execute_set_flag(self, opcode, Status::IRQ_DISABLE, false),
            Mnemonic::Clv => flags::execute_set_flag(self, opcode, Status::OVERFLOW, false),
            Mnemonic::Sec => flags::execute_set_flag(self, opcode, Status::CARRY, true),
            Mnemonic::Sed => flags::execute_set_flag(self, opcode, Status::DECIMAL, true),
            Mnemonic::Sei => flags::execute_set_flag(self, opcode, Status::IRQ_DISABLE, true),

            Mnemonic::Jmp => control::execute_jmp(self, opcode),
            Mnemonic::Jsr => control::execute_jsr(self, opcode),
            Mnemonic::Rts => control::execute_rts(self, opcode),
            Mnemonic::Brk => control::execute_brk(self, opcode),
            Mnemonic::Rti => control::execute_rti(self, opcode),
            Mnemonic::Nop => control::execute_nop(self, opcode),

            Mnemonic::Pha => stack::execute_pha(self, opcode),
            Mnemonic::Php => stack::execute_php(self, opcode),
            Mnemonic::Pla => stack::execute_pla(self, opcode),
            Mnemonic::Plp => stack::execute_plp(self, opcode),

            Mnemonic::Ill => Err(ExecutionError::IllegalOpcode(opcode)),
        }
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until the cycle budget is exhausted or an
    /// error occurs. Returns the actual number of cycles consumed (may
    /// overshoot the budget by the tail of the final instruction).
    ///
    /// This is useful for frame-locked execution models where the CPU
    /// must run for an exact number of cycles per frame (e.g., 29780
    /// cycles for 60Hz NTSC).
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    // ========== Program Counter Unit ==========

    /// Reads the byte at PC, then increments PC.
    ///
    /// This is the single choke point through which every opcode byte,
    /// operand byte, and branch offset is consumed. The increment happens
    /// after the read; handlers depend on that ordering.
    pub fn fetch_pc(&mut self) -> u8 {
        let byte = self.memory.read(self.pc);
        self.increment_pc();
        byte
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, addr: u16) {
        self.pc = addr;
    }

    /// Advances the program counter by one, wrapping at 16 bits.
    pub fn increment_pc(&mut self) {
        self.pc = self.pc.wrapping_add(1);
    }

    /// Moves the program counter back by one, wrapping at 16 bits.
    pub fn decrement_pc(&mut self) {
        self.pc = self.pc.wrapping_sub(1);
    }

    // ========== Stack Unit ==========

    /// Pushes a byte onto the stack page.
    ///
    /// Writes at `0x0100 + SP`, then increments SP. Pushing while SP is
    /// at 0xFF wraps exactly as the hardware does, but the condition is
    /// recorded and logged so host tooling can flag runaway guests.
    pub fn push(&mut self, byte: u8) {
        self.memory.write(STACK_PAGE + self.sp as u16, byte);

        if self.sp == 0xFF {
            self.stack_overflows += 1;
            warn!("stack overflow: push at SP=0xFF, wrapping");
        }

        self.sp = self.sp.wrapping_add(1);
    }

    /// Pops a byte off the stack page.
    ///
    /// Decrements SP, then reads at `0x0100 + SP`. Popping while SP is
    /// at 0x00 wraps to 0xFF exactly as the hardware does, but the
    /// condition is recorded and logged.
    pub fn pop(&mut self) -> u8 {
        if self.sp == 0x00 {
            self.stack_underflows += 1;
            warn!("stack underflow: pop at SP=0x00, wrapping");
        }

        self.sp = self.sp.wrapping_sub(1);
        self.memory.read(STACK_PAGE + self.sp as u16)
    }

    // ========== Addressing-Mode Resolver ==========

    /// Resolves an addressing mode to an operand value.
    ///
    /// Immediate mode returns the next fetched byte directly; every other
    /// mode resolves to an effective address and reads the bus there. The
    /// bool marks a page-boundary crossing for modes that can incur the
    /// +1 cycle read penalty.
    pub(crate) fn get_operand_value(
        &mut self,
        mode: AddressingMode,
    ) -> Result<(u8, bool), ExecutionError> {
        if mode == AddressingMode::Immediate {
            return Ok((self.fetch_pc(), false));
        }

        let (addr, page_crossed) = self.get_effective_address(mode)?;
        Ok((self.memory.read(addr), page_crossed))
    }

    /// Resolves an addressing mode to an effective 16-bit address.
    ///
    /// Consumes operand bytes from the instruction stream via `fetch_pc`.
    /// The bool marks a page-boundary crossing (AbsoluteX, AbsoluteY,
    /// IndirectY only).
    ///
    /// Modes without an effective address (Implicit, Accumulator,
    /// Immediate, Relative) are a contract violation and return
    /// [`ExecutionError::UnaddressableMode`].
    pub(crate) fn get_effective_address(
        &mut self,
        mode: AddressingMode,
    ) -> Result<(u16, bool), ExecutionError> {
        match mode {
            AddressingMode::ZeroPage => {
                let addr = self.fetch_pc() as u16;
                Ok((addr, false))
            }

            AddressingMode::ZeroPageX | AddressingMode::ZeroPageY => {
                let index = if mode == AddressingMode::ZeroPageX {
                    self.x
                } else {
                    self.y
                };
                // Stays within the zero page: documented hardware quirk
                let addr = self.fetch_pc().wrapping_add(index) as u16;
                Ok((addr, false))
            }

            AddressingMode::Absolute => {
                let low = self.fetch_pc() as u16;
                let high = self.fetch_pc() as u16;
                Ok(((high << 8) | low, false))
            }

            AddressingMode::AbsoluteX | AddressingMode::AbsoluteY => {
                let low = self.fetch_pc() as u16;
                let high = self.fetch_pc() as u16;
                let base = (high << 8) | low;

                let index = if mode == AddressingMode::AbsoluteX {
                    self.x
                } else {
                    self.y
                };
                let addr = base.wrapping_add(index as u16);
                let page_crossed = (base & 0xFF00) != (addr & 0xFF00);
                Ok((addr, page_crossed))
            }

            AddressingMode::Indirect => {
                let ptr_low = self.fetch_pc() as u16;
                let ptr_high = self.fetch_pc() as u16;
                let ptr = (ptr_high << 8) | ptr_low;

                // Hardware bug: when the pointer low byte is 0xFF the
                // high byte of the target is fetched from the start of
                // the same page instead of crossing into the next one.
                let low = self.memory.read(ptr) as u16;
                let high_addr = if (ptr & 0x00FF) == 0x00FF {
                    ptr & 0xFF00
                } else {
                    ptr.wrapping_add(1)
                };
                let high = self.memory.read(high_addr) as u16;
                Ok(((high << 8) | low, false))
            }

            AddressingMode::IndirectX => {
                // Pre-indexed: add X before dereferencing; both the sum
                // and the pointer read wrap within the zero page
                let ptr = self.fetch_pc().wrapping_add(self.x);
                let low = self.memory.read(ptr as u16) as u16;
                let high = self.memory.read(ptr.wrapping_add(1) as u16) as u16;
                Ok(((high << 8) | low, false))
            }

            AddressingMode::IndirectY => {
                // Post-indexed: dereference the unmodified pointer, then
                // add Y to the base address (mod 65536)
                let ptr = self.fetch_pc();
                let low = self.memory.read(ptr as u16) as u16;
                let high = self.memory.read(ptr.wrapping_add(1) as u16) as u16;
                let base = (high << 8) | low;

                let addr = base.wrapping_add(self.y as u16);
                let page_crossed = (base & 0xFF00) != (addr & 0xFF00);
                Ok((addr, page_crossed))
            }

            AddressingMode::Implicit
            | AddressingMode::Accumulator
            | AddressingMode::Immediate
            | AddressingMode::Relative => Err(ExecutionError::UnaddressableMode(mode)),
        }
    }

    // ========== Flag Helpers ==========

    /// Updates the Zero and Negative flags from a result byte.
    ///
    /// Negative comes from bit 7 of the value.
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.p.set(Status::ZERO, value == 0);
        self.p.set(Status::NEGATIVE, (value & 0x80) != 0);
    }

    /// Returns the state of one named status flag.
    pub fn flag(&self, flag: Status) -> bool {
        self.p.contains(flag)
    }

    /// Sets or clears one named status flag, leaving the others untouched.
    pub fn set_flag(&mut self, flag: Status, on: bool) {
        self.p.set(flag, on);
    }

    // ========== Register Accessors ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register.
    pub fn status(&self) -> Status {
        self.p
    }

    /// Returns the status register as a packed byte (NV-BDIZC layout).
    pub fn status_byte(&self) -> u8 {
        self.p.bits()
    }

    /// Returns the total number of CPU cycles executed since initialization.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Number of pushes that wrapped past the top of the stack page.
    pub fn stack_overflows(&self) -> u64 {
        self.stack_overflows
    }

    /// Number of pops that wrapped past the bottom of the stack page.
    pub fn stack_underflows(&self) -> u64 {
        self.stack_underflows
    }

    /// Sets the accumulator register.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Sets the status register wholesale.
    pub fn set_status(&mut self, status: Status) {
        self.p = status;
    }

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and returns the memory bus.
    pub fn into_memory(self) -> M {
        self.memory
    }
}
