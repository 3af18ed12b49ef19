//! Arithmetic and logical instructions: ADC, SBC, AND, ORA, EOR,
//! CMP, CPX, CPY, BIT.
//!
//! ADC and SBC honor the Decimal flag and switch to BCD arithmetic when
//! it is set. In both modes the Overflow flag is derived from the binary
//! interpretation of the operands.

use super::{invalid_mode, metadata, page_penalty, Register};
use crate::addressing::AddressingMode;
use crate::cpu::CPU;
use crate::memory::MemoryBus;
use crate::status::Status;
use crate::ExecutionError;

fn check_value_mode(opcode: u8) -> Result<crate::opcodes::OpcodeMetadata, ExecutionError> {
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
        | AddressingMode::IndirectY => Ok(meta),
        _ => Err(invalid_mode(meta)),
    }
}

/// Decodes a packed BCD byte to its decimal value (0-99 for valid input).
fn from_bcd(byte: u8) -> u8 {
    (byte >> 4) * 10 + (byte & 0x0F)
}

/// Encodes a decimal value 0-99 as a packed BCD byte.
fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Signed overflow rule: set when both inputs share a sign bit that the
/// result does not.
fn signed_overflow(a: u8, operand: u8, result: u8) -> bool {
    ((a ^ result) & (operand ^ result) & 0x80) != 0
}

/// ADC - add memory to accumulator with carry.
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = check_value_mode(opcode)?;
    let (value, page_crossed) = cpu.get_operand_value(meta.addressing_mode)?;

    let a = cpu.a;
    let carry_in = cpu.p.contains(Status::CARRY) as u8;

    if cpu.p.contains(Status::DECIMAL) {
        let total = from_bcd(a) as u16 + from_bcd(value) as u16 + carry_in as u16;
        let result = to_bcd((total % 100) as u8);

        // Overflow still follows the binary interpretation
        let binary = a.wrapping_add(value).wrapping_add(carry_in);
        cpu.p.set(Status::OVERFLOW, signed_overflow(a, value, binary));
        cpu.p.set(Status::CARRY, total > 99);
        cpu.a = result;
        cpu.set_zn(result);
    } else {
        let sum = a as u16 + value as u16 + carry_in as u16;
        let result = sum as u8;

        cpu.p.set(Status::CARRY, sum > 0xFF);
        cpu.p.set(Status::OVERFLOW, signed_overflow(a, value, result));
        cpu.a = result;
        cpu.set_zn(result);
    }

    Ok(meta.base_cycles + page_penalty(page_crossed))
}

/// SBC - subtract memory from accumulator with borrow.
///
/// Binary mode is ADC of the one's complement of the operand; Carry set
/// means no borrow occurred.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = check_value_mode(opcode)?;
    let (value, page_crossed) = cpu.get_operand_value(meta.addressing_mode)?;

    let a = cpu.a;
    let carry_in = cpu.p.contains(Status::CARRY) as u8;
    let borrow = 1 - carry_in;

    if cpu.p.contains(Status::DECIMAL) {
        let diff = from_bcd(a) as i16 - from_bcd(value) as i16 - borrow as i16;
        let no_borrow = diff >= 0;
        let result = to_bcd(diff.rem_euclid(100) as u8);

        let binary = a.wrapping_sub(value).wrapping_sub(borrow);
        cpu.p.set(Status::OVERFLOW, signed_overflow(a, !value, binary));
        cpu.p.set(Status::CARRY, no_borrow);
        cpu.a = result;
        cpu.set_zn(result);
    } else {
        let sum = a as u16 + (!value) as u16 + carry_in as u16;
        let result = sum as u8;

        cpu.p.set(Status::CARRY, sum > 0xFF);
        cpu.p.set(Status::OVERFLOW, signed_overflow(a, !value, result));
        cpu.a = result;
        cpu.set_zn(result);
    }

    Ok(meta.base_cycles + page_penalty(page_crossed))
}

/// AND - bitwise AND memory into accumulator.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = check_value_mode(opcode)?;
    let (value, page_crossed) = cpu.get_operand_value(meta.addressing_mode)?;

    cpu.a &= value;
    let a = cpu.a;
    cpu.set_zn(a);

    Ok(meta.base_cycles + page_penalty(page_crossed))
}

/// ORA - bitwise OR memory into accumulator.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = check_value_mode(opcode)?;
    let (value, page_crossed) = cpu.get_operand_value(meta.addressing_mode)?;

    cpu.a |= value;
    let a = cpu.a;
    cpu.set_zn(a);

    Ok(meta.base_cycles + page_penalty(page_crossed))
}

/// EOR - bitwise exclusive-OR memory into accumulator.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = check_value_mode(opcode)?;
    let (value, page_crossed) = cpu.get_operand_value(meta.addressing_mode)?;

    cpu.a ^= value;
    let a = cpu.a;
    cpu.set_zn(a);

    Ok(meta.base_cycles + page_penalty(page_crossed))
}

/// CMP / CPX / CPY - compare a register with memory.
///
/// Computes register minus operand without storing it: Carry set when
/// register >= operand (unsigned), Zero on equality, Negative from bit 7
/// of the difference. Overflow is not affected.
pub(crate) fn execute_compare<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    register: Register,
) -> Result<u8, ExecutionError> {
    let meta = check_value_mode(opcode)?;
    let (value, page_crossed) = cpu.get_operand_value(meta.addressing_mode)?;

    let reg = register.read(cpu);
    let diff = reg.wrapping_sub(value);
    cpu.p.set(Status::CARRY, reg >= value);
    cpu.set_zn(diff);

    Ok(meta.base_cycles + page_penalty(page_crossed))
}

/// BIT - test accumulator bits against memory.
///
/// Zero reflects `A & M`; Negative and Overflow are copied straight from
/// bits 7 and 6 of the memory operand. The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let meta = metadata(opcode);
    match meta.addressing_mode {
        AddressingMode::ZeroPage | AddressingMode::Absolute => {}
        _ => return Err(invalid_mode(meta)),
    }

    let (value, _) = cpu.get_operand_value(meta.addressing_mode)?;

    cpu.p.set(Status::ZERO, (cpu.a & value) == 0);
    cpu.p.set(Status::NEGATIVE, (value & 0x80) != 0);
    cpu.p.set(Status::OVERFLOW, (value & 0x40) != 0);

    Ok(meta.base_cycles)
}

#[cfg(test)]
mod tests {
    use super::{from_bcd, to_bcd};
    use crate::{Status, CPU, FlatMemory, MemoryBus};

    fn setup_cpu() -> CPU<FlatMemory> {
        let mut memory = FlatMemory::new();
        memory.write(0xFFFC, 0x00);
        memory.write(0xFFFD, 0x80);
        CPU::new(memory)
    }

    #[test]
    fn test_bcd_helpers() {
        assert_eq!(from_bcd(0x42), 42);
        assert_eq!(from_bcd(0x99), 99);
        assert_eq!(to_bcd(7), 0x07);
        assert_eq!(to_bcd(99), 0x99);
    }

    #[test]
    fn test_adc_carry_and_zero() {
        let mut cpu = setup_cpu();
        cpu.set_a(0xFF);
        cpu.memory_mut().write(0x8000, 0x69); // ADC #$01
        cpu.memory_mut().write(0x8001, 0x01);

        cpu.step().unwrap();
        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.flag(Status::CARRY));
        assert!(cpu.flag(Status::ZERO));
        assert!(!cpu.flag(Status::OVERFLOW)); // 0xFF is -1 signed, no overflow
    }

    #[test]
    fn test_adc_signed_overflow() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x7F); // +127
        cpu.memory_mut().write(0x8000, 0x69); // ADC #$01
        cpu.memory_mut().write(0x8001, 0x01);

        cpu.step().unwrap();
        assert_eq!(cpu.a(), 0x80);
        assert!(cpu.flag(Status::OVERFLOW));
        assert!(cpu.flag(Status::NEGATIVE));
        assert!(!cpu.flag(Status::CARRY));
    }

    #[test]
    fn test_sbc_no_borrow() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x50);
        cpu.set_flag(Status::CARRY, true); // no incoming borrow
        cpu.memory_mut().write(0x8000, 0xE9); // SBC #$10
        cpu.memory_mut().write(0x8001, 0x10);

        cpu.step().unwrap();
        assert_eq!(cpu.a(), 0x40);
        assert!(cpu.flag(Status::CARRY)); // no borrow occurred
    }

    #[test]
    fn test_sbc_with_borrow_out() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x10);
        cpu.set_flag(Status::CARRY, true);
        cpu.memory_mut().write(0x8000, 0xE9); // SBC #$20
        cpu.memory_mut().write(0x8001, 0x20);

        cpu.step().unwrap();
        assert_eq!(cpu.a(), 0xF0);
        assert!(!cpu.flag(Status::CARRY)); // borrowed
        assert!(cpu.flag(Status::NEGATIVE));
    }

    #[test]
    fn test_adc_decimal_mode() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x19); // BCD 19
        cpu.set_flag(Status::DECIMAL, true);
        cpu.memory_mut().write(0x8000, 0x69); // ADC #$28 (BCD 28)
        cpu.memory_mut().write(0x8001, 0x28);

        cpu.step().unwrap();
        assert_eq!(cpu.a(), 0x47); // BCD 47
        assert!(!cpu.flag(Status::CARRY));
    }

    #[test]
    fn test_adc_decimal_carry_out() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x81); // BCD 81
        cpu.set_flag(Status::DECIMAL, true);
        cpu.memory_mut().write(0x8000, 0x69); // ADC #$92 (BCD 92)
        cpu.memory_mut().write(0x8001, 0x92);

        cpu.step().unwrap();
        assert_eq!(cpu.a(), 0x73); // 173 mod 100 = 73
        assert!(cpu.flag(Status::CARRY));
    }

    #[test]
    fn test_sbc_decimal_mode() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x32); // BCD 32
        cpu.set_flag(Status::DECIMAL, true);
        cpu.set_flag(Status::CARRY, true);
        cpu.memory_mut().write(0x8000, 0xE9); // SBC #$15 (BCD 15)
        cpu.memory_mut().write(0x8001, 0x15);

        cpu.step().unwrap();
        assert_eq!(cpu.a(), 0x17); // BCD 17
        assert!(cpu.flag(Status::CARRY));
    }

    #[test]
    fn test_cmp_all_three_outcomes() {
        // equal
        let mut cpu = setup_cpu();
        cpu.set_a(0x40);
        cpu.memory_mut().write(0x8000, 0xC9); // CMP #$40
        cpu.memory_mut().write(0x8001, 0x40);
        cpu.step().unwrap();
        assert!(cpu.flag(Status::CARRY));
        assert!(cpu.flag(Status::ZERO));

        // register greater
        let mut cpu = setup_cpu();
        cpu.set_a(0x50);
        cpu.memory_mut().write(0x8000, 0xC9);
        cpu.memory_mut().write(0x8001, 0x40);
        cpu.step().unwrap();
        assert!(cpu.flag(Status::CARRY));
        assert!(!cpu.flag(Status::ZERO));

        // register smaller
        let mut cpu = setup_cpu();
        cpu.set_a(0x30);
        cpu.memory_mut().write(0x8000, 0xC9);
        cpu.memory_mut().write(0x8001, 0x40);
        cpu.step().unwrap();
        assert!(!cpu.flag(Status::CARRY));
        assert!(cpu.flag(Status::NEGATIVE)); // 0x30 - 0x40 = 0xF0
    }

    #[test]
    fn test_cpx_compares_x() {
        let mut cpu = setup_cpu();
        cpu.set_x(0x10);
        cpu.set_a(0xFF); // A must not participate
        cpu.memory_mut().write(0x8000, 0xE0); // CPX #$10
        cpu.memory_mut().write(0x8001, 0x10);

        cpu.step().unwrap();
        assert!(cpu.flag(Status::ZERO));
        assert!(cpu.flag(Status::CARRY));
    }

    #[test]
    fn test_bit_copies_high_bits() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x01);
        cpu.memory_mut().write(0x0010, 0xC0); // bits 7 and 6 set
        cpu.memory_mut().write(0x8000, 0x24); // BIT $10
        cpu.memory_mut().write(0x8001, 0x10);

        cpu.step().unwrap();
        assert!(cpu.flag(Status::ZERO)); // 0x01 & 0xC0 == 0
        assert!(cpu.flag(Status::NEGATIVE));
        assert!(cpu.flag(Status::OVERFLOW));
        assert_eq!(cpu.a(), 0x01); // untouched
    }
}
