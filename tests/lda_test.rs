//! Tests for the LDA/LDX/LDY load instructions.
//!
//! Tests cover:
//! - All addressing modes, including the zero-page index wraparound and
//!   the IndirectX/IndirectY asymmetry
//! - Flag updates from the destination register
//! - Cycle counts including page-crossing penalties

use nes6502::{FlatMemory, MemoryBus, Status, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

// ========== Immediate ==========

#[test]
fn test_lda_immediate_negative_value() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0xA9); // LDA #$80
    cpu.memory_mut().write(0x8001, 0x80);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag(Status::NEGATIVE));
    assert!(!cpu.flag(Status::ZERO));
    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_lda_immediate_zero_clears_negative() {
    let mut cpu = setup_cpu();
    cpu.set_flag(Status::NEGATIVE, true);
    cpu.memory_mut().write(0x8000, 0xA9); // LDA #$00
    cpu.memory_mut().write(0x8001, 0x00);

    cpu.step().unwrap();

    assert!(cpu.flag(Status::ZERO));
    assert!(!cpu.flag(Status::NEGATIVE));
}

// ========== Zero Page ==========

#[test]
fn test_lda_zero_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0042, 0x37);
    cpu.memory_mut().write(0x8000, 0xA5); // LDA $42
    cpu.memory_mut().write(0x8001, 0x42);

    assert_eq!(cpu.step().unwrap(), 3);
    assert_eq!(cpu.a(), 0x37);
}

#[test]
fn test_lda_zero_page_x_wraps_within_page() {
    let mut cpu = setup_cpu();
    cpu.set_x(0xFF);
    cpu.memory_mut().write(0x007F, 0x55); // (0x80 + 0xFF) & 0xFF
    cpu.memory_mut().write(0x017F, 0xEE); // must NOT be read
    cpu.memory_mut().write(0x8000, 0xB5); // LDA $80,X
    cpu.memory_mut().write(0x8001, 0x80);

    assert_eq!(cpu.step().unwrap(), 4);
    assert_eq!(cpu.a(), 0x55);
}

#[test]
fn test_ldx_zero_page_y_wraps_within_page() {
    let mut cpu = setup_cpu();
    cpu.set_y(0x10);
    cpu.memory_mut().write(0x0005, 0x21); // (0xF5 + 0x10) & 0xFF
    cpu.memory_mut().write(0x8000, 0xB6); // LDX $F5,Y
    cpu.memory_mut().write(0x8001, 0xF5);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x21);
}

// ========== Absolute ==========

#[test]
fn test_lda_absolute() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x1234, 0x7E);
    cpu.memory_mut().write(0x8000, 0xAD); // LDA $1234
    cpu.memory_mut().write(0x8001, 0x34);
    cpu.memory_mut().write(0x8002, 0x12);

    assert_eq!(cpu.step().unwrap(), 4);
    assert_eq!(cpu.a(), 0x7E);
    assert_eq!(cpu.pc(), 0x8003);
}

#[test]
fn test_lda_absolute_x_no_cross() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x10);
    cpu.memory_mut().write(0x1244, 0x01);
    cpu.memory_mut().write(0x8000, 0xBD); // LDA $1234,X
    cpu.memory_mut().write(0x8001, 0x34);
    cpu.memory_mut().write(0x8002, 0x12);

    assert_eq!(cpu.step().unwrap(), 4); // same page, no penalty
    assert_eq!(cpu.a(), 0x01);
}

#[test]
fn test_lda_absolute_y_page_cross_penalty() {
    let mut cpu = setup_cpu();
    cpu.set_y(0x01);
    cpu.memory_mut().write(0x1300, 0x02);
    cpu.memory_mut().write(0x8000, 0xB9); // LDA $12FF,Y
    cpu.memory_mut().write(0x8001, 0xFF);
    cpu.memory_mut().write(0x8002, 0x12);

    assert_eq!(cpu.step().unwrap(), 5); // 4 + 1 for crossing
    assert_eq!(cpu.a(), 0x02);
}

#[test]
fn test_absolute_index_wraps_address_space() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x02);
    cpu.memory_mut().write(0x0001, 0x5A); // 0xFFFF + 2 wraps to 0x0001
    cpu.memory_mut().write(0x8000, 0xBD); // LDA $FFFF,X
    cpu.memory_mut().write(0x8001, 0xFF);
    cpu.memory_mut().write(0x8002, 0xFF);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x5A);
}

// ========== Indexed Indirect / Indirect Indexed ==========

#[test]
fn test_lda_indirect_x_pre_indexed() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x04);
    // Pointer at (0x20 + 0x04) = 0x24 -> 0x3000
    cpu.memory_mut().write(0x0024, 0x00);
    cpu.memory_mut().write(0x0025, 0x30);
    cpu.memory_mut().write(0x3000, 0x99);
    cpu.memory_mut().write(0x8000, 0xA1); // LDA ($20,X)
    cpu.memory_mut().write(0x8001, 0x20);

    assert_eq!(cpu.step().unwrap(), 6);
    assert_eq!(cpu.a(), 0x99);
}

#[test]
fn test_lda_indirect_x_pointer_wraps_in_zero_page() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x01);
    // Operand 0xFE + X = 0xFF; pointer bytes at 0xFF and (wrap) 0x00
    cpu.memory_mut().write(0x00FF, 0x34);
    cpu.memory_mut().write(0x0000, 0x12);
    cpu.memory_mut().write(0x1234, 0x44);
    cpu.memory_mut().write(0x8000, 0xA1); // LDA ($FE,X)
    cpu.memory_mut().write(0x8001, 0xFE);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x44);
}

#[test]
fn test_lda_indirect_y_post_indexed() {
    let mut cpu = setup_cpu();
    cpu.set_y(0x10);
    // Pointer at 0x20 -> 0x3000, plus Y = 0x3010
    cpu.memory_mut().write(0x0020, 0x00);
    cpu.memory_mut().write(0x0021, 0x30);
    cpu.memory_mut().write(0x3010, 0x66);
    cpu.memory_mut().write(0x8000, 0xB1); // LDA ($20),Y
    cpu.memory_mut().write(0x8001, 0x20);

    assert_eq!(cpu.step().unwrap(), 5); // no crossing
    assert_eq!(cpu.a(), 0x66);
}

#[test]
fn test_lda_indirect_y_page_cross_penalty() {
    let mut cpu = setup_cpu();
    cpu.set_y(0x01);
    cpu.memory_mut().write(0x0020, 0xFF);
    cpu.memory_mut().write(0x0021, 0x30); // base 0x30FF + 1 = 0x3100
    cpu.memory_mut().write(0x3100, 0x77);
    cpu.memory_mut().write(0x8000, 0xB1); // LDA ($20),Y
    cpu.memory_mut().write(0x8001, 0x20);

    assert_eq!(cpu.step().unwrap(), 6); // 5 + 1 for crossing
    assert_eq!(cpu.a(), 0x77);
}

#[test]
fn test_indirect_x_and_y_resolve_differently() {
    // Same operand byte, same register value, different targets
    let mut cpu = setup_cpu();
    cpu.set_x(0x05);
    cpu.set_y(0x05);

    // IndirectX path: pointer at 0x20+0x05 = 0x25 -> 0x4000
    cpu.memory_mut().write(0x0025, 0x00);
    cpu.memory_mut().write(0x0026, 0x40);
    cpu.memory_mut().write(0x4000, 0xAA);

    // IndirectY path: pointer at 0x20 -> 0x5000, plus Y = 0x5005
    cpu.memory_mut().write(0x0020, 0x00);
    cpu.memory_mut().write(0x0021, 0x50);
    cpu.memory_mut().write(0x5005, 0xBB);

    cpu.memory_mut().write(0x8000, 0xA1); // LDA ($20,X)
    cpu.memory_mut().write(0x8001, 0x20);
    cpu.memory_mut().write(0x8002, 0xB1); // LDA ($20),Y
    cpu.memory_mut().write(0x8003, 0x20);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0xAA);
    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0xBB);
}
