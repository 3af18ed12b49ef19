//! # Opcode Metadata Table
//!
//! This module contains the complete 256-entry opcode metadata table that
//! serves as the single source of truth for all 6502 instruction
//! information.
//!
//! The table covers the 151 documented NMOS 6502 opcodes; the remaining
//! 105 undocumented entries carry the [`Mnemonic::Ill`] marker and cause
//! dispatch to fail with a typed error.
//!
//! Each opcode entry includes:
//! - Mnemonic (instruction identity)
//! - Addressing mode
//! - Base cycle cost (excluding page-crossing and branch penalties)
//! - Instruction size in bytes

use crate::addressing::AddressingMode;

/// Instruction mnemonic.
///
/// One variant per documented 6502 instruction, plus [`Mnemonic::Ill`]
/// for undocumented opcode bytes. The dispatch engine matches on this to
/// select a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx,
    Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp,
    Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay,
    Tsx, Txa, Txs, Tya,
    /// Undocumented opcode.
    Ill,
}

impl Mnemonic {
    /// Three-letter assembler name ("???" for undocumented opcodes).
    pub const fn name(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC", Mnemonic::And => "AND", Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC", Mnemonic::Bcs => "BCS", Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT", Mnemonic::Bmi => "BMI", Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL", Mnemonic::Brk => "BRK", Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS", Mnemonic::Clc => "CLC", Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI", Mnemonic::Clv => "CLV", Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX", Mnemonic::Cpy => "CPY", Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX", Mnemonic::Dey => "DEY", Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC", Mnemonic::Inx => "INX", Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP", Mnemonic::Jsr => "JSR", Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX", Mnemonic::Ldy => "LDY", Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP", Mnemonic::Ora => "ORA", Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP", Mnemonic::Pla => "PLA", Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL", Mnemonic::Ror => "ROR", Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS", Mnemonic::Sbc => "SBC", Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED", Mnemonic::Sei => "SEI", Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX", Mnemonic::Sty => "STY", Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY", Mnemonic::Tsx => "TSX", Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS", Mnemonic::Tya => "TYA", Mnemonic::Ill => "???",
        }
    }
}

/// Metadata for a single 6502 opcode.
///
/// This struct contains all static information about an instruction
/// needed for decoding and execution planning.
///
/// # Examples
///
/// ```
/// use nes6502::{OPCODE_TABLE, AddressingMode, Mnemonic};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction identity ([`Mnemonic::Ill`] for undocumented opcodes).
    pub mnemonic: Mnemonic,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost, before page-crossing or branch-taken penalties.
    ///
    /// Documented instructions have cycles in the range 2-7.
    /// Undocumented opcodes are marked with 0 cycles.
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    ///
    /// - 1 byte: Implicit, Accumulator modes
    /// - 2 bytes: Immediate, Zero Page, Relative, Indexed Indirect modes
    /// - 3 bytes: Absolute, Indirect modes
    pub size_bytes: u8,
}

const fn op(
    mnemonic: Mnemonic,
    addressing_mode: AddressingMode,
    base_cycles: u8,
    size_bytes: u8,
) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        addressing_mode,
        base_cycles,
        size_bytes,
    }
}

/// Placeholder entry for the 105 undocumented opcodes.
const ILLEGAL: OpcodeMetadata = op(Mnemonic::Ill, AddressingMode::Implicit, 0, 1);

/// Complete 256-entry opcode metadata table indexed by opcode byte value.
///
/// This table serves as the single source of truth for all 6502
/// instruction metadata. Index into the array using the opcode byte to
/// retrieve its metadata.
///
/// Base cycle costs follow the documented NMOS 6502 timing tables; the
/// dynamic penalties (indexed reads crossing a page, branches taken) are
/// added by the execution engine.
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = {
    use AddressingMode::*;
    use Mnemonic::*;

    let mut t = [ILLEGAL; 256];

    // Loads
    t[0xA9] = op(Lda, Immediate, 2, 2);
    t[0xA5] = op(Lda, ZeroPage, 3, 2);
    t[0xB5] = op(Lda, ZeroPageX, 4, 2);
    t[0xAD] = op(Lda, Absolute, 4, 3);
    t[0xBD] = op(Lda, AbsoluteX, 4, 3);
    t[0xB9] = op(Lda, AbsoluteY, 4, 3);
    t[0xA1] = op(Lda, IndirectX, 6, 2);
    t[0xB1] = op(Lda, IndirectY, 5, 2);
    t[0xA2] = op(Ldx, Immediate, 2, 2);
    t[0xA6] = op(Ldx, ZeroPage, 3, 2);
    t[0xB6] = op(Ldx, ZeroPageY, 4, 2);
    t[0xAE] = op(Ldx, Absolute, 4, 3);
    t[0xBE] = op(Ldx, AbsoluteY, 4, 3);
    t[0xA0] = op(Ldy, Immediate, 2, 2);
    t[0xA4] = op(Ldy, ZeroPage, 3, 2);
    t[0xB4] = op(Ldy, ZeroPageX, 4, 2);
    t[0xAC] = op(Ldy, Absolute, 4, 3);
    t[0xBC] = op(Ldy, AbsoluteX, 4, 3);

    // Stores
    t[0x85] = op(Sta, ZeroPage, 3, 2);
    t[0x95] = op(Sta, ZeroPageX, 4, 2);
    t[0x8D] = op(Sta, Absolute, 4, 3);
    t[0x9D] = op(Sta, AbsoluteX, 5, 3);
    t[0x99] = op(Sta, AbsoluteY, 5, 3);
    t[0x81] = op(Sta, IndirectX, 6, 2);
    t[0x91] = op(Sta, IndirectY, 6, 2);
    t[0x86] = op(Stx, ZeroPage, 3, 2);
    t[0x96] = op(Stx, ZeroPageY, 4, 2);
    t[0x8E] = op(Stx, Absolute, 4, 3);
    t[0x84] = op(Sty, ZeroPage, 3, 2);
    t[0x94] = op(Sty, ZeroPageX, 4, 2);
    t[0x8C] = op(Sty, Absolute, 4, 3);

    // Register transfers
    t[0xAA] = op(Tax, Implicit, 2, 1);
    t[0xA8] = op(Tay, Implicit, 2, 1);
    t[0xBA] = op(Tsx, Implicit, 2, 1);
    t[0x8A] = op(Txa, Implicit, 2, 1);
    t[0x9A] = op(Txs, Implicit, 2, 1);
    t[0x98] = op(Tya, Implicit, 2, 1);

    // Arithmetic
    t[0x69] = op(Adc, Immediate, 2, 2);
    t[0x65] = op(Adc, ZeroPage, 3, 2);
    t[0x75] = op(Adc, ZeroPageX, 4, 2);
    t[0x6D] = op(Adc, Absolute, 4, 3);
    t[0x7D] = op(Adc, AbsoluteX, 4, 3);
    t[0x79] = op(Adc, AbsoluteY, 4, 3);
    t[0x61] = op(Adc, IndirectX, 6, 2);
    t[0x71] = op(Adc, IndirectY, 5, 2);
    t[0xE9] = op(Sbc, Immediate, 2, 2);
    t[0xE5] = op(Sbc, ZeroPage, 3, 2);
    t[0xF5] = op(Sbc, ZeroPageX, 4, 2);
    t[0xED] = op(Sbc, Absolute, 4, 3);
    t[0xFD] = op(Sbc, AbsoluteX, 4, 3);
    t[0xF9] = op(Sbc, AbsoluteY, 4, 3);
    t[0xE1] = op(Sbc, IndirectX, 6, 2);
    t[0xF1] = op(Sbc, IndirectY, 5, 2);

    // Logical
    t[0x29] = op(And, Immediate, 2, 2);
    t[0x25] = op(And, ZeroPage, 3, 2);
    t[0x35] = op(And, ZeroPageX, 4, 2);
    t[0x2D] = op(And, Absolute, 4, 3);
    t[0x3D] = op(And, AbsoluteX, 4, 3);
    t[0x39] = op(And, AbsoluteY, 4, 3);
    t[0x21] = op(And, IndirectX, 6, 2);
    t[0x31] = op(And, IndirectY, 5, 2);
    t[0x09] = op(Ora, Immediate, 2, 2);
    t[0x05] = op(Ora, ZeroPage, 3, 2);
    t[0x15] = op(Ora, ZeroPageX, 4, 2);
    t[0x0D] = op(Ora, Absolute, 4, 3);
    t[0x1D] = op(Ora, AbsoluteX, 4, 3);
    t[0x19] = op(Ora, AbsoluteY, 4, 3);
    t[0x01] = op(Ora, IndirectX, 6, 2);
    t[0x11] = op(Ora, IndirectY, 5, 2);
    t[0x49] = op(Eor, Immediate, 2, 2);
    t[0x45] = op(Eor, ZeroPage, 3, 2);
    t[0x55] = op(Eor, ZeroPageX, 4, 2);
    t[0x4D] = op(Eor, Absolute, 4, 3);
    t[0x5D] = op(Eor, AbsoluteX, 4, 3);
    t[0x59] = op(Eor, AbsoluteY, 4, 3);
    t[0x41] = op(Eor, IndirectX, 6, 2);
    t[0x51] = op(Eor, IndirectY, 5, 2);

    // Compares and bit test
    t[0xC9] = op(Cmp, Immediate, 2, 2);
    t[0xC5] = op(Cmp, ZeroPage, 3, 2);
    t[0xD5] = op(Cmp, ZeroPageX, 4, 2);
    t[0xCD] = op(Cmp, Absolute, 4, 3);
    t[0xDD] = op(Cmp, AbsoluteX, 4, 3);
    t[0xD9] = op(Cmp, AbsoluteY, 4, 3);
    t[0xC1] = op(Cmp, IndirectX, 6, 2);
    t[0xD1] = op(Cmp, IndirectY, 5, 2);
    t[0xE0] = op(Cpx, Immediate, 2, 2);
    t[0xE4] = op(Cpx, ZeroPage, 3, 2);
    t[0xEC] = op(Cpx, Absolute, 4, 3);
    t[0xC0] = op(Cpy, Immediate, 2, 2);
    t[0xC4] = op(Cpy, ZeroPage, 3, 2);
    t[0xCC] = op(Cpy, Absolute, 4, 3);
    t[0x24] = op(Bit, ZeroPage, 3, 2);
    t[0x2C] = op(Bit, Absolute, 4, 3);

    // Increments and decrements
    t[0xE6] = op(Inc, ZeroPage, 5, 2);
    t[0xF6] = op(Inc, ZeroPageX, 6, 2);
    t[0xEE] = op(Inc, Absolute, 6, 3);
    t[0xFE] = op(Inc, AbsoluteX, 7, 3);
    t[0xC6] = op(Dec, ZeroPage, 5, 2);
    t[0xD6] = op(Dec, ZeroPageX, 6, 2);
    t[0xCE] = op(Dec, Absolute, 6, 3);
    t[0xDE] = op(Dec, AbsoluteX, 7, 3);
    t[0xE8] = op(Inx, Implicit, 2, 1);
    t[0xC8] = op(Iny, Implicit, 2, 1);
    t[0xCA] = op(Dex, Implicit, 2, 1);
    t[0x88] = op(Dey, Implicit, 2, 1);

    // Shifts and rotates
    t[0x0A] = op(Asl, Accumulator, 2, 1);
    t[0x06] = op(Asl, ZeroPage, 5, 2);
    t[0x16] = op(Asl, ZeroPageX, 6, 2);
    t[0x0E] = op(Asl, Absolute, 6, 3);
    t[0x1E] = op(Asl, AbsoluteX, 7, 3);
    t[0x4A] = op(Lsr, Accumulator, 2, 1);
    t[0x46] = op(Lsr, ZeroPage, 5, 2);
    t[0x56] = op(Lsr, ZeroPageX, 6, 2);
    t[0x4E] = op(Lsr, Absolute, 6, 3);
    t[0x5E] = op(Lsr, AbsoluteX, 7, 3);
    t[0x2A] = op(Rol, Accumulator, 2, 1);
    t[0x26] = op(Rol, ZeroPage, 5, 2);
    t[0x36] = op(Rol, ZeroPageX, 6, 2);
    t[0x2E] = op(Rol, Absolute, 6, 3);
    t[0x3E] = op(Rol, AbsoluteX, 7, 3);
    t[0x6A] = op(Ror, Accumulator, 2, 1);
    t[0x66] = op(Ror, ZeroPage, 5, 2);
    t[0x76] = op(Ror, ZeroPageX, 6, 2);
    t[0x6E] = op(Ror, Absolute, 6, 3);
    t[0x7E] = op(Ror, AbsoluteX, 7, 3);

    // Branches
    t[0x90] = op(Bcc, Relative, 2, 2);
    t[0xB0] = op(Bcs, Relative, 2, 2);
    t[0xF0] = op(Beq, Relative, 2, 2);
    t[0x30] = op(Bmi, Relative, 2, 2);
    t[0xD0] = op(Bne, Relative, 2, 2);
    t[0x10] = op(Bpl, Relative, 2, 2);
    t[0x50] = op(Bvc, Relative, 2, 2);
    t[0x70] = op(Bvs, Relative, 2, 2);

    // Flag control
    t[0x18] = op(Clc, Implicit, 2, 1);
    t[0xD8] = op(Cld, Implicit, 2, 1);
    t[0x58] = op(Cli, Implicit, 2, 1);
    t[0xB8] = op(Clv, Implicit, 2, 1);
    t[0x38] = op(Sec, Implicit, 2, 1);
    t[0xF8] = op(Sed, Implicit, 2, 1);
    t[0x78] = op(Sei, Implicit, 2, 1);

    // Jumps and subroutines
    t[0x4C] = op(Jmp, Absolute, 3, 3);
    t[0x6C] = op(Jmp, Indirect, 5, 3);
    t[0x20] = op(Jsr, Absolute, 6, 3);
    t[0x60] = op(Rts, Implicit, 6, 1);

    // Stack and interrupt
    t[0x00] = op(Brk, Implicit, 7, 1);
    t[0x40] = op(Rti, Implicit, 6, 1);
    t[0x48] = op(Pha, Implicit, 3, 1);
    t[0x08] = op(Php, Implicit, 3, 1);
    t[0x68] = op(Pla, Implicit, 4, 1);
    t[0x28] = op(Plp, Implicit, 4, 1);

    // No-op
    t[0xEA] = op(Nop, Implicit, 2, 1);

    t
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_opcode_count() {
        let documented = OPCODE_TABLE
            .iter()
            .filter(|m| m.mnemonic != Mnemonic::Ill)
            .count();
        assert_eq!(documented, 151);
    }

    #[test]
    fn test_sizes_match_addressing_modes() {
        use AddressingMode::*;

        for m in OPCODE_TABLE.iter() {
            if m.mnemonic == Mnemonic::Ill {
                continue;
            }
            let expected = match m.addressing_mode {
                Implicit | Accumulator => 1,
                Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndirectX
                | IndirectY => 2,
                Absolute | AbsoluteX | AbsoluteY | Indirect => 3,
            };
            assert_eq!(
                m.size_bytes,
                expected,
                "{} with {:?} has wrong size",
                m.mnemonic.name(),
                m.addressing_mode
            );
        }
    }

    #[test]
    fn test_spot_check_entries() {
        assert_eq!(OPCODE_TABLE[0x00].mnemonic, Mnemonic::Brk);
        assert_eq!(OPCODE_TABLE[0x00].base_cycles, 7);
        assert_eq!(OPCODE_TABLE[0x6C].addressing_mode, AddressingMode::Indirect);
        assert_eq!(OPCODE_TABLE[0x6C].base_cycles, 5);
        assert_eq!(OPCODE_TABLE[0x91].base_cycles, 6); // STA (zp),Y has no penalty model
        assert_eq!(OPCODE_TABLE[0xEA].mnemonic, Mnemonic::Nop);
        assert_eq!(OPCODE_TABLE[0x02].mnemonic, Mnemonic::Ill);
    }

    #[test]
    fn test_illegal_entries_are_inert() {
        for m in OPCODE_TABLE.iter().filter(|m| m.mnemonic == Mnemonic::Ill) {
            assert_eq!(m.base_cycles, 0);
            assert_eq!(m.size_bytes, 1);
        }
    }
}
