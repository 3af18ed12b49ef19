//! # Status Register Flags
//!
//! Bit-level model of the 6502 processor status register (P). Callers
//! address individual flags through the named constants below; raw bit
//! indices are never exposed.

use bitflags::bitflags;

bitflags! {
    /// Processor status register (P) flags.
    ///
    /// Bit layout (NV-BDIZC):
    ///
    /// | Bit | Mask | Name        | Meaning                                |
    /// |-----|------|-------------|----------------------------------------|
    /// | 7   | 0x80 | NEGATIVE    | Bit 7 of the last result               |
    /// | 6   | 0x40 | OVERFLOW    | Signed overflow on the last operation  |
    /// | 5   | 0x20 | UNUSED      | No meaning; reads as 1                 |
    /// | 4   | 0x10 | BREAK       | Forced set in the byte pushed by BRK   |
    /// | 3   | 0x08 | DECIMAL     | BCD arithmetic mode for ADC/SBC        |
    /// | 2   | 0x04 | IRQ_DISABLE | Maskable interrupts blocked            |
    /// | 1   | 0x02 | ZERO        | Last result was zero                   |
    /// | 0   | 0x01 | CARRY       | Unsigned carry / no-borrow             |
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        /// Carry flag
        const CARRY = 0b0000_0001;
        /// Zero flag
        const ZERO = 0b0000_0010;
        /// Interrupt disable flag
        const IRQ_DISABLE = 0b0000_0100;
        /// Decimal mode flag
        const DECIMAL = 0b0000_1000;
        /// Break flag
        const BREAK = 0b0001_0000;
        /// Unused bit, always set
        const UNUSED = 0b0010_0000;
        /// Overflow flag
        const OVERFLOW = 0b0100_0000;
        /// Negative flag
        const NEGATIVE = 0b1000_0000;
    }
}

impl Status {
    /// Power-on value of the status register: only the unused bit set.
    pub fn power_on() -> Status {
        Status::UNUSED
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::power_on()
    }
}
