//! EEPROM address pins, MSB to LSB:
//!
//! ```text
//! a9 a8  a7  a6 a5 a4 a3  a2 a1 a0
//! FZ FC  BS  I3 I2 I1 I0  S2 S1 S0
//! ```
//!
//! FZ/FC are the zero and carry flags, BS selects the byte half of the
//! control word, I is the opcode and S the micro-step.

use std::fmt;

use crate::ds::{Flags, RomHalf};
use crate::instruction::{Opcode, STEPS_PER_INSTRUCTION};

pub(crate) const STEP_BITS: u16 = 0b00_0000_0111;
pub(crate) const INSTRUCTION_BITS: u16 = 0b00_0111_1000;
pub(crate) const SELECT_BIT: u16 = 0b00_1000_0000;
pub(crate) const FLAG_CARRY_BIT: u16 = 0b01_0000_0000;
pub(crate) const FLAG_ZERO_BIT: u16 = 0b10_0000_0000;

const INSTRUCTION_SHIFT: u16 = 3;
const SELECT_SHIFT: u16 = 7;
const FLAGS_SHIFT: u16 = 8;

/// Number of addresses reachable through the ten wired pins.
pub(crate) const ADDRESS_SPACE: u16 = 1 << 10;

/// A 10-bit EEPROM address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Address(u16);

impl Address {
    /// Bits above a9 are not wired and are dropped.
    pub(crate) fn new(raw: u16) -> Self {
        Address(raw & (ADDRESS_SPACE - 1))
    }

    pub(crate) fn raw(self) -> u16 {
        self.0
    }

    pub(crate) fn offset(self) -> u64 {
        u64::from(self.0)
    }

    /// Every address of the wired space, in ascending order.
    pub(crate) fn all() -> impl Iterator<Item = Address> {
        (0..ADDRESS_SPACE).map(Address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#05x}", self.0)
    }
}

/// The semantic fields packed into an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct AddressFields {
    pub(crate) step: u8,
    pub(crate) opcode: Opcode,
    pub(crate) half: RomHalf,
    pub(crate) flags: Flags,
}

impl AddressFields {
    /// Steps 6 and 7 are never reached by the step counter.
    pub(crate) fn is_executable(&self) -> bool {
        usize::from(self.step) < STEPS_PER_INSTRUCTION
    }
}

impl fmt::Display for AddressFields {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:01b} {:01b} {:01b} {:04b} {:03b}",
            self.flags.zero() as u8,
            self.flags.carry() as u8,
            self.half as u8,
            self.opcode.bits(),
            self.step
        )
    }
}

pub(crate) fn decode(address: Address) -> AddressFields {
    let raw = address.raw();
    AddressFields {
        step: (raw & STEP_BITS) as u8,
        opcode: Opcode::from_nibble(((raw & INSTRUCTION_BITS) >> INSTRUCTION_SHIFT) as u8),
        half: RomHalf::from_bit((raw & SELECT_BIT) >> SELECT_SHIFT),
        flags: Flags::from_bits_truncate(
            ((raw & (FLAG_CARRY_BIT | FLAG_ZERO_BIT)) >> FLAGS_SHIFT) as u8,
        ),
    }
}

/// Inverse of [`decode`]. A step wider than three bits is truncated.
pub(crate) fn encode(fields: &AddressFields) -> Address {
    let raw = (u16::from(fields.step) & STEP_BITS)
        | (u16::from(fields.opcode.bits()) << INSTRUCTION_SHIFT)
        | ((fields.half as u16) << SELECT_SHIFT)
        | (u16::from(fields.flags.bits()) << FLAGS_SHIFT);
    Address::new(raw)
}
