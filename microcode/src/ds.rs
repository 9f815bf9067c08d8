use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// One bit per line of the control bus. The upper byte is stored in the
    /// left EEPROM, the lower byte in the right one.
    pub(crate) struct ControlWord: u16 {
        /// Halt
        const HLT = 1 << 15;
        /// Memory address register in
        const MI = 1 << 14;
        /// RAM out
        const RO = 1 << 13;
        /// RAM in
        const RI = 1 << 12;
        /// Instruction register in
        const II = 1 << 11;
        /// Instruction register out
        const IO = 1 << 10;
        /// Program counter out
        const CO = 1 << 9;
        /// Program counter enable (increment)
        const CE = 1 << 8;
        /// A register out
        const AO = 1 << 7;
        /// A register in
        const AI = 1 << 6;
        /// ALU sum out
        const EO = 1 << 5;
        /// ALU subtract mode
        const SU = 1 << 4;
        /// Flags register in
        const FI = 1 << 3;
        /// B register in
        const BI = 1 << 2;
        /// Output register in
        const OE = 1 << 1;
        /// Program counter in (jump)
        const J = 1;
    }
}

/// Builds a control word out of line names, usable in const tables.
macro_rules! cw {
    () => {
        $crate::ds::ControlWord::empty()
    };
    ($($line:ident)|+) => {
        $crate::ds::ControlWord::from_bits_truncate(0 $(| $crate::ds::ControlWord::$line.bits())+)
    };
}
pub(crate) use cw;

const LINE_NAMES: [(ControlWord, &str); 16] = [
    (ControlWord::HLT, "HLT"),
    (ControlWord::MI, "MI"),
    (ControlWord::RO, "RO"),
    (ControlWord::RI, "RI"),
    (ControlWord::II, "II"),
    (ControlWord::IO, "IO"),
    (ControlWord::CO, "CO"),
    (ControlWord::CE, "CE"),
    (ControlWord::AO, "AO"),
    (ControlWord::AI, "AI"),
    (ControlWord::EO, "EO"),
    (ControlWord::SU, "SU"),
    (ControlWord::FI, "FI"),
    (ControlWord::BI, "BI"),
    (ControlWord::OE, "OE"),
    (ControlWord::J, "J"),
];

impl ControlWord {
    /// Bits 15..8, burnt into the left EEPROM.
    pub(crate) fn high_byte(self) -> u8 {
        (self.bits() >> 8) as u8
    }

    /// Bits 7..0, burnt into the right EEPROM.
    pub(crate) fn low_byte(self) -> u8 {
        (self.bits() & 0xFF) as u8
    }

    pub(crate) fn byte(self, half: RomHalf) -> u8 {
        match half {
            RomHalf::High => self.high_byte(),
            RomHalf::Low => self.low_byte(),
        }
    }
}

impl fmt::Display for ControlWord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let mut first = true;
        for (line, name) in LINE_NAMES.iter() {
            if self.contains(*line) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Which byte of the control word an EEPROM holds (address pin A7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum RomHalf {
    Low = 0,
    High = 1,
}

impl RomHalf {
    pub(crate) fn from_bit(bit: u16) -> Self {
        if bit & 1 == 1 {
            RomHalf::High
        } else {
            RomHalf::Low
        }
    }
}

bitflags! {
    /// ALU status flags as seen on address pins A8 (carry) and A9 (zero).
    pub(crate) struct Flags: u8 {
        const CARRY = 0b01;
        const ZERO = 0b10;
    }
}

impl Flags {
    pub(crate) fn carry(self) -> bool {
        self.contains(Flags::CARRY)
    }

    pub(crate) fn zero(self) -> bool {
        self.contains(Flags::ZERO)
    }
}
