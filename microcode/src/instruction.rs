use std::fmt;
use std::str::FromStr;

use crate::ds::{cw, ControlWord};

/// Micro-steps stored per instruction. Steps 6 and 7 exist on the step
/// counter but are never reached.
pub(crate) const STEPS_PER_INSTRUCTION: usize = 6;

/// The 4-bit opcodes of the instruction set, numbered as wired on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Opcode {
    /// No operation
    Nop = 0b0000,
    /// Load RAM value into A
    Lda = 0b0001,
    /// Add RAM value to A
    Add = 0b0010,
    /// Subtract RAM value from A
    Sub = 0b0011,
    /// Store A into RAM
    Sta = 0b0100,
    /// Move immediate value into A
    Mvi = 0b0101,
    /// Add immediate value to A
    Inc = 0b0110,
    /// Subtract immediate value from A
    Dec = 0b0111,
    /// Jump if carry is clear
    Jnc = 0b1000,
    /// Jump if zero is clear
    Jnz = 0b1001,
    /// Compare RAM value with A, only updating the flags
    Cmp = 0b1010,
    /// Jump if carry is set
    Jc = 0b1011,
    /// Jump if zero is set
    Jz = 0b1100,
    /// Unconditional jump
    Jmp = 0b1101,
    /// Latch A into the output register
    Out = 0b1110,
    /// Halt the clock
    Hlt = 0b1111,
}

impl Opcode {
    pub(crate) const ALL: [Opcode; 16] = [
        Opcode::Nop,
        Opcode::Lda,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Sta,
        Opcode::Mvi,
        Opcode::Inc,
        Opcode::Dec,
        Opcode::Jnc,
        Opcode::Jnz,
        Opcode::Cmp,
        Opcode::Jc,
        Opcode::Jz,
        Opcode::Jmp,
        Opcode::Out,
        Opcode::Hlt,
    ];

    /// Only the low four bits are looked at, so every value maps to an opcode.
    pub(crate) fn from_nibble(value: u8) -> Self {
        Self::ALL[usize::from(value & 0b1111)]
    }

    pub(crate) fn bits(self) -> u8 {
        self as u8
    }

    pub(crate) fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "NOP",
            Opcode::Lda => "LDA",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Sta => "STA",
            Opcode::Mvi => "MVI",
            Opcode::Inc => "INC",
            Opcode::Dec => "DEC",
            Opcode::Jnc => "JNC",
            Opcode::Jnz => "JNZ",
            Opcode::Cmp => "CMP",
            Opcode::Jc => "JC",
            Opcode::Jz => "JZ",
            Opcode::Jmp => "JMP",
            Opcode::Out => "OUT",
            Opcode::Hlt => "HLT",
        }
    }

    /// The four jumps whose step 2 depends on the flags.
    pub(crate) fn is_conditional_jump(self) -> bool {
        matches!(self, Opcode::Jc | Opcode::Jnc | Opcode::Jz | Opcode::Jnz)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Opcode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown instruction '{}'", s))
    }
}

/// Fetch: PC -> MAR, then RAM -> IR and increment PC.
const FETCH_0: ControlWord = cw!(MI | CO);
const FETCH_1: ControlWord = cw!(RO | II | CE);

/// Micro-operations indexed by opcode then step.
static INSTRUCTIONS: [[ControlWord; STEPS_PER_INSTRUCTION]; 16] = [
    [FETCH_0, FETCH_1, cw!(), cw!(), cw!(), cw!()],                                     // NOP
    [FETCH_0, FETCH_1, cw!(MI | IO), cw!(RO | AI), cw!(), cw!()],                       // LDA
    [FETCH_0, FETCH_1, cw!(MI | IO), cw!(RO | BI), cw!(EO | AI | FI), cw!()],           // ADD
    [FETCH_0, FETCH_1, cw!(MI | IO), cw!(RO | BI), cw!(SU | EO | AI | FI), cw!()],      // SUB
    [FETCH_0, FETCH_1, cw!(IO | MI), cw!(AO | RI), cw!(), cw!()],                       // STA
    [FETCH_0, FETCH_1, cw!(IO | AI), cw!(), cw!(), cw!()],                              // MVI
    [FETCH_0, FETCH_1, cw!(IO | BI), cw!(EO | FI | AI), cw!(), cw!()],                  // INC
    [FETCH_0, FETCH_1, cw!(IO | BI), cw!(EO | FI | AI | SU), cw!(), cw!()],             // DEC
    [FETCH_0, FETCH_1, cw!(IO | J), cw!(), cw!(), cw!()],                               // JNC
    [FETCH_0, FETCH_1, cw!(IO | J), cw!(), cw!(), cw!()],                               // JNZ
    [FETCH_0, FETCH_1, cw!(IO | MI), cw!(RO | BI), cw!(EO | SU | FI), cw!()],           // CMP
    [FETCH_0, FETCH_1, cw!(), cw!(), cw!(), cw!()],                                     // JC
    [FETCH_0, FETCH_1, cw!(), cw!(), cw!(), cw!()],                                     // JZ
    [FETCH_0, FETCH_1, cw!(IO | J), cw!(), cw!(), cw!()],                               // JMP
    [FETCH_0, FETCH_1, cw!(AO | OE), cw!(), cw!(), cw!()],                              // OUT
    [FETCH_0, FETCH_1, cw!(HLT), cw!(), cw!(), cw!()],                                  // HLT
];

/// Base control word of `opcode` at `step`, before any flag override.
/// Steps past the end of the table read as the empty word.
pub(crate) fn lookup(opcode: Opcode, step: u8) -> ControlWord {
    INSTRUCTIONS[usize::from(opcode.bits())]
        .get(usize::from(step))
        .copied()
        .unwrap_or_else(ControlWord::empty)
}
