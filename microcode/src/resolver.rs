use crate::ds::{ControlWord, Flags, RomHalf};
use crate::instruction::{lookup, Opcode};

/// The only step at which a jump can load the program counter.
const JUMP_STEP: u8 = 2;

/// Control word asserted for `opcode` at `step` under the given flags.
///
/// Conditional jumps are stored either as a jump (JNC, JNZ) or as a no-op
/// (JC, JZ) and get promoted to JMP or neutralised to NOP at the jump step
/// depending on the flags.
pub(crate) fn control_word(opcode: Opcode, step: u8, flags: Flags) -> ControlWord {
    if step == JUMP_STEP && opcode.is_conditional_jump() {
        if let Some(substitute) = jump_override(opcode, flags) {
            return lookup(substitute, step);
        }
    }
    lookup(opcode, step)
}

/// Opcode whose jump-step word replaces `opcode`'s under `flags`, if any.
/// Each opcode only ever reacts to one of the two flags.
fn jump_override(opcode: Opcode, flags: Flags) -> Option<Opcode> {
    match opcode {
        Opcode::Jz if flags.zero() => Some(Opcode::Jmp),
        Opcode::Jnz if flags.zero() => Some(Opcode::Nop),
        Opcode::Jc if flags.carry() => Some(Opcode::Jmp),
        Opcode::Jnc if flags.carry() => Some(Opcode::Nop),
        _ => None,
    }
}

/// Byte stored at an address with the given fields.
pub(crate) fn resolve(opcode: Opcode, step: u8, half: RomHalf, flags: Flags) -> u8 {
    control_word(opcode, step, flags).byte(half)
}
