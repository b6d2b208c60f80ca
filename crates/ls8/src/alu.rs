use crate::fault::Fault;
use crate::opcodes::{ADD, CMP, FL_E, MUL};
use crate::regs::Reg8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Mul,
    Cmp,
}

impl TryFrom<u8> for AluOp {
    type Error = Fault;

    fn try_from(opcode: u8) -> Result<Self, Self::Error> {
        match opcode {
            ADD => Ok(Self::Add),
            MUL => Ok(Self::Mul),
            CMP => Ok(Self::Cmp),
            _ => Err(Fault::UnsupportedAluOp(opcode)),
        }
    }
}

/// Apply `op` to the two register values. Returns the new value of the
/// first register and the new flags.
///
/// `CMP` only ever sets `FL_E`. Unequal operands leave the flags untouched,
/// so a stale equal bit from an earlier `CMP` survives.
#[inline(always)]
pub fn alu(op: AluOp, a: Reg8, b: Reg8, fl: u8) -> (Reg8, u8) {
    match op {
        AluOp::Add => (a + b, fl),
        AluOp::Mul => (a * b, fl),
        AluOp::Cmp if a == b => (a, fl | FL_E),
        AluOp::Cmp => (a, fl),
    }
}
