//! Instruction handlers.
//!
//! Each handler finishes every fallible read and check before it mutates
//! anything, so a faulting instruction leaves the machine as it found it.

use tracing::debug;

use crate::Cpu;
use crate::alu::{AluOp, alu};
use crate::dispatch::Instr;
use crate::fault::Fault;
use crate::opcodes::FL_E;
use crate::regs::Reg8;
use crate::traits::Output;

pub(crate) fn ldi(cpu: &mut Cpu, _out: &mut dyn Output, i: Instr) -> Result<(), Fault> {
    cpu.reg_set(i.a, i.b)?;
    cpu.pc += 3;
    Ok(())
}

pub(crate) fn prn(cpu: &mut Cpu, out: &mut dyn Output, i: Instr) -> Result<(), Fault> {
    let value = cpu.reg(i.a)?;
    out.print(value.0)?;
    cpu.pc += 2;
    Ok(())
}

pub(crate) fn hlt(cpu: &mut Cpu, _out: &mut dyn Output, _i: Instr) -> Result<(), Fault> {
    debug!(pc = cpu.pc, "halt");
    cpu.halt();
    Ok(())
}

/// `ADD`, `MUL` and `CMP`. The opcode selects the ALU operation.
pub(crate) fn alu_op(cpu: &mut Cpu, _out: &mut dyn Output, i: Instr) -> Result<(), Fault> {
    let op = AluOp::try_from(i.opcode)?;
    let a = cpu.reg(i.a)?;
    let b = cpu.reg(i.b)?;
    let (value, fl) = alu(op, a, b, cpu.fl);
    cpu.reg_set(i.a, value)?;
    cpu.fl = fl;
    cpu.pc += 3;
    Ok(())
}

pub(crate) fn push(cpu: &mut Cpu, _out: &mut dyn Output, i: Instr) -> Result<(), Fault> {
    let value = cpu.reg(i.a)?;
    cpu.push_stack(value)?;
    cpu.pc += 2;
    Ok(())
}

/// The value lands in the register before `SP` moves, so `POP R7` leaves
/// `SP` one past the popped value.
pub(crate) fn pop(cpu: &mut Cpu, _out: &mut dyn Output, i: Instr) -> Result<(), Fault> {
    let value = cpu.read(cpu.sp())?;
    cpu.reg_set(i.a, value)?;
    cpu.sp_set(Reg8(cpu.sp()) + 1u8);
    cpu.pc += 2;
    Ok(())
}

pub(crate) fn call(cpu: &mut Cpu, _out: &mut dyn Output, i: Instr) -> Result<(), Fault> {
    let target = cpu.reg(i.a)?;
    let ret = cpu.pc + 2;
    let ret = u8::try_from(ret).map_err(|_| Fault::MemoryOutOfBounds { addr: ret as usize })?;
    cpu.push_stack(Reg8(ret))?;
    cpu.pc = target.0 as u16;
    Ok(())
}

pub(crate) fn ret(cpu: &mut Cpu, _out: &mut dyn Output, _i: Instr) -> Result<(), Fault> {
    let target = cpu.read(cpu.sp())?;
    cpu.sp_set(Reg8(cpu.sp()) + 1u8);
    cpu.pc = target as u16;
    Ok(())
}

pub(crate) fn jmp(cpu: &mut Cpu, _out: &mut dyn Output, i: Instr) -> Result<(), Fault> {
    cpu.pc = cpu.reg(i.a)?.0 as u16;
    Ok(())
}

pub(crate) fn jeq(cpu: &mut Cpu, _out: &mut dyn Output, i: Instr) -> Result<(), Fault> {
    let equal = cpu.fl & FL_E != 0;
    branch(cpu, i, equal)
}

pub(crate) fn jne(cpu: &mut Cpu, _out: &mut dyn Output, i: Instr) -> Result<(), Fault> {
    let equal = cpu.fl & FL_E != 0;
    branch(cpu, i, !equal)
}

fn branch(cpu: &mut Cpu, i: Instr, taken: bool) -> Result<(), Fault> {
    if taken {
        cpu.pc = cpu.reg(i.a)?.0 as u16;
    } else {
        cpu.pc += 2;
    }
    Ok(())
}
