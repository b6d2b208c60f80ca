use std::fmt::Write;

use bytemuck::TransparentWrapper;
use tracing::{debug, trace, warn};

use crate::dispatch::{DispatchTable, Form, Instr};
use crate::fault::Fault;
use crate::memory::Ram;
use crate::opcodes::{REGISTER_COUNT, SP, SP_INIT};
use crate::regs::{Reg8, U8Equivalent};
use crate::traits::{CpuView, Output};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
    /// A fault stopped the machine. Only a new [`Cpu`] runs again.
    Faulted,
}

pub struct Cpu {
    pub(crate) pc: u16,
    pub(crate) fl: u8,
    regs: [Reg8; REGISTER_COUNT],
    ram: Ram,
    state: State,
    ops: DispatchTable,
    instructions: u64,
}

impl Cpu {
    pub fn new() -> Self {
        let mut regs = [Reg8(0); REGISTER_COUNT];
        regs[SP as usize] = Reg8(SP_INIT);
        Self {
            pc: 0,
            fl: 0,
            regs,
            ram: Ram::new(),
            state: State::Running,
            ops: DispatchTable::new(),
            instructions: 0,
        }
    }

    /// Copy a program image into memory starting at address 0.
    pub fn load(&mut self, image: &[u8]) -> Result<(), Fault> {
        for (addr, byte) in image.iter().enumerate() {
            self.write(addr, *byte)?;
        }
        debug!(len = image.len(), "loaded program");
        Ok(())
    }

    /// Execute one instruction. Returns `false` once the machine has halted.
    pub fn step(&mut self, out: &mut impl Output) -> Result<bool, Fault> {
        match self.state {
            State::Halted => return Ok(false),
            State::Faulted => return Err(Fault::Faulted),
            State::Running => {}
        }
        match self.execute(out) {
            Ok(()) => {
                self.instructions += 1;
                Ok(self.state == State::Running)
            }
            Err(fault) => {
                warn!(pc = self.pc, %fault, "machine faulted");
                self.state = State::Faulted;
                Err(fault)
            }
        }
    }

    /// Run until `HLT`. Returns the number of instructions executed by this
    /// call. There is no instruction limit: a program that never halts never
    /// returns.
    pub fn run(&mut self, out: &mut impl Output) -> Result<u64, Fault> {
        let start = self.instructions;
        while self.step(out)? {}
        Ok(self.instructions - start)
    }

    fn execute(&mut self, out: &mut dyn Output) -> Result<(), Fault> {
        let pc = self.pc;
        let opcode = self.read(pc)?;
        let op = *self
            .ops
            .lookup(opcode)
            .ok_or(Fault::UnknownOpcode { opcode, pc })?;
        let width = op.width();
        let a = self.operand(pc, 1, width)?;
        let b = self.operand(pc, 2, width)?;
        trace!(pc, mnemonic = op.mnemonic, a, b, "execute");
        (op.handler)(self, out, Instr { opcode, a, b })
    }

    /// Operand bytes inside the instruction must exist. The ones past its
    /// width are fetched anyway and read as zero past the end of memory.
    fn operand(&self, pc: u16, n: u16, width: u16) -> Result<u8, Fault> {
        if n < width {
            self.read(pc + n)
        } else {
            Ok(self.ram.peek(pc + n))
        }
    }

    pub fn read(&self, addr: impl Into<usize>) -> Result<u8, Fault> {
        self.ram.read(addr)
    }

    pub fn write(&mut self, addr: impl Into<usize>, value: u8) -> Result<(), Fault> {
        self.ram.write(addr, value)
    }

    pub fn reg(&self, index: u8) -> Result<Reg8, Fault> {
        self.regs
            .get(index as usize)
            .copied()
            .ok_or(Fault::RegisterOutOfBounds { index })
    }

    pub fn reg_set(&mut self, index: u8, value: impl U8Equivalent) -> Result<(), Fault> {
        let reg = self
            .regs
            .get_mut(index as usize)
            .ok_or(Fault::RegisterOutOfBounds { index })?;
        *reg = Reg8(value.to_u8());
        Ok(())
    }

    /// All eight registers, `R7` (the stack pointer) last.
    pub fn registers(&self) -> &[u8] {
        Reg8::peel_slice(&self.regs)
    }

    pub fn sp(&self) -> u8 {
        self.regs[SP as usize].0
    }

    pub(crate) fn sp_set(&mut self, value: Reg8) {
        self.regs[SP as usize] = value;
    }

    /// Decrement `SP` and store `value` at the new top of stack. `SP` only
    /// moves if the store succeeds.
    pub(crate) fn push_stack(&mut self, value: Reg8) -> Result<(), Fault> {
        let sp = self.sp().checked_sub(1).ok_or(Fault::StackOverflow)?;
        self.write(sp, value.0)?;
        self.sp_set(Reg8(sp));
        Ok(())
    }

    pub(crate) fn halt(&mut self) {
        self.state = State::Halted;
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn running(&self) -> bool {
        self.state == State::Running
    }

    /// Instructions executed since construction.
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    pub fn decode_pc(&self) -> (Vec<u8>, String) {
        self.decode(self.pc)
    }

    /// Disassemble the instruction at `pc`. Unknown opcodes decode as `???`.
    pub fn decode(&self, pc: u16) -> (Vec<u8>, String) {
        let opcode = self.ram.peek(pc);
        let Some(op) = self.ops.lookup(opcode) else {
            return (vec![opcode], "???".to_string());
        };
        let bytes: Vec<u8> = (0..op.width()).map(|i| self.ram.peek(pc + i)).collect();
        let text = match op.form {
            Form::None => op.mnemonic.to_string(),
            Form::R => format!("{} R{}", op.mnemonic, bytes[1]),
            Form::RImm => format!("{} R{},#{:02X}", op.mnemonic, bytes[1], bytes[2]),
            Form::RR => format!("{} R{},R{}", op.mnemonic, bytes[1], bytes[2]),
        };
        (bytes, text)
    }

    /// `TRACE: PC | next three bytes | R0..R7`, all in hex.
    pub fn trace(&self) -> String {
        let pc = self.pc;
        let mut line = format!(
            "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
            pc,
            self.ram.peek(pc),
            self.ram.peek(pc + 1),
            self.ram.peek(pc + 2)
        );
        for reg in &self.regs {
            let _ = write!(line, " {:02X}", reg);
        }
        line
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuView for Cpu {
    fn pc(&self) -> u16 {
        self.pc
    }
    fn fl(&self) -> u8 {
        self.fl
    }
    fn sp(&self) -> u8 {
        Cpu::sp(self)
    }
    fn r(&self, x: u8) -> u8 {
        self.reg(x).map(|r| r.0).unwrap_or(0)
    }
    fn peek(&self, addr: u16) -> u8 {
        self.ram.peek(addr)
    }
}
