use std::io;

use thiserror::Error;

/// A fatal machine error. Once raised, the machine refuses to run until it
/// is rebuilt.
#[derive(Debug, Error)]
pub enum Fault {
    #[error("unknown opcode {opcode:#010b} at {pc:#04X}")]
    UnknownOpcode { opcode: u8, pc: u16 },
    #[error("unsupported ALU operation {0:#010b}")]
    UnsupportedAluOp(u8),
    #[error("memory access out of bounds at {addr:#X}")]
    MemoryOutOfBounds { addr: usize },
    #[error("register R{index} out of bounds")]
    RegisterOutOfBounds { index: u8 },
    #[error("stack overflow: push with SP at 0")]
    StackOverflow,
    #[error("output error: {0}")]
    Output(#[from] io::Error),
    #[error("machine is faulted and must be reset")]
    Faulted,
}

/// An error reading a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: value {value} does not fit in a byte")]
    ValueOutOfRange { line: usize, value: u64 },
    #[error("program is {len} bytes, memory holds {max}")]
    TooLarge { len: usize, max: usize },
}
