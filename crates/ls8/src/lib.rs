//! Emulator core for the LS-8, an eight-bit computer with eight registers,
//! 255 bytes of memory and a thirteen-instruction set.
//!
//! ```
//! use ls8::Cpu;
//! use ls8::opcodes::*;
//!
//! let mut cpu = Cpu::new();
//! cpu.load(&[LDI, 0, 8, LDI, 1, 9, MUL, 0, 1, PRN, 0, HLT])?;
//! let mut out = Vec::new();
//! cpu.run(&mut out)?;
//! assert_eq!(out, vec![72]);
//! # Ok::<(), ls8::Fault>(())
//! ```

pub mod alu;
pub mod breakpoint;
mod cpu;
pub mod dispatch;
mod fault;
mod handlers;
pub mod image;
pub mod memory;
pub mod opcodes;
mod regs;
mod traits;

pub use cpu::{Cpu, State};
pub use fault::{Fault, LoadError};
pub use regs::{Reg8, U8Equivalent};
pub use traits::{CpuView, Output, Printer};
