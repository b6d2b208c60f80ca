//! Opcode values and machine constants for the LS-8.
//!
//! The two high bits of every opcode give the number of operand bytes that
//! follow it, which is why `LDI` (two operands) starts with `0b10` and `PRN`
//! (one operand) starts with `0b01`.

/// Load immediate: `LDI reg, imm`
pub const LDI: u8 = 0b1000_0010;
/// Print register as a decimal integer: `PRN reg`
pub const PRN: u8 = 0b0100_0111;
/// Halt the machine
pub const HLT: u8 = 0b0000_0001;
/// Multiply two registers into the first: `MUL regA, regB`
pub const MUL: u8 = 0b1010_0010;
/// Add two registers into the first: `ADD regA, regB`
pub const ADD: u8 = 0b1010_0000;
/// Push a register onto the stack: `PUSH reg`
pub const PUSH: u8 = 0b0100_0101;
/// Pop the top of the stack into a register: `POP reg`
pub const POP: u8 = 0b0100_0110;
/// Call the subroutine whose address is held in a register: `CALL reg`
pub const CALL: u8 = 0b0101_0000;
/// Return from a subroutine
pub const RET: u8 = 0b0001_0001;
/// Compare two registers and set `FL_E` if they are equal: `CMP regA, regB`
pub const CMP: u8 = 0b1010_0111;
/// Jump to the address held in a register: `JMP reg`
pub const JMP: u8 = 0b0101_0100;
/// Jump if `FL_E` is set: `JEQ reg`
pub const JEQ: u8 = 0b0101_0101;
/// Jump if `FL_E` is clear: `JNE reg`
pub const JNE: u8 = 0b0101_0110;

/// Number of general purpose registers
pub const REGISTER_COUNT: usize = 8;
/// Register used as the stack pointer
pub const SP: u8 = 7;
/// Initial stack pointer value. The stack grows down from here.
pub const SP_INIT: u8 = 0xF4;
/// Number of addressable memory cells
pub const MEMORY_SIZE: usize = 255;

/// Equal flag: set by `CMP` when both operands match
pub const FL_E: u8 = 0b0000_0001;
