//! Opcode to handler lookup.

use crate::Cpu;
use crate::fault::Fault;
use crate::handlers;
use crate::opcodes::*;
use crate::traits::Output;

/// The raw bytes of one instruction, as fetched by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instr {
    pub opcode: u8,
    pub a: u8,
    pub b: u8,
}

/// Executes one instruction, including moving the program counter.
pub type Handler = fn(&mut Cpu, &mut dyn Output, Instr) -> Result<(), Fault>;

/// How an instruction's operand bytes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// No operands
    None,
    /// One register index
    R,
    /// Register index, then an immediate byte
    RImm,
    /// Two register indices
    RR,
}

#[derive(Clone, Copy)]
pub struct Op {
    pub mnemonic: &'static str,
    pub form: Form,
    pub handler: Handler,
}

impl Op {
    /// Width of the instruction in bytes, opcode included.
    pub fn width(&self) -> u16 {
        match self.form {
            Form::None => 1,
            Form::R => 2,
            Form::RImm | Form::RR => 3,
        }
    }
}

/// A fixed table from opcode byte to [`Op`]. Built once, never modified.
#[derive(Clone)]
pub struct DispatchTable {
    ops: [Option<Op>; 256],
}

impl DispatchTable {
    pub fn lookup(&self, opcode: u8) -> Option<&Op> {
        self.ops[opcode as usize].as_ref()
    }

    /// Iterate over every supported opcode and its entry.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Op)> + '_ {
        (0..=u8::MAX).filter_map(|opcode| self.lookup(opcode).map(|op| (opcode, op)))
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! ops {
    ($( $opcode:ident $form:ident => $handler:path; )*) => {
        impl DispatchTable {
            pub fn new() -> Self {
                let mut ops = [None; 256];
                $(
                    ops[$opcode as usize] = Some(Op {
                        mnemonic: stringify!($opcode),
                        form: Form::$form,
                        handler: $handler,
                    });
                )*
                Self { ops }
            }
        }
    };
}

ops! {
    LDI  RImm => handlers::ldi;
    PRN  R    => handlers::prn;
    HLT  None => handlers::hlt;

    // ALU
    ADD  RR   => handlers::alu_op;
    MUL  RR   => handlers::alu_op;
    CMP  RR   => handlers::alu_op;

    // Stack
    PUSH R    => handlers::push;
    POP  R    => handlers::pop;

    // Control flow
    CALL R    => handlers::call;
    RET  None => handlers::ret;
    JMP  R    => handlers::jmp;
    JEQ  R    => handlers::jeq;
    JNE  R    => handlers::jne;
}
