use std::collections::BTreeMap;

use crate::Cpu;
use crate::opcodes::FL_E;
use crate::traits::CpuView;

use tracing::{Level, info};

/// Something to do when execution reaches an address. Actions only observe
/// the machine; none of them can change it.
pub enum Action {
    /// Log a message to the console.
    Log(String),
    /// Enable or disable tracing of instructions.
    SetTraceInstructions(bool),
    /// Enable or disable automatic tracing of registers.
    SetTraceRegisters(bool),
    /// Trace current instruction.
    TraceInstructions,
    /// Trace the current state of the CPU.
    TraceRegisters,
    /// Run an arbitrary function.
    Run(Box<dyn Fn(&Cpu)>),
}

impl Action {
    fn run(&self, cpu: &Cpu, state: &mut BreakpointState) {
        match self {
            Self::Log(message) => info!("[BP] {}", message),
            Self::SetTraceInstructions(value) => state.trace_instructions = *value,
            Self::SetTraceRegisters(value) => state.trace_registers = *value,
            Self::TraceInstructions => {
                if tracing::enabled!(Level::INFO) {
                    let (bytes, mnemonic) = cpu.decode_pc();
                    let bytes = bytes
                        .iter()
                        .map(|b| format!("{:02X}", b))
                        .collect::<Vec<_>>()
                        .join(" ");
                    info!("{pc:02X}: {bytes:8} {mnemonic}", pc = cpu.pc());
                }
            }
            Self::TraceRegisters => {
                if tracing::enabled!(Level::INFO) {
                    info!("{}  E={}", cpu.trace(), (cpu.fl() & FL_E != 0) as u8);
                }
            }
            Self::Run(func) => func(cpu),
        }
    }
}

#[derive(Default)]
struct BreakpointState {
    trace_instructions: bool,
    trace_registers: bool,
}

/// Actions keyed by program counter, run before or after the instruction at
/// that address.
pub struct Breakpoints {
    breakpoints_before: BTreeMap<u16, Vec<Action>>,
    breakpoints_after: BTreeMap<u16, Vec<Action>>,
    state: BreakpointState,
}

impl Breakpoints {
    pub fn new() -> Self {
        Self {
            breakpoints_before: BTreeMap::new(),
            breakpoints_after: BTreeMap::new(),
            state: Default::default(),
        }
    }

    pub fn add(&mut self, before: bool, addr: u16, action: Action) {
        if before {
            self.breakpoints_before
                .entry(addr)
                .or_default()
                .push(action);
        } else {
            self.breakpoints_after.entry(addr).or_default().push(action);
        }
    }

    pub fn remove(&mut self, addr: u16) {
        self.breakpoints_before.remove(&addr);
        self.breakpoints_after.remove(&addr);
    }

    pub fn clear(&mut self) {
        self.breakpoints_before.clear();
        self.breakpoints_after.clear();
    }

    /// Turn instruction and register tracing on or off for every address.
    pub fn set_trace(&mut self, instructions: bool, registers: bool) {
        self.state.trace_instructions = instructions;
        self.state.trace_registers = registers;
    }

    /// Run the actions registered for the current program counter. `before`
    /// selects the list run ahead of the instruction; pass the address the
    /// instruction started at when running the `after` list.
    pub fn run(&mut self, before: bool, addr: u16, cpu: &Cpu) {
        let actions = if before {
            self.breakpoints_before
                .get(&addr)
                .map(|actions| actions.as_slice())
                .unwrap_or(&[])
        } else {
            self.breakpoints_after
                .get(&addr)
                .map(|actions| actions.as_slice())
                .unwrap_or(&[])
        };
        for action in actions {
            action.run(cpu, &mut self.state);
        }
        if self.state.trace_instructions && before {
            Action::TraceInstructions.run(cpu, &mut self.state);
        }
        if self.state.trace_registers && !before {
            Action::TraceRegisters.run(cpu, &mut self.state);
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::new()
    }
}
