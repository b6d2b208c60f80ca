use std::num::ParseIntError;
use std::path::PathBuf;

use ls8::breakpoint::{Action, Breakpoints};
use ls8::{Cpu, CpuView, Printer, image};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Program image to load: one binary value per line, `#` starts a comment
    #[arg(value_name = "PROGRAM")]
    program: PathBuf,

    /// Stop after this many instructions even if the program has not halted
    #[arg(short, long)]
    max_instructions: Option<u64>,

    /// Trace every instruction and the registers after it
    #[arg(short, long)]
    trace: bool,

    /// Log the machine state before the instruction at ADDR (hex with 0x, or decimal)
    #[arg(short, long = "break", value_name = "ADDR", value_parser = parse_addr)]
    breakpoints: Vec<u16>,
}

fn parse_addr(s: &str) -> Result<u16, ParseIntError> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    }
}

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.trace { "info,ls8=trace" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let program = image::load_file(&args.program)
        .with_context(|| format!("loading {}", args.program.display()))?;

    let mut cpu = Cpu::new();
    cpu.load(&program)?;

    let mut breakpoints = Breakpoints::new();
    breakpoints.set_trace(args.trace, args.trace);
    for addr in &args.breakpoints {
        breakpoints.add(true, *addr, Action::Log(format!("break at {addr:#04X}")));
        breakpoints.add(true, *addr, Action::TraceRegisters);
    }

    let mut out = Printer::stdout();
    loop {
        if args
            .max_instructions
            .is_some_and(|max| cpu.instructions() >= max)
        {
            warn!(
                "stopped at {:#04X} after {} instructions without halting",
                cpu.pc(),
                cpu.instructions()
            );
            break;
        }
        let pc = cpu.pc();
        breakpoints.run(true, pc, &cpu);
        let running = cpu
            .step(&mut out)
            .with_context(|| format!("executing instruction at {pc:#04X}"))?;
        breakpoints.run(false, pc, &cpu);
        if !running {
            info!(
                "halted at {:#04X} after {} instructions",
                cpu.pc(),
                cpu.instructions()
            );
            break;
        }
    }

    Ok(())
}
