use ls8::opcodes::*;
use ls8::{Cpu, CpuView, Fault, State};

use proptest::prelude::*;

fn boot(program: &[u8]) -> Cpu {
    let mut cpu = Cpu::new();
    cpu.load(program).unwrap();
    cpu
}

/// Two distinct general purpose registers (the stack pointer excluded).
fn two_registers() -> impl Strategy<Value = (u8, u8)> {
    (0u8..7, 0u8..7).prop_filter("distinct registers", |(a, b)| a != b)
}

proptest! {
    #[test]
    fn add_wraps_and_advances_by_three((r1, r2) in two_registers(), v1 in any::<u8>(), v2 in any::<u8>()) {
        let mut cpu = boot(&[LDI, r1, v1, LDI, r2, v2, ADD, r1, r2]);
        for expected in [3, 6, 9] {
            prop_assert!(cpu.step(&mut ()).unwrap());
            prop_assert_eq!(cpu.pc(), expected);
        }
        prop_assert_eq!(cpu.r(r1), v1.wrapping_add(v2));
        prop_assert_eq!(cpu.r(r2), v2);
    }

    #[test]
    fn mul_is_modular_and_commutative((r1, r2) in two_registers(), v1 in any::<u8>(), v2 in any::<u8>()) {
        let mut ab = boot(&[LDI, r1, v1, LDI, r2, v2, MUL, r1, r2, HLT]);
        let mut ba = boot(&[LDI, r1, v2, LDI, r2, v1, MUL, r1, r2, HLT]);
        ab.run(&mut ()).unwrap();
        ba.run(&mut ()).unwrap();
        prop_assert_eq!(ab.r(r1), ((v1 as u16 * v2 as u16) % 256) as u8);
        prop_assert_eq!(ab.r(r1), ba.r(r1));
    }

    #[test]
    fn push_pop_round_trips((r1, r2) in two_registers(), value in any::<u8>()) {
        let mut cpu = boot(&[LDI, r1, value, PUSH, r1, POP, r2, HLT]);
        let sp = cpu.sp();
        cpu.step(&mut ()).unwrap();
        cpu.step(&mut ()).unwrap();
        prop_assert_eq!(cpu.sp(), sp - 1);
        cpu.run(&mut ()).unwrap();
        prop_assert_eq!(cpu.r(r2), value);
        prop_assert_eq!(cpu.sp(), sp);
    }

    #[test]
    fn ret_lands_two_past_the_call(call_site in 8u8..=120, sub in 128u8..=240) {
        // Jump to the call site via R1 and CALL R0 there. The subroutine is
        // a single RET, and the return lands on HLT.
        let mut cpu = boot(&[LDI, 0, sub, LDI, 1, call_site, JMP, 1]);
        cpu.write(call_site, CALL).unwrap();
        cpu.write(call_site + 1, 0).unwrap();
        cpu.write(call_site + 2, HLT).unwrap();
        cpu.write(sub, RET).unwrap();

        let mut visited = Vec::new();
        while cpu.step(&mut ()).unwrap() {
            visited.push(cpu.pc());
        }
        let call = visited.iter().position(|&pc| pc == sub as u16).unwrap();
        prop_assert_eq!(visited[call + 1], call_site as u16 + 2);
        prop_assert_eq!(cpu.sp(), SP_INIT);
    }

    #[test]
    fn cmp_sets_flag_only_on_equality(v1 in any::<u8>(), v2 in any::<u8>()) {
        let mut cpu = boot(&[LDI, 0, v1, LDI, 1, v2, CMP, 0, 1, HLT]);
        cpu.run(&mut ()).unwrap();
        prop_assert_eq!(cpu.fl() & FL_E != 0, v1 == v2);
    }

    #[test]
    fn conditional_branches(equal in any::<bool>(), target in 20u8..=250) {
        let v2 = if equal { 1 } else { 2 };
        let program = [LDI, 0, 1, LDI, 1, v2, LDI, 2, target, CMP, 0, 1, JEQ, 2, JNE, 2];
        let mut cpu = boot(&program);
        for _ in 0..4 {
            cpu.step(&mut ()).unwrap();
        }
        prop_assert_eq!(cpu.pc(), 12);
        cpu.step(&mut ()).unwrap();
        if equal {
            prop_assert_eq!(cpu.pc(), target as u16);
        } else {
            prop_assert_eq!(cpu.pc(), 14);
            cpu.step(&mut ()).unwrap();
            prop_assert_eq!(cpu.pc(), target as u16);
        }
    }

    #[test]
    fn unknown_opcodes_fault(opcode in any::<u8>()) {
        let known = [LDI, PRN, HLT, MUL, ADD, PUSH, POP, CALL, RET, CMP, JMP, JEQ, JNE];
        prop_assume!(!known.contains(&opcode));
        let mut cpu = boot(&[opcode]);
        let err = cpu.step(&mut ()).unwrap_err();
        prop_assert!(matches!(err, Fault::UnknownOpcode { pc: 0, .. }), "expected UnknownOpcode at pc 0, got {:?}", err);
        prop_assert_eq!(cpu.state(), State::Faulted);
        prop_assert_eq!(cpu.pc(), 0);
        prop_assert_eq!(cpu.registers(), &[0, 0, 0, 0, 0, 0, 0, SP_INIT][..]);
    }
}

#[test]
fn print8_scenario() {
    let mut cpu = boot(&[LDI, 0, 8, LDI, 1, 9, MUL, 0, 1, PRN, 0, HLT]);
    let mut out = Vec::new();
    cpu.run(&mut out).unwrap();
    assert_eq!(out, vec![72]);
    assert!(!cpu.running());
}

#[test]
fn stack_scenario() {
    let mut cpu = boot(&[LDI, 0, 5, PUSH, 0, LDI, 0, 0, POP, 1, PRN, 1, HLT]);
    let mut out = Vec::new();
    cpu.run(&mut out).unwrap();
    assert_eq!(out, vec![5]);
}

#[test]
fn text_image_runs() {
    let source = "\
10000010 # LDI R0,8
00000000
00001000
10000010 # LDI R1,9
00000001
00001001
10100010 # MUL R0,R1
00000000
00000001
01000111 # PRN R0
00000000
00000001 # HLT
";
    let image = ls8::image::parse(source).unwrap();
    let mut cpu = boot(&image);
    let mut out = ls8::Printer::new(Vec::new());
    cpu.run(&mut out).unwrap();
    assert_eq!(out.into_inner(), b"72\n");
}
