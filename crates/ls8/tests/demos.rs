use ls8::{Cpu, image};

fn run_demo(source: &str) -> Vec<u8> {
    let program = image::parse(source).unwrap();
    let mut cpu = Cpu::new();
    cpu.load(&program).unwrap();
    let mut out = Vec::new();
    cpu.run(&mut out).unwrap();
    assert!(!cpu.running());
    out
}

#[test]
fn print8() {
    assert_eq!(run_demo(include_str!("../../../demos/print8.ls8")), vec![8]);
}

#[test]
fn mult() {
    assert_eq!(run_demo(include_str!("../../../demos/mult.ls8")), vec![72]);
}

#[test]
fn stack() {
    assert_eq!(run_demo(include_str!("../../../demos/stack.ls8")), vec![2, 4, 1]);
}

#[test]
fn call() {
    assert_eq!(
        run_demo(include_str!("../../../demos/call.ls8")),
        vec![20, 30, 36, 60]
    );
}

#[test]
fn sctest() {
    assert_eq!(run_demo(include_str!("../../../demos/sctest.ls8")), vec![1, 2]);
}
