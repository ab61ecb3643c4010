use vypr_core::emit::emit_python;
use vypr_core::ir::{IrFunction, IrInstruction, IrOpCode};
use vypr_core::VyprErrorExt;

fn function(name: &str, instructions: Vec<IrInstruction>) -> IrFunction {
    let mut f = IrFunction::new(name, Vec::new());
    for instruction in instructions {
        f.push(instruction);
    }
    f
}

#[test]
fn header_declares_the_runtime_helpers() {
    let python = emit_python(&[function("__main__", vec![])]).expect("emit");
    assert!(python.starts_with("#!/usr/bin/env python3"));
    assert!(python.contains("def _vypr_concat(a, b):"));
    assert!(python.contains("def _vypr_input(prompt=\"\"):"));
}

#[test]
fn trailer_invokes_main_when_run_as_a_program() {
    let python = emit_python(&[function("__main__", vec![])]).expect("emit");
    assert!(python.contains("if __name__ == \"__main__\":"));
    assert!(python.contains("    __main__()"));
}

#[test]
fn empty_function_body_is_a_noop_loop() {
    let python = emit_python(&[function("__main__", vec![])]).expect("emit");
    assert!(python.contains("def __main__():"));
    assert!(python.contains("pass # Empty function"));
}

#[test]
fn dispatch_uses_a_program_counter_chain() {
    let instructions = vec![
        IrInstruction::new(IrOpCode::LoadConst, vec!["t0".into(), "1".into()]),
        IrInstruction::new(IrOpCode::Print, vec!["t0".into()]),
    ];
    let python = emit_python(&[function("__main__", instructions)]).expect("emit");

    assert!(python.contains("    _pc = 0\n"));
    assert!(python.contains("    while True:\n"));
    assert!(python.contains("        if _pc == 0:\n"));
    assert!(python.contains("        elif _pc == 1:\n"));
    // Non-jump arms advance the counter; the terminal arm breaks.
    assert!(python.contains("            _pc += 1\n"));
    assert!(python.contains("        else:\n"));
}

#[test]
fn jump_sets_the_program_counter_to_the_label_index() {
    let instructions = vec![
        IrInstruction::new(IrOpCode::Jump, vec!["L0".into()]),
        IrInstruction::new(IrOpCode::Nop, vec![]),
        IrInstruction::new(IrOpCode::Label, vec!["L0".into()]),
    ];
    let python = emit_python(&[function("__main__", instructions)]).expect("emit");
    assert!(python.contains("_pc = 2"), "{}", python);
}

#[test]
fn conditional_jumps_branch_between_target_and_next() {
    let instructions = vec![
        IrInstruction::new(IrOpCode::JumpIfFalse, vec!["t0".into(), "L0".into()]),
        IrInstruction::new(IrOpCode::Nop, vec![]),
        IrInstruction::new(IrOpCode::Label, vec!["L0".into()]),
    ];
    let python = emit_python(&[function("__main__", instructions)]).expect("emit");
    assert!(python.contains("if not t0:"), "{}", python);
    assert!(python.contains("_pc = 2"), "{}", python);
    assert!(python.contains("_pc += 1"), "{}", python);
}

#[test]
fn return_arms_break_the_dispatch_loop() {
    let instructions = vec![IrInstruction::new(IrOpCode::Return, vec!["t0".into()])];
    let python = emit_python(&[function("__main__", instructions)]).expect("emit");
    assert!(python.contains("return t0"));
    assert!(python.contains("break # Exit loop after return"));
}

#[test]
fn load_const_normalizes_booleans() {
    let instructions = vec![
        IrInstruction::new(IrOpCode::LoadConst, vec!["t0".into(), "true".into()]),
        IrInstruction::new(IrOpCode::LoadConst, vec!["t1".into(), "false".into()]),
    ];
    let python = emit_python(&[function("__main__", instructions)]).expect("emit");
    assert!(python.contains("t0 = True"));
    assert!(python.contains("t1 = False"));
}

#[test]
fn load_const_passes_numerics_and_quoted_strings_through() {
    let instructions = vec![
        IrInstruction::new(IrOpCode::LoadConst, vec!["t0".into(), "-12".into()]),
        IrInstruction::new(IrOpCode::LoadConst, vec!["t1".into(), "3.25".into()]),
        IrInstruction::new(IrOpCode::LoadConst, vec!["t2".into(), "\"hi\"".into()]),
    ];
    let python = emit_python(&[function("__main__", instructions)]).expect("emit");
    assert!(python.contains("t0 = -12\n"));
    assert!(python.contains("t1 = 3.25\n"));
    assert!(python.contains("t2 = \"hi\"\n"));
}

#[test]
fn load_const_wraps_bare_values_in_quotes() {
    let instructions = vec![IrInstruction::new(
        IrOpCode::LoadConst,
        vec!["t0".into(), "None".into()],
    )];
    let python = emit_python(&[function("__main__", instructions)]).expect("emit");
    assert!(python.contains("t0 = \"None\""), "{}", python);
}

#[test]
fn concat_operator_uses_the_runtime_helper() {
    let instructions = vec![IrInstruction::new(
        IrOpCode::BinaryOp,
        vec!["t2".into(), "t0".into(), "^".into(), "t1".into()],
    )];
    let python = emit_python(&[function("__main__", instructions)]).expect("emit");
    assert!(python.contains("t2 = _vypr_concat(t0, t1)"));
}

#[test]
fn logical_operators_map_to_python_keywords() {
    let instructions = vec![
        IrInstruction::new(
            IrOpCode::BinaryOp,
            vec!["t2".into(), "t0".into(), "&&".into(), "t1".into()],
        ),
        IrInstruction::new(
            IrOpCode::BinaryOp,
            vec!["t3".into(), "t0".into(), "||".into(), "t1".into()],
        ),
        IrInstruction::new(
            IrOpCode::UnaryOp,
            vec!["t4".into(), "!".into(), "t0".into()],
        ),
    ];
    let python = emit_python(&[function("__main__", instructions)]).expect("emit");
    assert!(python.contains("t2 = t0 and t1"));
    assert!(python.contains("t3 = t0 or t1"));
    assert!(python.contains("t4 = not t0"));
}

#[test]
fn member_length_becomes_len() {
    let instructions = vec![
        IrInstruction::new(
            IrOpCode::MemberGet,
            vec!["t1".into(), "t0".into(), "length".into()],
        ),
        IrInstruction::new(
            IrOpCode::MemberGet,
            vec!["t2".into(), "t0".into(), "name".into()],
        ),
    ];
    let python = emit_python(&[function("__main__", instructions)]).expect("emit");
    assert!(python.contains("t1 = len(t0)"));
    assert!(python.contains("t2 = t0.name"));
}

#[test]
fn convert_emits_the_python_constructor() {
    let instructions = vec![IrInstruction::new(
        IrOpCode::Convert,
        vec!["t1".into(), "int".into(), "t0".into()],
    )];
    let python = emit_python(&[function("__main__", instructions)]).expect("emit");
    assert!(python.contains("t1 = int(t0)"));
}

#[test]
fn array_instructions_render_as_python_indexing() {
    let instructions = vec![
        IrInstruction::new(IrOpCode::ArrayNew, vec!["t0".into(), "t1, t2".into()]),
        IrInstruction::new(
            IrOpCode::ArrayGet,
            vec!["t3".into(), "t0".into(), "t4".into()],
        ),
        IrInstruction::new(
            IrOpCode::ArraySet,
            vec!["t0".into(), "t4".into(), "t5".into()],
        ),
    ];
    let python = emit_python(&[function("__main__", instructions)]).expect("emit");
    assert!(python.contains("t0 = [t1, t2]"));
    assert!(python.contains("t3 = t0[t4]"));
    assert!(python.contains("t0[t4] = t5"));
}

#[test]
fn input_uses_the_runtime_helper() {
    let instructions = vec![IrInstruction::new(IrOpCode::Input, vec!["x".into()])];
    let python = emit_python(&[function("__main__", instructions)]).expect("emit");
    assert!(python.contains("x = _vypr_input()"));
}

#[test]
fn function_parameters_appear_in_the_signature() {
    let mut f = IrFunction::new("add", vec!["a".to_string(), "b".to_string()]);
    f.push(IrInstruction::new(IrOpCode::Return, vec!["a".into()]));
    let python = emit_python(&[function("__main__", vec![]), f]).expect("emit");
    assert!(python.contains("def add(a, b):"));
}

#[test]
fn duplicate_label_is_an_emit_error() {
    let instructions = vec![
        IrInstruction::new(IrOpCode::Label, vec!["L0".into()]),
        IrInstruction::new(IrOpCode::Label, vec!["L0".into()]),
    ];
    let error = emit_python(&[function("__main__", instructions)])
        .err()
        .expect("duplicate label must fail");
    assert!(
        error.message().contains("Duplicate label"),
        "{}",
        error.message()
    );
}

#[test]
fn undefined_jump_target_is_an_emit_error() {
    let instructions = vec![IrInstruction::new(IrOpCode::Jump, vec!["L9".into()])];
    let error = emit_python(&[function("__main__", instructions)])
        .err()
        .expect("undefined target must fail");
    assert!(
        error.message().contains("Undefined label"),
        "{}",
        error.message()
    );
}
