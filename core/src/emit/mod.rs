//! file: core/src/emit/mod.rs
//! description: Python back end using program-counter dispatch.
//!
//! Each IR function is rendered as a Python function whose body simulates
//! the instruction list: `_pc = 0`, `while True:`, and one `if/elif` arm per
//! instruction index. Arms that do not set `_pc` themselves increment it;
//! jumps assign the index of their target label. Reconstructing structured
//! control flow from linear IR is never attempted.

pub mod err;

use std::collections::HashMap;

use log::debug;

use crate::error::{Level, VyprErrorExt};
use crate::ir::{IrFunction, IrInstruction, IrOpCode};
use err::EmitError;

const ISSUER: &str = "vypr.emit";

/// Render the whole program as Python source text. Fails on a duplicate
/// label within one function or on a jump to an undefined label.
pub fn emit_python(functions: &[IrFunction]) -> Result<String, Box<dyn VyprErrorExt>> {
    debug!("emitting {} function(s)", functions.len());

    let mut out = String::new();
    write_header(&mut out);

    for function in functions {
        write_function(function, &mut out)?;
    }

    out.push_str("\n# Execute main function if this is the main module\n");
    out.push_str("if __name__ == \"__main__\":\n");
    out.push_str("    __main__()\n");

    Ok(out)
}

fn write_header(out: &mut String) {
    out.push_str("#!/usr/bin/env python3\n");
    out.push_str("# Generated by the Vypr compiler\n\n");
    out.push_str("import sys\n\n");

    out.push_str("# Runtime helper functions\n");
    out.push_str("def _vypr_concat(a, b):\n");
    out.push_str("    return str(a) + str(b)\n\n");

    out.push_str("def _vypr_input(prompt=\"\"):\n");
    out.push_str("    if prompt:\n");
    out.push_str("        sys.stdout.write(prompt)\n");
    out.push_str("        sys.stdout.flush()\n");
    out.push_str("    return input()\n\n");
}

fn write_function(
    function: &IrFunction,
    out: &mut String,
) -> Result<(), Box<dyn VyprErrorExt>> {
    let label_map = build_label_map(function)?;

    out.push_str(&format!(
        "def {}({}):\n",
        function.name,
        function.parameters.join(", ")
    ));

    out.push_str(&format!("{}_pc = 0\n", indent(1)));
    out.push_str(&format!("{}while True:\n", indent(1)));

    if function.is_empty() {
        out.push_str(&format!("{}pass # Empty function\n", indent(2)));
        out.push_str(&format!("{}break\n", indent(2)));
        out.push('\n');
        return Ok(());
    }

    for (i, instruction) in function.instructions.iter().enumerate() {
        if i == 0 {
            out.push_str(&format!("{}if _pc == {}:\n", indent(2), i));
        } else {
            out.push_str(&format!("{}elif _pc == {}:\n", indent(2), i));
        }

        let pc_handled = write_instruction(function, instruction, &label_map, out)?;
        if !pc_handled {
            out.push_str(&format!("{}_pc += 1\n", indent(3)));
        }
    }

    // Guard against a runaway program counter.
    out.push_str(&format!("{}else:\n", indent(2)));
    out.push_str(&format!(
        "{}# Instruction pointer out of bounds or loop finished\n",
        indent(3)
    ));
    out.push_str(&format!("{}break\n", indent(3)));

    out.push('\n');
    Ok(())
}

fn build_label_map(
    function: &IrFunction,
) -> Result<HashMap<String, usize>, Box<dyn VyprErrorExt>> {
    let mut label_map = HashMap::new();
    for (i, instruction) in function.instructions.iter().enumerate() {
        if instruction.opcode == IrOpCode::Label {
            let name = instruction.operands[0].clone();
            if label_map.contains_key(&name) {
                return Err(emit_error(format!(
                    "Duplicate label found in IR function '{}': {}",
                    function.name, name
                )));
            }
            label_map.insert(name, i);
        }
    }
    Ok(label_map)
}

/// Write the body of one dispatch arm. Returns true when the arm assigned
/// `_pc` itself (jumps and returns).
fn write_instruction(
    function: &IrFunction,
    instruction: &IrInstruction,
    label_map: &HashMap<String, usize>,
    out: &mut String,
) -> Result<bool, Box<dyn VyprErrorExt>> {
    let code = indent(3);
    let ops = &instruction.operands;

    match instruction.opcode {
        IrOpCode::Label => {
            out.push_str(&format!("{}# LABEL {}\n", code, ops[0]));
            Ok(false)
        }

        IrOpCode::Jump => {
            let target = resolve_label(function, label_map, &ops[0], "JUMP")?;
            out.push_str(&format!("{}_pc = {}\n", code, target));
            Ok(true)
        }

        IrOpCode::JumpIfFalse => {
            let target = resolve_label(function, label_map, &ops[1], "JUMP_IF_FALSE")?;
            out.push_str(&format!("{}if not {}:\n", code, ops[0]));
            out.push_str(&format!("{}{}_pc = {}\n", code, indent(1), target));
            out.push_str(&format!("{}else:\n", code));
            out.push_str(&format!("{}{}_pc += 1\n", code, indent(1)));
            Ok(true)
        }

        IrOpCode::JumpIfTrue => {
            let target = resolve_label(function, label_map, &ops[1], "JUMP_IF_TRUE")?;
            out.push_str(&format!("{}if {}:\n", code, ops[0]));
            out.push_str(&format!("{}{}_pc = {}\n", code, indent(1), target));
            out.push_str(&format!("{}else:\n", code));
            out.push_str(&format!("{}{}_pc += 1\n", code, indent(1)));
            Ok(true)
        }

        IrOpCode::Return => {
            if ops.is_empty() {
                out.push_str(&format!("{}return\n", code));
            } else {
                out.push_str(&format!("{}return {}\n", code, ops[0]));
            }
            out.push_str(&format!("{}break # Exit loop after return\n", code));
            Ok(true)
        }

        IrOpCode::LoadConst => {
            out.push_str(&format!(
                "{}{} = {}\n",
                code,
                ops[0],
                normalize_constant(&ops[1])
            ));
            Ok(false)
        }

        IrOpCode::LoadVar | IrOpCode::StoreVar => {
            out.push_str(&format!("{}{} = {}\n", code, ops[0], ops[1]));
            Ok(false)
        }

        IrOpCode::BinaryOp => {
            let (result, left, op, right) = (&ops[0], &ops[1], &ops[2], &ops[3]);
            if op == "^" {
                out.push_str(&format!(
                    "{}{} = _vypr_concat({}, {})\n",
                    code, result, left, right
                ));
            } else {
                let op = match op.as_str() {
                    "&&" => "and",
                    "||" => "or",
                    other => other,
                };
                out.push_str(&format!("{}{} = {} {} {}\n", code, result, left, op, right));
            }
            Ok(false)
        }

        IrOpCode::UnaryOp => {
            let op = if ops[1] == "!" { "not " } else { ops[1].as_str() };
            out.push_str(&format!("{}{} = {}{}\n", code, ops[0], op, ops[2]));
            Ok(false)
        }

        IrOpCode::Call => {
            let args = if ops.len() > 2 { ops[2].as_str() } else { "" };
            out.push_str(&format!("{}{} = {}({})\n", code, ops[0], ops[1], args));
            Ok(false)
        }

        IrOpCode::Print => {
            out.push_str(&format!("{}print({})\n", code, ops[0]));
            Ok(false)
        }

        IrOpCode::Input => {
            out.push_str(&format!("{}{} = _vypr_input()\n", code, ops[0]));
            Ok(false)
        }

        IrOpCode::ArrayNew => {
            let elements = if ops.len() > 1 { ops[1].as_str() } else { "" };
            out.push_str(&format!("{}{} = [{}]\n", code, ops[0], elements));
            Ok(false)
        }

        IrOpCode::ArrayGet => {
            out.push_str(&format!("{}{} = {}[{}]\n", code, ops[0], ops[1], ops[2]));
            Ok(false)
        }

        IrOpCode::ArraySet => {
            out.push_str(&format!("{}{}[{}] = {}\n", code, ops[0], ops[1], ops[2]));
            Ok(false)
        }

        IrOpCode::MemberGet => {
            if ops[2] == "length" {
                out.push_str(&format!("{}{} = len({})\n", code, ops[0], ops[1]));
            } else {
                out.push_str(&format!("{}{} = {}.{}\n", code, ops[0], ops[1], ops[2]));
            }
            Ok(false)
        }

        IrOpCode::Convert => {
            out.push_str(&format!("{}{} = {}({})\n", code, ops[0], ops[1], ops[2]));
            Ok(false)
        }

        IrOpCode::Nop => {
            out.push_str(&format!("{}pass\n", code));
            Ok(false)
        }
    }
}

fn resolve_label(
    function: &IrFunction,
    label_map: &HashMap<String, usize>,
    label: &str,
    opcode: &str,
) -> Result<usize, Box<dyn VyprErrorExt>> {
    label_map.get(label).copied().ok_or_else(|| {
        emit_error(format!(
            "Undefined label referenced in {} in function '{}': {}",
            opcode, function.name, label
        ))
    })
}

/// Normalize a `LOAD_CONST` operand into a Python literal: boolean keywords
/// are mapped, already-quoted and numeric-looking values pass through, and
/// any other bare value is wrapped in quotes.
fn normalize_constant(value: &str) -> String {
    if value == "true" {
        return "True".to_string();
    }
    if value == "false" {
        return "False".to_string();
    }

    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted || looks_numeric(value) {
        return value.to_string();
    }

    format!("\"{}\"", value)
}

/// `-?[0-9]+(\.[0-9]+)?`
fn looks_numeric(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() {
        return false;
    }
    match digits.split_once('.') {
        None => digits.chars().all(|c| c.is_ascii_digit()),
        Some((whole, frac)) => {
            !whole.is_empty()
                && !frac.is_empty()
                && whole.chars().all(|c| c.is_ascii_digit())
                && frac.chars().all(|c| c.is_ascii_digit())
        }
    }
}

fn indent(level: usize) -> String {
    " ".repeat(level * 4)
}

fn emit_error(message: String) -> Box<dyn VyprErrorExt> {
    Box::new(EmitError::with(Level::Error, message, ISSUER.to_string()))
}
