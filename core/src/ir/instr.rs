use std::fmt;

/// Three-address-style opcodes. Operands are strings: temporary names,
/// variable names, label names, rendered constants, or comma-joined lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrOpCode {
    LoadConst,
    LoadVar,
    StoreVar,
    BinaryOp,
    UnaryOp,
    Jump,
    JumpIfFalse,
    JumpIfTrue,
    Call,
    Return,
    Print,
    Input,
    ArrayNew,
    ArrayGet,
    ArraySet,
    MemberGet,
    Label,
    Convert,
    Nop,
}

impl fmt::Display for IrOpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IrOpCode::LoadConst => "LOAD_CONST",
            IrOpCode::LoadVar => "LOAD_VAR",
            IrOpCode::StoreVar => "STORE_VAR",
            IrOpCode::BinaryOp => "BINARY_OP",
            IrOpCode::UnaryOp => "UNARY_OP",
            IrOpCode::Jump => "JUMP",
            IrOpCode::JumpIfFalse => "JUMP_IF_FALSE",
            IrOpCode::JumpIfTrue => "JUMP_IF_TRUE",
            IrOpCode::Call => "CALL",
            IrOpCode::Return => "RETURN",
            IrOpCode::Print => "PRINT",
            IrOpCode::Input => "INPUT",
            IrOpCode::ArrayNew => "ARRAY_NEW",
            IrOpCode::ArrayGet => "ARRAY_GET",
            IrOpCode::ArraySet => "ARRAY_SET",
            IrOpCode::MemberGet => "MEMBER_GET",
            IrOpCode::Label => "LABEL",
            IrOpCode::Convert => "CONVERT",
            IrOpCode::Nop => "NOP",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IrInstruction {
    pub opcode: IrOpCode,
    pub operands: Vec<String>,
}

impl IrInstruction {
    pub fn new(opcode: IrOpCode, operands: Vec<String>) -> Self {
        IrInstruction { opcode, operands }
    }

    pub fn bare(opcode: IrOpCode) -> Self {
        IrInstruction {
            opcode,
            operands: Vec::new(),
        }
    }
}

impl fmt::Display for IrInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        if !self.operands.is_empty() {
            write!(f, " {}", self.operands.join(", "))?;
        }
        Ok(())
    }
}
