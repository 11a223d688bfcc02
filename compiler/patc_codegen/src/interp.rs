//! A tiny interpreter for emitted branch code.
//!
//! Host expressions are looked up in an environment, and every evaluation
//! is counted so tests can check short-circuiting and single evaluation.

use patc_ir::ExprId;
use rustc_hash::FxHashMap;

use crate::{Constant, Insn, Label, Opcode, Operand};

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Value {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Ref(Option<u32>),
}

#[derive(Default)]
pub(crate) struct Machine {
    env: FxHashMap<ExprId, Value>,
    locals: FxHashMap<u16, Value>,
    stack: Vec<Value>,
    evals: FxHashMap<ExprId, usize>,
}

/// Where execution stopped.
#[derive(Debug, PartialEq)]
pub(crate) enum Exit {
    /// Reached one of the exit labels.
    At(Label),
    /// Ran off the end of the code.
    End,
}

impl Machine {
    pub(crate) fn new() -> Self {
        Machine::default()
    }

    pub(crate) fn with(mut self, expr: ExprId, value: Value) -> Self {
        self.env.insert(expr, value);
        self
    }

    pub(crate) fn evals(&self, expr: ExprId) -> usize {
        self.evals.get(&expr).copied().unwrap_or(0)
    }

    pub(crate) fn pop(&mut self) -> Option<Value> {
        self.stack.pop()
    }

    /// Run `code` until it falls off the end or reaches a label in `exits`.
    pub(crate) fn run(&mut self, code: &[Insn], exits: &[Label]) -> Exit {
        let labels: FxHashMap<Label, usize> = code
            .iter()
            .enumerate()
            .filter_map(|(pc, insn)| match insn {
                Insn::Label(label) => Some((*label, pc)),
                _ => None,
            })
            .collect();
        let jump = |target: Label| match labels.get(&target) {
            Some(&pc) => pc,
            None => panic!("jump to unbound label {target}"),
        };

        let mut pc = 0;
        while let Some(insn) = code.get(pc) {
            pc += 1;
            match *insn {
                Insn::Label(label) => {
                    if exits.contains(&label) {
                        return Exit::At(label);
                    }
                }
                Insn::Push { operand, .. } => {
                    let value = self.load(operand);
                    self.stack.push(value);
                }
                Insn::Store { slot, .. } => {
                    let value = self.pop_value();
                    self.locals.insert(slot, value);
                }
                Insn::Compare(opcode) => {
                    let right = self.pop_value();
                    let left = self.pop_value();
                    self.stack.push(Value::Int(ordering(opcode, left, right)));
                }
                Insn::Jump { opcode, target } => {
                    if self.taken(opcode) {
                        pc = jump(target);
                    }
                }
                Insn::Goto(target) => pc = jump(target),
                Insn::FakeIfeq { always, target } => {
                    if always {
                        pc = jump(target);
                    }
                }
            }
        }
        Exit::End
    }

    fn load(&mut self, operand: Operand) -> Value {
        match operand {
            Operand::Const(constant) => match constant {
                Constant::Int(v) => Value::Int(v),
                Constant::Long(v) => Value::Long(v),
                Constant::Float(v) => Value::Float(v),
                Constant::Double(v) => Value::Double(v),
                Constant::Null => Value::Ref(None),
            },
            Operand::Local(slot) => match self.locals.get(&slot) {
                Some(value) => *value,
                None => panic!("load of unset local {slot}"),
            },
            Operand::Expr(expr) => {
                *self.evals.entry(expr).or_insert(0) += 1;
                match self.env.get(&expr) {
                    Some(value) => *value,
                    None => panic!("no value for {expr:?}"),
                }
            }
        }
    }

    fn pop_value(&mut self) -> Value {
        match self.stack.pop() {
            Some(value) => value,
            None => panic!("operand stack underflow"),
        }
    }

    fn pop_int(&mut self) -> i32 {
        match self.pop_value() {
            Value::Int(v) => v,
            other => panic!("expected an int, found {other:?}"),
        }
    }

    fn pop_ref(&mut self) -> Option<u32> {
        match self.pop_value() {
            Value::Ref(r) => r,
            other => panic!("expected a reference, found {other:?}"),
        }
    }

    fn taken(&mut self, opcode: Opcode) -> bool {
        match opcode {
            Opcode::Ifnull => self.pop_ref().is_none(),
            Opcode::Ifnonnull => self.pop_ref().is_some(),
            Opcode::IfAcmpeq | Opcode::IfAcmpne => {
                let right = self.pop_ref();
                let left = self.pop_ref();
                (left == right) == (opcode == Opcode::IfAcmpeq)
            }
            op if op.is_zero_test() => {
                let value = self.pop_int();
                int_test(op, value, 0)
            }
            op => {
                let right = self.pop_int();
                let left = self.pop_int();
                let base = match op {
                    Opcode::IfIcmpeq => Opcode::Ifeq,
                    Opcode::IfIcmpne => Opcode::Ifne,
                    Opcode::IfIcmplt => Opcode::Iflt,
                    Opcode::IfIcmpge => Opcode::Ifge,
                    Opcode::IfIcmpgt => Opcode::Ifgt,
                    Opcode::IfIcmple => Opcode::Ifle,
                    other => panic!("`{other}` is not a jump"),
                };
                int_test(base, left, right)
            }
        }
    }
}

fn int_test(op: Opcode, left: i32, right: i32) -> bool {
    match op {
        Opcode::Ifeq => left == right,
        Opcode::Ifne => left != right,
        Opcode::Iflt => left < right,
        Opcode::Ifge => left >= right,
        Opcode::Ifgt => left > right,
        Opcode::Ifle => left <= right,
        other => panic!("`{other}` is not a zero test"),
    }
}

fn ordering(opcode: Opcode, left: Value, right: Value) -> i32 {
    let sign = |o: Option<std::cmp::Ordering>, nan: i32| match o {
        Some(std::cmp::Ordering::Less) => -1,
        Some(std::cmp::Ordering::Equal) => 0,
        Some(std::cmp::Ordering::Greater) => 1,
        None => nan,
    };
    match (opcode, left, right) {
        (Opcode::Lcmp, Value::Long(a), Value::Long(b)) => sign(Some(a.cmp(&b)), 0),
        (Opcode::Fcmpl, Value::Float(a), Value::Float(b)) => sign(a.partial_cmp(&b), -1),
        (Opcode::Fcmpg, Value::Float(a), Value::Float(b)) => sign(a.partial_cmp(&b), 1),
        (Opcode::Dcmpl, Value::Double(a), Value::Double(b)) => sign(a.partial_cmp(&b), -1),
        (Opcode::Dcmpg, Value::Double(a), Value::Double(b)) => sign(a.partial_cmp(&b), 1),
        (op, a, b) => panic!("`{op}` cannot compare {a:?} and {b:?}"),
    }
}
