//! Lowering of [`BranchValue`] trees to conditional jumps.
//!
//! The core primitive is [`BranchCompiler::cond_jump`]: emit code that
//! jumps to `target` when the value is false (`jump_if_false`) or true, and
//! falls through otherwise. Connectives lower asymmetrically:
//!
//! ```text
//! And(l, r), jump if false:   l ─false─▶ target      And(l, r), jump if true:  l ─false─▶ stay
//!                             r ─false─▶ target                                r ─true──▶ target
//!                                                                              stay:
//! ```
//!
//! `Or` is the dual. Each leaf is emitted exactly once.

use patc_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::{
    BranchValue, CachedTemp, CodegenError, Compare, FrameMap, Insn, Label, Opcode, Operand,
    OperandKind,
};

/// Emits branch code into a growing instruction buffer.
///
/// Temporaries come from the borrowed [`FrameMap`]; every temporary a
/// compile call acquires is released before the call returns, error or
/// not.
pub struct BranchCompiler<'f> {
    frame: &'f mut FrameMap,
    code: Vec<Insn>,
    next_label: u32,
}

impl<'f> BranchCompiler<'f> {
    pub fn new(frame: &'f mut FrameMap) -> Self {
        BranchCompiler {
            frame,
            code: Vec::new(),
            next_label: 0,
        }
    }

    pub fn new_label(&mut self) -> Label {
        let label = Label::from_raw(self.next_label);
        self.next_label += 1;
        label
    }

    pub fn bind(&mut self, label: Label) {
        self.code.push(Insn::Label(label));
    }

    pub fn emit(&mut self, insn: Insn) {
        self.code.push(insn);
    }

    pub fn code(&self) -> &[Insn] {
        &self.code
    }

    pub fn frame(&self) -> &FrameMap {
        self.frame
    }

    pub fn finish(self) -> Vec<Insn> {
        self.code
    }

    /// Transfer control to `true_target` or `false_target`.
    ///
    /// `jump_if_false` picks which target the conditional jumps aim at; the
    /// other one is reached by a trailing `goto`.
    pub fn compile(
        &mut self,
        value: BranchValue,
        true_target: Label,
        false_target: Label,
        jump_if_false: bool,
    ) -> Result<(), CodegenError> {
        debug!(%true_target, %false_target, jump_if_false, "compile branch");
        let (jump, other) = if jump_if_false {
            (false_target, true_target)
        } else {
            (true_target, false_target)
        };
        self.cond_jump(value, jump, jump_if_false)?;
        self.emit(Insn::Goto(other));
        Ok(())
    }

    /// Jump to `target` when `value` is false (or true, if `jump_if_false`
    /// is unset); fall through otherwise.
    pub fn cond_jump(
        &mut self,
        value: BranchValue,
        target: Label,
        jump_if_false: bool,
    ) -> Result<(), CodegenError> {
        ensure_sufficient_stack(|| self.cond_jump_inner(value, target, jump_if_false))
    }

    /// [`cond_jump`](Self::cond_jump) for loop conditions: a constant
    /// condition emits a fixed-outcome `ifeq` instead of a bare `goto`, so
    /// the loop shape stays visible to later passes.
    pub fn loop_jump(
        &mut self,
        value: BranchValue,
        target: Label,
        jump_if_false: bool,
    ) -> Result<(), CodegenError> {
        match value {
            BranchValue::Constant(constant) => {
                let always = constant != jump_if_false;
                trace!(always, %target, "fake ifeq");
                self.emit(Insn::FakeIfeq { always, target });
                Ok(())
            }
            other => self.cond_jump(other, target, jump_if_false),
        }
    }

    /// Leave `value` on the stack as an `int` 0 or 1.
    pub fn put_selector(&mut self, value: BranchValue) -> Result<(), CodegenError> {
        if let Some(constant) = value.as_constant() {
            self.emit(Insn::Push {
                operand: Operand::int(i32::from(constant)),
                kind: OperandKind::Boolean,
            });
            return Ok(());
        }
        let when_false = self.new_label();
        let end = self.new_label();
        self.cond_jump(value, when_false, true)?;
        self.emit(Insn::Push {
            operand: Operand::int(1),
            kind: OperandKind::Boolean,
        });
        self.emit(Insn::Goto(end));
        self.bind(when_false);
        self.emit(Insn::Push {
            operand: Operand::int(0),
            kind: OperandKind::Boolean,
        });
        self.bind(end);
        Ok(())
    }

    fn cond_jump_inner(
        &mut self,
        value: BranchValue,
        target: Label,
        jump_if_false: bool,
    ) -> Result<(), CodegenError> {
        match value {
            BranchValue::Compare(cmp) => self.compare(&cmp, target, jump_if_false),
            BranchValue::And(left, right) => {
                let stay = self.new_label();
                self.cond_jump(*left, if jump_if_false { target } else { stay }, true)?;
                self.cond_jump(*right, target, jump_if_false)?;
                self.bind(stay);
                Ok(())
            }
            BranchValue::Or(left, right) => {
                let stay = self.new_label();
                self.cond_jump(*left, if jump_if_false { stay } else { target }, false)?;
                self.cond_jump(*right, target, jump_if_false)?;
                self.bind(stay);
                Ok(())
            }
            BranchValue::Not(inner) => self.cond_jump(*inner, target, !jump_if_false),
            BranchValue::CachedTemp(temp) => self.cached(temp, target, jump_if_false),
            BranchValue::Constant(constant) => {
                if constant != jump_if_false {
                    self.emit(Insn::Goto(target));
                }
                Ok(())
            }
        }
    }

    fn compare(
        &mut self,
        cmp: &Compare,
        target: Label,
        jump_if_false: bool,
    ) -> Result<(), CodegenError> {
        let kind = cmp.kind();
        self.push(cmp.left(), kind);
        if let Some(right) = cmp.right() {
            self.push(right, kind);
        }
        let stored = cmp.opcode();
        let opcode = if jump_if_false {
            stored
        } else {
            stored
                .negate()
                .ok_or(CodegenError::NotConditional(stored))?
        };
        let opcode = self.patch_opcode(opcode, stored, kind, cmp.right().is_some());
        trace!(%opcode, %target, "jump");
        self.emit(Insn::Jump { opcode, target });
        Ok(())
    }

    /// Fit a zero-test opcode to the operands on the stack: widen to
    /// `if_icmp*` for int pairs, or emit the ordering compare that turns a
    /// wide or floating pair into one int.
    ///
    /// The NaN bias follows the source relation (`stored`), not the jump
    /// direction: `>` and `>=` use the `*cmpl` forms so that NaN compares
    /// false either way.
    fn patch_opcode(
        &mut self,
        opcode: Opcode,
        stored: Opcode,
        kind: OperandKind,
        binary: bool,
    ) -> Opcode {
        if !binary || !opcode.is_zero_test() {
            return opcode;
        }
        let greater = matches!(stored, Opcode::Ifle | Opcode::Iflt);
        let ordering = match kind {
            OperandKind::Long => Opcode::Lcmp,
            OperandKind::Float if greater => Opcode::Fcmpl,
            OperandKind::Float => Opcode::Fcmpg,
            OperandKind::Double if greater => Opcode::Dcmpl,
            OperandKind::Double => Opcode::Dcmpg,
            OperandKind::Int | OperandKind::Boolean | OperandKind::Reference => {
                return opcode.to_int_compare().unwrap_or(opcode);
            }
        };
        self.emit(Insn::Compare(ordering));
        opcode
    }

    fn cached(
        &mut self,
        temp: CachedTemp,
        target: Label,
        jump_if_false: bool,
    ) -> Result<(), CodegenError> {
        let (kind, value, builder) = temp.into_parts();
        self.push(value, kind);
        let slot = self.frame.enter_temp(kind)?;
        self.emit(Insn::Store { slot, kind });
        let body = builder(Operand::Local(slot))
            .and_then(|inner| self.cond_jump(inner, target, jump_if_false));
        let released = self.frame.leave_temp(slot);
        body.and(released)
    }

    fn push(&mut self, operand: Operand, kind: OperandKind) {
        self.emit(Insn::Push { operand, kind });
    }
}
