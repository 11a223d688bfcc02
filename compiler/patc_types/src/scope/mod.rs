//! Lexical scope for pattern variables.
//!
//! A persistent chain of frames. `child()` is O(1); binding into a frame
//! that is shared copies just that frame (`Rc::make_mut`). Nested
//! deconstructions open child frames, and their bindings are lifted into
//! the enclosing frame when the deconstruction is done, so the guard and
//! the success branch see every variable the pattern declared.

#![expect(
    clippy::disallowed_types,
    reason = "Rc<Frame> gives O(1) child frames and copy-on-write binding"
)]

use std::rc::Rc;

use patc_ir::{Name, Span};

use crate::Idx;

/// Identity of one declared pattern variable. Distinct declarations of the
/// same name get distinct ids.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct VarId(u32);

impl VarId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        VarId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ScopeBinding {
    pub name: Name,
    pub ty: Idx,
    pub var: VarId,
    pub span: Span,
}

#[derive(Clone, Debug)]
struct Frame {
    bindings: Vec<ScopeBinding>,
    parent: Option<PatternScope>,
}

#[derive(Clone, Debug)]
pub struct PatternScope(Rc<Frame>);

impl Default for PatternScope {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternScope {
    pub fn new() -> Self {
        PatternScope(Rc::new(Frame {
            bindings: Vec::new(),
            parent: None,
        }))
    }

    /// A root frame pre-populated with names visible around the check.
    pub fn with_outer(outer: impl IntoIterator<Item = ScopeBinding>) -> Self {
        PatternScope(Rc::new(Frame {
            bindings: outer.into_iter().collect(),
            parent: None,
        }))
    }

    #[must_use]
    pub fn child(&self) -> Self {
        PatternScope(Rc::new(Frame {
            bindings: Vec::new(),
            parent: Some(self.clone()),
        }))
    }

    pub fn parent(&self) -> Option<Self> {
        self.0.parent.clone()
    }

    /// Bind in the innermost frame. A later binding of the same name in
    /// the same frame wins on lookup.
    pub fn bind(&mut self, binding: ScopeBinding) {
        tracing::trace!(var = binding.var.raw(), ty = ?binding.ty, "bind pattern variable");
        Rc::make_mut(&mut self.0).bindings.push(binding);
    }

    /// Innermost binding of `name`, searching outward.
    pub fn lookup(&self, name: Name) -> Option<ScopeBinding> {
        let mut frame = Some(self);
        while let Some(scope) = frame {
            if let Some(found) = scope.lookup_local(name) {
                return Some(found);
            }
            frame = scope.0.parent.as_ref();
        }
        None
    }

    /// Binding of `name` in this frame only.
    pub fn lookup_local(&self, name: Name) -> Option<ScopeBinding> {
        self.0.bindings.iter().rev().find(|b| b.name == name).copied()
    }

    pub fn local_bindings(&self) -> &[ScopeBinding] {
        &self.0.bindings
    }

    /// Leave this frame: the parent with this frame's bindings appended.
    /// A root frame is returned unchanged.
    #[must_use]
    pub fn lift_into_parent(self) -> Self {
        let Some(mut parent) = self.0.parent.clone() else {
            return self;
        };
        if !self.0.bindings.is_empty() {
            Rc::make_mut(&mut parent.0)
                .bindings
                .extend_from_slice(&self.0.bindings);
        }
        parent
    }

    /// Number of frames from here to the root, inclusive.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut frame = self.0.parent.as_ref();
        while let Some(scope) = frame {
            depth += 1;
            frame = scope.0.parent.as_ref();
        }
        depth
    }
}
