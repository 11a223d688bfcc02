//! A small host for resolver tests: a class table with components,
//! properties, deconstructors and iterables, plus canned expression types.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use patc_ir::{ExprId, Name, PatternArena, PatternNodeId, RawPattern, Span, StringInterner, TypeRef};
use patc_types::{
    Accessor, AccessorRequest, ConditionalFlow, ExprContext, ExprTypeInfo, FlowInfo, FlowValue,
    Idx, IterationConvention, PatternServices, Pool, TypeTest, Unresolved,
};

use crate::Subject;

/// The expression every test subject is read from.
pub(crate) const SUBJECT_EXPR: ExprId = ExprId::new(0);

pub(crate) fn sp(start: u32, end: u32) -> Span {
    Span::new(start, end)
}

pub(crate) fn subject(ty: Idx) -> Subject {
    Subject::new(FlowValue::Expr(SUBJECT_EXPR), ty, sp(0, 1))
}

pub(crate) fn build(raw: &RawPattern) -> (PatternArena, PatternNodeId) {
    let mut arena = PatternArena::new();
    let root = patc_ir::normalize(raw, &mut arena);
    (arena, root)
}

#[derive(Default)]
struct ClassInfo {
    components: Vec<Idx>,
    properties: FxHashMap<Name, Idx>,
    iteration: Option<IterationConvention>,
    erased: bool,
}

pub(crate) struct MockServices {
    pub(crate) interner: StringInterner,
    pub(crate) pool: Pool,
    types: FxHashMap<Name, Idx>,
    classes: FxHashMap<Idx, ClassInfo>,
    deconstructors: FxHashMap<Name, Accessor>,
    exprs: FxHashMap<ExprId, Idx>,
    conditions: FxHashMap<ExprId, ConditionalFlow>,
    ranges: FxHashMap<ExprId, Idx>,
    /// Every condition checked, with the context it was checked in.
    pub(crate) checked: RefCell<Vec<(ExprId, ExprContext)>>,
}

impl MockServices {
    pub(crate) fn new() -> Self {
        let interner = StringInterner::new();
        let mut types = FxHashMap::default();
        for (name, ty) in [
            ("Int", Idx::INT),
            ("String", Idx::STRING),
            ("Boolean", Idx::BOOLEAN),
            ("Any", Idx::ANY),
        ] {
            types.insert(interner.intern(name), ty);
        }
        MockServices {
            interner,
            pool: Pool::new(),
            types,
            classes: FxHashMap::default(),
            deconstructors: FxHashMap::default(),
            exprs: FxHashMap::default(),
            conditions: FxHashMap::default(),
            ranges: FxHashMap::default(),
            checked: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    pub(crate) fn type_ref(&self, text: &str, span: Span) -> TypeRef {
        TypeRef::simple(self.name(text), span)
    }

    /// Declare a class named `text`; usable as a type and a type call.
    pub(crate) fn class(&mut self, text: &str) -> Idx {
        let name = self.name(text);
        let ty = self.pool.class(name, &[]);
        self.types.insert(name, ty);
        self.classes.insert(ty, ClassInfo::default());
        ty
    }

    pub(crate) fn components(&mut self, ty: Idx, components: &[Idx]) {
        self.info(ty).components = components.to_vec();
    }

    pub(crate) fn property(&mut self, ty: Idx, text: &str, prop: Idx) {
        let name = self.name(text);
        self.info(ty).properties.insert(name, prop);
    }

    pub(crate) fn iterable(&mut self, ty: Idx, iterator: Idx, element: Idx) {
        self.info(ty).iteration = Some(IterationConvention { iterator, element });
    }

    pub(crate) fn erased(&mut self, ty: Idx) {
        self.info(ty).erased = true;
    }

    /// A function `text()` applicable to any receiver.
    pub(crate) fn deconstructor(&mut self, text: &str, return_type: Idx, is_deconstructor: bool) {
        let name = self.name(text);
        self.deconstructors.insert(
            name,
            Accessor {
                return_type,
                is_deconstructor,
            },
        );
    }

    pub(crate) fn expr(&mut self, expr: ExprId, ty: Idx) {
        self.exprs.insert(expr, ty);
    }

    pub(crate) fn condition(&mut self, expr: ExprId, flow: ConditionalFlow) {
        self.conditions.insert(expr, flow);
    }

    pub(crate) fn range(&mut self, range: ExprId, result: Idx) {
        self.ranges.insert(range, result);
    }

    fn info(&mut self, ty: Idx) -> &mut ClassInfo {
        self.classes.entry(ty).or_default()
    }

    fn is_subtype(sub: Idx, sup: Idx) -> bool {
        sub == sup || sup == Idx::ANY
    }
}

impl PatternServices for MockServices {
    fn pool(&self) -> &Pool {
        &self.pool
    }

    fn interner(&self) -> &StringInterner {
        &self.interner
    }

    fn resolve_accessor(
        &self,
        receiver: Idx,
        request: AccessorRequest<'_>,
    ) -> Result<Accessor, Unresolved> {
        let plain = |ty: Option<&Idx>| {
            ty.map(|&return_type| Accessor {
                return_type,
                is_deconstructor: false,
            })
        };
        let class = self.classes.get(&receiver);
        let found = match request {
            AccessorRequest::Component(n) => {
                plain(class.and_then(|c| c.components.get(n as usize - 1)))
            }
            AccessorRequest::Property(name) => plain(class.and_then(|c| c.properties.get(&name))),
            AccessorRequest::Deconstructor(call) => self.deconstructors.get(&call.name).copied(),
        };
        found.ok_or(Unresolved)
    }

    fn resolve_iteration(&self, receiver: Idx) -> Result<IterationConvention, Unresolved> {
        self.classes
            .get(&receiver)
            .and_then(|c| c.iteration)
            .ok_or(Unresolved)
    }

    fn resolve_type_test(
        &self,
        subject: Idx,
        ty: &TypeRef,
        _allow_bare: bool,
    ) -> Result<TypeTest, Unresolved> {
        let target = *self.types.get(&ty.name).ok_or(Unresolved)?;
        Ok(TypeTest {
            target,
            is_redundant: Self::is_subtype(subject, target),
            is_erased: self.classes.get(&target).is_some_and(|c| c.erased),
            is_incompatible: !Self::is_subtype(subject, target)
                && !Self::is_subtype(target, subject),
        })
    }

    fn type_expression(&self, expr: ExprId, _cx: &ExprContext) -> ExprTypeInfo {
        ExprTypeInfo {
            ty: self.exprs.get(&expr).copied().unwrap_or(Idx::ERROR),
            flow: FlowInfo::empty(),
        }
    }

    fn check_condition(&self, expr: ExprId, cx: &ExprContext) -> ConditionalFlow {
        self.checked.borrow_mut().push((expr, cx.clone()));
        self.conditions.get(&expr).cloned().unwrap_or_default()
    }

    fn types_compatible(&self, a: Idx, b: Idx) -> bool {
        Self::is_subtype(a, b) || Self::is_subtype(b, a)
    }

    fn has_identity_equals(&self, ty: Idx) -> bool {
        !ty.is_primitive()
    }

    fn check_in_range(
        &self,
        _subject: Idx,
        range: ExprId,
        _cx: &ExprContext,
    ) -> Result<ExprTypeInfo, Unresolved> {
        let ty = *self.ranges.get(&range).ok_or(Unresolved)?;
        Ok(ExprTypeInfo {
            ty,
            flow: FlowInfo::empty(),
        })
    }
}
