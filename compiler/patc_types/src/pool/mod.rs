//! Interned type storage.
//!
//! Structural types (classes with arguments, nullable wrappers) are
//! hash-consed so that equal types share one [`Idx`].

use rustc_hash::FxHashMap;

use patc_ir::{Name, StringInterner};

use crate::Idx;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Primitive {
    Error,
    Nothing,
    Unit,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    String,
    Any,
}

impl Primitive {
    const ALL: [Primitive; Idx::PRIMITIVE_COUNT as usize] = [
        Primitive::Error,
        Primitive::Nothing,
        Primitive::Unit,
        Primitive::Boolean,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
        Primitive::String,
        Primitive::Any,
    ];
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    Primitive(Primitive),
    /// A nominal class type, possibly generic.
    Class { name: Name, args: Vec<Idx> },
    /// `T?`. Never wraps another nullable or `ERROR`.
    Nullable(Idx),
}

#[derive(Clone, Debug)]
pub struct Pool {
    types: Vec<TypeData>,
    lookup: FxHashMap<TypeData, Idx>,
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl Pool {
    pub fn new() -> Self {
        let mut pool = Pool {
            types: Vec::with_capacity(64),
            lookup: FxHashMap::default(),
        };
        for prim in Primitive::ALL {
            pool.intern(TypeData::Primitive(prim));
        }
        pool
    }

    fn intern(&mut self, data: TypeData) -> Idx {
        if let Some(&idx) = self.lookup.get(&data) {
            return idx;
        }
        let raw = u32::try_from(self.types.len())
            .unwrap_or_else(|_| panic!("type pool exceeded u32::MAX entries"));
        let idx = Idx::from_raw(raw);
        self.types.push(data.clone());
        self.lookup.insert(data, idx);
        idx
    }

    /// `name<args>`.
    pub fn class(&mut self, name: Name, args: &[Idx]) -> Idx {
        self.intern(TypeData::Class {
            name,
            args: args.to_vec(),
        })
    }

    /// `inner?`. Idempotent; `ERROR` stays `ERROR`.
    pub fn nullable(&mut self, inner: Idx) -> Idx {
        if inner.is_error() || self.is_nullable(inner) {
            return inner;
        }
        self.intern(TypeData::Nullable(inner))
    }

    /// Strip one level of nullability. Never allocates.
    pub fn make_not_null(&self, idx: Idx) -> Idx {
        match self.data(idx) {
            TypeData::Nullable(inner) => *inner,
            _ => idx,
        }
    }

    pub fn is_nullable(&self, idx: Idx) -> bool {
        matches!(self.data(idx), TypeData::Nullable(_))
    }

    pub fn data(&self, idx: Idx) -> &TypeData {
        &self.types[idx.index()]
    }

    /// Class name of `idx`, looking through nullability.
    pub fn class_name(&self, idx: Idx) -> Option<Name> {
        match self.data(self.make_not_null(idx)) {
            TypeData::Class { name, .. } => Some(*name),
            _ => None,
        }
    }

    pub fn type_args(&self, idx: Idx) -> &[Idx] {
        match self.data(self.make_not_null(idx)) {
            TypeData::Class { args, .. } => args,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Source-like rendering, for diagnostics.
    pub fn display(&self, idx: Idx, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.write_type(idx, interner, &mut out);
        out
    }

    fn write_type(&self, idx: Idx, interner: &StringInterner, out: &mut String) {
        if let Some(name) = idx.name() {
            out.push_str(name);
            return;
        }
        match self.data(idx) {
            TypeData::Primitive(_) => out.push_str("<primitive>"),
            TypeData::Class { name, args } => {
                out.push_str(interner.lookup(*name));
                if !args.is_empty() {
                    out.push('<');
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.write_type(*arg, interner, out);
                    }
                    out.push('>');
                }
            }
            TypeData::Nullable(inner) => {
                self.write_type(*inner, interner, out);
                out.push('?');
            }
        }
    }
}
