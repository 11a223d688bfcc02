//! Types, flow facts and scopes for pattern resolution.
//!
//! - [`Idx`] / [`Pool`]: interned type handles
//! - [`FlowInfo`] / [`ConditionalFlow`]: facts known on the success and
//!   failure edges of a condition, and the algebra combining them
//! - [`PatternScope`]: persistent chain of binding frames
//! - [`PatternServices`]: what the host compiler must answer for
//!   resolution (accessors, iteration, type tests, expression typing)

mod flow;
mod idx;
mod pool;
mod scope;
mod services;

pub use flow::{ConditionalFlow, Fact, FlowInfo, FlowValue};
pub use idx::Idx;
pub use pool::{Pool, Primitive, TypeData};
pub use scope::{PatternScope, ScopeBinding, VarId};
pub use services::{
    Accessor, AccessorRequest, ExprContext, ExprTypeInfo, IterationConvention, PatternServices,
    TypeTest, Unresolved,
};
