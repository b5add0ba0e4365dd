//! Filter-expression composition: structured search criteria in, one
//! parameterized filter expression out. Leaves pair an attribute target
//! with an operator, groups combine leaves under AND/OR, and the composer
//! folds its groups into a right-nested expression string plus the ordered
//! argument list a persistence engine binds positionally.
//!
//! The crate is a pure compiler; executing the filter is the engine's job.
#![warn(unreachable_pub)]

pub mod composer;
pub mod engine;
pub mod error;
pub mod leaf;
pub mod operator;
pub mod target;
pub mod value;

///
/// Prelude
///
/// Domain vocabulary only; no engine internals beyond the boundary traits.
///

pub mod prelude {
    pub use crate::{
        composer::{Combinator, Composer, Node},
        engine::{CompiledFilter, PersistenceEngine, RecordType, SortDirection, SortKey},
        error::ComposeError,
        leaf::Leaf,
        operator::{Fragment, Operator, PLACEHOLDER},
        target::Target,
        value::{Argument, ArgumentValue, Date, RecordRef},
    };
}
