use crate::{operator::PLACEHOLDER, value::Argument};
use derive_more::{Deref, DerefMut, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// Arguments
///
/// Ordered positional arguments of a compiled filter.
///

#[repr(transparent)]
#[derive(
    Clone, Debug, Default, Deref, DerefMut, Deserialize, Eq, IntoIterator, PartialEq, Serialize,
)]
#[into_iterator(owned, ref)]
pub struct Arguments(pub Vec<Argument>);

///
/// CompiledFilter
///
/// Output contract handed to the persistence engine: a template expression
/// holding exactly one placeholder per argument, in matching order. An
/// empty expression with no arguments places no constraint on the fetch
/// and matches every record.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CompiledFilter {
    pub expression: String,
    pub arguments: Arguments,
}

impl CompiledFilter {
    pub(crate) fn new(expression: String, arguments: Vec<Argument>) -> Self {
        Self {
            expression,
            arguments: Arguments(arguments),
        }
    }

    /// True when compilation produced no constraint at all.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.expression.is_empty() && self.arguments.is_empty()
    }

    /// Number of placeholder tokens in the expression text.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.expression.matches(PLACEHOLDER).count()
    }
}

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum SortDirection {
    Asc,
    Desc,
}

///
/// SortKey
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

///
/// RecordType
///
/// Names a fetchable record collection. Attribute paths in a compiled
/// expression are resolved by the engine against this collection's schema.
///

pub trait RecordType {
    const NAME: &'static str;
}

///
/// PersistenceEngine
///
/// The consumed collaborator: executes a compiled filter against a record
/// collection and returns the matching records in sort order. Locking and
/// transactional discipline are entirely the engine's concern; this crate
/// only produces the filter.
///

pub trait PersistenceEngine {
    type Error;

    fn fetch<R: RecordType>(
        &self,
        filter: &CompiledFilter,
        sort: &[SortKey],
    ) -> Result<Vec<R>, Self::Error>;
}

///
/// TESTS
///
