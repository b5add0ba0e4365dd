use crate::{
    composer::Composer,
    error::ComposeError,
    operator::{Fragment, Operator},
    target::Target,
    value::Argument,
};
use serde::{Deserialize, Serialize};

///
/// Leaf
///
/// One atomic filter condition: an attribute target paired with an
/// operator. Immutable once constructed; `lower` is pure and idempotent, so
/// the same leaf always produces the same fragments.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Leaf {
    target: Target,
    operator: Operator,
}

impl Leaf {
    /// Build a leaf, validating the operator's argument shape. Shape errors
    /// surface here, never as malformed compiled text.
    pub fn new(target: Target, operator: Operator) -> Result<Self, ComposeError> {
        validate_shape(&operator)?;
        Ok(Self { target, operator })
    }

    #[must_use]
    pub const fn target(&self) -> &Target {
        &self.target
    }

    #[must_use]
    pub const fn operator(&self) -> &Operator {
        &self.operator
    }

    /// Lower to primitive clause fragments. A leaf whose operator tolerates
    /// an absent argument may lower to nothing; it then drops out of its
    /// group entirely.
    #[must_use]
    pub fn lower(&self) -> Vec<Fragment> {
        let resolved = self.target.resolve();
        self.operator.lower(&resolved.path, resolved.quantified)
    }

    /// Seed a composer with `self AND other`.
    #[must_use]
    pub fn and(self, other: Self) -> Composer {
        Composer::new().and(self).and(other)
    }

    /// Seed a composer with `self OR other`.
    #[must_use]
    pub fn or(self, other: Self) -> Composer {
        Composer::new().and(self).or(other)
    }
}

fn validate_shape(operator: &Operator) -> Result<(), ComposeError> {
    match operator {
        Operator::Equals(Some(Argument::List(_))) => Err(ComposeError::InvalidArgumentShape {
            operator: operator.name(),
            reason: "expected a scalar or absent argument; list membership is is_in_array"
                .to_string(),
        }),
        Operator::IsInArray(values) => ensure_scalar_elements(operator, values),
        Operator::HaveAtLeastOneOf(Argument::List(values))
        | Operator::HaveAllOf(Argument::List(values)) => {
            ensure_scalar_elements(operator, values)
        }
        _ => Ok(()),
    }
}

fn ensure_scalar_elements(operator: &Operator, values: &[Argument]) -> Result<(), ComposeError> {
    match values.iter().position(Argument::is_list) {
        Some(index) => Err(ComposeError::InvalidArgumentShape {
            operator: operator.name(),
            reason: format!("element {index} is itself a list; elements must be scalar"),
        }),
        None => Ok(()),
    }
}

///
/// TESTS
///
