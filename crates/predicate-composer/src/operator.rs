use crate::value::Argument;
use serde::{Deserialize, Serialize};

/// Placeholder token the engine binds positionally, one per argument.
pub const PLACEHOLDER: &str = "%@";

///
/// Operator
///
/// Closed comparison/membership/quantification vocabulary. Each operator
/// carries its own argument, so a leaf is fully specified by a target and
/// an operator value.
///
/// The contains family tolerates an absent argument: such a leaf lowers to
/// nothing at all and drops out of its group. `HaveAtLeastOneOf` and
/// `HaveAllOf` accept either a single value or a list and embed their own
/// existential semantics.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum Operator {
    BeginsWithCaseInsensitive(Option<String>),
    Contains(Option<String>),
    ContainsCaseInsensitive(Option<String>),
    /// `None` compares the target against null.
    Equals(Option<Argument>),
    HaveAllOf(Argument),
    HaveAtLeastOneOf(Argument),
    IsFalse,
    IsGreaterThan(i64),
    IsInArray(Vec<Argument>),
    IsLessThan(i64),
    IsTrue,
}

impl Operator {
    /// Stable lowercase name used in diagnostics.
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            Self::BeginsWithCaseInsensitive(_) => "begins_with_case_insensitive",
            Self::Contains(_) => "contains",
            Self::ContainsCaseInsensitive(_) => "contains_case_insensitive",
            Self::Equals(_) => "equals",
            Self::HaveAllOf(_) => "have_all_of",
            Self::HaveAtLeastOneOf(_) => "have_at_least_one_of",
            Self::IsFalse => "is_false",
            Self::IsGreaterThan(_) => "is_greater_than",
            Self::IsInArray(_) => "is_in_array",
            Self::IsLessThan(_) => "is_less_than",
            Self::IsTrue => "is_true",
        }
    }

    /// Lower into primitive clause fragments against a resolved path.
    ///
    /// `quantified` existentially qualifies forms that do not already embed
    /// their own quantification. Forms built on `ANY`, `SUBQUERY` or
    /// `@count` ignore it: they quantify the collection themselves.
    pub(crate) fn lower(&self, path: &str, quantified: bool) -> Vec<Fragment> {
        match self {
            Self::IsTrue => vec![Fragment::new(
                format!("{} == true", quantify(path, quantified)),
                None,
            )],
            Self::IsFalse => vec![Fragment::new(
                format!("{} == false", quantify(path, quantified)),
                None,
            )],
            Self::Contains(None)
            | Self::ContainsCaseInsensitive(None)
            | Self::BeginsWithCaseInsensitive(None) => Vec::new(),
            Self::Contains(Some(text)) => vec![Fragment::new(
                format!("{} CONTAINS {PLACEHOLDER}", quantify(path, quantified)),
                Some(Argument::Text(text.clone())),
            )],
            Self::ContainsCaseInsensitive(Some(text)) => vec![Fragment::new(
                format!("{} CONTAINS[c] {PLACEHOLDER}", quantify(path, quantified)),
                Some(Argument::Text(text.clone())),
            )],
            Self::BeginsWithCaseInsensitive(Some(text)) => vec![Fragment::new(
                format!("{} BEGINSWITH[c] {PLACEHOLDER}", quantify(path, quantified)),
                Some(Argument::Text(text.clone())),
            )],
            Self::IsGreaterThan(bound) => vec![Fragment::new(
                format!("{} > {PLACEHOLDER}", quantify(path, quantified)),
                Some(Argument::Int(*bound)),
            )],
            Self::IsLessThan(bound) => vec![Fragment::new(
                format!("{} < {PLACEHOLDER}", quantify(path, quantified)),
                Some(Argument::Int(*bound)),
            )],
            // A null comparison binds no placeholder, keeping the
            // one-placeholder-per-argument output contract intact.
            Self::Equals(None) => vec![Fragment::new(
                format!("{} == nil", quantify(path, quantified)),
                None,
            )],
            Self::Equals(Some(value)) => vec![Fragment::new(
                format!("{} == {PLACEHOLDER}", quantify(path, quantified)),
                Some(value.clone()),
            )],
            Self::IsInArray(values) => vec![Fragment::new(
                format!("{} IN {PLACEHOLDER}", quantify(path, quantified)),
                Some(Argument::List(values.clone())),
            )],
            Self::HaveAtLeastOneOf(argument) => match argument {
                Argument::List(values) if values.is_empty() => vec![count_zero(path)],
                Argument::List(values) => vec![any_in(path, values.clone())],
                scalar => vec![any_equals(path, scalar.clone())],
            },
            Self::HaveAllOf(argument) => match argument {
                Argument::List(values) if values.is_empty() => vec![count_zero(path)],
                Argument::List(values) if values.len() == 1 => vec![any_in(path, values.clone())],
                // One membership check per element. The fragments are later
                // joined with AND regardless of the enclosing group's
                // combinator: "all of" is a conjunction by definition.
                Argument::List(values) => values
                    .iter()
                    .map(|value| {
                        Fragment::new(
                            format!("SUBQUERY({path}, $x, $x == {PLACEHOLDER}).@count == 1"),
                            Some(value.clone()),
                        )
                    })
                    .collect(),
                scalar => vec![any_equals(path, scalar.clone())],
            },
        }
    }
}

fn quantify(path: &str, quantified: bool) -> String {
    if quantified {
        format!("ANY {path}")
    } else {
        path.to_string()
    }
}

fn count_zero(path: &str) -> Fragment {
    Fragment::new(format!("{path}.@count == 0"), None)
}

fn any_equals(path: &str, value: Argument) -> Fragment {
    Fragment::new(format!("ANY {path} == {PLACEHOLDER}"), Some(value))
}

fn any_in(path: &str, values: Vec<Argument>) -> Fragment {
    Fragment::new(
        format!("ANY {path} IN {PLACEHOLDER}"),
        Some(Argument::List(values)),
    )
}

///
/// Fragment
///
/// One primitive clause of compiled text plus at most one positional
/// argument. All fragments produced by a single leaf are joined with AND
/// before entering the leaf's group.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Fragment {
    pub text: String,
    pub argument: Option<Argument>,
}

impl Fragment {
    pub(crate) fn new(text: impl Into<String>, argument: Option<Argument>) -> Self {
        Self {
            text: text.into(),
            argument,
        }
    }
}

///
/// TESTS
///
