mod date;

pub use date::Date;

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

///
/// Argument
///
/// Closed set of values a compiled filter can bind to a placeholder.
/// Scalar variants bind one placeholder each; `List` binds a whole
/// collection to a single placeholder (`IN`-style membership).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum Argument {
    Bool(bool),
    Date(Date),
    Int(i64),
    /// Ordered list of values, bound as one positional argument.
    List(Vec<Argument>),
    Ref(RecordRef),
    Text(String),
}

impl Argument {
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !self.is_list()
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }
}

///
/// ArgumentValue
///
/// Conversion into `Argument` for the Rust types leaves accept. Mirrors the
/// shape of the value the engine compares against; collections become
/// `Argument::List`.
///

pub trait ArgumentValue {
    fn to_argument(&self) -> Argument;
}

impl<T: ArgumentValue + ?Sized> ArgumentValue for &T {
    fn to_argument(&self) -> Argument {
        (**self).to_argument()
    }
}

impl ArgumentValue for bool {
    fn to_argument(&self) -> Argument {
        Argument::Bool(*self)
    }
}

impl ArgumentValue for i64 {
    fn to_argument(&self) -> Argument {
        Argument::Int(*self)
    }
}

impl ArgumentValue for i32 {
    fn to_argument(&self) -> Argument {
        Argument::Int((*self).into())
    }
}

impl ArgumentValue for u32 {
    fn to_argument(&self) -> Argument {
        Argument::Int((*self).into())
    }
}

impl ArgumentValue for str {
    fn to_argument(&self) -> Argument {
        Argument::Text(self.to_string())
    }
}

impl ArgumentValue for String {
    fn to_argument(&self) -> Argument {
        Argument::Text(self.clone())
    }
}

impl ArgumentValue for Date {
    fn to_argument(&self) -> Argument {
        Argument::Date(*self)
    }
}

impl ArgumentValue for RecordRef {
    fn to_argument(&self) -> Argument {
        Argument::Ref(*self)
    }
}

impl ArgumentValue for Ulid {
    fn to_argument(&self) -> Argument {
        Argument::Ref(RecordRef::new(*self))
    }
}

impl<T: ArgumentValue> ArgumentValue for [T] {
    fn to_argument(&self) -> Argument {
        Argument::List(self.iter().map(ArgumentValue::to_argument).collect())
    }
}

impl<T: ArgumentValue> ArgumentValue for Vec<T> {
    fn to_argument(&self) -> Argument {
        Argument::List(self.iter().map(ArgumentValue::to_argument).collect())
    }
}

impl ArgumentValue for Argument {
    fn to_argument(&self) -> Argument {
        self.clone()
    }
}

///
/// RecordRef
///
/// Opaque reference to a persisted record. The composer never looks inside
/// it; the engine resolves it when binding the placeholder.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RecordRef(Ulid);

impl RecordRef {
    #[must_use]
    pub const fn new(id: Ulid) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> Ulid {
        self.0
    }

    /// Parse the canonical ULID string form.
    pub fn parse(s: &str) -> Option<Self> {
        Ulid::from_string(s).ok().map(Self)
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for RecordRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid record ref: {s}")))
    }
}

///
/// TESTS
///
