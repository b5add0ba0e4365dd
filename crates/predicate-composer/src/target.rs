use serde::{Deserialize, Serialize};

///
/// Target
///
/// What a leaf condition filters on. Only `RelationshipAttribute` crosses a
/// to-many relationship, so it is the only variant whose resolution is
/// quantified: comparisons against it must be existentially qualified when
/// lowered.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum Target {
    /// A scalar attribute of the record.
    Attribute(String),
    /// The record itself; resolves to the `self` path.
    Entity,
    /// A to-one relationship, compared as a whole.
    Relationship(String),
    /// An attribute reached through a to-many relationship.
    RelationshipAttribute(String, String),
}

impl Target {
    #[must_use]
    pub fn attribute(name: impl Into<String>) -> Self {
        Self::Attribute(name.into())
    }

    #[must_use]
    pub const fn entity() -> Self {
        Self::Entity
    }

    #[must_use]
    pub fn relationship(name: impl Into<String>) -> Self {
        Self::Relationship(name.into())
    }

    #[must_use]
    pub fn relationship_attribute(
        relationship: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self::RelationshipAttribute(relationship.into(), attribute.into())
    }

    /// Resolve to the attribute path referenced in compiled clause text.
    /// Total over the variant set; there is no failure case.
    #[must_use]
    pub fn resolve(&self) -> ResolvedTarget {
        match self {
            Self::Entity => ResolvedTarget {
                path: "self".to_string(),
                quantified: false,
            },
            Self::Attribute(name) | Self::Relationship(name) => ResolvedTarget {
                path: name.clone(),
                quantified: false,
            },
            Self::RelationshipAttribute(relationship, attribute) => ResolvedTarget {
                path: format!("{relationship}.{attribute}"),
                quantified: true,
            },
        }
    }
}

///
/// ResolvedTarget
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedTarget {
    pub path: String,
    pub quantified: bool,
}

///
/// TESTS
///
