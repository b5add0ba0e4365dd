use thiserror::Error as ThisError;

///
/// ComposeError
///
/// Construction-time failures. Compilation itself never fails: a composer
/// with nothing to say compiles to the empty, match-everything filter.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum ComposeError {
    #[error("argument for `{operator}` has the wrong shape: {reason}")]
    InvalidArgumentShape {
        operator: &'static str,
        reason: String,
    },

    /// Defensive only; target resolution is total over the closed variant
    /// set, so this is unreachable today.
    #[error("attribute target `{target}` could not be resolved")]
    UnresolvableAttributeTarget { target: String },
}
