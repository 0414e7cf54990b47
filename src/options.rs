//! Conversion options

use crate::value::key_eq;

/// Configuration for a conversion.
///
/// All fields default to "off". Any combination is legal input to the
/// engine, and the engine never mutates the value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    /// Also store each attribute under an `@`-prefixed key alias
    pub attr_prefix: bool,
    /// Do not merge attributes into the element's container at all
    pub no_attr: bool,
    /// Policy for wrapping element values in sequences
    pub force_array: ForceArray,
}

/// Sequence-wrapping policy for element values.
///
/// Whatever the policy, more than one same-named sibling always folds into
/// a sequence; attribute values are never wrapped.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ForceArray {
    /// Wrap only when more than one same-named sibling occurs
    #[default]
    Off,
    /// Wrap every element value, singletons included
    All,
    /// Wrap only elements whose tag is in the list
    Tags(Vec<String>),
}

impl ForceArray {
    /// Build the named-subset variant from any list of tag names.
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Tags(tags.into_iter().map(Into::into).collect())
    }

    /// Whether elements tagged `tag` are forced into sequence form.
    /// Tag matching is case-insensitive, like container keys.
    pub fn forces(&self, tag: &str) -> bool {
        match self {
            Self::Off => false,
            Self::All => true,
            Self::Tags(tags) => tags.iter().any(|name| key_eq(name, tag)),
        }
    }
}
