//! Lookup outcomes, including the two non-converter sentinels.

use std::fmt;
use std::sync::Arc;

use crate::GenericConverter;

/// Result of resolving a `(source, target)` descriptor pair.
#[derive(Clone)]
pub(crate) enum Lookup {
    /// A registered converter accepted the pair.
    Converter(Arc<dyn GenericConverter>),

    /// No converter applies, but the source is assignable to the target:
    /// the value passes through unchanged.
    Identity,

    /// Nothing applies. Cached like any other outcome.
    NoMatch,
}

impl Lookup {
    #[inline]
    pub(crate) fn is_match(&self) -> bool {
        !matches!(self, Lookup::NoMatch)
    }

    #[inline]
    pub(crate) fn is_identity(&self) -> bool {
        matches!(self, Lookup::Identity)
    }
}

impl fmt::Debug for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Converter(converter) => write!(f, "Converter({})", converter.name()),
            Lookup::Identity => f.write_str("Identity"),
            Lookup::NoMatch => f.write_str("NoMatch"),
        }
    }
}
