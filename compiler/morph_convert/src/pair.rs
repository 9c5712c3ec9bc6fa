//! Registry index keys.

use std::fmt;

use morph_types::RawType;

/// A `(source, target)` raw-type pair a converter declares it serves.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ConvertiblePair {
    source: RawType,
    target: RawType,
}

impl ConvertiblePair {
    pub fn new(source: RawType, target: RawType) -> Self {
        ConvertiblePair { source, target }
    }

    #[inline]
    pub fn source(&self) -> &RawType {
        &self.source
    }

    #[inline]
    pub fn target(&self) -> &RawType {
        &self.target
    }
}

impl fmt::Display for ConvertiblePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

impl fmt::Debug for ConvertiblePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
