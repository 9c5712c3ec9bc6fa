//! Conversion service configuration.

/// Settings for a [`ConversionService`](crate::ConversionService).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConversionConfig {
    /// Maximum number of cached lookups. When the cache is full it is
    /// cleared and refilled. `0` disables caching.
    pub cache_capacity: usize,

    /// Register the built-in converter set on construction.
    pub register_defaults: bool,
}

impl ConversionConfig {
    pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

    /// Every lookup walks the registry.
    pub fn uncached() -> Self {
        ConversionConfig {
            cache_capacity: 0,
            ..Self::default()
        }
    }

    /// Default settings with the built-in converters registered.
    pub fn with_defaults() -> Self {
        ConversionConfig {
            register_defaults: true,
            ..Self::default()
        }
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            cache_capacity: Self::DEFAULT_CACHE_CAPACITY,
            register_defaults: false,
        }
    }
}
