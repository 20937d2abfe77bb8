//! Error types for the rotary driver.

use core::fmt;

/// Errors detected while validating a [`RotaryConfig`](crate::RotaryConfig).
///
/// Configuration is checked once at startup; the interrupt-side code has
/// no failure modes of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The position modulo must be at least 1.
    ZeroModulo,

    /// A zero debounce window would mean the settle evaluation never runs.
    ZeroDebounceTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::ZeroModulo => write!(f, "position modulo must be non-zero"),
            ConfigError::ZeroDebounceTimeout => {
                write!(f, "debounce timeout must be non-zero")
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ConfigError::ZeroModulo => defmt::write!(f, "position modulo must be non-zero"),
            ConfigError::ZeroDebounceTimeout => {
                defmt::write!(f, "debounce timeout must be non-zero")
            }
        }
    }
}
