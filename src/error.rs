//! Error types for ember.
//!
//! Only configuration can fail. Everything that runs inside a tick degrades
//! silently instead of returning an error, so these types show up exclusively
//! in constructors that validate their input.

use std::fmt;

/// Errors that can occur while configuring emitters and their distributions.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A discrete color palette was given no colors to pick from.
    EmptyPalette,
    /// A combiner weight was not a finite number.
    InvalidWeight(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPalette => write!(
                f,
                "Color palette is empty. Provide at least one color to sample from."
            ),
            ConfigError::InvalidWeight(w) => {
                write!(f, "Combiner weight must be a finite number, got {}", w)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
