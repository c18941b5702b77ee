//! Error types for the counter simulator.
//!
//! The error surface is deliberately small: every engine and advisor
//! operation is total over its declared domain, and the only rejectable
//! input is an out-of-range modulus. Rejection leaves all state unchanged,
//! so the worst-case outcome of any input is "no state change". The
//! `thiserror` crate is used for ergonomic error definitions.

use thiserror::Error;

/// Errors surfaced by the counter engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CounterError {
    /// A modulus outside `1..=u32::MAX` was requested. The configured
    /// modulus is left untouched.
    #[error("Invalid modulus {requested}: Mod-N counting requires N >= 1")]
    InvalidModulus { requested: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_modulus_message_names_the_request() {
        let err = CounterError::InvalidModulus { requested: -3 };
        assert!(err.to_string().contains("-3"));
        assert!(err.to_string().contains("N >= 1"));
    }
}
