use thiserror::Error;

/// Errors raised while solving a construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// A layer whose resistance terms are physically meaningless.
    ///
    /// Raised at resistance-computation time; a zero-thickness or
    /// zero-conductivity layer is a caller error, never silently absorbed.
    #[error("invalid layer '{name}': {quantity} must be positive, got {value}")]
    InvalidLayer {
        name: String,
        quantity: &'static str,
        value: f64,
    },

    /// Total thermal or vapour resistance sums to zero (e.g. an empty
    /// layer list), so the U-value and per-layer apportionment are undefined.
    #[error("construction '{name}' has zero total {domain} resistance")]
    SingularBoundary {
        name: String,
        domain: &'static str,
    },
}
