use thiserror::Error;

/// Configuration problems detected before any block computation starts.
///
/// None of these can occur once the driver loop is running: unknown names,
/// bad dimensions and out-of-range kernel shapes are all rejected up front,
/// and per-block decisions (mix policies, kernel application) are infallible.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),

    #[error("unknown mix policy '{0}'")]
    UnknownPolicy(String),

    #[error("bad parameter for mix policy '{policy}': {reason}")]
    BadPolicyParam { policy: String, reason: String },

    #[error("N={n} must be a multiple of 8 and BS={bs} a positive divisor of N")]
    BadShape { n: usize, bs: usize },

    #[error("{kernel} kernel shape out of range: {reason}")]
    BadKernelShape { kernel: &'static str, reason: String },
}
