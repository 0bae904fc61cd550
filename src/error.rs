//! Tagged-variant error type shared by every layer of the codec.
use core::fmt;

/// Everything that can go wrong talking to this crate.
///
/// Construction errors ([`FecError::InvalidConfig`]) are only ever produced by
/// codec constructors. Per-call input errors ([`FecError::InputRange`],
/// [`FecError::BufferSize`]) are raised on method entry before any buffer is
/// touched. [`FecError::DecodeFailed`] is a defined decode outcome, not a bug;
/// on it the input buffer is left unmodified. [`FecError::DivisionByZero`] is
/// surfaced by the public field operations; the codec itself must never
/// trigger it internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FecError {
    /// Constructor arguments violate a structural constraint (e.g. a
    /// non-power-of-two NTT length, `ecc_len` out of range for the field).
    InvalidConfig(&'static str),
    /// A caller-supplied field element or index is outside the valid range.
    InputRange(&'static str),
    /// An encode/decode buffer does not match the codec's configured length.
    BufferSize { expected: usize, actual: usize },
    /// A field operation was attempted with a zero divisor.
    DivisionByZero,
    /// The locator polynomial had no solution at any tried error count, the
    /// number of located roots did not match the locator degree, or the
    /// magnitude system was singular.
    DecodeFailed,
}

impl fmt::Display for FecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FecError::InvalidConfig(why) => write!(f, "invalid codec configuration: {why}"),
            FecError::InputRange(why) => write!(f, "input out of range: {why}"),
            FecError::BufferSize { expected, actual } => {
                write!(f, "buffer size mismatch: expected {expected}, got {actual}")
            }
            FecError::DivisionByZero => write!(f, "division by zero"),
            FecError::DecodeFailed => write!(f, "decode failed: uncorrectable"),
        }
    }
}

pub type Result<T> = core::result::Result<T, FecError>;
