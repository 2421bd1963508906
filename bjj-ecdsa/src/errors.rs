//!
//! Error types
//!

use core::fmt;

/// Result type with the crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Arithmetic or parameter errors.
///
/// Always fatal to the operation that triggered them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DomainError {
    /// A supplied point does not satisfy the curve equation
    NotOnCurve,
    /// The point at infinity was supplied where a finite point is required
    Identity,
    /// The generator does not have the declared order
    GeneratorOrder,
    /// A modulus or curve parameter is unusable (zero, even, or out of range)
    InvalidParameters,
    /// The modular inverse of zero was requested
    ZeroInverse,
    /// A private scalar lies outside `[1, n-1]`
    ScalarOutOfRange,
    /// The nonce produced `r = 0` or `s = 0`; signing must retry with another
    DegenerateNonce,
    /// No candidate public key could be recovered, or none matched
    RecoveryFailed,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotOnCurve => write!(f, "bjj-ecdsa: point is not on the curve"),
            DomainError::Identity => write!(f, "bjj-ecdsa: unexpected point at infinity"),
            DomainError::GeneratorOrder => {
                write!(f, "bjj-ecdsa: generator order does not match n")
            }
            DomainError::InvalidParameters => write!(f, "bjj-ecdsa: invalid curve parameters"),
            DomainError::ZeroInverse => write!(f, "bjj-ecdsa: inverse of zero requested"),
            DomainError::ScalarOutOfRange => {
                write!(f, "bjj-ecdsa: private scalar outside [1, n-1]")
            }
            DomainError::DegenerateNonce => {
                write!(f, "bjj-ecdsa: nonce yields r = 0 or s = 0")
            }
            DomainError::RecoveryFailed => write!(f, "bjj-ecdsa: public key recovery failed"),
        }
    }
}

impl core::error::Error for DomainError {}

/// Malformed DER (or hex) signature input.
///
/// Decoding never yields a partial result.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// Input ended before the structure was complete
    Truncated,
    /// A tag byte other than the expected one was found
    UnexpectedTag {
        /// Tag required at this position
        expected: u8,
        /// Tag actually present
        found: u8,
    },
    /// A length byte uses the long form (high bit set)
    LongFormLength,
    /// The declared SEQUENCE length disagrees with the input or its contents
    LengthMismatch,
    /// An INTEGER has no content octets
    EmptyInteger,
    /// The hex text is not valid
    InvalidHex,
    /// A SEC1 point encoding has an unknown prefix or the wrong length
    InvalidSec1,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Truncated => write!(f, "der: truncated input"),
            DecodeError::UnexpectedTag { expected, found } => write!(
                f,
                "der: unexpected tag 0x{found:02x} (expected 0x{expected:02x})"
            ),
            DecodeError::LongFormLength => write!(f, "der: long-form lengths are unsupported"),
            DecodeError::LengthMismatch => write!(f, "der: length mismatch"),
            DecodeError::EmptyInteger => write!(f, "der: empty INTEGER"),
            DecodeError::InvalidHex => write!(f, "der: invalid hex encoding"),
            DecodeError::InvalidSec1 => write!(f, "sec1: malformed point encoding"),
        }
    }
}

impl core::error::Error for DecodeError {}

impl From<hex::FromHexError> for DecodeError {
    fn from(_: hex::FromHexError) -> Self {
        DecodeError::InvalidHex
    }
}

/// Error types
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Arithmetic or parameter error
    Domain(DomainError),
    /// Signature decoding error
    Decode(DecodeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Domain(err) => err.fmt(f),
            Error::Decode(err) => err.fmt(f),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Domain(err) => Some(err),
            Error::Decode(err) => Some(err),
        }
    }
}

impl From<DomainError> for Error {
    fn from(err: DomainError) -> Self {
        Error::Domain(err)
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::Decode(err)
    }
}

impl From<Error> for signature::Error {
    fn from(_: Error) -> Self {
        signature::Error::new()
    }
}
