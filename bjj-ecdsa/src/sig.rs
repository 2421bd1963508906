//!
//! Module containing the definition of the signature container
//!

use crate::{decode_der, decode_der_hex, encode_der, DecodeError};
use alloc::{boxed::Box, string::String, vec::Vec};
use num_bigint::BigUint;
use signature::SignatureEncoding;

/// Container of an ECDSA signature `(r, s)`.
///
/// Components are kept exactly as supplied or decoded. Whether they lie in
/// `[1, n-1]` is decided at verification time, not here.
#[derive(Clone, PartialEq, Eq, Hash)]
#[must_use]
pub struct Signature {
    /// Signature part r
    r: BigUint,

    /// Signature part s
    s: BigUint,
}

opaque_debug::implement!(Signature);

impl Signature {
    /// Create a new signature container from its components
    pub const fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// Decode a signature from its short-form DER representation
    pub fn from_der(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (r, s) = decode_der(bytes)?;
        Ok(Self::new(r, s))
    }

    /// Decode a signature from hex text holding its DER representation
    pub fn from_der_hex(hex: &str) -> Result<Self, DecodeError> {
        let (r, s) = decode_der_hex(hex)?;
        Ok(Self::new(r, s))
    }

    /// DER encoding of this signature.
    ///
    /// Only components below 2^487 give an encoding that
    /// [`Signature::from_der`] accepts again; see [`encode_der`].
    #[must_use]
    pub fn to_der(&self) -> Vec<u8> {
        encode_der(&self.r, &self.s)
    }

    /// Lowercase hex of the DER encoding
    #[must_use]
    pub fn to_der_hex(&self) -> String {
        hex::encode(self.to_der())
    }

    /// Signature part r
    #[must_use]
    pub const fn r(&self) -> &BigUint {
        &self.r
    }

    /// Signature part s
    #[must_use]
    pub const fn s(&self) -> &BigUint {
        &self.s
    }

    /// Split into `(r, s)`
    #[must_use]
    pub fn into_parts(self) -> (BigUint, BigUint) {
        (self.r, self.s)
    }

    /// Is `s` in the lower half of `[1, n-1]`?
    #[must_use]
    pub fn is_low_s(&self, n: &BigUint) -> bool {
        self.s <= (n >> 1u32)
    }

    /// Replace a high `s` by `n - s`, which keeps the signature valid.
    ///
    /// Signatures whose `s` is already low, or is not below `n`, are returned
    /// unchanged.
    pub fn normalize_s(&self, n: &BigUint) -> Self {
        if self.is_low_s(n) || &self.s >= n {
            return self.clone();
        }

        Self::new(self.r.clone(), n - &self.s)
    }
}

impl From<(BigUint, BigUint)> for Signature {
    fn from((r, s): (BigUint, BigUint)) -> Self {
        Self::new(r, s)
    }
}

impl From<Signature> for Box<[u8]> {
    fn from(sig: Signature) -> Box<[u8]> {
        sig.to_der().into_boxed_slice()
    }
}

impl SignatureEncoding for Signature {
    type Repr = Box<[u8]>;

    fn to_bytes(&self) -> Box<[u8]> {
        self.to_der().into_boxed_slice()
    }

    fn to_vec(&self) -> Vec<u8> {
        self.to_der()
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = signature::Error;

    fn try_from(bytes: &[u8]) -> signature::Result<Self> {
        Self::from_der(bytes).map_err(|_| signature::Error::new())
    }
}
