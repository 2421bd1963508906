//! Message digest providers and the digest-to-scalar mapping.

use alloc::vec::Vec;
use core::{fmt, marker::PhantomData};
use digest::Digest;
use num_bigint::BigUint;
use sha2::Sha256;

/// Source of the digest bytes fed into signing and verification.
///
/// Implementations must be deterministic: the same message always yields the
/// same output, of length [`DigestProvider::output_size`].
pub trait DigestProvider {
    /// Length in bytes of every digest this provider returns
    fn output_size(&self) -> usize;

    /// Digest `msg`
    fn digest(&self, msg: &[u8]) -> Vec<u8>;
}

/// Provider that ignores the message and returns a fixed byte string.
///
/// Intended for reproducing test vectors whose digest is given directly.
/// It offers no security whatsoever.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullDigest {
    output: Vec<u8>,
}

impl NullDigest {
    /// Provider always returning `output`
    pub fn new(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
        }
    }

    /// The 16-byte constant `abadbabe` repeated four times
    pub fn abadbabe() -> Self {
        Self::new(hex_literal::hex!("abadbabe abadbabe abadbabe abadbabe"))
    }

    /// The constant returned for every message
    pub fn output(&self) -> &[u8] {
        &self.output
    }
}

impl DigestProvider for NullDigest {
    fn output_size(&self) -> usize {
        self.output.len()
    }

    fn digest(&self, _msg: &[u8]) -> Vec<u8> {
        self.output.clone()
    }
}

/// Provider backed by a [`Digest`] implementation, SHA-256 by default.
pub struct Sha2Digest<D = Sha256> {
    digest: PhantomData<fn() -> D>,
}

impl<D> Sha2Digest<D> {
    /// Create a provider for `D`
    pub const fn new() -> Self {
        Self {
            digest: PhantomData,
        }
    }
}

impl<D> Clone for Sha2Digest<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for Sha2Digest<D> {}

impl<D> Default for Sha2Digest<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> fmt::Debug for Sha2Digest<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sha2Digest")
    }
}

impl<D: Digest> DigestProvider for Sha2Digest<D> {
    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn digest(&self, msg: &[u8]) -> Vec<u8> {
        D::digest(msg).to_vec()
    }
}

/// Interpret `digest` as a big-endian integer, keeping only its leftmost
/// `bitlen(n)` bits when it is longer than that.
///
/// The result is *not* reduced modulo `n` and may exceed it.
#[must_use]
pub fn digest_to_scalar(digest: &[u8], n: &BigUint) -> BigUint {
    let e = BigUint::from_bytes_be(digest);
    let digest_bits = digest.len() as u64 * 8;
    let order_bits = n.bits();

    if digest_bits > order_bits {
        e >> (digest_bits - order_bits)
    } else {
        e
    }
}

#[cfg(test)]
mod tests {
    use super::{digest_to_scalar, DigestProvider, NullDigest, Sha2Digest};
    use crate::CurveParameters;
    use hex_literal::hex;
    use num_bigint::BigUint;
    use num_traits::Zero;

    #[test]
    fn null_digest_ignores_message() {
        let provider = NullDigest::abadbabe();
        assert_eq!(provider.output_size(), 16);
        assert_eq!(provider.digest(b""), provider.digest(b"anything at all"));
        assert_eq!(
            provider.digest(b"x"),
            hex!("abadbabeabadbabeabadbabeabadbabe")
        );
    }

    #[test]
    fn sha256_provider() {
        let provider = Sha2Digest::<sha2::Sha256>::default();
        assert_eq!(provider.output_size(), 32);
        assert_eq!(
            provider.digest(b"abc"),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn sha512_provider() {
        let provider = Sha2Digest::<sha2::Sha512>::new();
        assert_eq!(provider.output_size(), 64);
        assert_eq!(provider.digest(b"abc").len(), 64);
    }

    #[test]
    fn digest_to_scalar_size_less() {
        let n = CurveParameters::baby_jubjub().n().clone();
        let e = digest_to_scalar(&hex!("abadbabeabadbabeabadbabeabadbabe"), &n);
        assert_eq!(e, BigUint::from(0xabadbabe_abadbabe_abadbabe_abadbabe_u128));
    }

    #[test]
    fn digest_to_scalar_size_greater() {
        // 256 digest bits against a 251-bit order: drop the 5 rightmost bits
        let n = CurveParameters::baby_jubjub().n().clone();
        let digest = [0xffu8; 32];
        let e = digest_to_scalar(&digest, &n);
        assert_eq!(e.bits(), 251);
        assert_eq!(e, (BigUint::from(1u8) << 251u32) - 1u8);
    }

    #[test]
    fn digest_to_scalar_is_not_reduced() {
        // n = 5 has 3 bits; 0xff keeps 0b111 = 7 > n
        let e = digest_to_scalar(&[0xff], &BigUint::from(5u8));
        assert_eq!(e, BigUint::from(7u8));
    }

    #[test]
    fn digest_to_scalar_empty() {
        assert!(digest_to_scalar(&[], &BigUint::from(5u8)).is_zero());
    }
}
