//!
//! Module containing the definition of the private key container
//!

use crate::{
    digest_to_scalar,
    generate::{secret_scalar, NonceGenerator},
    hazmat::{self, in_scalar_range},
    CurveParameters, DigestProvider, DomainError, Error, Signature, VerifyingKey,
};
use alloc::{sync::Arc, vec, vec::Vec};
use digest::Digest;
use num_bigint::BigUint;
use signature::{
    hazmat::PrehashSigner, rand_core::CryptoRngCore, DigestSigner, Keypair,
    RandomizedDigestSigner, Signer,
};
use zeroize::Zeroizing;

/// ECDSA private key.
///
/// The [`(try_)sign_digest`](::signature::DigestSigner) API produces
/// deterministic signatures as described in RFC 6979, while
/// [`(try_)sign_digest_with_rng`](::signature::RandomizedDigestSigner) mixes
/// fresh entropy into the same nonce derivation.
#[derive(Clone)]
#[must_use]
pub struct SigningKey {
    /// Public key
    verifying_key: VerifyingKey,

    /// Secret scalar d, big-endian and padded to the byte length of n
    d: Zeroizing<Vec<u8>>,

    /// Normalize every produced signature to low-S form
    low_s: bool,
}

opaque_debug::implement!(SigningKey);

impl SigningKey {
    /// Construct a private key from its secret scalar `d ∈ [1, n-1]`
    pub fn from_scalar(curve: Arc<CurveParameters>, d: &BigUint) -> crate::Result<Self> {
        if !in_scalar_range(d, curve.n()) {
            return Err(DomainError::ScalarOutOfRange.into());
        }

        let q = hazmat::derive_public_key(&curve, d)?;
        let d = Zeroizing::new(curve.scalar_field().to_be_bytes(d));
        let verifying_key = VerifyingKey::from_affine(curve, q)?;

        Ok(Self {
            verifying_key,
            d,
            low_s: false,
        })
    }

    /// Construct a private key from the big-endian bytes of its secret scalar
    pub fn from_bytes(curve: Arc<CurveParameters>, bytes: &[u8]) -> crate::Result<Self> {
        Self::from_scalar(curve, &BigUint::from_bytes_be(bytes))
    }

    /// Generate a new keypair
    pub fn generate(curve: Arc<CurveParameters>, rng: &mut impl CryptoRngCore) -> Self {
        let d = secret_scalar(rng, curve.n());
        Self::from_scalar(curve, &d).expect("[bug] newly generated key considered invalid")
    }

    /// Whether to normalize produced signatures to low-S form
    pub fn with_low_s(mut self, low_s: bool) -> Self {
        self.low_s = low_s;
        self
    }

    /// ECDSA public key
    pub const fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Secret scalar, big-endian and padded to the byte length of n
    ///
    /// The bytes are wiped when the returned buffer is dropped; zeroize any
    /// further copies yourself.
    #[must_use]
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        self.d.clone()
    }

    fn curve(&self) -> &Arc<CurveParameters> {
        self.verifying_key.curve()
    }

    /// Sign the digest representative `e`, deriving the nonce from RFC 6979
    /// with `additional_data` mixed in
    pub fn sign_scalar(&self, e: &BigUint, additional_data: &[u8]) -> crate::Result<Signature> {
        let curve = self.curve();
        let n = curve.n();
        let d = BigUint::from_bytes_be(&self.d);
        let mut nonces = NonceGenerator::new(curve.scalar_field(), &self.d, e, additional_data);

        loop {
            let k = nonces.next_nonce(n);
            match hazmat::sign_prehashed(curve, &d, &k, e) {
                Ok((signature, _)) if self.low_s => return Ok(signature.normalize_s(n)),
                Ok((signature, _)) => return Ok(signature),
                Err(Error::Domain(DomainError::DegenerateNonce)) => continue,
                Err(err) => return Err(err),
            }
        }
    }

    /// Sign a message digest
    pub fn sign_prehashed(&self, prehash: &[u8]) -> crate::Result<Signature> {
        self.sign_scalar(&digest_to_scalar(prehash, self.curve().n()), &[])
    }

    /// Sign `msg`, hashed by `provider`
    pub fn sign_with<P>(&self, provider: &P, msg: &[u8]) -> crate::Result<Signature>
    where
        P: DigestProvider + ?Sized,
    {
        self.sign_prehashed(&provider.digest(msg))
    }
}

impl Keypair for SigningKey {
    type VerifyingKey = VerifyingKey;

    fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key.clone()
    }
}

impl Signer<Signature> for SigningKey {
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
        self.try_sign_digest(sha2::Sha256::new_with_prefix(msg))
    }
}

impl PrehashSigner<Signature> for SigningKey {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
        Ok(self.sign_prehashed(prehash)?)
    }
}

impl<D> DigestSigner<D, Signature> for SigningKey
where
    D: Digest,
{
    fn try_sign_digest(&self, digest: D) -> signature::Result<Signature> {
        self.sign_prehash(&digest.finalize())
    }
}

impl<D> RandomizedDigestSigner<D, Signature> for SigningKey
where
    D: Digest,
{
    fn try_sign_digest_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        digest: D,
    ) -> signature::Result<Signature> {
        let mut entropy = Zeroizing::new(vec![0u8; self.d.len()]);
        rng.fill_bytes(&mut entropy);

        let e = digest_to_scalar(&digest.finalize(), self.curve().n());
        Ok(self.sign_scalar(&e, &entropy)?)
    }
}

#[cfg(test)]
mod tests {
    use super::SigningKey;
    use crate::{CurveParameters, DomainError, Error};
    use alloc::{format, sync::Arc};
    use num_bigint::BigUint;

    #[test]
    fn debug_output_hides_secret() {
        let curve = Arc::new(CurveParameters::baby_jubjub());
        let key = SigningKey::from_scalar(curve.clone(), &BigUint::from(0x1234_5678u32)).unwrap();

        assert_eq!(format!("{key:?}"), "SigningKey { ... }");
        assert_eq!(format!("{curve:?}"), "CurveParameters { ... }");
        assert_eq!(format!("{:?}", curve.scalar_field()), "PrimeField { ... }");
    }

    #[test]
    fn rejects_out_of_range_scalars() {
        let curve = Arc::new(CurveParameters::baby_jubjub());
        let err = Err(Error::Domain(DomainError::ScalarOutOfRange));
        assert_eq!(
            SigningKey::from_scalar(curve.clone(), &BigUint::from(0u8)).map(|_| ()),
            err
        );
        let n = curve.n().clone();
        assert_eq!(SigningKey::from_scalar(curve, &n).map(|_| ()), err);
    }

    #[test]
    fn secret_is_padded() {
        let curve = Arc::new(CurveParameters::baby_jubjub());
        let key = SigningKey::from_scalar(curve, &BigUint::from(1u8)).unwrap();
        let bytes = key.to_bytes();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[31], 1);
    }

    #[test]
    fn deterministic_nonces() {
        let curve = Arc::new(CurveParameters::baby_jubjub());
        let key = SigningKey::from_scalar(curve, &BigUint::from(0x1234_5678u32)).unwrap();
        let prehash = [0xabu8; 32];

        let first = key.sign_prehashed(&prehash).unwrap();
        assert_eq!(key.sign_prehashed(&prehash).unwrap(), first);
        assert_ne!(key.sign_prehashed(&[0xcd; 32]).unwrap(), first);
        assert!(key.verifying_key().verify_prehashed(&prehash, &first));
    }

    #[test]
    fn low_s() {
        let curve = Arc::new(CurveParameters::baby_jubjub());
        let n = curve.n().clone();
        let key = SigningKey::from_scalar(curve, &BigUint::from(77u8))
            .unwrap()
            .with_low_s(true);

        for byte in 0u8..8 {
            let prehash = [byte; 32];
            let sig = key.sign_prehashed(&prehash).unwrap();
            assert!(sig.is_low_s(&n));
            assert!(key.verifying_key().verify_prehashed(&prehash, &sig));
        }
    }
}
