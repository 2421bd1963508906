//!
//! Module containing the definition of the public key container
//!

use crate::{
    digest_to_scalar, hazmat, AffinePoint, CurveParameters, DecodeError, DigestProvider,
    DomainError, Result, Signature,
};
use alloc::{sync::Arc, vec::Vec};
use digest::Digest;
use num_bigint::BigUint;
use signature::{hazmat::PrehashVerifier, DigestVerifier, Verifier};

/// SEC1 tag of an uncompressed point
const SEC1_UNCOMPRESSED: u8 = 0x04;

/// SEC1 tag of a compressed point with even y
const SEC1_COMPRESSED_EVEN: u8 = 0x02;

/// SEC1 tag of a compressed point with odd y
const SEC1_COMPRESSED_ODD: u8 = 0x03;

/// ECDSA public key.
///
/// Always a finite point on its curve: both properties are checked on
/// construction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct VerifyingKey {
    /// Curve the key lives on
    curve: Arc<CurveParameters>,

    /// x-coordinate of Q = d·G
    x: BigUint,

    /// y-coordinate of Q = d·G
    y: BigUint,
}

impl VerifyingKey {
    /// Construct a public key from a point, which must lie on the curve and
    /// not be the identity
    pub fn from_affine(curve: Arc<CurveParameters>, point: AffinePoint) -> Result<Self> {
        curve.validate_point(&point)?;
        match point {
            AffinePoint::Identity => Err(DomainError::Identity.into()),
            AffinePoint::Finite { x, y } => Ok(Self { curve, x, y }),
        }
    }

    /// Decode a SEC1 point, compressed (`02`/`03 ‖ x`) or uncompressed
    /// (`04 ‖ x ‖ y`), with coordinates padded to the byte length of p
    pub fn from_sec1_bytes(curve: Arc<CurveParameters>, bytes: &[u8]) -> Result<Self> {
        let len = curve.base_field().byte_len();
        let (&tag, body) = bytes.split_first().ok_or(DecodeError::InvalidSec1)?;

        let point = match tag {
            0x00 if body.is_empty() => return Err(DomainError::Identity.into()),
            SEC1_UNCOMPRESSED if body.len() == 2 * len => {
                let (x, y) = body.split_at(len);
                AffinePoint::new(BigUint::from_bytes_be(x), BigUint::from_bytes_be(y))
            }
            SEC1_COMPRESSED_EVEN | SEC1_COMPRESSED_ODD if body.len() == len => {
                let x = BigUint::from_bytes_be(body);
                curve
                    .lift_x(&x, tag == SEC1_COMPRESSED_ODD)
                    .ok_or(DomainError::NotOnCurve)?
            }
            _ => return Err(DecodeError::InvalidSec1.into()),
        };

        Self::from_affine(curve, point)
    }

    /// SEC1 encoding of this key, optionally compressed
    #[must_use]
    pub fn to_sec1_bytes(&self, compress: bool) -> Vec<u8> {
        let f = self.curve.base_field();
        let (x, y) = (&self.x, &self.y);

        let mut out = Vec::with_capacity(1 + 2 * f.byte_len());
        if compress {
            out.push(if f.is_odd(y) {
                SEC1_COMPRESSED_ODD
            } else {
                SEC1_COMPRESSED_EVEN
            });
            out.extend_from_slice(&f.to_be_bytes(x));
        } else {
            out.push(SEC1_UNCOMPRESSED);
            out.extend_from_slice(&f.to_be_bytes(x));
            out.extend_from_slice(&f.to_be_bytes(y));
        }
        out
    }

    /// Curve parameters
    pub fn curve(&self) -> &Arc<CurveParameters> {
        &self.curve
    }

    /// Public point Q
    pub fn to_affine(&self) -> AffinePoint {
        AffinePoint::new(self.x.clone(), self.y.clone())
    }

    /// Verify a signature over an already computed digest representative `e`
    #[must_use]
    pub fn verify_scalar(&self, e: &BigUint, signature: &Signature) -> bool {
        match hazmat::verify(&self.curve, &self.to_affine(), e, signature.r(), signature.s()) {
            Ok(valid) => valid,
            Err(_err) => {
                debug!(error = %_err, "verifying key unusable");
                false
            }
        }
    }

    /// Verify a signature over a message digest
    #[must_use]
    pub fn verify_prehashed(&self, prehash: &[u8], signature: &Signature) -> bool {
        self.verify_scalar(&digest_to_scalar(prehash, self.curve.n()), signature)
    }

    /// Verify a signature over `msg`, hashed by `provider`
    #[must_use]
    pub fn verify_with<P>(&self, provider: &P, msg: &[u8], signature: &Signature) -> bool
    where
        P: DigestProvider + ?Sized,
    {
        self.verify_prehashed(&provider.digest(msg), signature)
    }
}

impl From<&VerifyingKey> for AffinePoint {
    fn from(key: &VerifyingKey) -> AffinePoint {
        key.to_affine()
    }
}

impl Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        self.verify_digest(sha2::Sha256::new_with_prefix(msg), signature)
    }
}

impl PrehashVerifier<Signature> for VerifyingKey {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        if self.verify_prehashed(prehash, signature) {
            Ok(())
        } else {
            Err(signature::Error::new())
        }
    }
}

impl<D> DigestVerifier<D, Signature> for VerifyingKey
where
    D: Digest,
{
    fn verify_digest(&self, digest: D, signature: &Signature) -> signature::Result<()> {
        self.verify_prehash(&digest.finalize(), signature)
    }
}
