//!
//! Module containing the definition of the curve parameters container
//!

use crate::{AffinePoint, DomainError, PrimeField};
use hex_literal::hex;
use num_bigint::BigUint;
use num_traits::Zero;

/// Scalar field modulus of BN254 (a.k.a. alt_bn128), as defined by [EIP-197].
///
/// The Baby Jubjub curve is defined over this field.
///
/// [EIP-197]: https://eips.ethereum.org/EIPS/eip-197#definition-of-the-groups
pub const BN254_SCALAR_MODULUS: [u8; 32] =
    hex!("30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001");

/// Baby Jubjub in short Weierstrass form, obtained from the Montgomery form
/// `y² = x³ + 168698x² + x` via `a = (3 - A²) / 3`, `b = (2A³ - 9A) / 27`.
mod baby_jubjub {
    use hex_literal::hex;

    pub const A: [u8; 32] =
        hex!("10216f7ba065e00de81ac1e7808072c9b8114d6d7de87adb16a0a72f1a91f6a0");
    pub const B: [u8; 32] =
        hex!("23d885f647fed5743cad3d1ee4aba9c043b4ac0fc2766658a410efdeb21f706e");
    pub const GX: [u8; 32] =
        hex!("1fde0a3cac7cb46b36c79f4c0a7a732e38c2c7ee9ac41f44392a07b748a0869f");
    pub const GY: [u8; 32] =
        hex!("203a710160811d5c07ebaeb8fe1d9ce201c66b970d66f18d0d2b264c195309aa");
    pub const N: [u8; 32] =
        hex!("060c89ce5c263405370a08b6d0302b0bab3eedb83920ee0a677297dc392126f1");
}

/// The domain parameters of a short Weierstrass curve `y² = x³ + ax + b`
/// over `GF(p)`, together with a generator `G` of prime order `n`.
///
/// Constructed once and shared read-only (see [`alloc::sync::Arc`]) by every
/// key derived from it.
#[derive(Clone, PartialEq, Eq)]
#[must_use]
pub struct CurveParameters {
    /// Base field, modulus p
    base: PrimeField,

    /// Scalar field, modulus n
    scalar: PrimeField,

    /// Coefficient a
    a: BigUint,

    /// Coefficient b
    b: BigUint,

    /// Generator G
    generator: AffinePoint,
}

opaque_debug::implement!(CurveParameters);

impl CurveParameters {
    /// Construct and validate curve parameters.
    ///
    /// Fails with a [`DomainError`] when `p` is not an odd prime, the curve is
    /// singular, `G` does not lie on the curve, or `G` does not have prime
    /// order `n`. Since `n` is checked for primality, `n·G = O` pins the order
    /// of `G` to exactly `n`.
    pub fn new(
        p: BigUint,
        a: BigUint,
        b: BigUint,
        gx: BigUint,
        gy: BigUint,
        n: BigUint,
    ) -> crate::Result<Self> {
        let base = PrimeField::new(p)?;
        let scalar = PrimeField::new(n).map_err(|_| DomainError::GeneratorOrder)?;

        if !base.contains(&a) || !base.contains(&b) {
            return Err(DomainError::InvalidParameters.into());
        }

        // 4a³ + 27b² must not vanish
        let a3 = base.mul(&base.square(&a), &a);
        let discriminant = base.add(
            &base.mul(&BigUint::from(4u8), &a3),
            &base.mul(&BigUint::from(27u8), &base.square(&b)),
        );
        if discriminant.is_zero() {
            return Err(DomainError::InvalidParameters.into());
        }

        let params = Self {
            base,
            scalar,
            a,
            b,
            generator: AffinePoint::new(gx, gy),
        };

        params.validate_point(&params.generator)?;
        if params.generator.is_identity() {
            return Err(DomainError::Identity.into());
        }
        if !params.mul(params.n(), &params.generator)?.is_identity() {
            return Err(DomainError::GeneratorOrder.into());
        }

        Ok(params)
    }

    /// Baby Jubjub in short Weierstrass form, over the BN254 scalar field.
    ///
    /// `n` is the order of the prime subgroup; the full group has cofactor 8.
    pub fn baby_jubjub() -> Self {
        let be = BigUint::from_bytes_be;
        Self::new(
            be(&BN254_SCALAR_MODULUS),
            be(&baby_jubjub::A),
            be(&baby_jubjub::B),
            be(&baby_jubjub::GX),
            be(&baby_jubjub::GY),
            be(&baby_jubjub::N),
        )
        .expect("[bug] Baby Jubjub parameters are valid")
    }

    /// Base field modulus p
    #[must_use]
    pub const fn p(&self) -> &BigUint {
        self.base.modulus()
    }

    /// Coefficient a
    #[must_use]
    pub const fn a(&self) -> &BigUint {
        &self.a
    }

    /// Coefficient b
    #[must_use]
    pub const fn b(&self) -> &BigUint {
        &self.b
    }

    /// Order n of the generator
    #[must_use]
    pub const fn n(&self) -> &BigUint {
        self.scalar.modulus()
    }

    /// Generator G
    pub const fn generator(&self) -> &AffinePoint {
        &self.generator
    }

    /// Arithmetic modulo p
    pub const fn base_field(&self) -> &PrimeField {
        &self.base
    }

    /// Arithmetic modulo n
    pub const fn scalar_field(&self) -> &PrimeField {
        &self.scalar
    }

    /// Does p equal the BN254 scalar field modulus?
    ///
    /// Informational only: any valid parameter set is accepted.
    #[must_use]
    pub fn is_bn254_scalar_field(&self) -> bool {
        *self.p() == BigUint::from_bytes_be(&BN254_SCALAR_MODULUS)
    }

    /// Right-hand side of the curve equation, `x³ + ax + b`
    pub(crate) fn rhs(&self, x: &BigUint) -> BigUint {
        let f = &self.base;
        let x3 = f.mul(&f.square(x), x);
        f.add(&f.add(&x3, &f.mul(&self.a, x)), &self.b)
    }

    /// Does `point` satisfy `y² ≡ x³ + ax + b (mod p)` with canonical coordinates?
    ///
    /// The identity is considered on the curve.
    #[must_use]
    pub fn is_on_curve(&self, point: &AffinePoint) -> bool {
        match point {
            AffinePoint::Identity => true,
            AffinePoint::Finite { x, y } => {
                self.base.contains(x)
                    && self.base.contains(y)
                    && self.base.square(y) == self.rhs(x)
            }
        }
    }

    /// Reject points that are not on the curve
    pub fn validate_point(&self, point: &AffinePoint) -> crate::Result<()> {
        if self.is_on_curve(point) {
            Ok(())
        } else {
            debug!("rejected point not on the curve");
            Err(DomainError::NotOnCurve.into())
        }
    }
}

/// Build and validate a curve from its raw parameters.
///
/// See [`CurveParameters::new`].
pub fn make_curve(
    p: BigUint,
    a: BigUint,
    b: BigUint,
    gx: BigUint,
    gy: BigUint,
    n: BigUint,
) -> crate::Result<CurveParameters> {
    CurveParameters::new(p, a, b, gx, gy, n)
}
