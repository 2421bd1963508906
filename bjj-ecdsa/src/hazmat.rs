//! Low-level ECDSA primitives.
//!
//! # ⚠️ Warning: Hazmat!
//!
//! YOU PROBABLY DON'T WANT TO USE THESE!
//!
//! These primitives are easy-to-misuse low-level interfaces operating on raw
//! integers. Prefer [`SigningKey`](crate::SigningKey) and
//! [`VerifyingKey`](crate::VerifyingKey) unless you are reproducing test
//! vectors.

use crate::{AffinePoint, CurveParameters, DomainError, RecoveryId, Result, Signature};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

/// Is `x` in `[1, n-1]`?
pub(crate) fn in_scalar_range(x: &BigUint, n: &BigUint) -> bool {
    !x.is_zero() && x < n
}

/// Compute the public key `Q = d·G`.
///
/// `d` must lie in `[1, n-1]`, otherwise [`DomainError::ScalarOutOfRange`].
pub fn derive_public_key(curve: &CurveParameters, d: &BigUint) -> Result<AffinePoint> {
    if !in_scalar_range(d, curve.n()) {
        return Err(DomainError::ScalarOutOfRange.into());
    }

    curve.mul_generator(d)
}

/// Verify the ECDSA signature `(r, s)` over the digest representative `e`
/// with public key `q`.
///
/// Returns `Ok(false)` for any signature that does not verify, including one
/// whose `r` or `s` lies outside `[1, n-1]` (never reduced before the check).
/// Fails only when `q` itself is unusable: off the curve or the identity.
pub fn verify(
    curve: &CurveParameters,
    q: &AffinePoint,
    e: &BigUint,
    r: &BigUint,
    s: &BigUint,
) -> Result<bool> {
    curve.validate_point(q)?;
    if q.is_identity() {
        return Err(DomainError::Identity.into());
    }

    let n = curve.n();
    if !in_scalar_range(r, n) || !in_scalar_range(s, n) {
        debug!("signature component outside [1, n-1]");
        return Ok(false);
    }

    let scalars = curve.scalar_field();
    let w = scalars.invert(s)?;
    let u1 = scalars.mul(e, &w);
    let u2 = scalars.mul(r, &w);

    let x = match curve.lincomb(&u1, curve.generator(), &u2, q)? {
        AffinePoint::Identity => {
            debug!("u1·G + u2·Q is the identity");
            return Ok(false);
        }
        AffinePoint::Finite { x, .. } => x,
    };

    let valid = scalars.reduce(&x) == *r;
    if !valid {
        debug!("signature mismatch");
    }
    Ok(valid)
}

/// Sign the digest representative `e` with secret scalar `d` and nonce `k`.
///
/// - `k`: ephemeral scalar in `[1, n-1]`. MUST BE SECRET AND NEVER REUSED!!!
///
/// Fails with [`DomainError::DegenerateNonce`] when `k` produces `r = 0` or
/// `s = 0`; the caller is expected to retry with a different `k`.
///
/// # Returns
///
/// ECDSA [`Signature`] and, when the multiple of `n` folded into `r` fits a
/// byte, a [`RecoveryId`] which selects the verifying key during recovery.
pub fn sign_prehashed(
    curve: &CurveParameters,
    d: &BigUint,
    k: &BigUint,
    e: &BigUint,
) -> Result<(Signature, Option<RecoveryId>)> {
    let n = curve.n();
    if !in_scalar_range(d, n) || !in_scalar_range(k, n) {
        return Err(DomainError::ScalarOutOfRange.into());
    }

    let (x, y) = match curve.mul_generator(k)? {
        AffinePoint::Identity => return Err(DomainError::DegenerateNonce.into()),
        AffinePoint::Finite { x, y } => (x, y),
    };

    let scalars = curve.scalar_field();
    let r = scalars.reduce(&x);
    if r.is_zero() {
        return Err(DomainError::DegenerateNonce.into());
    }

    // s = k⁻¹(e + r·d)
    let k_inv = scalars.invert(k)?;
    let s = scalars.mul(&k_inv, &scalars.add(e, &scalars.mul(&r, d)));
    if s.is_zero() {
        return Err(DomainError::DegenerateNonce.into());
    }

    let recovery_id = (&x / n)
        .to_u8()
        .map(|x_multiple| RecoveryId::new(y.bit(0), x_multiple));

    Ok((Signature::new(r, s), recovery_id))
}
