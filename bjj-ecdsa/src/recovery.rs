//! Public key recovery support.

use crate::{
    digest_to_scalar, hazmat::in_scalar_range, CurveParameters, DomainError, Result, Signature,
    VerifyingKey,
};
use alloc::{sync::Arc, vec::Vec};
use num_bigint::BigUint;

/// Recovery IDs, a.k.a. "recid".
///
/// Selects which public key to recover from a signature. It consists of:
///
/// - `y_odd`: was the affine y-coordinate of 𝑘×𝑮 odd? This part of the
///   algorithm functions similar to point decompression.
/// - `x_multiple`: how many multiples of n were folded into `r` when reducing
///   the affine x-coordinate of 𝑘×𝑮, i.e. `x = r + x_multiple·n`. On curves
///   with a cofactor this can exceed one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct RecoveryId {
    x_multiple: u8,
    y_odd: bool,
}

impl RecoveryId {
    /// Create a new [`RecoveryId`]
    pub const fn new(is_y_odd: bool, x_multiple: u8) -> Self {
        Self {
            x_multiple,
            y_odd: is_y_odd,
        }
    }

    /// Is the affine y-coordinate of 𝑘×𝑮 odd?
    pub const fn is_y_odd(self) -> bool {
        self.y_odd
    }

    /// Multiple of n separating the affine x-coordinate of 𝑘×𝑮 from `r`
    pub const fn x_multiple(self) -> u8 {
        self.x_multiple
    }

    /// Every recovery ID that can apply to `r` on `curve`, i.e. all
    /// `x_multiple` with `r + x_multiple·n < p`, each with both parities.
    ///
    /// `x_multiple` is a `u8`, so at most 256 multiples are listed. Curves
    /// with `p > 256·n` (cofactor above roughly 256) lose the larger ones, and
    /// keys behind them cannot be recovered.
    pub fn candidates(curve: &CurveParameters, r: &BigUint) -> Vec<Self> {
        let mut ids = Vec::new();
        let mut x = r.clone();

        for x_multiple in 0..=u8::MAX {
            if &x >= curve.p() {
                break;
            }
            ids.push(Self::new(false, x_multiple));
            ids.push(Self::new(true, x_multiple));
            x += curve.n();
        }

        ids
    }

    /// Given a public key, digest representative and signature, use trial
    /// recovery to determine if a suitable recovery ID exists, or return an
    /// error otherwise.
    pub fn trial_recovery(
        verifying_key: &VerifyingKey,
        e: &BigUint,
        signature: &Signature,
    ) -> Result<Self> {
        let curve = verifying_key.curve();

        Self::candidates(curve, signature.r())
            .into_iter()
            .find(|&id| {
                VerifyingKey::recover(curve.clone(), e, signature, id).as_ref()
                    == Ok(verifying_key)
            })
            .ok_or_else(|| DomainError::RecoveryFailed.into())
    }
}

impl VerifyingKey {
    /// Recover the public key selected by `recovery_id` from a signature over
    /// the digest representative `e`: `Q = r⁻¹(s·R − e·G)`.
    ///
    /// The recovered key is checked to verify the signature.
    pub fn recover(
        curve: Arc<CurveParameters>,
        e: &BigUint,
        signature: &Signature,
        recovery_id: RecoveryId,
    ) -> Result<Self> {
        let (r, s) = (signature.r(), signature.s());
        let n = curve.n();
        if !in_scalar_range(r, n) || !in_scalar_range(s, n) {
            return Err(DomainError::RecoveryFailed.into());
        }

        let x = r + n * BigUint::from(recovery_id.x_multiple());
        let big_r = curve
            .lift_x(&x, recovery_id.is_y_odd())
            .ok_or(DomainError::RecoveryFailed)?;

        // R = k·G lies in the subgroup generated by G
        if !curve.mul(n, &big_r)?.is_identity() {
            return Err(DomainError::RecoveryFailed.into());
        }

        let scalars = curve.scalar_field();
        let r_inv = scalars.invert(r)?;
        let u1 = scalars.neg(&scalars.mul(e, &r_inv));
        let u2 = scalars.mul(s, &r_inv);
        let q = curve.lincomb(&u1, curve.generator(), &u2, &big_r)?;

        let verifying_key =
            Self::from_affine(curve, q).map_err(|_| DomainError::RecoveryFailed)?;

        if verifying_key.verify_scalar(e, signature) {
            Ok(verifying_key)
        } else {
            Err(DomainError::RecoveryFailed.into())
        }
    }

    /// Recover a public key from a signature over a message digest
    pub fn recover_from_prehash(
        curve: Arc<CurveParameters>,
        prehash: &[u8],
        signature: &Signature,
        recovery_id: RecoveryId,
    ) -> Result<Self> {
        let e = digest_to_scalar(prehash, curve.n());
        Self::recover(curve, &e, signature, recovery_id)
    }
}

/// Every distinct public key for which `signature` is valid over `e`, one
/// per applicable [`RecoveryId`].
///
/// Empty when `r` or `s` lies outside `[1, n-1]`. Subject to the same 256
/// multiple limit as [`RecoveryId::candidates`].
pub fn recover_candidates(
    curve: &Arc<CurveParameters>,
    e: &BigUint,
    signature: &Signature,
) -> Vec<VerifyingKey> {
    let mut keys: Vec<VerifyingKey> = Vec::new();

    for id in RecoveryId::candidates(curve, signature.r()) {
        if let Ok(key) = VerifyingKey::recover(curve.clone(), e, signature, id) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }

    keys
}

/// Index of the first of `keys` among the keys recoverable from `signature`.
///
/// All keys are expected to share one curve; the first key's curve is used
/// for recovery.
pub fn find_signer(keys: &[VerifyingKey], e: &BigUint, signature: &Signature) -> Result<usize> {
    let curve = keys.first().ok_or(DomainError::RecoveryFailed)?.curve();
    let candidates = recover_candidates(curve, e, signature);

    keys.iter()
        .position(|key| candidates.contains(key))
        .ok_or_else(|| DomainError::RecoveryFailed.into())
}

#[cfg(test)]
mod tests {
    use super::{find_signer, recover_candidates, RecoveryId};
    use crate::{hazmat, CurveParameters, DomainError, Error, Signature, SigningKey, VerifyingKey};
    use alloc::{sync::Arc, vec::Vec};
    use num_bigint::BigUint;

    fn keys(curve: &Arc<CurveParameters>) -> Vec<SigningKey> {
        [3u32, 0xdead_beef, 0x0bad_cafe]
            .iter()
            .map(|&d| SigningKey::from_scalar(curve.clone(), &BigUint::from(d)).unwrap())
            .collect()
    }

    #[test]
    fn candidate_ids_cover_cofactor_multiples() {
        // p ≈ 8n for Baby Jubjub
        let curve = CurveParameters::baby_jubjub();
        let ids = RecoveryId::candidates(&curve, &BigUint::from(1u8));
        assert_eq!(ids.len(), 16);
        assert_eq!(ids[0], RecoveryId::new(false, 0));
        assert_eq!(ids[15], RecoveryId::new(true, 7));
    }

    #[test]
    fn candidate_ids_stop_at_u8_multiples() {
        // y² = x³ + 3x + 8 over GF(1009), G = (24, 499) of order 3: p ≈ 336n
        let v = |n: u32| BigUint::from(n);
        let curve = crate::make_curve(v(1009), v(3), v(8), v(24), v(499), v(3)).unwrap();
        let ids = RecoveryId::candidates(&curve, &BigUint::from(1u8));
        assert_eq!(ids.len(), 512);
        assert_eq!(ids[511], RecoveryId::new(true, u8::MAX));
    }

    #[test]
    fn recovered_candidates_contain_signer() {
        let curve = Arc::new(CurveParameters::baby_jubjub());
        let e = BigUint::from(0xabad_babe_u64);

        for key in keys(&curve) {
            let sig = key.sign_scalar(&e, &[]).unwrap();
            let candidates = recover_candidates(&curve, &e, &sig);
            assert!(candidates.contains(key.verifying_key()));

            let id = RecoveryId::trial_recovery(key.verifying_key(), &e, &sig).unwrap();
            assert_eq!(
                VerifyingKey::recover(curve.clone(), &e, &sig, id).unwrap(),
                *key.verifying_key()
            );
        }
    }

    #[test]
    fn signing_recovery_id_selects_signer() {
        let curve = Arc::new(CurveParameters::baby_jubjub());
        let d = BigUint::from(0x1234_5678u32);
        let k = BigUint::from(0x8765_4321u32);
        let e = BigUint::from(42u8);
        let key = SigningKey::from_scalar(curve.clone(), &d).unwrap();

        let (sig, id) = hazmat::sign_prehashed(&curve, &d, &k, &e).unwrap();
        let recovered = VerifyingKey::recover(curve, &e, &sig, id.unwrap()).unwrap();
        assert_eq!(recovered, *key.verifying_key());
    }

    #[test]
    fn find_signer_index() {
        let curve = Arc::new(CurveParameters::baby_jubjub());
        let signers = keys(&curve);
        let public: Vec<VerifyingKey> = signers.iter().map(|k| k.verifying_key().clone()).collect();
        let e = BigUint::from(7u8);

        for (i, key) in signers.iter().enumerate() {
            let sig = key.sign_scalar(&e, &[]).unwrap();
            assert_eq!(find_signer(&public, &e, &sig), Ok(i));
        }

        let stranger = SigningKey::from_scalar(curve, &BigUint::from(99u8)).unwrap();
        let sig = stranger.sign_scalar(&e, &[]).unwrap();
        assert_eq!(
            find_signer(&public, &e, &sig),
            Err(Error::Domain(DomainError::RecoveryFailed))
        );
        assert_eq!(
            find_signer(&[], &e, &sig),
            Err(Error::Domain(DomainError::RecoveryFailed))
        );
    }

    #[test]
    fn out_of_range_signature_recovers_nothing() {
        let curve = Arc::new(CurveParameters::baby_jubjub());
        let sig = Signature::new(curve.n().clone(), BigUint::from(1u8));
        assert!(recover_candidates(&curve, &BigUint::from(1u8), &sig).is_empty());
    }
}
