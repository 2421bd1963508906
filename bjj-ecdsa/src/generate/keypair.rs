//!
//! Generate a secret scalar
//!

use crate::{digest_to_scalar, hazmat::in_scalar_range};
use alloc::vec;
use num_bigint::BigUint;
use signature::rand_core::CryptoRngCore;
use zeroize::Zeroizing;

/// Draw a secret scalar uniformly from `[1, n-1]`.
///
/// Candidates of `bitlen(n)` random bits are rejected until one falls in
/// range, which happens with probability at least one half per draw.
pub fn secret_scalar(rng: &mut impl CryptoRngCore, n: &BigUint) -> BigUint {
    let mut buffer = Zeroizing::new(vec![0u8; n.bits().div_ceil(8) as usize]);

    loop {
        rng.fill_bytes(&mut buffer);

        let candidate = digest_to_scalar(&buffer, n);
        if in_scalar_range(&candidate, n) {
            return candidate;
        }
    }
}
