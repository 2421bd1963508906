//!
//! Generate per-message secret numbers
//!

use crate::{digest_to_scalar, hazmat::in_scalar_range, PrimeField};
use alloc::{vec, vec::Vec};
use num_bigint::BigUint;
use rfc6979::HmacDrbg;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Deterministic nonce stream as described in RFC 6979 § 3.2, instantiated
/// with HMAC-SHA-256.
///
/// Successive calls to [`NonceGenerator::next_nonce`] continue the same
/// HMAC_DRBG, which is how RFC 6979 retries when a nonce has to be discarded.
pub struct NonceGenerator {
    drbg: HmacDrbg<Sha256>,
    buffer: Zeroizing<Vec<u8>>,
}

impl NonceGenerator {
    /// Seed the generator with the secret scalar `d` (already encoded as
    /// `int2octets`), the digest representative `e` and optional extra
    /// entropy mixed in as additional data
    pub fn new(scalars: &PrimeField, d: &[u8], e: &BigUint, additional_data: &[u8]) -> Self {
        // bits2octets(h) = int2octets(bits2int(h) mod n)
        let e = Zeroizing::new(scalars.to_be_bytes(e));

        Self {
            drbg: HmacDrbg::new(d, &e, additional_data),
            buffer: Zeroizing::new(vec![0; scalars.byte_len()]),
        }
    }

    /// Next candidate `k` in `[1, n-1]`
    pub fn next_nonce(&mut self, n: &BigUint) -> BigUint {
        loop {
            self.drbg.fill_bytes(&mut self.buffer);

            let k = digest_to_scalar(&self.buffer, n);
            if in_scalar_range(&k, n) {
                return k;
            }
        }
    }
}
