//! Verification of many independent signatures.

use crate::{Signature, VerifyingKey};
use alloc::vec::Vec;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// One signature to check: key, message digest and signature
#[derive(Clone, Copy, Debug)]
pub struct BatchItem<'a> {
    /// Public key expected to have produced the signature
    pub verifying_key: &'a VerifyingKey,

    /// Digest of the signed message
    pub prehash: &'a [u8],

    /// Signature to check
    pub signature: &'a Signature,
}

impl<'a> BatchItem<'a> {
    /// Bundle a key, digest and signature
    pub const fn new(
        verifying_key: &'a VerifyingKey,
        prehash: &'a [u8],
        signature: &'a Signature,
    ) -> Self {
        Self {
            verifying_key,
            prehash,
            signature,
        }
    }

    /// Verify this item on its own
    #[must_use]
    pub fn verify(&self) -> bool {
        self.verifying_key
            .verify_prehashed(self.prehash, self.signature)
    }
}

/// Verify every item, returning one result per item in input order.
///
/// With the `rayon` feature the items are spread over the rayon thread pool;
/// the results are identical to verifying them one by one.
#[must_use]
pub fn verify_batch(items: &[BatchItem<'_>]) -> Vec<bool> {
    #[cfg(feature = "rayon")]
    let results = items.par_iter().map(BatchItem::verify).collect();

    #[cfg(not(feature = "rayon"))]
    let results = items.iter().map(BatchItem::verify).collect();

    results
}
