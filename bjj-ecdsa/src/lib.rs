#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![doc = include_str!("../README.md")]

//!
//! # Examples
//!
//! Verify a DER-encoded signature over a digest that is given directly
//!
//! ```
//! use bjj_ecdsa::{
//!     decode_der_hex, derive_public_key, digest_to_scalar, verify, BigUint, CurveParameters,
//!     DigestProvider, NullDigest,
//! };
//!
//! let curve = CurveParameters::baby_jubjub();
//! let d = BigUint::parse_bytes(
//!     b"04031627028b95196e3bfe3b73c894d814dadedb20c6d7ed83e274c95e00bfc3",
//!     16,
//! )
//! .unwrap();
//! let q = derive_public_key(&curve, &d)?;
//!
//! let digest = NullDigest::abadbabe().digest(b"ignored");
//! let e = digest_to_scalar(&digest, curve.n());
//!
//! let (r, s) = decode_der_hex(
//!     "3044022002A043A728D9C86A5C82D0AA7455FC148EE2C91993325CBB307EB94D8434C39F\
//!      022002470171EEC9726D71F9CD194D876FC8762CA2BE1FF7B30ACD5DAF9762BE2438",
//! )?;
//! assert!(verify(&curve, &q, &e, &r, &s)?);
//! # Ok::<(), bjj_ecdsa::Error>(())
//! ```
//!
//! Generate a keypair, then sign and verify with SHA-256
//!
//! ```
//! use bjj_ecdsa::{
//!     signature::{Signer, Verifier},
//!     CurveParameters, SigningKey,
//! };
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//! use std::sync::Arc;
//!
//! let curve = Arc::new(CurveParameters::baby_jubjub());
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! let signing_key = SigningKey::generate(curve, &mut rng);
//! let signature = signing_key.sign(b"hello world");
//!
//! let verifying_key = signing_key.verifying_key();
//! assert!(verifying_key.verify(b"hello world", &signature).is_ok());
//! assert!(verifying_key.verify(b"hello there", &signature).is_err());
//! ```
//!

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

pub mod hazmat;

mod affine;
mod batch;
mod curve;
mod der;
mod errors;
mod field;
mod generate;
mod projective;
mod provider;
mod recovery;
mod sig;
mod signing_key;
mod verifying_key;

pub use crate::{
    affine::AffinePoint,
    batch::{verify_batch, BatchItem},
    curve::{make_curve, CurveParameters, BN254_SCALAR_MODULUS},
    der::{decode_der, decode_der_hex, encode_der},
    errors::{DecodeError, DomainError, Error, Result},
    field::PrimeField,
    hazmat::{derive_public_key, verify},
    provider::{digest_to_scalar, DigestProvider, NullDigest, Sha2Digest},
    recovery::{find_signer, recover_candidates, RecoveryId},
    sig::Signature,
    signing_key::SigningKey,
    verifying_key::VerifyingKey,
};

pub use num_bigint::BigUint;
pub use signature;
