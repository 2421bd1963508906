//! Verify DER-encoded signatures over the `abadbabe` test digest.
//!
//! Usage: `verify_fixtures [PRIVATE_KEY_HEX] [DER_SIGNATURE_HEX...]`
//!
//! Without arguments the built-in card signatures are checked. Run with
//! `RUST_LOG=bjj_ecdsa=debug` and `--features tracing` to see why a signature
//! is rejected.

use bjj_ecdsa::{
    decode_der_hex, derive_public_key, digest_to_scalar, verify, BigUint, CurveParameters,
    DigestProvider, NullDigest,
};
use std::{env, process::ExitCode};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const PRIVATE_KEY: &str = "04031627028b95196e3bfe3b73c894d814dadedb20c6d7ed83e274c95e00bfc3";

const CARD_SIGNATURES: [&str; 3] = [
    "3044022002A043A728D9C86A5C82D0AA7455FC148EE2C91993325CBB307EB94D8434C39F\
     022002470171EEC9726D71F9CD194D876FC8762CA2BE1FF7B30ACD5DAF9762BE2438",
    "304402200579E805639DB82135A1A773B4C4A8861F236F1E343271DA0E1417AAF6345EDC\
     0220026C3BC30E69019DD8C724680C812E9AC82214403198531B6B9556C745261268",
    "304402200041DCA2A8BF30D1B630A71702419F7BAFDCC8E1E417E8AD94379D74C0D161FD\
     022002FCAA7A8E69C21AA800A8FC259891CF98314FB68E5DC6A844FF5A568CCD779F",
];

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let private_key = args.next().unwrap_or_else(|| PRIVATE_KEY.to_owned());
    let mut signatures: Vec<String> = args.collect();
    if signatures.is_empty() {
        signatures = CARD_SIGNATURES.iter().map(|s| s.to_string()).collect();
    }

    let Some(d) = BigUint::parse_bytes(private_key.trim().as_bytes(), 16) else {
        error!(%private_key, "private key is not valid hex");
        return ExitCode::FAILURE;
    };

    let curve = CurveParameters::baby_jubjub();
    let q = match derive_public_key(&curve, &d) {
        Ok(q) => q,
        Err(err) => {
            error!(%err, "cannot derive public key");
            return ExitCode::FAILURE;
        }
    };
    let e = digest_to_scalar(&NullDigest::abadbabe().digest(&[]), curve.n());

    let mut failures = 0usize;
    for der in &signatures {
        let valid = decode_der_hex(der)
            .map_err(Into::into)
            .and_then(|(r, s)| verify(&curve, &q, &e, &r, &s));

        match valid {
            Ok(true) => info!(signature = %der, "valid"),
            Ok(false) => {
                warn!(signature = %der, "invalid");
                failures += 1;
            }
            Err(err) => {
                error!(signature = %der, %err, "rejected");
                failures += 1;
            }
        }
    }

    println!("{} of {} signatures valid", signatures.len() - failures, signatures.len());

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
