//!
//! Arithmetic modulo an odd prime, used both for the base field (mod p) and
//! for the scalar field (mod n)
//!

use crate::DomainError;
use alloc::vec::Vec;
use crypto_bigint::BoxedUint;
use crypto_primes::{is_prime, Flavor};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Prime field `Z/mZ` defined by a runtime modulus `m`.
///
/// Elements are plain [`BigUint`]s. Every operation accepts unreduced
/// inputs and returns a value in `[0, m)`.
#[derive(Clone, PartialEq, Eq, Hash)]
#[must_use]
pub struct PrimeField {
    /// The prime modulus
    modulus: BigUint,
}

opaque_debug::implement!(PrimeField);

impl PrimeField {
    /// Construct a field from an odd prime modulus.
    ///
    /// The modulus goes through a Baillie-PSW test: inversion and square roots
    /// are only correct modulo a prime.
    pub fn new(modulus: BigUint) -> crate::Result<Self> {
        if modulus <= BigUint::from(2u8) || !modulus.bit(0) {
            return Err(DomainError::InvalidParameters.into());
        }

        let candidate = BoxedUint::from_be_slice_vartime(&modulus.to_bytes_be());
        if !is_prime(Flavor::Any, &candidate) {
            return Err(DomainError::InvalidParameters.into());
        }

        Ok(Self { modulus })
    }

    /// Field modulus
    #[must_use]
    pub const fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Bit length of the modulus
    #[must_use]
    pub fn bits(&self) -> u64 {
        self.modulus.bits()
    }

    /// Number of bytes needed to hold any element
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.bits().div_ceil(8) as usize
    }

    /// Is `x` already a canonical element, i.e. in `[0, m)`?
    #[must_use]
    pub fn contains(&self, x: &BigUint) -> bool {
        x < &self.modulus
    }

    /// `x mod m`
    #[must_use]
    pub fn reduce(&self, x: &BigUint) -> BigUint {
        x % &self.modulus
    }

    /// `x + y mod m`
    #[must_use]
    pub fn add(&self, x: &BigUint, y: &BigUint) -> BigUint {
        (x + y) % &self.modulus
    }

    /// `x - y mod m`
    #[must_use]
    pub fn sub(&self, x: &BigUint, y: &BigUint) -> BigUint {
        let x = self.reduce(x);
        let y = self.reduce(y);

        if x >= y {
            x - y
        } else {
            &self.modulus - y + x
        }
    }

    /// `-x mod m`
    #[must_use]
    pub fn neg(&self, x: &BigUint) -> BigUint {
        self.sub(&BigUint::zero(), x)
    }

    /// `x * y mod m`
    #[must_use]
    pub fn mul(&self, x: &BigUint, y: &BigUint) -> BigUint {
        (x * y) % &self.modulus
    }

    /// `x^2 mod m`
    #[must_use]
    pub fn square(&self, x: &BigUint) -> BigUint {
        self.mul(x, x)
    }

    /// `x^e mod m`
    #[must_use]
    pub fn pow(&self, x: &BigUint, e: &BigUint) -> BigUint {
        x.modpow(e, &self.modulus)
    }

    /// Multiplicative inverse via Fermat's little theorem.
    ///
    /// Fails with [`DomainError::ZeroInverse`] when `x ≡ 0`.
    pub fn invert(&self, x: &BigUint) -> crate::Result<BigUint> {
        let x = self.reduce(x);
        if x.is_zero() {
            return Err(DomainError::ZeroInverse.into());
        }

        let exp = &self.modulus - BigUint::from(2u8);
        Ok(self.pow(&x, &exp))
    }

    /// Euler's criterion: is `x` a square (zero included)?
    #[must_use]
    pub fn is_square(&self, x: &BigUint) -> bool {
        let x = self.reduce(x);
        if x.is_zero() {
            return true;
        }

        let exp = (&self.modulus - BigUint::one()) >> 1u32;
        self.pow(&x, &exp).is_one()
    }

    /// Square root by Tonelli–Shanks.
    ///
    /// Returns `None` for quadratic non-residues. Which of the two roots is
    /// returned is unspecified; see [`PrimeField::is_odd`] to pick one.
    #[must_use]
    pub fn sqrt(&self, x: &BigUint) -> Option<BigUint> {
        let x = self.reduce(x);
        if x.is_zero() {
            return Some(x);
        }
        if !self.is_square(&x) {
            return None;
        }

        let one = BigUint::one();
        let p_minus_one = &self.modulus - &one;
        let two_adicity = p_minus_one.trailing_zeros()?;
        let q = &p_minus_one >> two_adicity;

        let mut z = BigUint::from(2u8);
        while self.is_square(&z) {
            z += 1u8;
        }

        let mut m = two_adicity;
        let mut c = self.pow(&z, &q);
        let mut t = self.pow(&x, &q);
        let mut r = self.pow(&x, &((&q + &one) >> 1u32));

        while !t.is_one() {
            let mut i = 0;
            let mut t_pow = t.clone();
            while !t_pow.is_one() {
                t_pow = self.square(&t_pow);
                i += 1;
                if i == m {
                    return None;
                }
            }

            let b = self.pow(&c, &(&one << (m - i - 1)));
            m = i;
            c = self.square(&b);
            t = self.mul(&t, &c);
            r = self.mul(&r, &b);
        }

        Some(r)
    }

    /// Parity of the canonical representative of `x`
    #[must_use]
    pub fn is_odd(&self, x: &BigUint) -> bool {
        self.reduce(x).bit(0)
    }

    /// Big-endian encoding of `x`, left-padded to [`PrimeField::byte_len`]
    #[must_use]
    pub fn to_be_bytes(&self, x: &BigUint) -> Vec<u8> {
        let len = self.byte_len();
        let bytes = self.reduce(x).to_bytes_be();
        let mut out = Vec::with_capacity(len);
        out.resize(len.saturating_sub(bytes.len()), 0);
        out.extend_from_slice(&bytes);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::PrimeField;
    use crate::{DomainError, Error};
    use num_bigint::BigUint;
    use num_traits::{Num, Zero};

    fn bn254_fr() -> PrimeField {
        PrimeField::new(
            BigUint::from_str_radix(
                "21888242871839275222246405745257275088548364400416034343698204186575808495617",
                10,
            )
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_even_or_tiny_modulus() {
        assert!(PrimeField::new(BigUint::from(2u8)).is_err());
        assert!(PrimeField::new(BigUint::from(10u8)).is_err());
        assert!(PrimeField::new(BigUint::zero()).is_err());
        assert!(PrimeField::new(BigUint::from(7u8)).is_ok());
    }

    #[test]
    fn rejects_composite_modulus() {
        // 15 = 3·5, 91 = 7·13, 561 is a Carmichael number
        for m in [15u32, 91, 561] {
            assert_eq!(
                PrimeField::new(BigUint::from(m)),
                Err(Error::Domain(DomainError::InvalidParameters)),
                "m = {m}"
            );
        }
        // BN254 base field modulus times 3
        let q = BigUint::from_str_radix(
            "21888242871839275222246405745257275088696311157297823662689037894645226208583",
            10,
        )
        .unwrap();
        assert!(PrimeField::new(q.clone()).is_ok());
        assert!(PrimeField::new(q * 3u8).is_err());
    }

    #[test]
    fn small_field_arithmetic() {
        let f = PrimeField::new(BigUint::from(7u8)).unwrap();
        let (x, y) = (BigUint::from(5u8), BigUint::from(4u8));

        assert_eq!(f.add(&x, &y), BigUint::from(2u8));
        assert_eq!(f.sub(&y, &x), BigUint::from(6u8));
        assert_eq!(f.mul(&x, &y), BigUint::from(6u8));
        assert_eq!(f.neg(&x), BigUint::from(2u8));
        assert_eq!(f.neg(&BigUint::zero()), BigUint::zero());
        assert_eq!(f.invert(&x).unwrap(), BigUint::from(3u8));

        // unreduced inputs are normalized
        assert_eq!(f.sub(&BigUint::from(3u8), &BigUint::from(15u8)), BigUint::from(2u8));
    }

    #[test]
    fn invert_zero_fails() {
        let f = bn254_fr();
        assert_eq!(
            f.invert(&BigUint::zero()),
            Err(Error::Domain(DomainError::ZeroInverse))
        );
        assert_eq!(
            f.invert(f.modulus()),
            Err(Error::Domain(DomainError::ZeroInverse))
        );
    }

    #[test]
    fn invert_roundtrip() {
        let f = bn254_fr();
        let x = BigUint::from(0xabad_babe_u64);
        let inv = f.invert(&x).unwrap();
        assert_eq!(f.mul(&x, &inv), BigUint::from(1u8));
    }

    #[test]
    fn sqrt_in_large_two_adicity_field() {
        // p - 1 is divisible by 2^28, which exercises the Tonelli–Shanks loop
        let f = bn254_fr();
        for v in [4u64, 5, 1234567, 0xdead_beef] {
            let x = BigUint::from(v);
            let square = f.square(&x);
            let root = f.sqrt(&square).expect("square has a root");
            assert!(root == x || root == f.neg(&x));
        }
    }

    #[test]
    fn sqrt_of_non_residue() {
        let f = PrimeField::new(BigUint::from(13u8)).unwrap();
        // squares mod 13: {0, 1, 3, 4, 9, 10, 12}
        assert_eq!(f.sqrt(&BigUint::from(2u8)), None);
        assert!(!f.is_square(&BigUint::from(5u8)));
        let root = f.sqrt(&BigUint::from(10u8)).unwrap();
        assert_eq!(f.square(&root), BigUint::from(10u8));
    }

    #[test]
    fn padded_encoding() {
        let f = bn254_fr();
        let bytes = f.to_be_bytes(&BigUint::from(1u8));
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[31], 1);
        assert!(bytes[..31].iter().all(|b| *b == 0));
    }
}
