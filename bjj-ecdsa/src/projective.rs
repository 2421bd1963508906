//! Jacobian projective points and scalar multiplication.
//!
//! A Jacobian triple `(X, Y, Z)` represents the affine point `(X/Z², Y/Z³)`;
//! any triple with `Z = 0` is the identity. Working in this representation
//! defers the field inversion of every group operation to a single one when
//! converting back to affine coordinates.

use crate::{AffinePoint, CurveParameters, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Point in Jacobian coordinates. Only meaningful alongside its curve.
#[derive(Clone, Debug)]
pub(crate) struct ProjectivePoint {
    x: BigUint,
    y: BigUint,
    z: BigUint,
}

impl ProjectivePoint {
    pub(crate) fn identity() -> Self {
        Self {
            x: BigUint::one(),
            y: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    pub(crate) fn is_identity(&self) -> bool {
        self.z.is_zero()
    }
}

impl From<&AffinePoint> for ProjectivePoint {
    fn from(point: &AffinePoint) -> Self {
        match point {
            AffinePoint::Identity => Self::identity(),
            AffinePoint::Finite { x, y } => Self {
                x: x.clone(),
                y: y.clone(),
                z: BigUint::one(),
            },
        }
    }
}

impl CurveParameters {
    /// Returns `k·point` by double-and-add, most significant bit first.
    ///
    /// `k` is used as given (not reduced modulo n); `0·P` is the identity.
    pub fn mul(&self, k: &BigUint, point: &AffinePoint) -> Result<AffinePoint> {
        self.validate_point(point)?;

        let base = ProjectivePoint::from(point);
        let mut acc = ProjectivePoint::identity();

        for i in (0..k.bits()).rev() {
            acc = self.double_jacobian(&acc);
            if k.bit(i) {
                acc = self.add_jacobian(&acc, &base);
            }
        }

        self.to_affine(&acc)
    }

    /// Returns `k·G`
    pub fn mul_generator(&self, k: &BigUint) -> Result<AffinePoint> {
        self.mul(k, self.generator())
    }

    /// Returns `k1·p1 + k2·p2`, interleaving both double-and-add ladders
    /// (Shamir's trick) so that the doublings are shared.
    pub fn lincomb(
        &self,
        k1: &BigUint,
        p1: &AffinePoint,
        k2: &BigUint,
        p2: &AffinePoint,
    ) -> Result<AffinePoint> {
        self.validate_point(p1)?;
        self.validate_point(p2)?;

        let p1 = ProjectivePoint::from(p1);
        let p2 = ProjectivePoint::from(p2);
        let sum = self.add_jacobian(&p1, &p2);
        let mut acc = ProjectivePoint::identity();

        for i in (0..k1.bits().max(k2.bits())).rev() {
            acc = self.double_jacobian(&acc);
            match (k1.bit(i), k2.bit(i)) {
                (true, true) => acc = self.add_jacobian(&acc, &sum),
                (true, false) => acc = self.add_jacobian(&acc, &p1),
                (false, true) => acc = self.add_jacobian(&acc, &p2),
                (false, false) => {}
            }
        }

        self.to_affine(&acc)
    }

    pub(crate) fn to_affine(&self, point: &ProjectivePoint) -> Result<AffinePoint> {
        if point.is_identity() {
            return Ok(AffinePoint::Identity);
        }

        let f = self.base_field();
        let z_inv = f.invert(&point.z)?;
        let z_inv2 = f.square(&z_inv);
        let z_inv3 = f.mul(&z_inv2, &z_inv);

        Ok(AffinePoint::new(
            f.mul(&point.x, &z_inv2),
            f.mul(&point.y, &z_inv3),
        ))
    }

    /// Jacobian doubling for arbitrary `a`.
    ///
    /// `Z3 = 2YZ` vanishes for `Y = 0`, mapping 2-torsion points to the identity.
    pub(crate) fn double_jacobian(&self, point: &ProjectivePoint) -> ProjectivePoint {
        if point.is_identity() || point.y.is_zero() {
            return ProjectivePoint::identity();
        }

        let f = self.base_field();
        let (x, y, z) = (&point.x, &point.y, &point.z);

        let xx = f.square(x);
        let yy = f.square(y);
        let zz = f.square(z);
        let s = f.mul(&BigUint::from(4u8), &f.mul(x, &yy));
        let m = f.add(
            &f.mul(&BigUint::from(3u8), &xx),
            &f.mul(self.a(), &f.square(&zz)),
        );

        let x3 = f.sub(&f.square(&m), &f.add(&s, &s));
        let y3 = f.sub(
            &f.mul(&m, &f.sub(&s, &x3)),
            &f.mul(&BigUint::from(8u8), &f.square(&yy)),
        );
        let z3 = f.mul(&BigUint::from(2u8), &f.mul(y, z));

        ProjectivePoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Jacobian addition, falling back to doubling when both inputs coincide
    pub(crate) fn add_jacobian(
        &self,
        lhs: &ProjectivePoint,
        rhs: &ProjectivePoint,
    ) -> ProjectivePoint {
        if lhs.is_identity() {
            return rhs.clone();
        }
        if rhs.is_identity() {
            return lhs.clone();
        }

        let f = self.base_field();

        let z1z1 = f.square(&lhs.z);
        let z2z2 = f.square(&rhs.z);
        let u1 = f.mul(&lhs.x, &z2z2);
        let u2 = f.mul(&rhs.x, &z1z1);
        let s1 = f.mul(&lhs.y, &f.mul(&rhs.z, &z2z2));
        let s2 = f.mul(&rhs.y, &f.mul(&lhs.z, &z1z1));

        let h = f.sub(&u2, &u1);
        let r = f.sub(&s2, &s1);

        if h.is_zero() {
            return if r.is_zero() {
                self.double_jacobian(lhs)
            } else {
                ProjectivePoint::identity()
            };
        }

        let hh = f.square(&h);
        let hhh = f.mul(&h, &hh);
        let v = f.mul(&u1, &hh);

        let x3 = f.sub(&f.sub(&f.square(&r), &hhh), &f.add(&v, &v));
        let y3 = f.sub(&f.mul(&r, &f.sub(&v, &x3)), &f.mul(&s1, &hhh));
        let z3 = f.mul(&f.mul(&lhs.z, &rhs.z), &h);

        ProjectivePoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{make_curve, AffinePoint, CurveParameters};
    use num_bigint::BigUint;
    use num_traits::Zero;

    fn toy() -> CurveParameters {
        let v = |n: u32| BigUint::from(n);
        make_curve(v(97), v(2), v(3), v(3), v(6), v(5)).unwrap()
    }

    fn pt(x: u32, y: u32) -> AffinePoint {
        AffinePoint::new(BigUint::from(x), BigUint::from(y))
    }

    #[test]
    fn mul_matches_repeated_addition() {
        let curve = CurveParameters::baby_jubjub();
        let g = curve.generator().clone();

        let mut expected = AffinePoint::Identity;
        for k in 0u32..12 {
            assert_eq!(curve.mul(&BigUint::from(k), &g).unwrap(), expected, "k = {k}");
            expected = curve.add(&expected, &g).unwrap();
        }
    }

    #[test]
    fn mul_by_zero_and_order() {
        let curve = CurveParameters::baby_jubjub();
        assert_eq!(
            curve.mul_generator(&BigUint::zero()).unwrap(),
            AffinePoint::Identity
        );
        assert_eq!(
            curve.mul_generator(curve.n()).unwrap(),
            AffinePoint::Identity
        );

        let n_plus_one = curve.n() + 1u8;
        assert_eq!(
            curve.mul_generator(&n_plus_one).unwrap(),
            *curve.generator()
        );
    }

    #[test]
    fn mul_of_two_torsion_point() {
        let curve = toy();
        let t = pt(30, 0);
        assert_eq!(curve.mul(&BigUint::from(2u8), &t).unwrap(), AffinePoint::Identity);
        assert_eq!(curve.mul(&BigUint::from(3u8), &t).unwrap(), t);
    }

    #[test]
    fn lincomb_matches_separate_products() {
        let curve = CurveParameters::baby_jubjub();
        let g = curve.generator().clone();
        let q = curve.mul_generator(&BigUint::from(0xdead_beef_u64)).unwrap();
        let (k1, k2) = (BigUint::from(123_456_789u64), BigUint::from(987_654_321u64));

        let expected = curve
            .add(&curve.mul(&k1, &g).unwrap(), &curve.mul(&k2, &q).unwrap())
            .unwrap();
        assert_eq!(curve.lincomb(&k1, &g, &k2, &q).unwrap(), expected);
    }

    #[test]
    fn lincomb_cancelling_terms() {
        // k·G + (n - k)·G = identity
        let curve = CurveParameters::baby_jubjub();
        let g = curve.generator().clone();
        let k = BigUint::from(42u8);
        let rest = curve.n() - &k;
        assert_eq!(
            curve.lincomb(&k, &g, &rest, &g).unwrap(),
            AffinePoint::Identity
        );
    }

    #[test]
    fn mul_rejects_off_curve_point() {
        let curve = toy();
        assert!(curve.mul(&BigUint::from(2u8), &pt(1, 1)).is_err());
    }
}
