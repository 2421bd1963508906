//! Affine curve points and the textbook group law.

use crate::{CurveParameters, Result};
use num_bigint::BigUint;
use num_traits::Zero;

/// Point on a short Weierstrass curve in affine coordinates.
///
/// Points are plain values; they carry no reference to their curve, so every
/// operation takes the [`CurveParameters`] explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AffinePoint {
    /// The point at infinity, neutral element of the group
    Identity,

    /// A point with affine coordinates
    Finite {
        /// x-coordinate
        x: BigUint,
        /// y-coordinate
        y: BigUint,
    },
}

impl AffinePoint {
    /// Construct a finite point. Not checked against any curve.
    pub const fn new(x: BigUint, y: BigUint) -> Self {
        Self::Finite { x, y }
    }

    /// Is this the point at infinity?
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Affine x-coordinate, `None` for the identity
    #[must_use]
    pub const fn x(&self) -> Option<&BigUint> {
        match self {
            Self::Identity => None,
            Self::Finite { x, .. } => Some(x),
        }
    }

    /// Affine y-coordinate, `None` for the identity
    #[must_use]
    pub const fn y(&self) -> Option<&BigUint> {
        match self {
            Self::Identity => None,
            Self::Finite { y, .. } => Some(y),
        }
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        Self::Identity
    }
}

impl CurveParameters {
    /// Returns `lhs + rhs`.
    ///
    /// Both inputs are checked to lie on the curve.
    pub fn add(&self, lhs: &AffinePoint, rhs: &AffinePoint) -> Result<AffinePoint> {
        self.validate_point(lhs)?;
        self.validate_point(rhs)?;

        let ((x1, y1), (x2, y2)) = match (lhs, rhs) {
            (AffinePoint::Identity, _) => return Ok(rhs.clone()),
            (_, AffinePoint::Identity) => return Ok(lhs.clone()),
            (AffinePoint::Finite { x: x1, y: y1 }, AffinePoint::Finite { x: x2, y: y2 }) => {
                ((x1, y1), (x2, y2))
            }
        };

        if x1 == x2 {
            // P + P doubles, P + (-P) vanishes
            return if y1 == y2 {
                self.double(lhs)
            } else {
                Ok(AffinePoint::Identity)
            };
        }

        let f = self.base_field();
        let lambda = f.mul(&f.sub(y2, y1), &f.invert(&f.sub(x2, x1))?);
        Ok(self.chord(&lambda, (x1, y1), x2))
    }

    /// Returns `point + point`.
    ///
    /// A point with `y = 0` has a vertical tangent and doubles to the identity.
    pub fn double(&self, point: &AffinePoint) -> Result<AffinePoint> {
        self.validate_point(point)?;

        let (x, y) = match point {
            AffinePoint::Identity => return Ok(AffinePoint::Identity),
            AffinePoint::Finite { x, y } => (x, y),
        };

        if y.is_zero() {
            return Ok(AffinePoint::Identity);
        }

        let f = self.base_field();
        let numerator = f.add(&f.mul(&BigUint::from(3u8), &f.square(x)), self.a());
        let lambda = f.mul(&numerator, &f.invert(&f.add(y, y))?);
        Ok(self.chord(&lambda, (x, y), x))
    }

    /// Returns `-point`
    pub fn negate(&self, point: &AffinePoint) -> Result<AffinePoint> {
        self.validate_point(point)?;

        Ok(match point {
            AffinePoint::Identity => AffinePoint::Identity,
            AffinePoint::Finite { x, y } => AffinePoint::new(x.clone(), self.base_field().neg(y)),
        })
    }

    /// The point with x-coordinate `x` and the requested y parity, if any.
    ///
    /// Returns `None` when `x` is not canonical, `x³ + ax + b` is not a square,
    /// or an odd `y` is requested for a point with `y = 0`.
    #[must_use]
    pub fn lift_x(&self, x: &BigUint, y_odd: bool) -> Option<AffinePoint> {
        let f = self.base_field();
        if !f.contains(x) {
            return None;
        }

        let y = f.sqrt(&self.rhs(x))?;
        let y = if f.is_odd(&y) == y_odd {
            y
        } else {
            f.neg(&y)
        };

        (f.is_odd(&y) == y_odd).then(|| AffinePoint::new(x.clone(), y))
    }

    /// Third intersection of the line with slope `lambda` through `(x1, y1)`,
    /// reflected: `x3 = λ² - x1 - x2`, `y3 = λ(x1 - x3) - y1`
    fn chord(&self, lambda: &BigUint, (x1, y1): (&BigUint, &BigUint), x2: &BigUint) -> AffinePoint {
        let f = self.base_field();
        let x3 = f.sub(&f.sub(&f.square(lambda), x1), x2);
        let y3 = f.sub(&f.mul(lambda, &f.sub(x1, &x3)), y1);
        AffinePoint::new(x3, y3)
    }
}
