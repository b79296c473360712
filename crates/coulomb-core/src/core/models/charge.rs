use super::ids::ChargeId;
use crate::core::physics::constants::NANOCOULOMB;
use nalgebra::Point2;

/// The sign of a charge as shown to the user.
///
/// A charge of exactly zero is reported as [`Polarity::Negative`], matching the marker
/// the lab canvas draws for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Strictly positive magnitude.
    Positive,
    /// Negative or zero magnitude.
    Negative,
}

impl Polarity {
    pub fn symbol(self) -> char {
        match self {
            Polarity::Positive => '+',
            Polarity::Negative => '-',
        }
    }
}

/// A point charge in the 2D lab plane.
///
/// Positions are in canvas units, which the physics treats as meters. The magnitude is
/// stored in nanocoulombs; its sign encodes polarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    /// Identifier, unique within the owning store.
    pub id: ChargeId,
    /// Position of the charge in the plane.
    pub position: Point2<f64>,
    /// Signed magnitude in nanocoulombs.
    pub magnitude: f64,
}

impl Charge {
    pub fn new(id: ChargeId, position: Point2<f64>, magnitude: f64) -> Self {
        Self {
            id,
            position,
            magnitude,
        }
    }

    /// Magnitude converted to coulombs.
    #[inline]
    pub fn charge_coulombs(&self) -> f64 {
        self.magnitude * NANOCOULOMB
    }

    #[inline]
    pub fn polarity(&self) -> Polarity {
        if self.magnitude > 0.0 {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }

    /// Flips the sign of the magnitude in place.
    #[inline]
    pub fn flip_polarity(&mut self) {
        self.magnitude = -self.magnitude;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_coulombs_converts_from_nanocoulombs() {
        let charge = Charge::new(ChargeId(1), Point2::origin(), 10.0);
        assert!((charge.charge_coulombs() - 1e-8).abs() < 1e-20);
    }

    #[test]
    fn polarity_follows_sign_with_zero_as_negative() {
        let mut charge = Charge::new(ChargeId(1), Point2::origin(), 3.0);
        assert_eq!(charge.polarity(), Polarity::Positive);
        charge.magnitude = -3.0;
        assert_eq!(charge.polarity(), Polarity::Negative);
        charge.magnitude = 0.0;
        assert_eq!(charge.polarity(), Polarity::Negative);
    }

    #[test]
    fn flip_polarity_negates_magnitude() {
        let mut charge = Charge::new(ChargeId(1), Point2::new(1.0, 2.0), 12.5);
        charge.flip_polarity();
        assert_eq!(charge.magnitude, -12.5);
        charge.flip_polarity();
        assert_eq!(charge.magnitude, 12.5);
        assert_eq!(charge.position, Point2::new(1.0, 2.0));
    }

    #[test]
    fn polarity_symbol_matches_sign() {
        assert_eq!(Polarity::Positive.symbol(), '+');
        assert_eq!(Polarity::Negative.symbol(), '-');
    }
}
