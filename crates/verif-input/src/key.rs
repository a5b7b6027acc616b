//! Hashable float keys for coordinate lookups.

/// An `f64` usable as a hash key.
///
/// Keys compare by bit pattern after folding `-0.0` into `0.0` and every NaN
/// into the canonical NaN, so values that print the same hash the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct F64Key(u64);

impl F64Key {
    pub fn new(value: f64) -> Self {
        let value = if value == 0.0 {
            0.0
        } else if value.is_nan() {
            f64::NAN
        } else {
            value
        };
        Self(value.to_bits())
    }

    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl From<f64> for F64Key {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Coordinates of a location as a hash key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey {
    pub lat: F64Key,
    pub lon: F64Key,
    pub elev: F64Key,
}

impl CoordKey {
    pub fn new(lat: f64, lon: f64, elev: f64) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
            elev: elev.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_zero_and_nan_fold() {
        assert_eq!(F64Key::new(0.0), F64Key::new(-0.0));
        assert_eq!(F64Key::new(f64::NAN), F64Key::new(-f64::NAN));
        assert_ne!(F64Key::new(0.1), F64Key::new(0.2));
        assert_eq!(F64Key::new(49.2).value(), 49.2);
    }
}
