use std::cmp::Ordering;

///Wrapper around the [`float_cmp::approx_eq!()`] macro for easy comparison of floats with a certain tolerance.
///Two FPAs are considered equal if they are within a certain tolerance of each other.
#[derive(Debug, Clone, Copy)]
pub struct FPA(pub f64);

impl FPA {
    /// Largest integer less than or equal to the value, treating values within tolerance of an integer as that integer
    pub fn floor(self) -> i64 {
        let rounded = self.0.round();
        match FPA(rounded) == self {
            true => rounded as i64,
            false => self.0.floor() as i64,
        }
    }

    /// Smallest integer greater than or equal to the value, treating values within tolerance of an integer as that integer
    pub fn ceil(self) -> i64 {
        let rounded = self.0.round();
        match FPA(rounded) == self {
            true => rounded as i64,
            false => self.0.ceil() as i64,
        }
    }
}

impl PartialEq<Self> for FPA {
    fn eq(&self, other: &Self) -> bool {
        float_cmp::approx_eq!(f64, self.0, other.0, epsilon = 1e-9, ulps = 4)
    }
}

impl PartialOrd<Self> for FPA {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.eq(other) {
            true => Some(Ordering::Equal),
            false => self.0.partial_cmp(&other.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(12.000000000000002, 12, 12; "noise above integer")]
    #[test_case(-12.000000000000002, -12, -12; "noise below negative integer")]
    #[test_case(2.5, 2, 3; "half")]
    #[test_case(-0.25, -1, 0; "negative fraction")]
    fn floor_and_ceil_absorb_noise(value: f64, floor: i64, ceil: i64) {
        assert_eq!(FPA(value).floor(), floor);
        assert_eq!(FPA(value).ceil(), ceil);
    }
}
