use flex_error::define_error;
use num_bigint::BigInt;
use num_rational::BigRational;

define_error! {
    OperationError {
        NonFiniteFactor
            { factor: f64 }
            |e| { format!("cannot scale by the non-finite factor {}", e.factor) },
    }
}

fn scaled(amount: u64, factor: f64) -> Result<BigRational, OperationError> {
    let factor =
        BigRational::from_float(factor).ok_or_else(|| OperationError::non_finite_factor(factor))?;

    Ok(factor * BigInt::from(amount))
}

/// Scale `amount` by `factor`, rounding up. Fails on a `NaN` or infinite
/// factor instead of producing a bogus fee.
pub fn mul_ceil(amount: u64, factor: f64) -> Result<BigInt, OperationError> {
    Ok(scaled(amount, factor)?.ceil().to_integer())
}

/// Scale `amount` by `factor`, rounding down.
pub fn mul_floor(amount: u64, factor: f64) -> Result<BigInt, OperationError> {
    Ok(scaled(amount, factor)?.floor().to_integer())
}

#[cfg(test)]
pub mod operation_tests {
    use num_bigint::BigInt;

    use super::{mul_ceil, mul_floor};

    #[test]
    pub fn mul_ceil_works() {
        assert_eq!(mul_ceil(100, 1.1).unwrap(), BigInt::from(111_u64));
        assert_eq!(mul_ceil(0, 2.5).unwrap(), BigInt::from(0_u64));
    }

    #[test]
    pub fn mul_floor_works() {
        assert_eq!(mul_floor(100, 1.1).unwrap(), BigInt::from(110_u64));
        assert_eq!(mul_floor(7, 0.5).unwrap(), BigInt::from(3_u64));
    }

    #[test]
    pub fn non_finite_factor_fails() {
        assert!(mul_ceil(100, f64::NAN).is_err());
        assert!(mul_floor(100, f64::INFINITY).is_err());
        assert!(mul_ceil(100, f64::NEG_INFINITY).is_err());
    }
}
