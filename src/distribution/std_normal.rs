use crate::distribution::error::DomainError;
use crate::error::CtdesignErr;

pub fn std_normal_pdf(z: f64) -> f64 {
    (-z * z / 2.0).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

/// Complementary error function, Chebyshev fit with fractional error
/// below 1.2e-7 everywhere (Numerical Recipes `erfcc`)
#[allow(clippy::excessive_precision)]
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.26551223
        + t * (1.00002368
            + t * (0.37409196
                + t * (0.09678418
                    + t * (-0.18628806
                        + t * (0.27886807
                            + t * (-1.13520398
                                + t * (1.48851587 + t * (-0.82215223 + t * 0.17087277))))))));
    let ans = t * poly.exp();
    if x >= 0.0 { ans } else { 2.0 - ans }
}

pub fn std_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / std::f64::consts::SQRT_2)
}

/// CDF of N(mean, sd^2) at x
pub fn normal_cdf(x: f64, mean: f64, sd: f64) -> Result<f64, CtdesignErr> {
    if !(sd > 0.0) {
        return Err(DomainError::NonPositiveScale(sd).into());
    }
    Ok(std_normal_cdf((x - mean) / sd))
}

// Acklam (2003) rational approximation, relative error ~1.15e-9. Caller
// guarantees p is in (0, 1).
#[allow(clippy::excessive_precision)]
fn std_normal_quantile_helper(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        return tail((-2.0 * p.ln()).sqrt());
    }
    if p > P_HIGH {
        // Mirror of the lower tail
        return -tail((-2.0 * (1.0 - p).ln()).sqrt());
    }
    let q = p - 0.5;
    let r = q * q;
    (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
        / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
}

/// z such that Phi(z) = p. The quantile is infinite at 0 and 1, so those
/// are rejected along with everything outside the unit interval.
pub fn std_normal_quantile(p: f64) -> Result<f64, CtdesignErr> {
    if !(p > 0.0 && p < 1.0) {
        return Err(DomainError::QuantileOutOfBounds(p).into());
    }
    Ok(std_normal_quantile_helper(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{ContinuousCDF, Normal};

    #[test]
    fn standard_normal_pdf_1() {
        assert!((0.3989423 - std_normal_pdf(0.0)).abs() < 0.0000001)
    }

    #[test]
    fn standard_normal_pdf_2() {
        assert!((0.004431848 - std_normal_pdf(3.0)).abs() < 0.0000001)
    }

    #[test]
    fn standard_normal_pdf_3() {
        assert_eq!(std_normal_pdf(-1.0), std_normal_pdf(1.0));
    }

    #[test]
    fn std_normal_quantile_err() {
        if let Err(e) = std_normal_quantile(1.1) {
            assert_eq!(
                String::from(
                    "while evaluating distribution function: arguments to \
                    quantile function should be in (0, 1); got 1.1"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }

    #[test]
    fn std_normal_quantile_endpoints() {
        assert!(std_normal_quantile(0.0).is_err());
        assert!(std_normal_quantile(1.0).is_err());
        assert!(std_normal_quantile(f64::NAN).is_err());
    }

    #[test]
    fn std_normal_quantile_value() {
        assert!((std_normal_quantile(0.975).unwrap() - 1.959964).abs() < 0.00001)
    }

    #[test]
    fn std_normal_quantile_value_2() {
        assert!((std_normal_quantile(0.007384489).unwrap() - -2.437995).abs() < 0.0001)
    }

    #[test]
    fn std_normal_quantile_symmetric() {
        for p in [0.001, 0.01, 0.025, 0.2, 0.45] {
            let lower = std_normal_quantile(p).unwrap();
            let upper = std_normal_quantile(1.0 - p).unwrap();
            assert!((lower + upper).abs() < 1e-8, "p = {p}");
        }
    }

    #[test]
    fn std_normal_cdf_values() {
        assert!((std_normal_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((std_normal_cdf(1.959964) - 0.975).abs() < 2e-7);
        assert!((std_normal_cdf(-1.644854) - 0.05).abs() < 2e-7);
    }

    #[test]
    fn std_normal_cdf_matches_statrs() {
        let reference = Normal::new(0.0, 1.0).unwrap();
        let mut z = -6.0;
        while z <= 6.0 {
            assert!((std_normal_cdf(z) - reference.cdf(z)).abs() < 1e-7, "z = {z}");
            z += 0.05;
        }
    }

    #[test]
    fn normal_cdf_location_scale() {
        let p = normal_cdf(3.0, 1.0, 2.0).unwrap();
        assert!((p - std_normal_cdf(1.0)).abs() < 1e-12);
        assert!(normal_cdf(0.0, 0.0, 0.0).is_err());
    }
}
