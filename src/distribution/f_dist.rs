use crate::distribution::error::DomainError;
use crate::distribution::std_normal::std_normal_quantile;
use crate::error::CtdesignErr;

/// Approximate p-quantile of F(df1, df2).
///
/// Uses Paulson's cube-root normal transform (the Wilson-Hilferty idea applied
/// to a ratio of chi-squares): with a = 2/(9 df1), b = 2/(9 df2) and y = F^(1/3),
///
///   z = ((1 - b) y - (1 - a)) / sqrt(b y^2 + a)
///
/// is approximately standard normal. Solving the squared relation for y gives a
/// quadratic; the root on the same side as z is kept. Accurate to a few percent
/// for moderate degrees of freedom, which is enough to rank ANOVA designs, but
/// degrades badly when df2 is very small.
pub fn inverse_f(p: f64, df1: f64, df2: f64) -> Result<f64, CtdesignErr> {
    if !(df1 > 0.0 && df2 > 0.0) {
        return Err(DomainError::DegreesOfFreedom { df1, df2 }.into());
    }
    let z = std_normal_quantile(p)?;

    let a = 2.0 / (9.0 * df1);
    let b = 2.0 / (9.0 * df2);
    let quad_a = (1.0 - b).powi(2) - z * z * b;
    let half_quad_b = (1.0 - a) * (1.0 - b);
    let discriminant = (1.0 - a).powi(2) * b + (1.0 - b).powi(2) * a - z * z * a * b;

    if quad_a <= 0.0 || discriminant < 0.0 {
        return Err(DomainError::FApproximation { p, df1, df2 }.into());
    }

    let y = (half_quad_b + z * discriminant.sqrt()) / quad_a;
    if y <= 0.0 {
        // Only reachable for extreme lower quantiles; the F quantile is ~0 there
        return Ok(0.0);
    }
    Ok(y.powi(3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{ContinuousCDF, FisherSnedecor};

    #[test]
    fn inverse_f_median_near_one() {
        // Median of F(k, k) is exactly 1
        let f = inverse_f(0.5, 20.0, 20.0).unwrap();
        assert!((f - 1.0).abs() < 1e-3);
    }

    #[test]
    fn inverse_f_close_to_exact() {
        for (df1, df2) in [(2.0, 30.0), (3.0, 60.0), (4.0, 200.0), (2.0, 1000.0)] {
            let exact = FisherSnedecor::new(df1, df2).unwrap().inverse_cdf(0.95);
            let approx = inverse_f(0.95, df1, df2).unwrap();
            assert!(
                (approx - exact).abs() / exact < 0.03,
                "df = ({df1}, {df2}): approx {approx}, exact {exact}"
            );
        }
    }

    #[test]
    fn inverse_f_increasing_in_p() {
        let lo = inverse_f(0.9, 3.0, 50.0).unwrap();
        let hi = inverse_f(0.99, 3.0, 50.0).unwrap();
        assert!(lo < hi);
    }

    #[test]
    fn inverse_f_bad_df() {
        if let Err(e) = inverse_f(0.95, 0.0, 10.0) {
            assert_eq!(
                String::from(
                    "while evaluating distribution function: degrees of freedom \
                    should be positive; got (0, 10)"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }

    #[test]
    fn inverse_f_unstable_region() {
        // df2 = 1 with a high quantile leaves no admissible root
        assert!(inverse_f(0.99, 2.0, 1.0).is_err());
    }
}
