use crate::exg::ExgError;
/// Ordinary least-squares slope of `y` against `x`.
///
/// `m = (N * sum(x*y) - sum(x) * sum(y)) / (N * sum(x*x) - sum(x)^2)`
///
/// Only the slope is returned. The intercept is never needed by the start search.
pub fn least_squares_slope(x: &[f64], y: &[f64]) -> Result<f64, ExgError> {
    if x.len() != y.len() {
        return Err(ExgError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(ExgError::DegenerateWindow(n));
    }
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        sum_x += xi;
        sum_y += yi;
        sum_xy += xi * yi;
        sum_xx += xi * xi;
    }
    let n = n as f64;
    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return Err(ExgError::ZeroVariance);
    }
    Ok((n * sum_xy - sum_x * sum_y) / denominator)
}
#[cfg(test)]
mod tests {
    use super::*;
    fn line(a: f64, b: f64, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|x| a * x + b).collect()
    }
    #[test]
    fn recovers_exact_line_slope() {
        for &n in &[2usize, 3, 17, 100, 1000] {
            let xs: Vec<f64> = (0..n).map(|i| 1.75 + i as f64 / 1600.0).collect();
            for &(a, b) in &[(1.0, 0.0), (0.5, -3.0), (-2.25, 10.0), (1.0, 0.999)] {
                let m = least_squares_slope(&xs, &line(a, b, &xs)).unwrap();
                assert!((m - a).abs() < 1e-6, "n={n} a={a} b={b} m={m}");
            }
        }
    }
    #[test]
    fn intercept_does_not_change_slope() {
        let xs: Vec<f64> = (0..50).map(|i| i as f64 * 0.1).collect();
        let a = least_squares_slope(&xs, &line(3.0, 0.0, &xs)).unwrap();
        let b = least_squares_slope(&xs, &line(3.0, 1e3, &xs)).unwrap();
        assert!((a - b).abs() < 1e-9);
    }
    #[test]
    fn rejects_short_or_mismatched_input() {
        assert!(matches!(
            least_squares_slope(&[1.0], &[1.0]),
            Err(ExgError::DegenerateWindow(1))
        ));
        assert!(matches!(
            least_squares_slope(&[1.0, 2.0], &[1.0]),
            Err(ExgError::LengthMismatch { x: 2, y: 1 })
        ));
    }
    #[test]
    fn constant_x_has_no_slope() {
        let err = least_squares_slope(&[2.0, 2.0, 2.0], &[0.0, 1.0, 2.0]).unwrap_err();
        assert!(matches!(err, ExgError::ZeroVariance));
    }
}
