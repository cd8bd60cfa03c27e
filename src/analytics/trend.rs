//! LOWESS trend estimation for category percentage series
//!
//! Locally-weighted scatterplot smoothing (Cleveland): for each x, fit a
//! weighted linear regression over its nearest neighbors with tricube
//! distance weights, then repeat with bisquare robustness weights derived
//! from the median absolute residual.

use statrs::statistics::{Data, OrderStatistics};

/// Fraction of points used in each local regression
const LOWESS_FRACTION: f64 = 2.0 / 3.0;

/// Number of robustifying re-weighting passes
const LOWESS_ITERATIONS: usize = 5;

/// One smoothed point of a trend curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
}

/// Estimate a smoothed trend over one category's percentage series
///
/// Non-finite percentages (NaN rows from years with no assignments) are
/// dropped from the smoothing input. Years before the first strictly
/// positive value are excluded entirely so a late-appearing category is not
/// dragged toward zero; a series with no positive value yields an empty
/// curve rather than a flat zero line. Output x-order matches input order
/// and the computation is deterministic.
pub fn trend(series: &[(i32, f64)]) -> Vec<TrendPoint> {
    let finite: Vec<(i32, f64)> = series
        .iter()
        .copied()
        .filter(|(_, value)| value.is_finite())
        .collect();

    let Some(first_non_zero) = finite.iter().position(|(_, value)| *value > 0.0) else {
        return Vec::new();
    };

    let tail = &finite[first_non_zero..];
    let x: Vec<f64> = tail.iter().map(|(year, _)| *year as f64).collect();
    let y: Vec<f64> = tail.iter().map(|(_, value)| *value).collect();

    let smoothed = lowess(&x, &y, LOWESS_FRACTION, LOWESS_ITERATIONS);

    tail.iter()
        .zip(smoothed)
        .map(|(&(year, _), value)| TrendPoint { year, value })
        .collect()
}

/// Locally-weighted scatterplot smoothing
///
/// `x` must be sorted ascending. `frac` is the fraction of points in each
/// local neighborhood; `iterations` is the number of robustness passes after
/// the initial fit. Returns one smoothed value per input point.
pub fn lowess(x: &[f64], y: &[f64], frac: f64, iterations: usize) -> Vec<f64> {
    let n = x.len();
    assert_eq!(n, y.len(), "x and y must have the same length");

    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![y[0]];
    }

    let neighbors = ((frac * n as f64).ceil() as usize).clamp(2, n);

    let mut robustness = vec![1.0f64; n];
    let mut fitted = vec![0.0f64; n];

    for pass in 0..=iterations {
        for i in 0..n {
            let (lo, hi) = neighborhood(x, i, neighbors);
            let h = (x[i] - x[lo]).max(x[hi] - x[i]);
            fitted[i] = local_fit(x, y, &robustness, i, lo, hi, h);
        }

        if pass == iterations {
            break;
        }

        // Bisquare robustness weights from the median absolute residual
        let abs_residuals: Vec<f64> = y
            .iter()
            .zip(&fitted)
            .map(|(yi, fi)| (yi - fi).abs())
            .collect();
        let mut data = Data::new(abs_residuals.clone());
        let s = data.median();
        if s <= 0.0 {
            // Exact fit; further passes cannot change anything
            break;
        }

        for (weight, residual) in robustness.iter_mut().zip(&abs_residuals) {
            let u = residual / (6.0 * s);
            *weight = if u < 1.0 {
                let v = 1.0 - u * u;
                v * v
            } else {
                0.0
            };
        }
    }

    fitted
}

/// Find the contiguous window of `size` points nearest to `x[i]`
///
/// Returns inclusive bounds (lo, hi). Sliding from an initial guess
/// converges because the max-distance cost is unimodal in the window start.
fn neighborhood(x: &[f64], i: usize, size: usize) -> (usize, usize) {
    let n = x.len();
    let mut lo = i.saturating_sub(size / 2).min(n - size);

    while lo > 0 && x[i] - x[lo - 1] < x[lo + size - 1] - x[i] {
        lo -= 1;
    }
    while lo + size < n && x[lo + size] - x[i] < x[i] - x[lo] {
        lo += 1;
    }

    (lo, lo + size - 1)
}

/// Weighted linear fit over the window, evaluated at `x[i]`
#[allow(clippy::too_many_arguments)]
fn local_fit(
    x: &[f64],
    y: &[f64],
    robustness: &[f64],
    i: usize,
    lo: usize,
    hi: usize,
    h: f64,
) -> f64 {
    // Center x on the evaluation point; the fitted value is the intercept
    let mut sw = 0.0;
    let mut swd = 0.0;
    let mut swy = 0.0;
    let mut swdd = 0.0;
    let mut swdy = 0.0;

    for j in lo..=hi {
        let dx = x[j] - x[i];
        let w = tricube_weight(dx.abs(), h) * robustness[j];
        if w <= 0.0 {
            continue;
        }

        sw += w;
        swd += w * dx;
        swy += w * y[j];
        swdd += w * dx * dx;
        swdy += w * dx * y[j];
    }

    if sw <= 0.0 {
        // Every neighbor was weighted out; fall back to the raw value
        return y[i];
    }

    let denom = sw * swdd - swd * swd;
    if denom.abs() < 1e-12 * (sw * swdd).max(1.0) {
        // Degenerate spread, use the weighted mean
        return swy / sw;
    }

    (swy * swdd - swd * swdy) / denom
}

/// Tricube kernel: (1 - u^3)^3 for u in [0, 1), else 0
fn tricube_weight(distance: f64, h: f64) -> f64 {
    if h <= 0.0 {
        // All window points share one x; weight them equally
        return 1.0;
    }
    let u = distance / h;
    if u >= 1.0 {
        return 0.0;
    }
    let v = 1.0 - u * u * u;
    v * v * v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero_series_is_empty() {
        let series = vec![(2000, 0.0), (2001, 0.0), (2002, 0.0)];
        assert!(trend(&series).is_empty());
    }

    #[test]
    fn test_empty_series_is_empty() {
        assert!(trend(&[]).is_empty());
    }

    #[test]
    fn test_leading_zero_years_are_excluded() {
        let series = vec![(2000, 0.0), (2001, 0.0), (2002, 5.0), (2003, 7.0)];
        let curve = trend(&series);

        let years: Vec<i32> = curve.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2002, 2003]);

        // Two points fit exactly by the local line
        assert!((curve[0].value - 5.0).abs() < 1e-9);
        assert!((curve[1].value - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_nan_years_are_dropped() {
        let series = vec![
            (2000, f64::NAN),
            (2001, 4.0),
            (2002, f64::NAN),
            (2003, 6.0),
            (2004, 5.0),
        ];
        let curve = trend(&series);

        let years: Vec<i32> = curve.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2001, 2003, 2004]);
        assert!(curve.iter().all(|p| p.value.is_finite()));
    }

    #[test]
    fn test_constant_series_smooths_to_constant() {
        let series: Vec<(i32, f64)> = (2000..2010).map(|year| (year, 12.5)).collect();
        let curve = trend(&series);

        assert_eq!(curve.len(), 10);
        for point in curve {
            assert!((point.value - 12.5).abs() < 1e-9, "got {}", point.value);
        }
    }

    #[test]
    fn test_linear_series_is_reproduced() {
        // A straight line survives local linear fits unchanged
        let series: Vec<(i32, f64)> = (0..12).map(|i| (1990 + i, 2.0 + i as f64)).collect();
        let curve = trend(&series);

        for (point, (year, value)) in curve.iter().zip(series) {
            assert_eq!(point.year, year);
            assert!((point.value - value).abs() < 1e-6, "year {year}");
        }
    }

    #[test]
    fn test_deterministic() {
        let series: Vec<(i32, f64)> = (0..20)
            .map(|i| (1980 + i, ((i * 7) % 11) as f64 + 1.0))
            .collect();
        let a = trend(&series);
        let b = trend(&series);
        assert_eq!(a, b);
    }

    #[test]
    fn test_outlier_is_damped_by_robustness() {
        let mut series: Vec<(i32, f64)> = (0..15).map(|i| (2000 + i, 10.0)).collect();
        series[7].1 = 100.0;

        let curve = trend(&series);
        // The spike's smoothed value sits far below the raw outlier
        let spike = curve.iter().find(|p| p.year == 2007).unwrap();
        assert!(spike.value < 40.0, "outlier not damped: {}", spike.value);
    }

    #[test]
    fn test_lowess_window_bounds() {
        let x: Vec<f64> = (0..9).map(|i| i as f64).collect();
        assert_eq!(neighborhood(&x, 0, 6), (0, 5));
        assert_eq!(neighborhood(&x, 8, 6), (3, 8));
        assert_eq!(neighborhood(&x, 4, 6), (1, 6));
    }
}
