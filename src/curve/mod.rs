/// Curve layer: fit a continuous function through a series and sample it
/// back onto regular grids.
///
/// ```text
///   Series ──fit(kind)──▶ FittedCurve ──┬─ preview_resample  (N points)
///                                       └─ export_resample   (step 1/10)
/// ```

pub mod bspline;
pub mod fit;
pub mod kind;

pub use fit::{fit, FittedCurve};
pub use kind::InterpKind;

use crate::data::model::ResampledPoint;
use crate::error::FitError;

/// Export grid points per index unit (a step of 0.1).
pub const EXPORT_SUBDIVISIONS: usize = 10;

// ---------------------------------------------------------------------------
// Resampling
// ---------------------------------------------------------------------------

/// `N` evenly spaced points across the whole domain, end points included.
/// Used for the preview overlay and for the reference trailing pad.
pub fn preview_resample(curve: &FittedCurve) -> Result<Vec<ResampledPoint>, FitError> {
    let n = curve.len();
    let (min, max) = (curve.min_x(), curve.max_x());
    let step = (max - min) / (n - 1) as f64;

    (0..n)
        .map(|position| {
            let x = if position == n - 1 {
                max
            } else {
                min + step * position as f64
            };
            Ok(ResampledPoint {
                position,
                x,
                value: curve.evaluate(x)?,
            })
        })
        .collect()
}

/// Points at `min + j / subdivisions` for every such position strictly
/// below the right end of the domain.
pub fn export_resample(
    curve: &FittedCurve,
    subdivisions: usize,
) -> Result<Vec<ResampledPoint>, FitError> {
    let min = curve.min_x();
    let count = export_count(curve.max_x() - min, subdivisions);

    (0..count)
        .map(|position| {
            let x = min + position as f64 / subdivisions as f64;
            Ok(ResampledPoint {
                position,
                x,
                value: curve.evaluate(x)?,
            })
        })
        .collect()
}

/// Number of grid steps `j` with `j / subdivisions < span`.
pub fn export_count(span: f64, subdivisions: usize) -> usize {
    let scaled = span * subdivisions as f64;
    let rounded = scaled.round();
    // Integer spans land exactly on the end point, which is excluded.
    if (scaled - rounded).abs() < 1e-9 {
        rounded as usize
    } else {
        scaled.ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Series;

    #[test]
    fn export_count_is_ten_per_index_unit() {
        for n in 2..40usize {
            let s = Series::from_values(&vec![1.0; n]);
            let curve = fit(&s, InterpKind::Cubic).unwrap();
            let points = export_resample(&curve, EXPORT_SUBDIVISIONS).unwrap();
            assert_eq!(points.len(), (n - 1) * 10, "n = {n}");
        }
        assert_eq!(export_count(2.55, 10), 26);
        assert_eq!(export_count(0.0, 10), 0);
    }

    #[test]
    fn export_positions_increase_and_stay_below_the_end() {
        let s = Series::from_values(&[5.0, 1.0, 8.0, 2.0, 6.0]);
        let curve = fit(&s, InterpKind::Cubic).unwrap();
        let points = export_resample(&curve, EXPORT_SUBDIVISIONS).unwrap();
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.position, i);
            assert!(p.x < 4.0);
        }
        assert_eq!(points[0].value, 5.0);
        assert!((points[20].value - 8.0).abs() < 1e-9);
        assert!((points.last().unwrap().x - 3.9).abs() < 1e-12);
    }

    #[test]
    fn preview_covers_the_domain_with_n_points() {
        let values = [2.0, 4.0, 3.0, 9.0, 1.0, 0.5];
        let curve = fit(&Series::from_values(&values), InterpKind::Cubic).unwrap();
        let points = preview_resample(&curve).unwrap();
        assert_eq!(points.len(), values.len());
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points.last().unwrap().x, 5.0);
        for (p, v) in points.iter().zip(values) {
            assert!((p.value - v).abs() < 1e-9);
        }
    }
}
