use log::debug;

use super::bspline::BSpline;
use super::kind::InterpKind;
use crate::data::model::Series;
use crate::error::FitError;

/// Slack allowed at the domain edges for rounding in grid positions.
const DOMAIN_TOLERANCE: f64 = 1e-9;

/// Minimum number of samples for any kind.
pub const MIN_SAMPLES: usize = 2;

// ---------------------------------------------------------------------------
// FittedCurve
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Model {
    /// Sample boundaries: halfway points between neighbouring sites.
    Nearest { bounds: Vec<f64> },
    Previous,
    Spline(BSpline),
}

/// A continuous function over `[min_x, max_x]` through every sample of a
/// series.
#[derive(Debug, Clone)]
pub struct FittedCurve {
    kind: InterpKind,
    xs: Vec<f64>,
    ys: Vec<f64>,
    model: Model,
}

/// Fit `series` with the given interpolation kind.
///
/// Spline kinds need `order + 1` samples; with fewer (but at least two) the
/// order drops to `len - 1`.
pub fn fit(series: &Series, kind: InterpKind) -> Result<FittedCurve, FitError> {
    let samples = series.samples();
    if samples.len() < MIN_SAMPLES {
        return Err(FitError::TooFewSamples {
            found: samples.len(),
            required: MIN_SAMPLES,
        });
    }
    for (position, pair) in samples.windows(2).enumerate() {
        if pair[1].index <= pair[0].index {
            return Err(FitError::NonIncreasingIndex {
                position: position + 1,
            });
        }
    }
    if let Some(position) = samples.iter().position(|s| !s.value.is_finite()) {
        return Err(FitError::NonFiniteValue { position });
    }

    let xs = series.xs();
    let ys = series.ys();

    let model = match kind {
        InterpKind::Nearest => Model::Nearest {
            bounds: xs.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect(),
        },
        InterpKind::ZeroOrderHold => Model::Previous,
        InterpKind::Linear | InterpKind::Quadratic | InterpKind::Cubic => {
            let degree = kind.order().min(xs.len() - 1);
            if degree < kind.order() {
                debug!(
                    "{} samples: {kind} fit reduced to degree {degree}",
                    xs.len()
                );
            }
            Model::Spline(BSpline::interpolate(&xs, &ys, degree)?)
        }
    };

    Ok(FittedCurve {
        kind,
        xs,
        ys,
        model,
    })
}

impl FittedCurve {
    pub fn kind(&self) -> InterpKind {
        self.kind
    }

    /// Effective polynomial order after any reduction for short series.
    pub fn order(&self) -> usize {
        match &self.model {
            Model::Spline(spline) => spline.degree(),
            _ => 0,
        }
    }

    /// Number of knots.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn min_x(&self) -> f64 {
        self.xs[0]
    }

    pub fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    /// Knot sites and values, for plotting.
    pub fn knots(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// Evaluate the curve.  Positions outside the fitted domain are refused
    /// rather than extrapolated.
    pub fn evaluate(&self, x: f64) -> Result<f64, FitError> {
        let (min, max) = (self.min_x(), self.max_x());
        if !(x >= min - DOMAIN_TOLERANCE && x <= max + DOMAIN_TOLERANCE) {
            return Err(FitError::OutOfDomain { x, min, max });
        }
        let x = x.clamp(min, max);

        let value = match &self.model {
            Model::Nearest { bounds } => self.ys[bounds.partition_point(|&b| b < x)],
            Model::Previous => {
                let i = self.xs.partition_point(|&site| site <= x);
                self.ys[i.saturating_sub(1)]
            }
            Model::Spline(spline) => spline.evaluate(x),
        };
        Ok(value)
    }
}
