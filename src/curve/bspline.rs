use crate::error::FitError;

// ---------------------------------------------------------------------------
// Interpolating B-spline
// ---------------------------------------------------------------------------

/// A B-spline of degree `k` that passes through every knot it was built from.
///
/// Knot vectors follow the not-a-knot convention: odd degrees use the inner
/// sample sites as interior knots, degree 2 uses the midpoints between
/// samples minus the first and last one.  End knots repeat `k + 1` times.
#[derive(Debug, Clone)]
pub struct BSpline {
    degree: usize,
    knots: Vec<f64>,
    coeffs: Vec<f64>,
}

impl BSpline {
    /// Solve for the spline through `(xs[i], ys[i])`.
    ///
    /// Callers guarantee `xs` is strictly increasing, the lengths match, and
    /// `1 <= degree < xs.len()`.
    pub fn interpolate(xs: &[f64], ys: &[f64], degree: usize) -> Result<Self, FitError> {
        let n = xs.len();
        debug_assert_eq!(n, ys.len());
        debug_assert!(degree >= 1 && degree < n);

        let knots = knot_vector(xs, degree);
        let mut system = Banded::new(n, degree, degree);
        let mut basis = vec![0.0; degree + 1];

        for (row, &x) in xs.iter().enumerate() {
            let span = find_span(&knots, degree, n, x);
            basis_funs(&knots, degree, span, x, &mut basis);
            for (r, &b) in basis.iter().enumerate() {
                let col = span - degree + r;
                if b != 0.0 {
                    if !system.in_band(row, col) {
                        return Err(FitError::Singular);
                    }
                    system.set(row, col, b);
                }
            }
        }

        let coeffs = system.solve(ys.to_vec())?;
        Ok(BSpline {
            degree,
            knots,
            coeffs,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Evaluate at `x`.  `x` must lie inside the knot range.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.coeffs.len();
        let k = self.degree;
        let span = find_span(&self.knots, k, n, x);
        let mut basis = vec![0.0; k + 1];
        basis_funs(&self.knots, k, span, x, &mut basis);
        basis
            .iter()
            .enumerate()
            .map(|(r, b)| b * self.coeffs[span - k + r])
            .sum()
    }
}

fn knot_vector(xs: &[f64], k: usize) -> Vec<f64> {
    let n = xs.len();
    let first = xs[0];
    let last = xs[n - 1];

    let interior: Vec<f64> = if k % 2 == 1 {
        let m = (k - 1) / 2;
        xs[m + 1..n - m - 1].to_vec()
    } else {
        let mids: Vec<f64> = xs.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();
        let drop = k / 2;
        mids[drop..mids.len() - drop].to_vec()
    };

    let mut knots = Vec::with_capacity(n + k + 1);
    knots.extend(std::iter::repeat(first).take(k + 1));
    knots.extend(interior);
    knots.extend(std::iter::repeat(last).take(k + 1));
    debug_assert_eq!(knots.len(), n + k + 1);
    knots
}

/// Index `l` in `k..n` with `knots[l] <= x < knots[l + 1]`; the right end
/// of the domain belongs to the last span.
fn find_span(knots: &[f64], k: usize, n: usize, x: f64) -> usize {
    let inner = &knots[k + 1..n];
    (k + inner.partition_point(|&t| t <= x)).min(n - 1)
}

/// The `k + 1` basis functions that are non-zero on `span`, evaluated at `x`.
fn basis_funs(knots: &[f64], k: usize, span: usize, x: f64, out: &mut [f64]) {
    let mut left = vec![0.0; k + 1];
    let mut right = vec![0.0; k + 1];
    out[0] = 1.0;
    for j in 1..=k {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = out[r] / (right[r + 1] + left[j - r]);
            out[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        out[j] = saved;
    }
}

// ---------------------------------------------------------------------------
// Banded linear system
// ---------------------------------------------------------------------------

/// Square matrix with `kl` sub- and `ku` super-diagonals, row-major.
///
/// B-spline collocation matrices are totally positive, so elimination
/// without pivoting is stable and keeps fill-in inside the band.
struct Banded {
    n: usize,
    kl: usize,
    ku: usize,
    data: Vec<f64>,
}

impl Banded {
    fn new(n: usize, kl: usize, ku: usize) -> Self {
        Banded {
            n,
            kl,
            ku,
            data: vec![0.0; n * (kl + ku + 1)],
        }
    }

    fn in_band(&self, i: usize, j: usize) -> bool {
        j + self.kl >= i && j <= i + self.ku
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        i * (self.kl + self.ku + 1) + (j + self.kl - i)
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.offset(i, j)]
    }

    fn set(&mut self, i: usize, j: usize, v: f64) {
        let o = self.offset(i, j);
        self.data[o] = v;
    }

    /// Solve `A x = b` in place.
    fn solve(mut self, mut b: Vec<f64>) -> Result<Vec<f64>, FitError> {
        let n = self.n;
        for c in 0..n {
            let pivot = self.get(c, c);
            if pivot == 0.0 || !pivot.is_finite() {
                return Err(FitError::Singular);
            }
            let last_row = (c + self.kl).min(n - 1);
            let last_col = (c + self.ku).min(n - 1);
            for r in c + 1..=last_row {
                let factor = self.get(r, c) / pivot;
                if factor == 0.0 {
                    continue;
                }
                for j in c..=last_col {
                    let v = self.get(r, j) - factor * self.get(c, j);
                    self.set(r, j, v);
                }
                b[r] -= factor * b[c];
            }
        }

        for c in (0..n).rev() {
            let last_col = (c + self.ku).min(n - 1);
            let tail: f64 = (c + 1..=last_col).map(|j| self.get(c, j) * b[j]).sum();
            b[c] = (b[c] - tail) / self.get(c, c);
        }
        Ok(b)
    }
}
