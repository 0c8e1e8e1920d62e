//! Quasi-Newton optimization for full-batch training.
//!
//! [`Lbfgs`] implements the limited-memory BFGS method: it approximates
//! inverse-Hessian curvature from the last few gradient differences (the
//! two-loop recursion) and picks step lengths with a backtracking line
//! search under the Armijo sufficient-decrease condition.
//!
//! The solver is decoupled from any model: it minimizes an arbitrary
//! objective over a flat parameter vector. Models plug in by exposing their
//! parameters as `Vec<f64>` and their penalized loss as a value/gradient
//! closure, which keeps the training algorithm swappable without touching
//! model or pipeline code.
//!
//! # Example
//! ```
//! use solar_ann::optimizer::Lbfgs;
//!
//! // Minimize (x - 3)^2 + (y + 1)^2.
//! let solver = Lbfgs::default();
//! let (x, summary) = solver.minimize(vec![0.0, 0.0], |p| {
//!     let value = (p[0] - 3.0).powi(2) + (p[1] + 1.0).powi(2);
//!     let grad = vec![2.0 * (p[0] - 3.0), 2.0 * (p[1] + 1.0)];
//!     (value, grad)
//! });
//! assert!(summary.converged);
//! assert!((x[0] - 3.0).abs() < 1e-4);
//! ```

use std::collections::VecDeque;

/// Limited-memory BFGS minimizer over a flat `Vec<f64>` parameter vector.
#[derive(Clone, Debug)]
pub struct Lbfgs {
    /// Number of curvature pairs retained for the two-loop recursion.
    pub memory: usize,
    /// Hard cap on outer iterations.
    pub max_iter: usize,
    /// Stop when the gradient infinity norm falls at or below this value.
    pub tol: f64,
    /// Armijo sufficient-decrease constant.
    pub c1: f64,
    /// Maximum number of step halvings per line search.
    pub max_line_search: usize,
}

impl Default for Lbfgs {
    fn default() -> Self {
        Self {
            memory: 10,
            max_iter: 1000,
            tol: 1e-4,
            c1: 1e-4,
            max_line_search: 30,
        }
    }
}

/// Outcome of a minimization run.
#[derive(Clone, Copy, Debug)]
pub struct LbfgsSummary {
    /// Outer iterations performed.
    pub iterations: usize,
    /// Objective value at the returned point.
    pub final_value: f64,
    /// Whether the gradient tolerance was met before the iteration cap.
    pub converged: bool,
}

impl Lbfgs {
    /// Sets the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the gradient tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Minimizes `objective`, starting from `x0`.
    ///
    /// `objective` must return the value and gradient at the queried point.
    /// The run ends when the gradient infinity norm drops to `tol`, the
    /// iteration cap is reached, or the line search cannot make progress;
    /// whether the tolerance was met is recorded in the summary and is not
    /// an error.
    pub fn minimize<F>(&self, x0: Vec<f64>, mut objective: F) -> (Vec<f64>, LbfgsSummary)
    where
        F: FnMut(&[f64]) -> (f64, Vec<f64>),
    {
        let mut x = x0;
        let (mut fx, mut grad) = objective(&x);

        let mut s_hist: VecDeque<Vec<f64>> = VecDeque::with_capacity(self.memory);
        let mut y_hist: VecDeque<Vec<f64>> = VecDeque::with_capacity(self.memory);
        let mut rho_hist: VecDeque<f64> = VecDeque::with_capacity(self.memory);

        let mut iterations = 0;
        let mut converged = inf_norm(&grad) <= self.tol;

        while !converged && iterations < self.max_iter {
            let mut direction = self.search_direction(&grad, &s_hist, &y_hist, &rho_hist);
            let mut dir_grad = dot(&direction, &grad);
            if dir_grad >= 0.0 {
                // Curvature history produced a non-descent direction; fall
                // back to steepest descent.
                direction = grad.iter().map(|g| -g).collect();
                dir_grad = -dot(&grad, &grad);
            }

            // First step is scaled down so a raw gradient of large magnitude
            // does not overshoot; afterwards the unit step is tried first.
            let mut step = if iterations == 0 {
                (1.0 / l2_norm(&grad)).min(1.0)
            } else {
                1.0
            };

            let mut accepted = None;
            for _ in 0..self.max_line_search {
                let x_new: Vec<f64> = x
                    .iter()
                    .zip(&direction)
                    .map(|(xi, di)| xi + step * di)
                    .collect();
                let (f_new, g_new) = objective(&x_new);
                if f_new.is_finite() && f_new <= fx + self.c1 * step * dir_grad {
                    accepted = Some((x_new, f_new, g_new));
                    break;
                }
                step *= 0.5;
            }

            let Some((x_new, f_new, g_new)) = accepted else {
                // No acceptable step along this direction; give up here.
                break;
            };

            let s: Vec<f64> = x_new.iter().zip(&x).map(|(a, b)| a - b).collect();
            let y: Vec<f64> = g_new.iter().zip(&grad).map(|(a, b)| a - b).collect();
            let sy = dot(&s, &y);
            // Skip pairs with non-positive curvature to keep the inverse
            // Hessian approximation positive definite.
            if sy > 1e-10 {
                if s_hist.len() == self.memory {
                    s_hist.pop_front();
                    y_hist.pop_front();
                    rho_hist.pop_front();
                }
                s_hist.push_back(s);
                y_hist.push_back(y);
                rho_hist.push_back(1.0 / sy);
            }

            x = x_new;
            fx = f_new;
            grad = g_new;
            iterations += 1;
            converged = inf_norm(&grad) <= self.tol;
        }

        (
            x,
            LbfgsSummary {
                iterations,
                final_value: fx,
                converged,
            },
        )
    }

    /// Two-loop recursion: applies the implicit inverse-Hessian
    /// approximation to the negative gradient.
    fn search_direction(
        &self,
        grad: &[f64],
        s_hist: &VecDeque<Vec<f64>>,
        y_hist: &VecDeque<Vec<f64>>,
        rho_hist: &VecDeque<f64>,
    ) -> Vec<f64> {
        let mut q = grad.to_vec();
        let k = s_hist.len();
        let mut alphas = vec![0.0; k];

        for i in (0..k).rev() {
            alphas[i] = rho_hist[i] * dot(&s_hist[i], &q);
            axpy(-alphas[i], &y_hist[i], &mut q);
        }

        // Scale by the most recent curvature estimate (identity when empty).
        if let (Some(s), Some(y)) = (s_hist.back(), y_hist.back()) {
            let gamma = dot(s, y) / dot(y, y);
            for v in &mut q {
                *v *= gamma;
            }
        }

        for i in 0..k {
            let beta = rho_hist[i] * dot(&y_hist[i], &q);
            axpy(alphas[i] - beta, &s_hist[i], &mut q);
        }

        q.iter().map(|v| -v).collect()
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// `y += a * x`
fn axpy(a: f64, x: &[f64], y: &mut [f64]) {
    for (yi, xi) in y.iter_mut().zip(x) {
        *yi += a * xi;
    }
}

fn inf_norm(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |acc, x| acc.max(x.abs()))
}

fn l2_norm(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}
