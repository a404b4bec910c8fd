//! Matrix exponential by Padé scaling-and-squaring.
//!
//! Implements the degree-13 variant of
//!
//!   N. J. Higham, "The Scaling and Squaring Method for the Matrix
//!   Exponential Revisited", SIAM J. Matrix Anal. Appl. 26(4), 2005.
//!
//! Algorithm:
//!   s = max(0, ⌈log₂(‖A‖₁ / θ₁₃)⌉)
//!   A ← A / 2^s
//!   U = A · [A⁶(b₁₃A⁶ + b₁₁A⁴ + b₉A²) + b₇A⁶ + b₅A⁴ + b₃A² + b₁I]
//!   V =      A⁶(b₁₂A⁶ + b₁₀A⁴ + b₈A²) + b₆A⁶ + b₄A⁴ + b₂A² + b₀I
//!   R = (V − U)⁻¹ (V + U)
//!   exp(A) = R^(2^s)

use ndarray::Array2;
use num_complex::Complex64;
use tracing::trace;

use crate::error::{OperatorError, OperatorResult};

/// Largest ‖A‖₁ for which the degree-13 Padé approximant is accurate to
/// unit roundoff without scaling.
const THETA_13: f64 = 5.371_920_351_148_152;

/// Coefficients b₀..b₁₃ of the degree-13 Padé approximant.
const PADE_13: [f64; 14] = [
    64_764_752_532_480_000.0,
    32_382_376_266_240_000.0,
    7_771_770_303_897_600.0,
    1_187_353_796_428_800.0,
    129_060_195_264_000.0,
    10_559_470_521_600.0,
    670_442_572_800.0,
    33_522_128_640.0,
    1_323_241_920.0,
    40_840_800.0,
    960_960.0,
    16_380.0,
    182.0,
    1.0,
];

/// Compute `exp(A)` for a square complex matrix.
pub fn expm(a: &Array2<Complex64>) -> OperatorResult<Array2<Complex64>> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(OperatorError::NotSquare { rows, cols });
    }
    if rows == 0 {
        return Ok(a.clone());
    }

    let norm = one_norm(a);
    #[allow(clippy::cast_possible_truncation)]
    let squarings = if norm > THETA_13 {
        (norm / THETA_13).log2().ceil() as i32
    } else {
        0
    };
    trace!(norm, squarings, dim = rows, "expm");

    let a = a.mapv(|z| z * 2f64.powi(-squarings));
    let b = &PADE_13;
    let ident = Array2::<Complex64>::eye(rows);

    let a2 = a.dot(&a);
    let a4 = a2.dot(&a2);
    let a6 = a4.dot(&a2);

    let u_inner = &a6 * b[13] + &a4 * b[11] + &a2 * b[9];
    let u_outer = a6.dot(&u_inner) + &a6 * b[7] + &a4 * b[5] + &a2 * b[3] + &ident * b[1];
    let u = a.dot(&u_outer);

    let v_inner = &a6 * b[12] + &a4 * b[10] + &a2 * b[8];
    let v = a6.dot(&v_inner) + &a6 * b[6] + &a4 * b[4] + &a2 * b[2] + &ident * b[0];

    let numerator = &v + &u;
    let denominator = &v - &u;
    let mut result = solve(&denominator, &numerator)?;

    for _ in 0..squarings {
        result = result.dot(&result);
    }
    Ok(result)
}

/// Maximum absolute column sum.
pub fn one_norm(a: &Array2<Complex64>) -> f64 {
    a.columns()
        .into_iter()
        .map(|col| col.iter().map(|z| z.norm()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Solve `A·X = B` by Gaussian elimination with partial pivoting.
pub fn solve(a: &Array2<Complex64>, b: &Array2<Complex64>) -> OperatorResult<Array2<Complex64>> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(OperatorError::NotSquare { rows, cols });
    }
    if b.nrows() != rows {
        return Err(OperatorError::DimensionMismatch {
            expected: rows,
            got: b.nrows(),
        });
    }

    let n = rows;
    let mut lu = a.clone();
    let mut x = b.clone();

    for k in 0..n {
        let pivot = (k..n)
            .max_by(|&i, &j| lu[[i, k]].norm().total_cmp(&lu[[j, k]].norm()))
            .unwrap_or(k);
        if lu[[pivot, k]].norm() == 0.0 {
            return Err(OperatorError::SingularMatrix);
        }
        if pivot != k {
            for j in 0..n {
                lu.swap([k, j], [pivot, j]);
            }
            for j in 0..x.ncols() {
                x.swap([k, j], [pivot, j]);
            }
        }

        let diag = lu[[k, k]];
        for i in (k + 1)..n {
            let factor = lu[[i, k]] / diag;
            if factor.norm() == 0.0 {
                continue;
            }
            for j in k..n {
                let upper = lu[[k, j]];
                lu[[i, j]] -= factor * upper;
            }
            for j in 0..x.ncols() {
                let upper = x[[k, j]];
                x[[i, j]] -= factor * upper;
            }
        }
    }

    for i in (0..n).rev() {
        for j in 0..x.ncols() {
            let mut acc = x[[i, j]];
            for m in (i + 1)..n {
                acc -= lu[[i, m]] * x[[m, j]];
            }
            x[[i, j]] = acc / lu[[i, i]];
        }
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn assert_close(a: &Array2<Complex64>, b: &Array2<Complex64>, tol: f64) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).norm() < tol, "{x} vs {y}");
        }
    }

    #[test]
    fn test_expm_zero_is_identity() {
        let zero = Array2::<Complex64>::zeros((4, 4));
        assert_close(&expm(&zero).unwrap(), &Array2::eye(4), 1e-14);
    }

    #[test]
    fn test_expm_diagonal() {
        let a = array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(-2.0, 0.0)]];
        let expected = array![
            [c(1f64.exp(), 0.0), c(0.0, 0.0)],
            [c(0.0, 0.0), c((-2f64).exp(), 0.0)]
        ];
        assert_close(&expm(&a).unwrap(), &expected, 1e-12);
    }

    #[test]
    fn test_expm_pauli_x_rotation_with_scaling() {
        // exp(-iθX) = cos θ I − i sin θ X; θ = 20 forces several squarings.
        let theta = 20.0;
        let a = array![[c(0.0, 0.0), c(0.0, -theta)], [c(0.0, -theta), c(0.0, 0.0)]];
        let expected = array![
            [c(theta.cos(), 0.0), c(0.0, -theta.sin())],
            [c(0.0, -theta.sin()), c(theta.cos(), 0.0)]
        ];
        assert_close(&expm(&a).unwrap(), &expected, 1e-10);
    }

    #[test]
    fn test_expm_nilpotent() {
        let a = array![[c(0.0, 0.0), c(3.0, 0.0)], [c(0.0, 0.0), c(0.0, 0.0)]];
        let expected = array![[c(1.0, 0.0), c(3.0, 0.0)], [c(0.0, 0.0), c(1.0, 0.0)]];
        assert_close(&expm(&a).unwrap(), &expected, 1e-12);
    }

    #[test]
    fn test_expm_rejects_non_square() {
        let a = Array2::<Complex64>::zeros((2, 3));
        assert!(matches!(
            expm(&a),
            Err(OperatorError::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_solve_with_pivoting() {
        let a = array![[c(0.0, 0.0), c(1.0, 0.0)], [c(2.0, 0.0), c(0.0, 0.0)]];
        let b = array![[c(3.0, 0.0)], [c(4.0, 0.0)]];
        let x = solve(&a, &b).unwrap();
        assert_close(&x, &array![[c(2.0, 0.0)], [c(3.0, 0.0)]], 1e-14);
    }

    #[test]
    fn test_solve_singular() {
        let a = array![[c(1.0, 0.0), c(2.0, 0.0)], [c(2.0, 0.0), c(4.0, 0.0)]];
        let b = Array2::<Complex64>::eye(2);
        assert!(matches!(solve(&a, &b), Err(OperatorError::SingularMatrix)));
    }

    #[test]
    fn test_one_norm() {
        let a = array![[c(1.0, 0.0), c(0.0, -2.0)], [c(-3.0, 0.0), c(0.0, 0.0)]];
        assert!((one_norm(&a) - 4.0).abs() < 1e-15);
    }
}
