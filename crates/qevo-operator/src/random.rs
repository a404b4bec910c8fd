//! Random problem instances.

use ndarray::Array2;
use num_complex::Complex64;
use rand::Rng;

/// Random real symmetric `2^n × 2^n` matrix `A + Aᵀ` with `A` uniform in `[0, 1)`.
pub fn random_symmetric<R: Rng + ?Sized>(num_qubits: u32, rng: &mut R) -> Array2<f64> {
    let dim = 1usize << num_qubits;
    let a = Array2::from_shape_simple_fn((dim, dim), || rng.r#gen::<f64>());
    &a + &a.t()
}

/// Random complex amplitudes of length `2^n`, real and imaginary parts uniform
/// in `[-1, 1)`. Not normalised.
pub fn random_amplitudes<R: Rng + ?Sized>(num_qubits: u32, rng: &mut R) -> Vec<Complex64> {
    let dim = 1usize << num_qubits;
    (0..dim)
        .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_symmetric() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = random_symmetric(3, &mut rng);
        assert_eq!(m.dim(), (8, 8));
        for i in 0..8 {
            for j in 0..8 {
                assert_eq!(m[[i, j]], m[[j, i]]);
                assert!((0.0..2.0).contains(&m[[i, j]]));
            }
        }
    }

    #[test]
    fn test_amplitudes_deterministic_for_seed() {
        let a = random_amplitudes(2, &mut StdRng::seed_from_u64(42));
        let b = random_amplitudes(2, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.len(), 4);
        assert_eq!(a, b);
        assert!(a.iter().all(|z| z.re.abs() <= 1.0 && z.im.abs() <= 1.0));
    }
}
