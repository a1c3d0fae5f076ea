pub(crate) use super::*;

fn scenario_matrix() -> Matrix<f64> {
    // u1: i1=5, i2=4 ; u2: i1=4, i3=5
    Matrix::from_vec(2, 3, vec![5.0, 4.0, 0.0, 4.0, 0.0, 5.0]).expect("2x3")
}

fn assert_close(a: &Matrix<f64>, b: &Matrix<f64>, tol: f64) {
    let diff = a.max_abs_diff(b).expect("same shape");
    assert!(diff < tol, "max abs diff {diff} exceeds {tol}");
}

#[test]
fn test_diagonal_singular_values_sorted() {
    let a = Matrix::from_vec(3, 3, vec![1.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 3.0])
        .expect("3x3");
    let svd = Svd::compute(&a).expect("converges");
    let sv = svd.singular_values();
    assert!((sv[0] - 5.0).abs() < 1e-12);
    assert!((sv[1] - 3.0).abs() < 1e-12);
    assert!((sv[2] - 1.0).abs() < 1e-12);
}

#[test]
fn test_full_reconstruction_wide() {
    let a = scenario_matrix();
    let svd = Svd::compute(&a).expect("converges");
    assert_eq!(svd.u().shape(), (2, 2));
    assert_eq!(svd.vt().shape(), (2, 3));
    assert_close(&svd.reconstruct(usize::MAX), &a, 1e-10);
}

#[test]
fn test_full_reconstruction_tall() {
    let a = scenario_matrix().transpose();
    let svd = Svd::compute(&a).expect("converges");
    assert_eq!(svd.u().shape(), (3, 2));
    assert_eq!(svd.vt().shape(), (2, 2));
    assert_close(&svd.reconstruct(2), &a, 1e-10);
}

#[test]
fn test_transpose_has_same_singular_values() {
    let a = Matrix::from_vec(
        3,
        4,
        vec![5.0, 3.0, 0.0, 1.0, 4.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 5.0],
    )
    .expect("3x4");
    let s1 = Svd::compute(&a).expect("converges");
    let s2 = Svd::compute(&a.transpose()).expect("converges");
    assert_eq!(s1.singular_values().len(), s2.singular_values().len());
    for (x, y) in s1.singular_values().iter().zip(s2.singular_values()) {
        assert!((x - y).abs() < 1e-10, "{x} vs {y}");
    }
}

#[test]
fn test_left_vectors_orthonormal() {
    let a = Matrix::from_vec(4, 3, vec![
        5.0, 3.0, 0.0, //
        4.0, 0.0, 0.0, //
        1.0, 1.0, 5.0, //
        0.0, 1.0, 4.0, //
    ])
    .expect("4x3");
    let svd = Svd::compute(&a).expect("converges");
    let gram = svd.u().transpose().matmul(svd.u()).expect("r x r");
    assert_close(&gram, &Matrix::eye(3), 1e-10);
}

#[test]
fn test_rank_one_matrix() {
    let a = Matrix::from_vec(3, 2, vec![1.0, 2.0, 2.0, 4.0, 3.0, 6.0]).expect("3x2");
    let svd = Svd::compute(&a).expect("converges");
    let sv = svd.singular_values();
    assert!((sv[0] - 70.0_f64.sqrt()).abs() < 1e-10);
    assert!(sv[1].abs() < 1e-10);
    assert_close(&svd.reconstruct(1), &a, 1e-10);
}

#[test]
fn test_truncated_reconstruction_differs_from_input() {
    let a = scenario_matrix();
    let svd = Svd::compute(&a).expect("converges");
    let p = svd.reconstruct(1);
    assert_eq!(p.shape(), a.shape());
    assert!(p.max_abs_diff(&a).expect("same shape") > 1e-3);
    assert!(p.is_finite());
}

#[test]
fn test_empty_shapes() {
    for (m, n) in [(0, 3), (3, 0), (0, 0)] {
        let a = Matrix::zeros(m, n);
        let svd = Svd::compute(&a).expect("empty input decomposes trivially");
        assert!(svd.singular_values().is_empty());
        let p = svd.reconstruct(10);
        assert_eq!(p.shape(), (m, n));
    }
}

#[test]
fn test_all_zero_matrix() {
    let a = Matrix::zeros(3, 4);
    let svd = Svd::compute(&a).expect("zero matrix decomposes");
    assert!(svd.singular_values().iter().all(|&s| s == 0.0));
    assert_eq!(svd.rank_for_energy(0.9), 0);
    assert_eq!(svd.reconstruct(3), Matrix::zeros(3, 4));
    assert_eq!(svd.sweeps(), 1);
}

#[test]
fn test_rank_for_energy() {
    // σ = (4, 3): energies 16/25 = 0.64 and 1.0
    let a = Matrix::from_vec(2, 2, vec![3.0, 0.0, 0.0, 4.0]).expect("2x2");
    let svd = Svd::compute(&a).expect("converges");
    assert_eq!(svd.rank_for_energy(0.5), 1);
    assert_eq!(svd.rank_for_energy(0.64), 1);
    assert_eq!(svd.rank_for_energy(0.9), 2);
    assert_eq!(svd.rank_for_energy(1.0), 2);
}

#[test]
fn test_deterministic() {
    let a = Matrix::from_vec(3, 3, vec![5.0, 3.0, 0.0, 4.0, 0.0, 2.0, 1.0, 1.0, 5.0])
        .expect("3x3");
    let first = Svd::compute(&a).expect("converges");
    let second = Svd::compute(&a).expect("converges");
    assert_eq!(first, second);
}

mod svd_proptest {
    use super::*;
    use proptest::prelude::*;

    fn rating_matrix() -> impl Strategy<Value = Matrix<f64>> {
        (1..6usize, 1..7usize).prop_flat_map(|(m, n)| {
            prop::collection::vec(0u8..=5, m * n).prop_map(move |cells| {
                let data = cells.into_iter().map(f64::from).collect();
                Matrix::from_vec(m, n, data).expect("generated with m*n cells")
            })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_full_rank_reconstructs_input(a in rating_matrix()) {
            let svd = Svd::compute(&a).expect("converges");
            let diff = svd.reconstruct(usize::MAX).max_abs_diff(&a).expect("same shape");
            prop_assert!(diff < 1e-8, "reconstruction error {}", diff);
        }

        #[test]
        fn prop_singular_values_non_negative_non_increasing(a in rating_matrix()) {
            let svd = Svd::compute(&a).expect("converges");
            let sv = svd.singular_values();
            prop_assert!(sv.iter().all(|&s| s >= 0.0));
            prop_assert!(sv.windows(2).all(|w| w[0] >= w[1]));
        }
    }
}
