// =========================================================================
// FALSIFY-VB: mean-field Gaussian update contract
//
// Each test states a property of the closed-form update that would falsify
// the implementation if violated.
//
// References:
//   - Bishop (2006) "Pattern Recognition and Machine Learning", §10.1.3
//   - MacKay (2003) "Information Theory, Inference, and Learning
//     Algorithms", ch. 33
// =========================================================================

use super::*;

/// FALSIFY-VB-001: one sweep reproduces the hand-computed oracle
///
/// N=2, ys=[1, 3] (S1=4, S2=10), prior (m0=0, v0=1000, b0=1000, c0=0.001),
/// start (m=0, v=10, b=10, c=0.1). By hand: b·c = 1, so
///   m' = 4000/2001, v' = 1000/2001,
///   X  = 10 − 8m' + 2(m'² + v') = 2.99950225,
///   b' = 1/(0.001 + X/2) = 0.666333, c' = 1.001.
#[test]
fn falsify_vb_001_single_sweep_oracle() {
    let prior = NormalGammaPrior::new(0.0, 1000.0, 1000.0, 0.001).expect("valid prior");
    let vb = GaussianVb::new(&[1.0, 3.0], prior).expect("valid observations");
    let start = Posterior::new(0.0, 10.0, 10.0, 0.1).expect("valid start");

    let next = vb.step(&start).expect("sweep should succeed");

    assert!(
        (next.m() - 4000.0 / 2001.0).abs() < 1e-12,
        "FALSIFIED VB-001: m={}, expected {}",
        next.m(),
        4000.0 / 2001.0
    );
    assert!(
        (next.v() - 1000.0 / 2001.0).abs() < 1e-12,
        "FALSIFIED VB-001: v={}, expected {}",
        next.v(),
        1000.0 / 2001.0
    );
    assert!(
        (next.b() - 0.666_333).abs() < 1e-6,
        "FALSIFIED VB-001: b={}, expected ~0.666333",
        next.b()
    );
    assert!(
        (next.c() - 1.001).abs() < 1e-12,
        "FALSIFIED VB-001: c={}, expected 1.001",
        next.c()
    );
}

/// FALSIFY-VB-002: the shape c depends only on N and c0
#[test]
fn falsify_vb_002_shape_constant_across_states() {
    let prior = NormalGammaPrior::new(1.0, 2.0, 0.5, 3.0).expect("valid prior");
    let vb = GaussianVb::new(&[0.4, -1.2, 2.2, 0.9], prior).expect("valid observations");
    let expected_c = 4.0 / 2.0 + 3.0;

    let states = [
        Posterior::new(0.0, 1.0, 1.0, 1.0).expect("valid state"),
        Posterior::new(-5.0, 0.01, 100.0, 0.2).expect("valid state"),
        Posterior::new(40.0, 300.0, 0.001, 50.0).expect("valid state"),
    ];
    for state in &states {
        let next = vb.step(state).expect("sweep should succeed");
        assert!(
            (next.c() - expected_c).abs() < 1e-12,
            "FALSIFIED VB-002: c={} from state {state:?}, expected {expected_c}",
            next.c()
        );
    }
}

/// FALSIFY-VB-003: iteration reaches a fixed point of the update
#[test]
fn falsify_vb_003_fixed_point() {
    let prior = NormalGammaPrior::noninformative();
    let vb = GaussianVb::new(&[4.2, 5.8, 6.1, 4.5, 5.0], prior).expect("valid observations");

    let run = vb.run(prior.posterior(), 100).expect("run should succeed");
    let once_more = vb.step(&run.posterior).expect("sweep should succeed");

    let residual = once_more.max_abs_delta(&run.posterior);
    assert!(
        residual < 1e-9,
        "FALSIFIED VB-003: converged tuple moved by {residual} under one more sweep"
    );
}

/// FALSIFY-VB-004: the fixed point does not depend on the starting state
#[test]
fn falsify_vb_004_initial_value_independence() {
    let prior = NormalGammaPrior::noninformative();
    let vb = GaussianVb::new(&[4.2, 5.8, 6.1, 4.5, 5.0], prior).expect("valid observations");

    let from_prior = vb
        .run_to_tolerance(prior.posterior(), 1e-12, 200)
        .expect("run should succeed");
    let from_far = vb
        .run_to_tolerance(
            Posterior::new(-80.0, 0.004, 17.0, 9.0).expect("valid start"),
            1e-12,
            200,
        )
        .expect("run should succeed");

    assert!(from_prior.converged && from_far.converged);
    let gap = from_prior.posterior.max_abs_delta(&from_far.posterior);
    assert!(
        gap < 1e-6,
        "FALSIFIED VB-004: fixed points differ by {gap} across starting states"
    );
}

/// FALSIFY-VB-005: under a near-flat prior the posterior contracts to the data
///
/// m* approaches the sample mean; c*·b* approaches the reciprocal of the
/// population variance, up to the O(1/N) bias of the mean-field factorization.
#[test]
fn falsify_vb_005_flat_prior_contraction() {
    use crate::synthetic::GaussianSampler;

    let mut sampler = GaussianSampler::new(5.0, 2.0, 42).expect("valid sampler");
    let ys = sampler.sample(200);
    let stats = SufficientStats::from_observations(&ys).expect("valid observations");

    let prior = NormalGammaPrior::noninformative();
    let vb = GaussianVb::from_stats(stats, prior);
    let run = vb
        .run_to_tolerance(prior.posterior(), 1e-10, 200)
        .expect("run should succeed");
    assert!(run.converged);

    let mean_gap = (run.posterior.mean() - stats.mean()).abs();
    assert!(
        mean_gap < 1e-3,
        "FALSIFIED VB-005: m*={} vs sample mean {}",
        run.posterior.mean(),
        stats.mean()
    );

    let target_precision = 1.0 / stats.variance();
    let rel = (run.posterior.precision_mean() - target_precision).abs() / target_precision;
    assert!(
        rel < 0.02,
        "FALSIFIED VB-005: c*·b*={} vs 1/variance={target_precision} (rel err {rel})",
        run.posterior.precision_mean()
    );
}

/// FALSIFY-VB-006: a single observation is a valid data set
#[test]
fn falsify_vb_006_single_observation() {
    let prior = NormalGammaPrior::noninformative();
    let vb = GaussianVb::new(&[2.5], prior).expect("one observation is enough");

    let next = vb.step(&prior.posterior()).expect("sweep should succeed");
    assert!(
        next.v() > 0.0 && next.v().is_finite(),
        "FALSIFIED VB-006: v={} after one sweep",
        next.v()
    );

    let run = vb
        .run_to_tolerance(prior.posterior(), 1e-9, 100)
        .expect("run should succeed");
    assert!(run.converged);
    assert!(run.posterior.v() > 0.0);
}

/// FALSIFY-VB-007: an empty observation set is rejected at construction
#[test]
fn falsify_vb_007_empty_observations_rejected() {
    let prior = NormalGammaPrior::noninformative();
    let err = GaussianVb::new(&[], prior).unwrap_err();
    assert!(
        err.to_string().contains("empty input"),
        "FALSIFIED VB-007: unexpected error {err}"
    );
}

/// FALSIFY-VB-008: the sweep is deterministic
#[test]
fn falsify_vb_008_determinism() {
    let prior = NormalGammaPrior::new(0.3, 7.0, 2.0, 0.4).expect("valid prior");
    let vb = GaussianVb::new(&[0.1, 0.2, 0.35, -0.4], prior).expect("valid observations");
    let state = Posterior::new(1.0, 0.5, 0.25, 4.0).expect("valid state");

    let a = vb.step(&state).expect("sweep should succeed");
    let b = vb.step(&state).expect("sweep should succeed");
    assert_eq!(a, b, "FALSIFIED VB-008: identical inputs produced {a:?} vs {b:?}");
}

#[test]
fn test_run_zero_iterations_is_identity() {
    let prior = NormalGammaPrior::noninformative();
    let vb = GaussianVb::new(&[1.0, 3.0], prior).expect("valid observations");
    let init = prior.posterior();

    let run = vb.run(init, 0).expect("run should succeed");
    assert_eq!(run.posterior, init);
    assert!(run.trace.is_empty());
    assert_eq!(run.iterations, 0);
    assert!(!run.converged);
}

#[test]
fn test_run_trace_records_every_sweep() {
    let prior = NormalGammaPrior::noninformative();
    let vb = GaussianVb::new(&[1.0, 3.0], prior).expect("valid observations");

    let run = vb.run(prior.posterior(), 10).expect("run should succeed");
    assert_eq!(run.trace.len(), 10);
    assert_eq!(run.iterations, 10);
    assert_eq!(*run.trace.last().expect("non-empty trace"), run.posterior);
    // Replaying the trace through the sweep reproduces it
    let replayed = vb.step(&run.trace[3]).expect("sweep should succeed");
    assert_eq!(replayed, run.trace[4]);
}

#[test]
fn test_tolerance_mode_reports_cap_exhaustion() {
    let prior = NormalGammaPrior::noninformative();
    let vb = GaussianVb::new(&[1.0, 3.0], prior).expect("valid observations");

    let run = vb
        .run_to_tolerance(prior.posterior(), 1e-12, 2)
        .expect("run should succeed");
    assert!(!run.converged);
    assert_eq!(run.iterations, 2);
}

#[test]
fn test_tolerance_must_be_positive() {
    let prior = NormalGammaPrior::noninformative();
    let vb = GaussianVb::new(&[1.0, 3.0], prior).expect("valid observations");

    assert!(vb.run_to_tolerance(prior.posterior(), 0.0, 10).is_err());
    assert!(vb.run_to_tolerance(prior.posterior(), -1.0, 10).is_err());
    assert!(vb
        .run_to_tolerance(prior.posterior(), f64::NAN, 10)
        .is_err());
}

#[test]
fn test_prior_validation() {
    assert!(NormalGammaPrior::new(0.0, 0.0, 1.0, 1.0).is_err());
    assert!(NormalGammaPrior::new(0.0, 1.0, -2.0, 1.0).is_err());
    assert!(NormalGammaPrior::new(0.0, 1.0, 1.0, 0.0).is_err());
    assert!(NormalGammaPrior::new(f64::NAN, 1.0, 1.0, 1.0).is_err());
}

#[test]
fn test_precision_moments_derivation() {
    // b0 = var/mean, c0 = mean²/var
    let prior =
        NormalGammaPrior::with_precision_moments(0.0, 10.0, 2.0, 8.0).expect("valid moments");
    assert!((prior.b0() - 4.0).abs() < 1e-12);
    assert!((prior.c0() - 0.5).abs() < 1e-12);
    // Round trip: Gamma mean b0·c0, variance c0·b0²
    assert!((prior.b0() * prior.c0() - 2.0).abs() < 1e-12);
    assert!((prior.c0() * prior.b0() * prior.b0() - 8.0).abs() < 1e-12);

    assert!(NormalGammaPrior::with_precision_moments(0.0, 10.0, 0.0, 8.0).is_err());
    assert!(NormalGammaPrior::with_precision_moments(0.0, 10.0, 2.0, -8.0).is_err());
}

#[test]
fn test_posterior_summary_statistics() {
    let post = Posterior::new(1.5, 0.02, 0.5, 3.0).expect("valid state");
    assert_eq!(post.mean(), 1.5);
    assert_eq!(post.mean_variance(), 0.02);
    assert!((post.precision_mean() - 1.5).abs() < 1e-12);
    assert!((post.precision_variance() - 0.75).abs() < 1e-12);
    assert!((post.noise_variance() - 1.0 / 1.5).abs() < 1e-12);
}

#[test]
fn test_posterior_validation() {
    assert!(Posterior::new(0.0, 1.0, 1.0, 1.0).is_ok());
    assert!(Posterior::new(0.0, 0.0, 1.0, 1.0).is_err());
    assert!(Posterior::new(0.0, 1.0, -1.0, 1.0).is_err());
    assert!(Posterior::new(0.0, 1.0, 1.0, f64::INFINITY).is_err());
}

mod vb_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    /// FALSIFY-VB-009-prop: a sweep from any valid state keeps v, b, c
    /// strictly positive and finite
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn falsify_vb_009_prop_positivity(
            ys in prop::collection::vec(-50.0..50.0f64, 1..40),
            m in -10.0..10.0f64,
            v in 1e-3..100.0f64,
            b in 1e-3..100.0f64,
            c in 1e-3..100.0f64,
        ) {
            let prior = NormalGammaPrior::noninformative();
            let vb = GaussianVb::new(&ys, prior).expect("valid observations");
            let state = Posterior::new(m, v, b, c).expect("valid state");

            let next = vb.step(&state).expect("sweep should succeed");
            prop_assert!(next.v() > 0.0 && next.v().is_finite(),
                "FALSIFIED VB-009-prop: v={}", next.v());
            prop_assert!(next.b() > 0.0 && next.b().is_finite(),
                "FALSIFIED VB-009-prop: b={}", next.b());
            prop_assert!(next.c() > 0.0 && next.c().is_finite(),
                "FALSIFIED VB-009-prop: c={}", next.c());
            prop_assert!(next.m().is_finite(),
                "FALSIFIED VB-009-prop: m={}", next.m());
        }
    }

    /// FALSIFY-VB-010-prop: tolerance-mode runs converge on well-posed data
    /// and the trace length matches the reported iteration count
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn falsify_vb_010_prop_tolerance_convergence(
            ys in prop::collection::vec(-5.0..5.0f64, 2..30),
        ) {
            let prior = NormalGammaPrior::noninformative();
            let vb = GaussianVb::new(&ys, prior).expect("valid observations");

            let run = vb
                .run_to_tolerance(prior.posterior(), 1e-8, 500)
                .expect("run should succeed");
            prop_assert!(run.converged,
                "FALSIFIED VB-010-prop: no convergence in 500 sweeps for {} points", ys.len());
            prop_assert_eq!(run.trace.len(), run.iterations);
        }
    }
}
