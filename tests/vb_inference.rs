//! End-to-end inference tests over the public API.
//!
//! Drives the full pipeline (synthetic data, sufficient statistics, both
//! driver modes) and checks that the posterior recovers the generating
//! parameters within the spread the posterior itself reports.

use inferir::prelude::*;

#[test]
fn recovers_ground_truth_from_large_sample() {
    let mu_truth = 1.5;
    let beta_truth: f64 = 1.0;

    let mut sampler = GaussianSampler::new(mu_truth, (1.0 / beta_truth).sqrt(), 42)
        .expect("valid sampler");
    let ys = sampler.sample(2000);

    let prior = NormalGammaPrior::noninformative();
    let vb = GaussianVb::new(&ys, prior).expect("valid observations");
    let run = vb
        .run_to_tolerance(prior.posterior(), 1e-9, 200)
        .expect("well-posed model");

    assert!(run.converged, "no convergence after {} sweeps", run.iterations);

    // Within 3 posterior standard deviations of the truth
    let mu_sd = run.posterior.mean_variance().sqrt();
    assert!(
        (run.posterior.mean() - mu_truth).abs() < 3.0 * mu_sd + 0.1,
        "mean {} vs truth {mu_truth} (sd {mu_sd})",
        run.posterior.mean()
    );

    let beta_sd = run.posterior.precision_variance().sqrt();
    assert!(
        (run.posterior.precision_mean() - beta_truth).abs() < 3.0 * beta_sd + 0.1,
        "precision {} vs truth {beta_truth} (sd {beta_sd})",
        run.posterior.precision_mean()
    );
}

#[test]
fn fixed_count_matches_original_demonstration_policy() {
    // The classic demonstration hard-codes 10 sweeps; for this model that is
    // already well past numerical convergence.
    let mut sampler = GaussianSampler::new(0.0, 1.0, 7).expect("valid sampler");
    let ys = sampler.sample(200);

    let prior = NormalGammaPrior::noninformative();
    let vb = GaussianVb::new(&ys, prior).expect("valid observations");

    let fixed = vb.run(prior.posterior(), 10).expect("well-posed model");
    let tolerant = vb
        .run_to_tolerance(prior.posterior(), 1e-9, 100)
        .expect("well-posed model");

    assert_eq!(fixed.iterations, 10);
    assert!(tolerant.converged);
    assert!(
        fixed.posterior.max_abs_delta(&tolerant.posterior) < 1e-6,
        "both policies should land on the same fixed point"
    );
}

#[test]
fn more_data_tightens_the_posterior() {
    let prior = NormalGammaPrior::noninformative();

    let mut sampler = GaussianSampler::new(2.0, 1.0, 11).expect("valid sampler");
    let ys = sampler.sample(1000);

    let small = GaussianVb::new(&ys[..20], prior).expect("valid observations");
    let large = GaussianVb::new(&ys, prior).expect("valid observations");

    let small_run = small
        .run_to_tolerance(prior.posterior(), 1e-9, 100)
        .expect("well-posed model");
    let large_run = large
        .run_to_tolerance(prior.posterior(), 1e-9, 100)
        .expect("well-posed model");

    assert!(
        large_run.posterior.mean_variance() < small_run.posterior.mean_variance(),
        "Var[mu]: 1000 samples {} >= 20 samples {}",
        large_run.posterior.mean_variance(),
        small_run.posterior.mean_variance()
    );
}

#[test]
fn runs_are_deterministic_end_to_end() {
    let mut sampler = GaussianSampler::new(1.0, 0.5, 3).expect("valid sampler");
    let ys = sampler.sample(100);

    let prior = NormalGammaPrior::noninformative();
    let a = GaussianVb::new(&ys, prior)
        .expect("valid observations")
        .run(prior.posterior(), 10)
        .expect("well-posed model");
    let b = GaussianVb::new(&ys, prior)
        .expect("valid observations")
        .run(prior.posterior(), 10)
        .expect("well-posed model");

    assert_eq!(a, b);
}

#[test]
fn engine_from_stats_matches_engine_from_observations() {
    let ys = [4.2, 5.8, 6.1, 4.5, 5.0];
    let prior = NormalGammaPrior::noninformative();

    let from_obs = GaussianVb::new(&ys, prior).expect("valid observations");
    let stats = SufficientStats::from_observations(&ys).expect("valid observations");
    let from_stats = GaussianVb::from_stats(stats, prior);

    let a = from_obs.run(prior.posterior(), 5).expect("well-posed model");
    let b = from_stats.run(prior.posterior(), 5).expect("well-posed model");
    assert_eq!(a, b);
}
