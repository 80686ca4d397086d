//! Variational Bayes inference of a Gaussian mean and precision
//!
//! Demonstrates the closed-form mean-field update: generates noisy samples
//! from a known Gaussian, runs the fixed-point iteration, and compares the
//! inferred posterior against the ground truth.
//!
//! # Run
//!
//! ```bash
//! cargo run --example vb_gaussian
//! ```

use inferir::prelude::*;

fn main() {
    println!("╔════════════════════════════════════════════════════════════════╗");
    println!("║ Variational Bayes: Gaussian mean and precision               ║");
    println!("╚════════════════════════════════════════════════════════════════╝\n");

    // Example 1: fixed number of sweeps, as in a classic demonstration
    example_1_fixed_iterations();

    println!("\n{}", "═".repeat(64));

    // Example 2: tolerance-based stopping
    example_2_tolerance_stopping();

    println!("\n{}", "═".repeat(64));

    // Example 3: fewer samples, wider posterior
    example_3_small_sample();
}

/// Example 1: ten sweeps with the iteration history printed
fn example_1_fixed_iterations() {
    println!("EXAMPLE 1: Fixed Iteration Count");
    println!("{}", "─".repeat(64));

    // Ground truth: mean 1.5, precision 1.0 (unit noise variance)
    let mu_truth = 1.5;
    let beta_truth: f64 = 1.0;
    let std_truth = (1.0 / beta_truth).sqrt();

    let mut sampler = GaussianSampler::new(mu_truth, std_truth, 42).expect("valid sampler");
    let ys = sampler.sample(200);

    println!("\n📊 Data: 200 samples from N({mu_truth}, {:.1})", std_truth * std_truth);

    let prior = NormalGammaPrior::noninformative();
    println!("\n🔧 Prior: mean ~ N({}, {}), precision ~ Gamma(scale {}, shape {})",
        prior.m0(), prior.v0(), prior.b0(), prior.c0());

    let vb = GaussianVb::new(&ys, prior).expect("valid observations");
    let run = vb.run(prior.posterior(), 10).expect("well-posed model");

    println!("\n📈 Iteration history:");
    println!("   {:>4}  {:>12}  {:>12}  {:>12}  {:>12}", "iter", "m", "v", "b", "c");
    for (i, state) in run.trace.iter().enumerate() {
        println!(
            "   {:>4}  {:>12.6}  {:>12.6}  {:>12.6}  {:>12.6}",
            i + 1,
            state.m(),
            state.v(),
            state.b(),
            state.c()
        );
    }

    report(&run.posterior, mu_truth, beta_truth);
}

/// Example 2: stop as soon as successive tuples agree to 1e-9
fn example_2_tolerance_stopping() {
    println!("EXAMPLE 2: Tolerance-Based Stopping");
    println!("{}", "─".repeat(64));

    let mut sampler = GaussianSampler::new(-0.5, 2.0, 7).expect("valid sampler");
    let ys = sampler.sample(500);

    println!("\n📊 Data: 500 samples from N(-0.5, 4.0)");

    let prior = NormalGammaPrior::noninformative();
    let vb = GaussianVb::new(&ys, prior).expect("valid observations");
    let run = vb
        .run_to_tolerance(prior.posterior(), 1e-9, 100)
        .expect("well-posed model");

    println!(
        "\n🔎 Converged: {} after {} sweeps (tolerance 1e-9)",
        run.converged, run.iterations
    );

    report(&run.posterior, -0.5, 0.25);
}

/// Example 3: with little data the posterior stays honest about uncertainty
fn example_3_small_sample() {
    println!("EXAMPLE 3: Small Sample");
    println!("{}", "─".repeat(64));

    let mut sampler = GaussianSampler::new(1.5, 1.0, 42).expect("valid sampler");
    let ys = sampler.sample(10);

    println!("\n📊 Data: 10 samples from N(1.5, 1.0)");

    let prior = NormalGammaPrior::noninformative();
    let vb = GaussianVb::new(&ys, prior).expect("valid observations");
    let run = vb
        .run_to_tolerance(prior.posterior(), 1e-9, 100)
        .expect("well-posed model");

    report(&run.posterior, 1.5, 1.0);
    println!("\n   → With 10 samples instead of 200, Var[μ] and Var[β] widen;");
    println!("     the point estimates drift but stay within the stated spread.");
}

fn report(posterior: &Posterior, mu_truth: f64, beta_truth: f64) {
    println!("\n🔮 Posterior:");
    println!(
        "   mean      : {:.4} (truth {:.4}, Var[μ] = {:.6})",
        posterior.mean(),
        mu_truth,
        posterior.mean_variance()
    );
    println!(
        "   precision : {:.4} (truth {:.4}, Var[β] = {:.6})",
        posterior.precision_mean(),
        beta_truth,
        posterior.precision_variance()
    );
    println!(
        "   noise variance : {:.4} (truth {:.4})",
        posterior.noise_variance(),
        1.0 / beta_truth
    );
}
