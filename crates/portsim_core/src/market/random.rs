//! Normal and Student-t variates built directly from uniforms.
//!
//! Every stochastic component takes its randomness as a `&mut R` where
//! `R: Rng + ?Sized`, so production wires an entropy-seeded generator and tests
//! wire a fixed seed.

use std::f64::consts::TAU;

use rand::Rng;
use rand::distr::Open01;

/// Normal(mean, std_dev) via Box-Muller.
///
/// Consumes exactly two uniforms per call; the second normal of the pair is
/// discarded.
#[inline]
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    mean + std_dev * standard_normal(rng)
}

/// Standard normal via Box-Muller
#[inline]
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = rng.sample(Open01);
    let u2: f64 = rng.sample(Open01);
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Student-t with `df` degrees of freedom.
///
/// Uses the sum of `df` squared normals as the chi-squared variate, so a call
/// consumes `2 * (df + 1)` uniforms. `df` must be at least 1.
pub fn student_t<R: Rng + ?Sized>(rng: &mut R, df: u32) -> f64 {
    debug_assert!(df >= 1, "student_t requires df >= 1");
    let z = standard_normal(rng);
    let chi_sq: f64 = (0..df)
        .map(|_| {
            let x = standard_normal(rng);
            x * x
        })
        .sum();
    z * (f64::from(df) / chi_sq).sqrt()
}

/// Factor that brings a t(df) draw to unit variance. Variance is infinite
/// for `df <= 2`, where draws are left unscaled.
#[must_use]
pub fn student_t_scale(df: u32) -> f64 {
    if df > 2 {
        (f64::from(df - 2) / f64::from(df)).sqrt()
    } else {
        1.0
    }
}

/// Unit-variance innovation: scaled Student-t when `fat_tails` is set,
/// otherwise standard normal.
///
/// GARCH feeds realized returns back into the variance, so an unscaled t(5)
/// draw (variance 5/3) would push alpha + beta past 1 with the default
/// coefficients.
#[inline]
pub fn innovation<R: Rng + ?Sized>(rng: &mut R, fat_tails: Option<u32>) -> f64 {
    match fat_tails {
        Some(df) => student_t(rng, df) * student_t_scale(df),
        None => standard_normal(rng),
    }
}
