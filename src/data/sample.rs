//! Synthetic per-sample error distributions.
//!
//! Errors are `|N(0, sigma)|` with a jump component: with probability
//! `outlier_rate` a sample is drawn from `|N(0, sigma * outlier_scale)|`
//! instead. The heavy tail is what outlier trimming is meant to remove.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{ErrorDistribution, SampleConfig};
use crate::error::AppError;

pub fn generate_errors(config: &SampleConfig) -> Result<ErrorDistribution, AppError> {
    if config.count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    if !(config.sigma.is_finite() && config.sigma > 0.0) {
        return Err(AppError::new(2, "Sigma must be a positive finite number."));
    }
    if !(0.0..1.0).contains(&config.outlier_rate) {
        return Err(AppError::new(2, "Outlier rate must be within [0, 1)."));
    }
    if !(config.outlier_scale.is_finite() && config.outlier_scale >= 1.0) {
        return Err(AppError::new(2, "Outlier scale must be >= 1."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let inlier = Normal::new(0.0, config.sigma)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
    let outlier = Normal::new(0.0, config.sigma * config.outlier_scale)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let errors: Vec<f64> = (0..config.count)
        .map(|_| {
            let dist = if rng.gen_bool(config.outlier_rate) { &outlier } else { &inlier };
            dist.sample(&mut rng).abs()
        })
        .collect();

    Ok(ErrorDistribution {
        model_name: config.model_name.clone(),
        split: config.split.clone(),
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::trim_outliers;

    fn config() -> SampleConfig {
        SampleConfig {
            count: 2000,
            seed: 42,
            model_name: "synthetic".to_string(),
            split: "val".to_string(),
            sigma: 2.0,
            outlier_rate: 0.02,
            outlier_scale: 20.0,
        }
    }

    #[test]
    fn same_seed_same_errors() {
        let a = generate_errors(&config()).unwrap();
        let b = generate_errors(&config()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.errors.len(), 2000);
        assert!(a.errors.iter().all(|e| *e >= 0.0 && e.is_finite()));
    }

    #[test]
    fn heavy_tail_shows_up_as_improvement() {
        let dist = generate_errors(&config()).unwrap();
        let trim = trim_outliers(&dist.errors, 2.0).unwrap();
        assert!(trim.improvement.rmse_pct > trim.improvement.mae_pct);
        assert!(trim.improvement.rmse_pct > 10.0);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut c = config();
        c.count = 0;
        assert_eq!(generate_errors(&c).unwrap_err().exit_code(), 2);

        let mut c = config();
        c.outlier_rate = 1.0;
        assert!(generate_errors(&c).is_err());

        let mut c = config();
        c.outlier_scale = 0.5;
        assert!(generate_errors(&c).is_err());
    }
}
