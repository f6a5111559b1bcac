//! Synthetic curve document generation.
//!
//! Produces seeded, reproducible demo documents: each curve is a smooth base
//! shape (sine + drift) with Gaussian noise, with a middle run of keys
//! pre-selected so `pfit fit` has something to reshape out of the box.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::error::AppError;
use crate::io::document::{CurveDoc, CurveDocument, KeyDoc};

#[derive(Debug, Clone, Copy)]
pub struct SampleConfig {
    pub curves: usize,
    pub keys_per_curve: usize,
    pub seed: u64,
}

/// Generate a sample document. Deterministic for a given config.
pub fn generate_document(config: &SampleConfig) -> Result<CurveDocument, AppError> {
    if config.curves == 0 {
        return Err(AppError::usage("Sample curve count must be > 0."));
    }
    if config.keys_per_curve < 5 {
        return Err(AppError::usage(
            "Sample curves need at least 5 keys (two pivots plus a run).",
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::data(format!("Noise distribution error: {e}")))?;

    let mut curves = Vec::with_capacity(config.curves);
    for c in 0..config.curves {
        let amplitude = rng.gen_range(2.0..8.0);
        let period = rng.gen_range(4.0..12.0);
        let drift = rng.gen_range(-0.5..0.5);
        let sigma = rng.gen_range(0.1..0.5);

        let keys = (0..config.keys_per_curve)
            .map(|i| {
                let time = i as f64;
                let base = amplitude * (time * std::f64::consts::TAU / period).sin() + drift * time;
                KeyDoc {
                    time,
                    value: base + sigma * noise.sample(&mut rng),
                }
            })
            .collect();

        // Select the middle third, keeping at least one unselected key on
        // each side to serve as a real pivot.
        let lo = (config.keys_per_curve / 3).max(1);
        let hi = (2 * config.keys_per_curve / 3).min(config.keys_per_curve - 2);
        let selected = (lo..=hi).collect();

        curves.push(CurveDoc {
            id: format!("curve{:02}", c + 1),
            keys,
            selected,
        });
    }

    Ok(CurveDocument::new(curves))
}
