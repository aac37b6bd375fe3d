// src/config/poly_config.rs

use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolyConfig {
    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,

    /// Power-series defaults
    pub series: SeriesConfig,

    /// Algorithm selection cutoffs
    pub tuning: Tuning,
}

/// Power-series configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Working precision for series operations that do not name one (default: 16)
    pub default_prec: usize,
}

/// Length cutoffs deciding between basecase and fast algorithms.
///
/// Carried by every ring context, so algorithms read thresholds from the
/// caller-supplied ring rather than from global state. Values are operand
/// lengths (number of coefficients) unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuning {
    /// Minimum operand length for Karatsuba multiplication
    pub karatsuba: usize,
    /// Minimum balanced operand length for Toom-Cook-3
    pub toom3: usize,
    /// Series inversion switches to Newton iteration at this length
    pub inv_series_newton: usize,
    /// Series division switches to Newton iteration at this length
    pub div_series_newton: usize,
    /// Divisor and quotient length at which divrem tries Newton
    pub divrem_newton: usize,
    /// Leaf size of divide-and-conquer division
    pub divrem_divconquer: usize,
    /// Square root / reciprocal square root Newton cutoff
    pub sqrt_series_newton: usize,
    /// Exponential series Newton cutoff
    pub exp_series_newton: usize,
    /// Outer length below which composition uses Horner
    pub compose_divconquer: usize,
    /// Series composition switches to baby-step giant-step at this length
    pub compose_series_brent_kung: usize,
    /// Evaluation switches to rectangular splitting at this length
    pub evaluate_rectangular: usize,
    /// Number of points at which multipoint evaluation uses a subproduct tree
    pub evaluate_vec_fast: usize,
    /// Taylor shift switches from Horner at this length
    pub taylor_shift_divconquer: usize,
    /// Degree reduction at or below which half-GCD iterates plainly
    pub hgcd: usize,
    /// Operand length at which GCD uses half-GCD
    pub gcd_hgcd: usize,
    /// Operand length at which extended GCD uses half-GCD
    pub xgcd_hgcd: usize,
    /// Operand length at which the resultant uses half-GCD
    pub resultant_hgcd: usize,
    /// Entry length at which 2x2 polynomial matrices use Strassen's scheme
    pub mat2_strassen: usize,
}

pub static DEFAULT_TUNING: Tuning = Tuning::DEFAULT;

impl Tuning {
    pub const DEFAULT: Tuning = Tuning {
        karatsuba: 16,
        toom3: 64,
        inv_series_newton: 24,
        div_series_newton: 24,
        divrem_newton: 24,
        divrem_divconquer: 16,
        sqrt_series_newton: 16,
        exp_series_newton: 24,
        compose_divconquer: 8,
        compose_series_brent_kung: 12,
        evaluate_rectangular: 16,
        evaluate_vec_fast: 16,
        taylor_shift_divconquer: 24,
        hgcd: 16,
        gcd_hgcd: 48,
        xgcd_hgcd: 48,
        resultant_hgcd: 48,
        mat2_strassen: 32,
    };
}

impl Default for PolyConfig {
    fn default() -> Self {
        PolyConfig {
            log_level: "info".to_string(),
            series: SeriesConfig::default(),
            tuning: Tuning::default(),
        }
    }
}

impl Default for SeriesConfig {
    fn default() -> Self {
        SeriesConfig { default_prec: 16 }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning::DEFAULT
    }
}

fn with_defaults(
    builder: config::builder::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    let t = Tuning::DEFAULT;
    builder
        .set_default("log_level", "info")?
        .set_default("series.default_prec", SeriesConfig::default().default_prec as u64)?
        .set_default("tuning.karatsuba", t.karatsuba as u64)?
        .set_default("tuning.toom3", t.toom3 as u64)?
        .set_default("tuning.inv_series_newton", t.inv_series_newton as u64)?
        .set_default("tuning.div_series_newton", t.div_series_newton as u64)?
        .set_default("tuning.divrem_newton", t.divrem_newton as u64)?
        .set_default("tuning.divrem_divconquer", t.divrem_divconquer as u64)?
        .set_default("tuning.sqrt_series_newton", t.sqrt_series_newton as u64)?
        .set_default("tuning.exp_series_newton", t.exp_series_newton as u64)?
        .set_default("tuning.compose_divconquer", t.compose_divconquer as u64)?
        .set_default("tuning.compose_series_brent_kung", t.compose_series_brent_kung as u64)?
        .set_default("tuning.evaluate_rectangular", t.evaluate_rectangular as u64)?
        .set_default("tuning.evaluate_vec_fast", t.evaluate_vec_fast as u64)?
        .set_default("tuning.taylor_shift_divconquer", t.taylor_shift_divconquer as u64)?
        .set_default("tuning.hgcd", t.hgcd as u64)?
        .set_default("tuning.gcd_hgcd", t.gcd_hgcd as u64)?
        .set_default("tuning.xgcd_hgcd", t.xgcd_hgcd as u64)?
        .set_default("tuning.resultant_hgcd", t.resultant_hgcd as u64)?
        .set_default("tuning.mat2_strassen", t.mat2_strassen as u64)
}

impl PolyConfig {
    /// Load configuration with precedence: config file → env vars → defaults
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = with_defaults(Config::builder())?;

        // TOML preferred, YAML fallback
        if Path::new("grpoly.toml").exists() {
            builder = builder.add_source(File::with_name("grpoly.toml"));
        } else if Path::new("grpoly.yaml").exists() {
            builder = builder.add_source(File::with_name("grpoly.yaml"));
        }

        // Override with environment variables (prefix: GRPOLY_, e.g. GRPOLY_TUNING__KARATSUBA)
        builder = builder.add_source(
            Environment::with_prefix("GRPOLY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load configuration with custom file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = with_defaults(Config::builder())?;

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        builder = builder.add_source(
            Environment::with_prefix("GRPOLY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PolyConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.series.default_prec, 16);
        assert_eq!(config.tuning, Tuning::DEFAULT);
        assert_eq!(config.tuning.karatsuba, 16);
        assert!(config.tuning.toom3 > config.tuning.karatsuba);
    }

    #[test]
    fn test_load_without_file() {
        // Falls back to defaults when no config file exists
        let config = PolyConfig::load().unwrap_or_else(|_| PolyConfig::default());
        assert!(config.tuning.hgcd > 0);
    }

    #[test]
    fn test_load_from_missing_path_uses_defaults() {
        let config = PolyConfig::load_from_file("does-not-exist.toml")
            .unwrap_or_else(|_| PolyConfig::default());
        assert_eq!(config.series.default_prec, 16);
    }
}
