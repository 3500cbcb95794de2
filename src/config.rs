//! Tuning parameters for the matcher.
//!
//! Every constant the beam search relies on lives on [`MatchConfig`].
//! The defaults are empirically tuned and work well for vehicle traces
//! sampled every few seconds, but each may be overridden, either in code
//! through the `with_*` setters or from the environment through
//! [`MatchConfig::from_env`].
//!
//! ```bash
//! ROADTRACE_BEAM_WIDTH=40
//! ROADTRACE_SEED_THRESHOLD=35.0
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

const ENV_PREFIX: &str = "ROADTRACE_";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("environment variable {name} could not be parsed from {value:?}")]
    Unparsable { name: String, value: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

/// Tuning parameters for seeding, extension and the bounded sub-search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// The number of nodes nearest to the first trace position
    /// whose segments are considered as seeds.
    pub nearest_k: usize,

    /// The largest deviation, in meters, from a seed segment
    /// for which the first position is considered on-road.
    pub seed_threshold: f64,

    /// The number of hypotheses retained between trace positions.
    pub beam_width: usize,

    /// The fraction of the current segment a hypothesis may cover
    /// before the next position is assumed to have left it.
    pub same_segment_fraction: f64,

    /// The largest deviation, in meters, from the target position for
    /// which a branch of the sub-search is kept alive.
    pub branch_cutoff: f64,

    /// The number of branches popped per round of the sub-search.
    pub search_batch: usize,

    /// The number of rounds the sub-search may take before it yields
    /// whatever it has found so far.
    ///
    /// Exhausting this budget is not an error: the walks not yet explored are
    /// silently dropped, so a low budget can change which route is matched, or
    /// turn a match into a dead end. Use `usize::MAX` for an unbounded search.
    pub max_search_rounds: usize,

    /// The granularity, in meters, to which scores are quantized when ranking.
    pub score_bucket: f64,

    /// The radius, in meters, of the first square scan of a nearest-node query.
    pub initial_radius: f64,

    /// How many times a nearest-node query may double its radius
    /// before falling back to ordering every node.
    pub max_doublings: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            nearest_k: 10,
            seed_threshold: 25.0,
            beam_width: 25,
            same_segment_fraction: 0.6,
            branch_cutoff: 500.0,
            search_batch: 50,
            max_search_rounds: 64,
            score_bucket: 7.0,
            initial_radius: 50.0,
            max_doublings: 16,
        }
    }
}

impl MatchConfig {
    /// Loads the configuration from the environment, including any `.env` file
    /// found in the working directory or its parents.
    ///
    /// Each field may be set by its upper-case name prefixed with `ROADTRACE_`,
    /// for example `ROADTRACE_BRANCH_CUTOFF`. Unset fields keep their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        let mut config = MatchConfig::default();

        override_from_env("NEAREST_K", &mut config.nearest_k)?;
        override_from_env("SEED_THRESHOLD", &mut config.seed_threshold)?;
        override_from_env("BEAM_WIDTH", &mut config.beam_width)?;
        override_from_env("SAME_SEGMENT_FRACTION", &mut config.same_segment_fraction)?;
        override_from_env("BRANCH_CUTOFF", &mut config.branch_cutoff)?;
        override_from_env("SEARCH_BATCH", &mut config.search_batch)?;
        override_from_env("MAX_SEARCH_ROUNDS", &mut config.max_search_rounds)?;
        override_from_env("SCORE_BUCKET", &mut config.score_bucket)?;
        override_from_env("INITIAL_RADIUS", &mut config.initial_radius)?;
        override_from_env("MAX_DOUBLINGS", &mut config.max_doublings)?;

        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration can drive a search.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::InvalidValue { field, reason });

        if self.nearest_k == 0 {
            return invalid("nearest_k", "must be at least one");
        }
        if self.beam_width == 0 {
            return invalid("beam_width", "must be at least one");
        }
        if self.search_batch == 0 {
            return invalid("search_batch", "must be at least one");
        }
        if self.max_search_rounds == 0 {
            return invalid("max_search_rounds", "must be at least one");
        }
        if !(self.score_bucket > 0.0) {
            return invalid("score_bucket", "must be positive");
        }
        if !(self.same_segment_fraction > 0.0 && self.same_segment_fraction <= 1.0) {
            return invalid("same_segment_fraction", "must lie within (0, 1]");
        }
        if !(self.seed_threshold >= 0.0) {
            return invalid("seed_threshold", "must not be negative");
        }
        if !(self.branch_cutoff > 0.0) {
            return invalid("branch_cutoff", "must be positive");
        }
        if !(self.initial_radius > 0.0) {
            return invalid("initial_radius", "must be positive");
        }

        Ok(())
    }

    pub fn with_nearest_k(self, nearest_k: usize) -> Self {
        Self { nearest_k, ..self }
    }

    pub fn with_seed_threshold(self, seed_threshold: f64) -> Self {
        Self {
            seed_threshold,
            ..self
        }
    }

    pub fn with_beam_width(self, beam_width: usize) -> Self {
        Self { beam_width, ..self }
    }

    pub fn with_same_segment_fraction(self, same_segment_fraction: f64) -> Self {
        Self {
            same_segment_fraction,
            ..self
        }
    }

    pub fn with_branch_cutoff(self, branch_cutoff: f64) -> Self {
        Self {
            branch_cutoff,
            ..self
        }
    }

    pub fn with_search_batch(self, search_batch: usize) -> Self {
        Self {
            search_batch,
            ..self
        }
    }

    pub fn with_max_search_rounds(self, max_search_rounds: usize) -> Self {
        Self {
            max_search_rounds,
            ..self
        }
    }

    pub fn with_score_bucket(self, score_bucket: f64) -> Self {
        Self {
            score_bucket,
            ..self
        }
    }
}

fn override_from_env<T: FromStr>(field: &str, target: &mut T) -> Result<(), ConfigError> {
    let name = format!("{ENV_PREFIX}{field}");

    if let Ok(value) = env::var(&name) {
        *target = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Unparsable { name, value })?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.beam_width, 25);
        assert_eq!(config.score_bucket, 7.0);
    }

    #[test]
    fn rejects_degenerate_values() {
        let config = MatchConfig::default().with_beam_width(0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "beam_width",
                reason: "must be at least one"
            })
        );

        let config = MatchConfig::default().with_same_segment_fraction(1.5);
        assert!(config.validate().is_err());

        let config = MatchConfig::default().with_score_bucket(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn environment_overrides_defaults() {
        env::set_var("ROADTRACE_MAX_DOUBLINGS", "4");
        let config = MatchConfig::from_env().expect("config must load");
        env::remove_var("ROADTRACE_MAX_DOUBLINGS");

        assert_eq!(config.max_doublings, 4);
        assert_eq!(config.nearest_k, 10);
    }

    #[test]
    fn unparsable_environment_is_reported() {
        let mut target = 0usize;
        env::set_var("ROADTRACE_TEST_UNPARSABLE", "many");
        let result = override_from_env("TEST_UNPARSABLE", &mut target);
        env::remove_var("ROADTRACE_TEST_UNPARSABLE");

        assert!(matches!(result, Err(ConfigError::Unparsable { .. })));
        assert_eq!(target, 0);
    }
}
