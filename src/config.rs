//! Table sizing policy: initial bucket count, growth trigger and growth rate.

use crate::error::ConfigError;

pub const DEFAULT_BUCKET_COUNT: usize = 50;
pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 0.7;
pub const DEFAULT_GAIN_FACTOR: f32 = 2.0;

/// Headroom applied on top of the minimum bucket count by `reserve` and
/// `set_bucket_count`.
pub const RESERVE_MARGIN: f32 = 1.1;

/// Construction-time knobs for a [`ChainTable`](crate::ChainTable).
///
/// ```
/// use chained_hash_table::TableConfig;
///
/// let cfg = TableConfig::default().with_bucket_count(8).with_max_load_factor(1.0);
/// assert!(cfg.validate().is_ok());
/// assert!(cfg.with_gain_factor(0.5).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub bucket_count: usize,
    pub max_load_factor: f32,
    pub gain_factor: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            gain_factor: DEFAULT_GAIN_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn with_bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    pub fn with_max_load_factor(mut self, max_load_factor: f32) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    pub fn with_gain_factor(mut self, gain_factor: f32) -> Self {
        self.gain_factor = gain_factor;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket_count == 0 {
            return Err(ConfigError::ZeroBucketCount);
        }
        check_max_load_factor(self.max_load_factor)?;
        check_gain_factor(self.gain_factor)
    }
}

pub(crate) fn check_max_load_factor(f: f32) -> Result<(), ConfigError> {
    if f.is_finite() && f > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidMaxLoadFactor(f))
    }
}

// Growth must strictly increase the bucket count, otherwise a load-factor
// overflow could never be resolved.
pub(crate) fn check_gain_factor(f: f32) -> Result<(), ConfigError> {
    if f.is_finite() && f > 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidGainFactor(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = TableConfig::default();
        assert_eq!(cfg.bucket_count, 50);
        assert_eq!(cfg.max_load_factor, 0.7);
        assert_eq!(cfg.gain_factor, 2.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let base = TableConfig::default();
        assert_eq!(
            base.with_bucket_count(0).validate(),
            Err(ConfigError::ZeroBucketCount)
        );
        assert_eq!(
            base.with_max_load_factor(0.0).validate(),
            Err(ConfigError::InvalidMaxLoadFactor(0.0))
        );
        assert!(base.with_max_load_factor(f32::NAN).validate().is_err());
        assert_eq!(
            base.with_gain_factor(1.0).validate(),
            Err(ConfigError::InvalidGainFactor(1.0))
        );
        assert!(base.with_gain_factor(f32::INFINITY).validate().is_err());
    }
}
