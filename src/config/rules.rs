//! Configuration checks using Validation.
//!
//! Every check runs; all violations are reported together instead of
//! stopping at the first one.

use super::violations::ConfigViolation;
use super::{AppConfig, CacheConfig};
use crate::cache::KEY_SEPARATOR;
use crate::core::EngineLimits;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of a single configuration check.
pub type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Longest entry the display can hold without losing f64 precision.
pub const MAX_DIGITS_CEILING: usize = 15;

/// Most significant digits an f64 can carry.
pub const SIGNIFICANT_DIGITS_CEILING: usize = 17;

/// History entries kept at most.
pub const HISTORY_LIMIT_CEILING: usize = 100;

/// Validate the whole configuration, accumulating ALL violations.
pub fn validate(config: &AppConfig) -> Check {
    let mut checks = engine_checks(&config.engine);
    checks.extend(cache_checks(&config.cache));
    Validation::all_vec(checks).map(|_| ())
}

fn in_range(field: &'static str, value: usize, min: usize, max: usize) -> Check {
    if (min..=max).contains(&value) {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}

fn engine_checks(limits: &EngineLimits) -> Vec<Check> {
    vec![
        in_range("engine.max_digits", limits.max_digits, 1, MAX_DIGITS_CEILING),
        in_range(
            "engine.significant_digits",
            limits.significant_digits,
            1,
            SIGNIFICANT_DIGITS_CEILING,
        ),
        in_range(
            "engine.history_limit",
            limits.history_limit,
            1,
            HISTORY_LIMIT_CEILING,
        ),
    ]
}

fn cache_checks(cache: &CacheConfig) -> Vec<Check> {
    let mut checks = Vec::new();

    checks.push(if cache.name.is_empty() || cache.name.contains(KEY_SEPARATOR) {
        Validation::fail(ConfigViolation::InvalidCacheName(cache.name.clone()))
    } else {
        Validation::success(())
    });

    checks.push(if cache.version == 0 {
        Validation::fail(ConfigViolation::ZeroCacheVersion)
    } else {
        Validation::success(())
    });

    if cache.manifest.is_empty() {
        checks.push(Validation::fail(ConfigViolation::EmptyManifest));
    }

    let mut seen = HashSet::new();
    for (index, url) in cache.manifest.iter().enumerate() {
        if url.trim().is_empty() {
            checks.push(Validation::fail(ConfigViolation::EmptyAsset { index }));
        } else if !seen.insert(url.as_str()) {
            checks.push(Validation::fail(ConfigViolation::DuplicateAsset(
                url.clone(),
            )));
        }
    }

    checks
}
