/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Enumeration configuration.
//!
//! Defaults are overridden from the environment with
//! [`EnumerationConfig::from_env`]:
//!
//! ```text
//! AUTOMATIC_MONOID_PROGRESS_INTERVAL=10000
//! AUTOMATIC_MONOID_ASSUME_FINITE=false
//! ```

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Environment variable for [`EnumerationConfig::progress_interval`].
pub const PROGRESS_INTERVAL_ENV: &str = "AUTOMATIC_MONOID_PROGRESS_INTERVAL";

/// Environment variable for [`EnumerationConfig::assume_finite`].
pub const ASSUME_FINITE_ENV: &str = "AUTOMATIC_MONOID_ASSUME_FINITE";

/// Tunables for breadth-first enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumerationConfig {
    /// Emit an info-level progress event every this many
    /// discoveries. Zero disables progress events.
    pub progress_interval: usize,

    /// Whether the generated monoid is expected to be finite. When
    /// false, whole-monoid queries (`cardinality`, `list`, reports)
    /// refuse to run unless enumeration has already finished,
    /// instead of looping forever.
    pub assume_finite: bool,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            progress_interval: 0,
            assume_finite: true,
        }
    }
}

impl EnumerationConfig {
    /// Defaults, overridden by any of [`PROGRESS_INTERVAL_ENV`] and
    /// [`ASSUME_FINITE_ENV`] that are set. Unparsable values are
    /// logged and ignored.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| env::var(name).ok())
    }

    pub(crate) fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = parse_override(PROGRESS_INTERVAL_ENV, &lookup) {
            self.progress_interval = value;
        }
        if let Some(value) = parse_override(ASSUME_FINITE_ENV, &lookup) {
            self.assume_finite = value;
        }
        self
    }
}

fn parse_override<T>(env_var: &str, lookup: &impl Fn(&str) -> Option<String>) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(env_var)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(
                "failed to override enumeration config from value \"{}\" in ${}: {}",
                raw,
                env_var,
                e
            );
            None
        }
    }
}
