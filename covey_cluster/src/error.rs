// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clustering errors.

use core::fmt;

/// Reasons a clustering pass can refuse to run.
///
/// These are all fail-fast input errors; a pass never partially succeeds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClusterError {
    /// The grid cell size was zero, negative, or not finite.
    InvalidCellSize,
    /// The query rectangle had a negative width or height.
    InvalidRect,
}

impl fmt::Display for ClusterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize => write!(f, "grid cell size must be finite and positive"),
            Self::InvalidRect => write!(f, "query rectangle must have nonnegative size"),
        }
    }
}

impl std::error::Error for ClusterError {}
