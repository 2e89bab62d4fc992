// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller errors.

use core::fmt;

use covey_cluster::ClusterError;

/// Reasons a refresh can fail. All are fail-fast input problems; the
/// visible set is left untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControllerError {
    /// The view reported a viewport with negative size, or a view size
    /// without positive area.
    InvalidViewport,
    /// The clustering pass rejected its inputs.
    Cluster(ClusterError),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidViewport => write!(f, "view reported an unusable viewport"),
            Self::Cluster(e) => write!(f, "clustering failed: {e}"),
        }
    }
}

impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidViewport => None,
            Self::Cluster(e) => Some(e),
        }
    }
}

impl From<ClusterError> for ControllerError {
    fn from(e: ClusterError) -> Self {
        Self::Cluster(e)
    }
}
