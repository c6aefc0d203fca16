// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Selector for the resource kind the sweeper watches.

use crate::error::{Result, SweeperError};
use kube::core::GroupVersionKind;
use std::fmt;
use std::str::FromStr;

/// Identifies a built-in kind (`Pod`, `v1/Pod`, `apps/v1/Deployment`) or a
/// custom kind (`kubefirst.konstruct.io/v1beta1/GitopsCatalog`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KindSelector {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl KindSelector {
    /// A kind from the core API group
    pub fn core(version: &str, kind: &str) -> Self {
        Self {
            group: String::new(),
            version: version.to_string(),
            kind: kind.to_string(),
        }
    }

    pub fn new(group: &str, version: &str, kind: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
        }
    }

    pub fn is_core(&self) -> bool {
        self.group.is_empty()
    }

    pub fn api_version(&self) -> String {
        if self.is_core() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub fn gvk(&self) -> GroupVersionKind {
        GroupVersionKind::gvk(&self.group, &self.version, &self.kind)
    }
}

impl FromStr for KindSelector {
    type Err = SweeperError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(SweeperError::InvalidSelector(format!(
                "'{}' has an empty segment",
                s
            )));
        }

        match parts.as_slice() {
            [kind] => Ok(Self::core("v1", kind)),
            [version, kind] => Ok(Self::core(version, kind)),
            [group, version, kind] => Ok(Self::new(group, version, kind)),
            _ => Err(SweeperError::InvalidSelector(format!(
                "'{}' is not of the form Kind, version/Kind or group/version/Kind",
                s
            ))),
        }
    }
}

impl fmt::Display for KindSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api_version(), self.kind)
    }
}
