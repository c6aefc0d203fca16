// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The finalizer token this controller owns and strips from deleting objects
pub const SENTINEL_FINALIZER: &str = "konstruct.kubefirst.io/muse-mulatu";

/// Kind watched when no selector is given
pub const DEFAULT_KIND: &str = "v1/Pod";

/// Watch parameters
pub mod watch {
    /// Resource version "0" starts the watch from any cached state, replaying
    /// existing objects as ADDED events first
    pub const INITIAL_RESOURCE_VERSION: &str = "0";

    /// Server-side lifetime of the watch. The server closes the stream when
    /// it expires, which ends the run. Must stay below 295.
    pub const TIMEOUT_SECS: u32 = 290;
}

/// Unix seconds of the zero timestamp (0001-01-01T00:00:00Z)
pub const ZERO_TIME_UNIX_SECS: i64 = -62_135_596_800;
