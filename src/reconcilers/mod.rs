// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reacting to watch events: the finalizer sweeper and its persistence strategies.

pub mod finalizer;
pub mod persister;
pub mod sweeper;

pub use persister::{MergePatchPersister, Persister, UpdatePersister};
pub use sweeper::{Outcome, Sweeper};
