// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation and kind discovery.

pub mod client;
pub mod discovery;

pub use client::create_client;
pub use discovery::{resolve_kind, ResolvedKind};
