// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Change-event subscription for the watched kind.

pub mod subscription;

pub use subscription::Subscription;
