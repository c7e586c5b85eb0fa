// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for otrcast integration tests.
//!
//! Provides a mock transport and envelope fixtures for fast, deterministic
//! tests without a backend.

pub mod fixtures;
pub mod mock_transport;

pub use mock_transport::{MockTransport, SentBroadcast};
