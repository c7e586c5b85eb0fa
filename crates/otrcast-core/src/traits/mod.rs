// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consumed by the broadcast service.
//!
//! Traits use `#[async_trait]` so implementations can be used as trait objects.

pub mod transport;

pub use transport::BroadcastTransport;
