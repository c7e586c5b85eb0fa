// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Encrypted broadcast fan-out encoder.
//!
//! Turns one message plus a `user -> client -> ciphertext` map into a JSON or
//! protobuf broadcast body, applies the missing-recipient precondition, and
//! hands the result to a [`BroadcastTransport`](otrcast_core::BroadcastTransport).
//!
//! - [`precondition`] - classify the caller's precondition into one strategy
//! - [`json`] - passthrough JSON encoding
//! - [`proto`] - protobuf encoding with typed user and client references
//! - [`service`] - [`BroadcastService`], the entry point

pub mod ids;
pub mod json;
pub mod precondition;
pub mod proto;
pub mod service;

pub use ids::{ClientRef, UserRef};
pub use json::encode_json;
pub use precondition::{PreconditionInput, PreconditionOption};
pub use proto::{encode_protobuf, ClientEntry, NewOtrMessage, UserEntry};
pub use service::BroadcastService;
