// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! otrcast - encrypted broadcast fan-out encoder.
//!
//! Takes per-device ciphertexts for every recipient of a broadcast, picks the
//! missing-device policy, encodes the recipient table as JSON or protobuf and
//! hands the result to a [`BroadcastTransport`].
//!
//! ```no_run
//! # async fn run() -> Result<(), otrcast::OtrcastError> {
//! use otrcast::{Broadcaster, PreconditionOption, RecipientMap};
//!
//! let config = otrcast_config::load_config()
//!     .map_err(|e| otrcast::OtrcastError::Config(e.to_string()))?;
//! otrcast::init_tracing(&config.logging.level)?;
//!
//! let broadcaster = Broadcaster::from_config(&config)?;
//! let recipients: RecipientMap<Vec<u8>> = RecipientMap::new();
//! let mismatch = broadcaster
//!     .broadcast("a1", recipients, PreconditionOption::IgnoreMissing)
//!     .await?;
//! println!("missing: {:?}", mismatch.missing);
//! # Ok(())
//! # }
//! ```

pub mod broadcaster;
pub mod telemetry;

pub use broadcaster::Broadcaster;
pub use telemetry::init_tracing;

pub use otrcast_broadcast::{
    encode_json, encode_protobuf, BroadcastService, ClientRef, NewOtrMessage, PreconditionInput,
    PreconditionOption, UserRef,
};
pub use otrcast_core::{
    BroadcastTransport, ClientMismatch, DeviceCipherMap, IdentifierRole, JsonBroadcastPayload,
    MessageEnvelope, NativePriority, OtrcastError, RecipientMap, WireEncoding,
};
pub use otrcast_http::HttpTransport;
