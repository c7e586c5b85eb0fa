// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON broadcast encoding.
//!
//! A structural passthrough: identifiers and base64 ciphertexts are copied
//! as opaque strings and only the precondition field is added.

use otrcast_core::{JsonBroadcastPayload, MessageEnvelope};

use crate::precondition::PreconditionOption;

/// Build the JSON body for a broadcast.
///
/// Performs no identifier validation and never fails. The envelope is only
/// borrowed, so it can be reused for further sends.
pub fn encode_json(
    envelope: &MessageEnvelope<String>,
    precondition: &PreconditionOption,
) -> JsonBroadcastPayload {
    JsonBroadcastPayload {
        sender: envelope.sender.clone(),
        recipients: envelope.recipients.clone(),
        native_push: envelope.native_push,
        transient: envelope.transient,
        native_priority: envelope.native_priority,
        data: envelope.data.clone(),
        report_missing: precondition.report_missing().map(<[String]>::to_vec),
    }
}
