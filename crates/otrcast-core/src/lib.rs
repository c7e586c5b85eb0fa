// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the otrcast broadcast encoder.
//!
//! This crate provides the envelope and payload types, the shared error type
//! and the [`BroadcastTransport`] trait that the encoder hands payloads to.
//! It contains no encoding logic of its own.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::OtrcastError;
pub use traits::BroadcastTransport;
pub use types::{
    ClientMismatch, DeviceCipherMap, IdentifierRole, JsonBroadcastPayload, MessageEnvelope,
    NativePriority, RecipientMap, UserClients, WireEncoding,
};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn two_user_envelope() -> MessageEnvelope<Vec<u8>> {
        let mut recipients = RecipientMap::new();
        recipients.insert(
            "22222222-2222-2222-2222-222222222222".to_string(),
            DeviceCipherMap::from([("b2".to_string(), vec![2u8])]),
        );
        recipients.insert(
            "11111111-1111-1111-1111-111111111111".to_string(),
            DeviceCipherMap::from([
                ("a1".to_string(), vec![1u8]),
                ("a2".to_string(), vec![1u8, 1]),
            ]),
        );
        MessageEnvelope::new("a1", recipients)
    }

    #[test]
    fn envelope_counts_users_and_clients() {
        let envelope = two_user_envelope();
        assert_eq!(envelope.user_count(), 2);
        assert_eq!(envelope.client_count(), 3);
        assert!(envelope.native_push);
        assert!(!envelope.transient);
    }

    #[test]
    fn empty_envelope_is_legal() {
        let envelope: MessageEnvelope<String> = MessageEnvelope::new("a1", RecipientMap::new());
        assert_eq!(envelope.user_count(), 0);
        assert_eq!(envelope.client_count(), 0);
    }

    #[test]
    fn recipients_iterate_in_user_id_order() {
        let envelope = two_user_envelope();
        let users: Vec<&str> = envelope.recipients.keys().map(String::as_str).collect();
        assert_eq!(
            users,
            vec![
                "11111111-1111-1111-1111-111111111111",
                "22222222-2222-2222-2222-222222222222",
            ]
        );
    }

    #[test]
    fn map_ciphertexts_keeps_identifiers_and_flags() {
        let envelope = two_user_envelope()
            .with_transient(true)
            .with_native_priority(NativePriority::High)
            .with_data(vec![9u8]);

        let mapped = envelope.clone().map_ciphertexts(|bytes| bytes.len());

        assert_eq!(mapped.sender, "a1");
        assert!(mapped.transient);
        assert_eq!(mapped.native_priority, Some(NativePriority::High));
        assert_eq!(mapped.data, Some(1));
        assert_eq!(
            mapped.recipients["11111111-1111-1111-1111-111111111111"]["a2"],
            2
        );
        assert_eq!(mapped.client_count(), envelope.client_count());
    }

    #[test]
    fn identifier_roles_render_as_wire_names() {
        assert_eq!(IdentifierRole::Sender.to_string(), "sender");
        assert_eq!(IdentifierRole::RecipientUser.to_string(), "recipient-user");
        assert_eq!(IdentifierRole::RecipientClient.to_string(), "recipient-client");
        assert_eq!(
            IdentifierRole::ReportMissingUser.to_string(),
            "report-missing-user"
        );
    }

    #[test]
    fn wire_encoding_parses_and_serializes_lowercase() {
        assert_eq!(WireEncoding::from_str("json").unwrap(), WireEncoding::Json);
        assert_eq!(
            WireEncoding::from_str("protobuf").unwrap(),
            WireEncoding::Protobuf
        );
        assert_eq!(WireEncoding::default(), WireEncoding::Protobuf);
        let json = serde_json::to_string(&WireEncoding::Json).unwrap();
        assert_eq!(json, "\"json\"");
    }

    #[test]
    fn native_priority_wire_values() {
        assert_eq!(NativePriority::Low.wire_value(), 1);
        assert_eq!(NativePriority::High.wire_value(), 2);
        assert_eq!(NativePriority::from_wire_value(2), Some(NativePriority::High));
        assert_eq!(NativePriority::from_wire_value(7), None);
    }

    #[test]
    fn json_payload_omits_absent_optional_fields() {
        let payload = JsonBroadcastPayload {
            sender: "a1".into(),
            recipients: RecipientMap::new(),
            native_push: true,
            transient: false,
            native_priority: None,
            data: None,
            report_missing: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"sender": "a1", "recipients": {}, "native_push": true})
        );
    }

    #[test]
    fn client_mismatch_tolerates_partial_bodies() {
        let mismatch: ClientMismatch = serde_json::from_value(serde_json::json!({
            "time": "2026-01-01T00:00:00.000Z",
            "missing": {"11111111-1111-1111-1111-111111111111": ["a1", "b2"]}
        }))
        .unwrap();
        assert_eq!(mismatch.missing.len(), 1);
        assert!(mismatch.redundant.is_empty());
        assert!(!mismatch.is_clean());
        assert!(ClientMismatch::default().is_clean());
    }

    #[test]
    fn errors_render_role_and_value() {
        let err = OtrcastError::malformed(IdentifierRole::RecipientClient, "12g4", "not hex");
        assert_eq!(
            err.to_string(),
            "malformed recipient-client identifier `12g4`: not hex"
        );
        assert_eq!(err.status(), None);

        let missing = OtrcastError::MissingClients(ClientMismatch::default());
        assert_eq!(missing.status(), Some(412));
    }
}
