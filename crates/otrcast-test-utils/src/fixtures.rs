// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Envelope fixtures shared by integration tests.

use otrcast_core::{DeviceCipherMap, MessageEnvelope, RecipientMap};

pub const ALICE: &str = "11111111-1111-1111-1111-111111111111";
pub const BOB: &str = "22222222-2222-2222-2222-222222222222";

/// Base64 of `plaintext`.
pub const ALICE_CIPHERTEXT_B64: &str = "cGxhaW50ZXh0";

/// Sender `a1` broadcasting to Alice's device `a1` with base64 text.
pub fn text_envelope() -> MessageEnvelope<String> {
    let mut recipients = RecipientMap::new();
    recipients.insert(
        ALICE.to_string(),
        DeviceCipherMap::from([("a1".to_string(), ALICE_CIPHERTEXT_B64.to_string())]),
    );
    MessageEnvelope::new("a1", recipients)
}

/// Sender `a1` broadcasting raw bytes to two devices of Alice and one of Bob.
pub fn binary_envelope() -> MessageEnvelope<Vec<u8>> {
    let mut recipients = RecipientMap::new();
    recipients.insert(
        ALICE.to_string(),
        DeviceCipherMap::from([
            ("a1".to_string(), b"plaintext".to_vec()),
            ("a2".to_string(), vec![0x00, 0xff, 0x10]),
        ]),
    );
    recipients.insert(
        BOB.to_string(),
        DeviceCipherMap::from([("b2".to_string(), vec![0xb0])]),
    );
    MessageEnvelope::new("a1", recipients)
}
