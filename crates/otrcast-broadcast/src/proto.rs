// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Protobuf broadcast encoding.
//!
//! Builds a typed [`NewOtrMessage`] from an envelope and serializes it with
//! the proto2 wire format:
//!
//! ```text
//! message UserId      { required bytes  uuid = 1; }
//! message ClientId    { required uint64 client = 1; }
//! message ClientEntry { required ClientId client = 1; required bytes text = 2; }
//! message UserEntry   { required UserId user = 1; repeated ClientEntry clients = 2; }
//! message NewOtrMessage {
//!   required ClientId     sender          = 1;
//!   repeated UserEntry    recipients      = 2;
//!   optional bool         native_push     = 3 [default = true];
//!   optional bytes        blob            = 4;
//!   optional Priority     native_priority = 5;
//!   optional bool         transient       = 6 [default = false];
//!   repeated UserId       report_missing  = 7;
//! }
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use otrcast_core::{IdentifierRole, MessageEnvelope, NativePriority, OtrcastError};

use crate::ids::{ClientRef, UserRef};
use crate::precondition::PreconditionOption;

const WIRE_VARINT: u8 = 0;
const WIRE_FIXED64: u8 = 1;
const WIRE_LEN: u8 = 2;
const WIRE_FIXED32: u8 = 5;

/// One device's ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientEntry {
    pub client: ClientRef,
    pub text: Vec<u8>,
}

/// All device ciphertexts for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntry {
    pub user: UserRef,
    pub clients: Vec<ClientEntry>,
}

/// A fully materialized protobuf broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOtrMessage {
    pub sender: ClientRef,
    pub recipients: Vec<UserEntry>,
    pub native_push: bool,
    pub blob: Option<Vec<u8>>,
    pub native_priority: Option<NativePriority>,
    pub transient: bool,
    /// `Some` whenever reporting is restricted, even to zero users.
    ///
    /// On the wire an empty list is indistinguishable from an absent one, so
    /// [`NewOtrMessage::decode`] yields `None` for both.
    pub report_missing: Option<Vec<UserRef>>,
}

/// Build the protobuf message for a broadcast.
///
/// Every identifier is converted up front; the first malformed one aborts the
/// whole message.
pub fn encode_protobuf(
    envelope: &MessageEnvelope<Vec<u8>>,
    precondition: &PreconditionOption,
) -> Result<NewOtrMessage, OtrcastError> {
    let sender = ClientRef::parse(&envelope.sender, IdentifierRole::Sender)?;

    let recipients = envelope
        .recipients
        .iter()
        .map(|(user_id, clients)| {
            let user = UserRef::parse(user_id, IdentifierRole::RecipientUser)?;
            let clients = clients
                .iter()
                .map(|(client_id, text)| {
                    Ok(ClientEntry {
                        client: ClientRef::parse(client_id, IdentifierRole::RecipientClient)?,
                        text: text.clone(),
                    })
                })
                .collect::<Result<Vec<_>, OtrcastError>>()?;
            Ok(UserEntry { user, clients })
        })
        .collect::<Result<Vec<_>, OtrcastError>>()?;

    let report_missing = precondition
        .report_missing()
        .map(|users| {
            users
                .iter()
                .map(|user_id| UserRef::parse(user_id, IdentifierRole::ReportMissingUser))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    Ok(NewOtrMessage {
        sender,
        recipients,
        native_push: envelope.native_push,
        blob: envelope.data.clone(),
        native_priority: envelope.native_priority,
        transient: envelope.transient,
        report_missing,
    })
}

impl NewOtrMessage {
    /// Serialize to proto2 wire bytes.
    pub fn encode_to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::new();

        put_message(&mut buf, 1, |b| put_client_id(b, self.sender));

        for entry in &self.recipients {
            put_message(&mut buf, 2, |b| {
                put_message(b, 1, |u| put_user_id(u, entry.user));
                for client in &entry.clients {
                    put_message(b, 2, |c| {
                        put_message(c, 1, |id| put_client_id(id, client.client));
                        put_bytes(c, 2, &client.text);
                    });
                }
            });
        }

        put_key(&mut buf, 3, WIRE_VARINT);
        put_varint(&mut buf, u64::from(self.native_push));

        if let Some(blob) = &self.blob {
            put_bytes(&mut buf, 4, blob);
        }
        if let Some(priority) = self.native_priority {
            put_key(&mut buf, 5, WIRE_VARINT);
            put_varint(&mut buf, priority.wire_value());
        }
        if self.transient {
            put_key(&mut buf, 6, WIRE_VARINT);
            put_varint(&mut buf, 1);
        }
        for user in self.report_missing.iter().flatten() {
            put_message(&mut buf, 7, |u| put_user_id(u, *user));
        }

        buf.freeze()
    }

    /// Parse proto2 wire bytes.
    ///
    /// Unknown fields are skipped. Missing required fields, truncated input
    /// and unsupported wire types are reported as internal errors.
    pub fn decode(input: &[u8]) -> Result<Self, OtrcastError> {
        let mut reader = Reader::new(input);
        let mut sender = None;
        let mut message = NewOtrMessage {
            sender: ClientRef(0),
            recipients: Vec::new(),
            native_push: true,
            blob: None,
            native_priority: None,
            transient: false,
            report_missing: None,
        };

        while let Some((field, wire_type)) = reader.key()? {
            match (field, wire_type) {
                (1, WIRE_LEN) => sender = Some(decode_client_id(reader.bytes()?)?),
                (2, WIRE_LEN) => message.recipients.push(decode_user_entry(reader.bytes()?)?),
                (3, WIRE_VARINT) => message.native_push = reader.varint()? != 0,
                (4, WIRE_LEN) => message.blob = Some(reader.bytes()?.to_vec()),
                (5, WIRE_VARINT) => {
                    let value = reader.varint()?;
                    message.native_priority =
                        Some(NativePriority::from_wire_value(value).ok_or_else(|| {
                            OtrcastError::Internal(format!("unknown native priority {value}"))
                        })?);
                }
                (6, WIRE_VARINT) => message.transient = reader.varint()? != 0,
                (7, WIRE_LEN) => {
                    let user = decode_user_id(reader.bytes()?)?;
                    message.report_missing.get_or_insert_with(Vec::new).push(user);
                }
                (_, other) => reader.skip(other)?,
            }
        }

        message.sender = sender
            .ok_or_else(|| OtrcastError::Internal("NewOtrMessage is missing sender".into()))?;
        Ok(message)
    }
}

fn put_varint(buf: &mut BytesMut, mut value: u64) {
    while value >= 0x80 {
        buf.put_u8(((value & 0x7f) as u8) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

fn put_key(buf: &mut BytesMut, field: u32, wire_type: u8) {
    put_varint(buf, (u64::from(field) << 3) | u64::from(wire_type));
}

fn put_bytes(buf: &mut BytesMut, field: u32, bytes: &[u8]) {
    put_key(buf, field, WIRE_LEN);
    put_varint(buf, bytes.len() as u64);
    buf.put_slice(bytes);
}

/// Write a length-delimited sub-message built by `body`.
fn put_message(buf: &mut BytesMut, field: u32, body: impl FnOnce(&mut BytesMut)) {
    let mut nested = BytesMut::new();
    body(&mut nested);
    put_bytes(buf, field, &nested);
}

fn put_client_id(buf: &mut BytesMut, client: ClientRef) {
    put_key(buf, 1, WIRE_VARINT);
    put_varint(buf, client.0);
}

fn put_user_id(buf: &mut BytesMut, user: UserRef) {
    put_bytes(buf, 1, user.as_bytes());
}

fn decode_client_id(input: &[u8]) -> Result<ClientRef, OtrcastError> {
    let mut reader = Reader::new(input);
    let mut client = None;
    while let Some((field, wire_type)) = reader.key()? {
        match (field, wire_type) {
            (1, WIRE_VARINT) => client = Some(ClientRef(reader.varint()?)),
            (_, other) => reader.skip(other)?,
        }
    }
    client.ok_or_else(|| OtrcastError::Internal("ClientId is missing client".into()))
}

fn decode_user_id(input: &[u8]) -> Result<UserRef, OtrcastError> {
    let mut reader = Reader::new(input);
    let mut user = None;
    while let Some((field, wire_type)) = reader.key()? {
        match (field, wire_type) {
            (1, WIRE_LEN) => {
                let raw = reader.bytes()?;
                let uuid: [u8; 16] = raw.try_into().map_err(|_| {
                    OtrcastError::Internal(format!("UserId uuid has {} bytes, want 16", raw.len()))
                })?;
                user = Some(UserRef(uuid));
            }
            (_, other) => reader.skip(other)?,
        }
    }
    user.ok_or_else(|| OtrcastError::Internal("UserId is missing uuid".into()))
}

fn decode_user_entry(input: &[u8]) -> Result<UserEntry, OtrcastError> {
    let mut reader = Reader::new(input);
    let mut user = None;
    let mut clients = Vec::new();
    while let Some((field, wire_type)) = reader.key()? {
        match (field, wire_type) {
            (1, WIRE_LEN) => user = Some(decode_user_id(reader.bytes()?)?),
            (2, WIRE_LEN) => clients.push(decode_client_entry(reader.bytes()?)?),
            (_, other) => reader.skip(other)?,
        }
    }
    let user = user.ok_or_else(|| OtrcastError::Internal("UserEntry is missing user".into()))?;
    Ok(UserEntry { user, clients })
}

fn decode_client_entry(input: &[u8]) -> Result<ClientEntry, OtrcastError> {
    let mut reader = Reader::new(input);
    let mut client = None;
    let mut text = None;
    while let Some((field, wire_type)) = reader.key()? {
        match (field, wire_type) {
            (1, WIRE_LEN) => client = Some(decode_client_id(reader.bytes()?)?),
            (2, WIRE_LEN) => text = Some(reader.bytes()?.to_vec()),
            (_, other) => reader.skip(other)?,
        }
    }
    match (client, text) {
        (Some(client), Some(text)) => Ok(ClientEntry { client, text }),
        _ => Err(OtrcastError::Internal(
            "ClientEntry is missing client or text".into(),
        )),
    }
}

/// Cursor over proto2 wire bytes.
struct Reader<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Next field number and wire type, or `None` at end of input.
    fn key(&mut self) -> Result<Option<(u32, u8)>, OtrcastError> {
        if self.pos >= self.input.len() {
            return Ok(None);
        }
        let key = self.varint()?;
        let field = u32::try_from(key >> 3)
            .map_err(|_| OtrcastError::Internal(format!("field number out of range in key {key}")))?;
        Ok(Some((field, (key & 0x7) as u8)))
    }

    fn varint(&mut self) -> Result<u64, OtrcastError> {
        let mut result = 0u64;
        let mut shift = 0u32;
        while let Some(&byte) = self.input.get(self.pos) {
            self.pos += 1;
            // The tenth byte may only carry bit 63.
            if shift == 63 && byte & 0x7e != 0 {
                return Err(OtrcastError::Internal("varint overflows 64 bits".into()));
            }
            result |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
            if shift > 63 {
                return Err(OtrcastError::Internal("varint overflows 64 bits".into()));
            }
        }
        Err(OtrcastError::Internal("truncated varint".into()))
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], OtrcastError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.input.len())
            .ok_or_else(|| OtrcastError::Internal("truncated field".into()))?;
        let slice = &self.input[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn bytes(&mut self) -> Result<&'a [u8], OtrcastError> {
        let len = usize::try_from(self.varint()?)
            .map_err(|_| OtrcastError::Internal("field length out of range".into()))?;
        self.take(len)
    }

    fn skip(&mut self, wire_type: u8) -> Result<(), OtrcastError> {
        match wire_type {
            WIRE_VARINT => self.varint().map(|_| ()),
            WIRE_FIXED64 => self.take(8).map(|_| ()),
            WIRE_LEN => self.bytes().map(|_| ()),
            WIRE_FIXED32 => self.take(4).map(|_| ()),
            other => Err(OtrcastError::Internal(format!(
                "unsupported wire type {other}"
            ))),
        }
    }
}
