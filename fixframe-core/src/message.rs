/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message types for FIX protocol.
//!
//! This module provides:
//! - [`MsgType`]: Enumeration of common FIX message types
//! - [`Message`]: Owned field list built from a framed message string

use crate::error::DecodeError;
use crate::field::{APPL_VER_ID, BEGIN_STRING, Field, MSG_TYPE, parse_tag};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Common FIX message types.
///
/// Types without a dedicated variant are kept as `Custom(String)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MsgType {
    /// Heartbeat (0) - Session level.
    #[default]
    Heartbeat,
    /// Test Request (1) - Session level.
    TestRequest,
    /// Resend Request (2) - Session level.
    ResendRequest,
    /// Reject (3) - Session level.
    Reject,
    /// Sequence Reset (4) - Session level.
    SequenceReset,
    /// Logout (5) - Session level.
    Logout,
    /// Execution Report (8).
    ExecutionReport,
    /// Logon (A) - Session level.
    Logon,
    /// New Order Single (D).
    NewOrderSingle,
    /// Order Cancel Request (F).
    OrderCancelRequest,
    /// Market Data Request (V).
    MarketDataRequest,
    /// Market Data Snapshot/Full Refresh (W).
    MarketDataSnapshotFullRefresh,
    /// Market Data Incremental Refresh (X).
    MarketDataIncrementalRefresh,
    /// Business Message Reject (j).
    BusinessMessageReject,
    /// Custom or unknown message type.
    Custom(String),
}

impl std::str::FromStr for MsgType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "0" => Self::Heartbeat,
            "1" => Self::TestRequest,
            "2" => Self::ResendRequest,
            "3" => Self::Reject,
            "4" => Self::SequenceReset,
            "5" => Self::Logout,
            "8" => Self::ExecutionReport,
            "A" => Self::Logon,
            "D" => Self::NewOrderSingle,
            "F" => Self::OrderCancelRequest,
            "V" => Self::MarketDataRequest,
            "W" => Self::MarketDataSnapshotFullRefresh,
            "X" => Self::MarketDataIncrementalRefresh,
            "j" => Self::BusinessMessageReject,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl MsgType {
    /// Returns the wire value of this message type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Heartbeat => "0",
            Self::TestRequest => "1",
            Self::ResendRequest => "2",
            Self::Reject => "3",
            Self::SequenceReset => "4",
            Self::Logout => "5",
            Self::ExecutionReport => "8",
            Self::Logon => "A",
            Self::NewOrderSingle => "D",
            Self::OrderCancelRequest => "F",
            Self::MarketDataRequest => "V",
            Self::MarketDataSnapshotFullRefresh => "W",
            Self::MarketDataIncrementalRefresh => "X",
            Self::BusinessMessageReject => "j",
            Self::Custom(s) => s,
        }
    }

    /// Returns true if this is a session-level (admin) message.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::Heartbeat
                | Self::TestRequest
                | Self::ResendRequest
                | Self::Reject
                | Self::SequenceReset
                | Self::Logout
                | Self::Logon
        )
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Owned FIX message as an ordered tag/value list.
///
/// Field order is preserved as received. Repeated tags (repeating groups)
/// are kept; lookups return the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// The parsed message type.
    msg_type: MsgType,
    /// Fields in wire order, header included.
    fields: SmallVec<[Field; 16]>,
}

impl Message {
    /// Creates an empty message with its BeginString and MsgType set.
    #[must_use]
    pub fn new(begin_string: impl Into<String>, msg_type: MsgType) -> Self {
        let mut fields = SmallVec::new();
        fields.push(Field::new(BEGIN_STRING, begin_string));
        fields.push(Field::new(MSG_TYPE, msg_type.as_str()));
        Self { msg_type, fields }
    }

    /// Parses a framed message string.
    ///
    /// The input is a message as emitted by the frame decoder: it starts
    /// with the BeginString field and every field ends with `delimiter`.
    /// A trailing field without a delimiter is accepted.
    ///
    /// # Errors
    /// Returns `DecodeError` if the first field is not BeginString, a tag is
    /// not numeric, or no MsgType field is present.
    pub fn parse(text: &str, delimiter: u8) -> Result<Self, DecodeError> {
        let mut fields: SmallVec<[Field; 16]> = SmallVec::new();

        for raw in text.split(char::from(delimiter)) {
            if raw.is_empty() {
                continue;
            }

            let (tag, value) = raw
                .split_once('=')
                .ok_or_else(|| DecodeError::InvalidTag(raw.to_string()))?;
            let tag = parse_tag(tag.as_bytes())
                .ok_or_else(|| DecodeError::InvalidTag(tag.to_string()))?;
            fields.push(Field::new(tag, value));
        }

        if fields.first().is_none_or(|f| f.tag != BEGIN_STRING) {
            return Err(DecodeError::InvalidBeginString);
        }

        let msg_type: MsgType = fields
            .iter()
            .find(|f| f.tag == MSG_TYPE)
            .ok_or(DecodeError::MissingMsgType)?
            .value
            .parse()
            .unwrap_or_default();

        Ok(Self { msg_type, fields })
    }

    /// Returns the BeginString value (e.g., "FIX.4.4").
    #[must_use]
    pub fn begin_string(&self) -> &str {
        self.get_field_str(BEGIN_STRING).unwrap_or("")
    }

    /// Returns the message type.
    #[inline]
    #[must_use]
    pub fn msg_type(&self) -> &MsgType {
        &self.msg_type
    }

    /// Returns the ApplVerID (tag 1128), if present.
    #[must_use]
    pub fn appl_ver_id(&self) -> Option<&str> {
        self.get_field_str(APPL_VER_ID)
    }

    /// Gets the first field with the given tag.
    #[must_use]
    pub fn get_field(&self, tag: u32) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// Gets the first value with the given tag.
    #[must_use]
    pub fn get_field_str(&self, tag: u32) -> Option<&str> {
        self.get_field(tag).map(|f| f.value.as_str())
    }

    /// Sets a field, replacing the first occurrence or appending it.
    pub fn set_field(&mut self, tag: u32, value: impl Into<String>) {
        let value = value.into();
        if tag == MSG_TYPE {
            self.msg_type = value.parse().unwrap_or_default();
        }
        match self.fields.iter_mut().find(|f| f.tag == tag) {
            Some(field) => field.value = value,
            None => self.fields.push(Field::new(tag, value)),
        }
    }

    /// Appends a field, keeping any earlier occurrence of the tag.
    pub fn push_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Returns an iterator over all fields in order.
    #[inline]
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Returns the number of fields.
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msg_type_from_str() {
        assert_eq!("0".parse::<MsgType>().unwrap(), MsgType::Heartbeat);
        assert_eq!("A".parse::<MsgType>().unwrap(), MsgType::Logon);
        assert_eq!("D".parse::<MsgType>().unwrap(), MsgType::NewOrderSingle);
        assert_eq!(
            "XX".parse::<MsgType>().unwrap(),
            MsgType::Custom("XX".to_string())
        );
    }

    #[test]
    fn test_msg_type_is_admin() {
        assert!(MsgType::Logon.is_admin());
        assert!(MsgType::SequenceReset.is_admin());
        assert!(!MsgType::NewOrderSingle.is_admin());
        assert!(!MsgType::Custom("U1".into()).is_admin());
    }

    #[test]
    fn test_parse_framed_message() {
        let msg = Message::parse("8=FIX.4.4\x019=12\x0135=D\x0155=IBM\x01", 0x01).unwrap();
        assert_eq!(msg.begin_string(), "FIX.4.4");
        assert_eq!(msg.msg_type(), &MsgType::NewOrderSingle);
        assert_eq!(msg.get_field_str(55), Some("IBM"));
        assert_eq!(msg.field_count(), 4);
    }

    #[test]
    fn test_parse_custom_delimiter_and_repeats() {
        let msg = Message::parse("8=FIXT.1.1|9=20|35=X|269=0|269=1", b'|').unwrap();
        assert_eq!(msg.msg_type(), &MsgType::MarketDataIncrementalRefresh);
        assert_eq!(msg.fields().filter(|f| f.tag == 269).count(), 2);
        assert_eq!(msg.get_field_str(269), Some("0"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Message::parse("9=5\x0135=0\x01", 0x01),
            Err(DecodeError::InvalidBeginString)
        );
        assert_eq!(
            Message::parse("8=FIX.4.2\x019=5\x01", 0x01),
            Err(DecodeError::MissingMsgType)
        );
        assert!(matches!(
            Message::parse("8=FIX.4.2\x01abc\x01", 0x01),
            Err(DecodeError::InvalidTag(_))
        ));
    }

    #[test]
    fn test_set_field() {
        let mut msg = Message::new("FIX.4.2", MsgType::Heartbeat);
        msg.set_field(112, "TEST");
        msg.set_field(MSG_TYPE, "1");
        assert_eq!(msg.msg_type(), &MsgType::TestRequest);
        assert_eq!(msg.get_field_str(MSG_TYPE), Some("1"));
        assert_eq!(msg.get_field_str(112), Some("TEST"));
        assert_eq!(msg.field_count(), 3);
    }
}
