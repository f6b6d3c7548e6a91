/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message factory trait definition.
//!
//! A factory decides how an empty message of a given type is constructed
//! for one protocol version, e.g. which header fields it starts with.

use fixframe_core::field::APPL_VER_ID;
use fixframe_core::message::{Message, MsgType};
use fixframe_core::version::Version;

/// Construction strategy for messages of one protocol version.
pub trait MessageFactory: Send + Sync {
    /// Creates an empty message.
    ///
    /// # Arguments
    /// * `begin_string` - BeginString of the enclosing message
    /// * `msg_type` - The message type to create
    fn create(&self, begin_string: &str, msg_type: &MsgType) -> Message;
}

/// Builds messages carrying only BeginString and MsgType.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericMessageFactory;

impl MessageFactory for GenericMessageFactory {
    fn create(&self, begin_string: &str, msg_type: &MsgType) -> Message {
        Message::new(begin_string, msg_type.clone())
    }
}

/// Builds messages for one FIX version, stamping ApplVerID on FIX 5.0+
/// application messages.
#[derive(Debug, Clone, Copy)]
pub struct VersionMessageFactory {
    version: Version,
}

impl VersionMessageFactory {
    /// Creates a factory for `version`.
    #[must_use]
    pub const fn new(version: Version) -> Self {
        Self { version }
    }

    /// Returns the version this factory builds.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }
}

impl MessageFactory for VersionMessageFactory {
    fn create(&self, begin_string: &str, msg_type: &MsgType) -> Message {
        let mut message = Message::new(begin_string, msg_type.clone());
        if self.version.uses_fixt()
            && !msg_type.is_admin()
            && let Some(appl_ver_id) = self.version.appl_ver_id()
        {
            message.set_field(APPL_VER_ID, appl_ver_id);
        }
        message
    }
}
