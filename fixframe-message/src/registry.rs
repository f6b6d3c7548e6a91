/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Version-keyed registry of message factories.
//!
//! Factories are registered explicitly under a version identifier, at
//! startup or while running. Lookup follows the BeginString, except that
//! application messages carried over `FIXT.1.1` are routed by ApplVerID.

use crate::factory::{GenericMessageFactory, MessageFactory, VersionMessageFactory};
use fixframe_core::error::DecodeError;
use fixframe_core::message::{Message, MsgType};
use fixframe_core::version::{BEGINSTRING_FIXT11, Version};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Registry mapping version identifiers to message factories.
pub struct MessageRegistry {
    factories: RwLock<HashMap<String, Arc<dyn MessageFactory>>>,
    default_version: Version,
}

impl MessageRegistry {
    /// Creates an empty registry defaulting to FIX.5.0SP2 for FIXT.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
            default_version: Version::Fix50Sp2,
        }
    }

    /// Creates a registry with a [`VersionMessageFactory`] for every known version.
    #[must_use]
    pub fn with_all_versions() -> Self {
        let registry = Self::new();
        for version in Version::ALL {
            registry.register(version.id(), Arc::new(VersionMessageFactory::new(version)));
        }
        registry
    }

    /// Sets the application version assumed when a FIXT message has no ApplVerID.
    #[must_use]
    pub fn with_default_version(mut self, version: Version) -> Self {
        self.default_version = version;
        self
    }

    /// Registers a factory, returning the registry.
    #[must_use]
    pub fn with_factory(self, id: impl Into<String>, factory: Arc<dyn MessageFactory>) -> Self {
        self.register(id, factory);
        self
    }

    /// Registers a factory under a version identifier, replacing any previous one.
    ///
    /// # Arguments
    /// * `id` - Version identifier, e.g. `FIX.4.4` or `FIX.5.0SP2`
    /// * `factory` - The factory to use for that version
    pub fn register(&self, id: impl Into<String>, factory: Arc<dyn MessageFactory>) {
        let id = id.into();
        debug!(%id, "registered message factory");
        self.factories.write().insert(id, factory);
    }

    /// Returns the default application version.
    #[inline]
    #[must_use]
    pub const fn default_version(&self) -> Version {
        self.default_version
    }

    /// Returns true if a factory is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.factories.read().contains_key(id)
    }

    /// Returns the number of registered factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    /// Returns true if no factory is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }

    /// Creates an empty message through the matching factory.
    ///
    /// # Arguments
    /// * `begin_string` - BeginString of the message
    /// * `appl_ver_id` - ApplVerID (tag 1128) if the message carries one
    /// * `msg_type` - The message type
    ///
    /// # Returns
    /// The factory's message, or a generic one if no factory matches.
    #[must_use]
    pub fn create(
        &self,
        begin_string: &str,
        appl_ver_id: Option<&str>,
        msg_type: &MsgType,
    ) -> Message {
        let id = if begin_string == BEGINSTRING_FIXT11 && !msg_type.is_admin() {
            match appl_ver_id {
                None => Some(self.default_version),
                Some(value) => Version::from_appl_ver_id(value),
            }
            .map_or(begin_string, |v| v.id())
        } else {
            begin_string
        };

        let factory = self.factories.read().get(id).cloned();
        match factory {
            Some(factory) => factory.create(begin_string, msg_type),
            None => {
                debug!(id, %msg_type, "no message factory, using generic message");
                GenericMessageFactory.create(begin_string, msg_type)
            }
        }
    }

    /// Parses a framed message and builds it through the matching factory.
    ///
    /// Fields preset by the factory take the parsed value; all other fields
    /// are appended in wire order.
    ///
    /// # Errors
    /// Returns `DecodeError` if the text is not a valid tag/value message.
    pub fn parse(&self, text: &str, delimiter: u8) -> Result<Message, DecodeError> {
        let parsed = Message::parse(text, delimiter)?;
        let mut message =
            self.create(parsed.begin_string(), parsed.appl_ver_id(), parsed.msg_type());

        let mut preset: HashSet<u32> = message.fields().map(|f| f.tag).collect();
        for field in parsed.fields() {
            if preset.remove(&field.tag) {
                message.set_field(field.tag, field.value.as_str());
            } else {
                message.push_field(field.clone());
            }
        }
        Ok(message)
    }
}

impl Default for MessageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MessageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<String> = self.factories.read().keys().cloned().collect();
        ids.sort();
        f.debug_struct("MessageRegistry")
            .field("factories", &ids)
            .field("default_version", &self.default_version)
            .finish()
    }
}
