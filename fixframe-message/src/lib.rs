/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FixFrame Message
//!
//! Version-aware construction of messages from framed FIX text.
//!
//! This crate provides:
//! - **Factories**: the [`MessageFactory`] construction strategy per version
//! - **Registry**: explicit version-to-factory mapping with FIXT routing by ApplVerID

pub mod factory;
pub mod registry;

pub use factory::{GenericMessageFactory, MessageFactory, VersionMessageFactory};
pub use registry::MessageRegistry;
