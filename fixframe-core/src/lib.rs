/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FixFrame Core
//!
//! Core types and error definitions shared by the FixFrame crates.
//!
//! This crate provides:
//! - **Error types**: Framing, decode and configuration errors with `thiserror`
//! - **Field types**: `FieldTag`, `Field` and well-known tag numbers
//! - **Message types**: `MsgType` and the owned `Message` built from framed text
//! - **Versions**: FIX versions with their BeginString and ApplVerID values

pub mod error;
pub mod field;
pub mod message;
pub mod version;

pub use error::{ConfigError, DecodeError, FixError, FrameError, Result};
pub use field::{Field, FieldTag};
pub use message::{Message, MsgType};
pub use version::Version;
