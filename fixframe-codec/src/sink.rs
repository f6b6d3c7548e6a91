/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Destinations for framed messages.

use std::collections::VecDeque;

/// Receives each message emitted by the frame decoder, in stream order.
///
/// Implemented for closures taking a `String`, for `Vec<String>` and for
/// `VecDeque<String>`.
pub trait MessageSink {
    /// Called once per framed message.
    fn on_message(&mut self, message: String);
}

impl<F: FnMut(String)> MessageSink for F {
    fn on_message(&mut self, message: String) {
        self(message);
    }
}

impl MessageSink for Vec<String> {
    fn on_message(&mut self, message: String) {
        self.push(message);
    }
}

impl MessageSink for VecDeque<String> {
    fn on_message(&mut self, message: String) {
        self.push_back(message);
    }
}
