/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Batch extraction of messages from files.

use crate::decoder::FrameDecoder;
use crate::sink::MessageSink;
use fixframe_core::Result;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

impl FrameDecoder {
    /// Frames every message in the file at `path`, in order.
    ///
    /// The file is mapped read-only for the duration of the call. Any
    /// partial frame from a previous stream is discarded first, and a
    /// partial frame at the end of the file is dropped.
    ///
    /// # Arguments
    /// * `path` - File holding a captured FIX stream
    /// * `handler` - Receives each message
    ///
    /// # Returns
    /// The number of messages framed.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be opened or mapped, or a
    /// decode error if a message cannot be decoded.
    pub fn extract_messages_with<P, S>(&mut self, path: P, handler: &mut S) -> Result<usize>
    where
        P: AsRef<Path>,
        S: MessageSink + ?Sized,
    {
        let path = path.as_ref();
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(0);
        }

        // SAFETY: the map is read-only and dropped before returning. Truncating
        // the file while it is mapped is outside what this API supports.
        let map = unsafe { Mmap::map(&file)? };

        self.reset();
        let status = self.decode(&map, handler);
        self.finish();
        self.reset();

        let messages = status?.messages();
        debug!(path = %path.display(), len = map.len(), messages, "extracted messages");
        Ok(messages)
    }

    /// Frames every message in the file at `path` into a vector.
    ///
    /// # Errors
    /// Same as [`extract_messages_with`](Self::extract_messages_with).
    pub fn extract_messages<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<String>> {
        let mut messages: Vec<String> = Vec::new();
        self.extract_messages_with(path, &mut messages)?;
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_extract_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"8=FIX.4.2\x019=5\x0135=0\x0110=161\x01junk8=FIX.4.2\x019=5\x0135=1\x0110=162\x01")
            .unwrap();
        file.flush().unwrap();

        let mut decoder = FrameDecoder::default();
        let messages = decoder.extract_messages(file.path()).unwrap();

        assert_eq!(
            messages,
            ["8=FIX.4.2\x019=5\x0135=0\x01", "8=FIX.4.2\x019=5\x0135=1\x01"]
        );
        assert!(decoder.state().is_seeking());
    }

    #[test]
    fn test_extract_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let mut decoder = FrameDecoder::default();
        let mut count = 0;
        let framed = decoder
            .extract_messages_with(file.path(), &mut |_m: String| count += 1)
            .unwrap();
        assert_eq!(framed, 0);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_extract_missing_file() {
        let mut decoder = FrameDecoder::default();
        let err = decoder
            .extract_messages("/nonexistent/fixframe/capture.log")
            .unwrap_err();
        assert!(matches!(err, fixframe_core::FixError::Io(_)));
    }
}
