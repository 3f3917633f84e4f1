//! Header / data split of a raw log

use easlog_core::{decode_packets, packet::Frames, split_sensor_data, Packet};

use crate::{
    config::ReaderConfig,
    errors::{ReaderError, ReaderResult},
};

/// A raw log split into its two blocks
///
/// Borrows the caller's bytes; nothing is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFile<'a> {
    header: &'a [u8],
    data: &'a [u8],
}

impl<'a> LogFile<'a> {
    /// Split `bytes` at `config.header_len`.
    ///
    /// An empty data block is fine. A file shorter than the header is not.
    pub fn split(bytes: &'a [u8], config: &ReaderConfig) -> ReaderResult<Self> {
        config.validate()?;

        if bytes.len() < config.header_len {
            return Err(ReaderError::LogTooShort {
                len: bytes.len(),
                header_len: config.header_len,
            });
        }

        let (header, data) = bytes.split_at(config.header_len);
        Ok(Self { header, data })
    }

    /// Text header block
    pub fn header(&self) -> &'a [u8] {
        self.header
    }

    /// Binary data block
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Whole frames of the data block
    pub fn frames(&self) -> Frames<'a> {
        split_sensor_data(self.data)
    }

    /// Decoded packets of the data block
    pub fn packets(&self) -> impl Iterator<Item = Packet> + 'a {
        decode_packets(self.data)
    }
}
