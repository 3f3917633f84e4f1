//! Reader configuration

use easlog_core::constants::layout::{COEFFICIENT_LINE, HEADER_BLOCK_LEN};

use crate::errors::{ReaderError, ReaderResult};

/// Reader configuration
///
/// The defaults match every logger seen so far. Some firmware writes a
/// larger header; the data block still starts on a multiple of 0x400.
///
/// ```
/// use easlog_reader::ReaderConfig;
///
/// let config = ReaderConfig::default()
///     .with_header_len(0x800)
///     .with_coefficient_line(6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Length of the text header block in bytes
    pub header_len: usize,
    /// Zero-based line of each calibration section holding the coefficients
    pub coefficient_line: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            header_len: HEADER_BLOCK_LEN,
            coefficient_line: COEFFICIENT_LINE,
        }
    }
}

impl ReaderConfig {
    /// Set the header block length
    pub fn with_header_len(mut self, len: usize) -> Self {
        self.header_len = len;
        self
    }

    /// Set the coefficient line index
    pub fn with_coefficient_line(mut self, line: usize) -> Self {
        self.coefficient_line = line;
        self
    }

    /// Check the header length is a non-zero multiple of 0x400
    pub fn validate(&self) -> ReaderResult<()> {
        if self.header_len == 0 || self.header_len % HEADER_BLOCK_LEN != 0 {
            return Err(ReaderError::InvalidHeaderLength { len: self.header_len });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.header_len, 0x400);
        assert_eq!(config.coefficient_line, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unaligned_header() {
        for len in [0, 0x200, 0x401, 0x7FF] {
            assert_eq!(
                ReaderConfig::default().with_header_len(len).validate(),
                Err(ReaderError::InvalidHeaderLength { len })
            );
        }
        assert!(ReaderConfig::default().with_header_len(0xC00).validate().is_ok());
    }
}
