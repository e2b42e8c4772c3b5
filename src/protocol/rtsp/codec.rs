use thiserror::Error;

use super::headers::Headers;
use super::response::{RtspResponse, StatusCode};

/// Errors during RTSP response parsing
#[derive(Debug, Error)]
pub enum RtspCodecError {
    /// The status line was not `RTSP/x.y <code> <reason>`
    #[error("invalid status line: {0}")]
    InvalidStatusLine(String),

    /// A header line had no colon
    #[error("invalid header line: {0}")]
    InvalidHeader(String),

    /// The buffered response exceeded the size cap
    #[error("response too large: {size} bytes")]
    ResponseTooLarge {
        /// Bytes buffered when the cap was hit
        size: usize,
    },
}

/// Default cap on a buffered response. SDP bodies are small; anything
/// bigger than this is a misbehaving peer.
const DEFAULT_MAX_SIZE: usize = 256 * 1024;

/// Incremental, sans-IO parser for RTSP responses.
///
/// Bytes arrive via [`feed`](Self::feed) in whatever chunks the transport
/// produces; [`decode`](Self::decode) returns a response only once the
/// header block is terminated by a blank line and, when Content-Length is
/// declared, the full body has arrived. A response spanning many reads is
/// never truncated.
#[derive(Debug)]
pub struct RtspCodec {
    buffer: Vec<u8>,
    max_size: usize,
}

impl RtspCodec {
    /// Create a codec with the default size cap
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    /// Override the maximum buffered response size
    #[must_use]
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Append transport bytes to the parse buffer
    ///
    /// # Errors
    /// Returns `ResponseTooLarge` once the buffer would exceed the cap.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), RtspCodecError> {
        if self.buffer.len() + bytes.len() > self.max_size {
            return Err(RtspCodecError::ResponseTooLarge {
                size: self.buffer.len() + bytes.len(),
            });
        }
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    /// Try to decode one complete response from the front of the buffer
    ///
    /// Returns `Ok(None)` when more bytes are needed.
    ///
    /// # Errors
    /// Returns `RtspCodecError` when the buffered bytes are not a valid
    /// RTSP response.
    pub fn decode(&mut self) -> Result<Option<RtspResponse>, RtspCodecError> {
        // The header block ends at the first blank line.
        let Some(header_end) = find(&self.buffer, b"\r\n\r\n") else {
            return Ok(None);
        };
        let body_start = header_end + 4;

        let head = String::from_utf8_lossy(&self.buffer[..header_end]).into_owned();
        let mut lines = head.split("\r\n");

        let status_line = lines.next().unwrap_or_default();
        let (version, status, reason) = parse_status_line(status_line)?;

        let mut headers = Headers::new();
        for line in lines {
            let colon = line
                .find(':')
                .ok_or_else(|| RtspCodecError::InvalidHeader(line.to_string()))?;
            headers.insert(line[..colon].trim(), line[colon + 1..].trim());
        }

        let content_length = headers.content_length().unwrap_or(0);
        if self.buffer.len() < body_start + content_length {
            return Ok(None);
        }

        let body = self.buffer[body_start..body_start + content_length].to_vec();
        self.buffer.drain(..body_start + content_length);

        Ok(Some(RtspResponse {
            version,
            status,
            reason,
            headers,
            body,
        }))
    }

    /// Drop any buffered bytes
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Bytes currently buffered
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for RtspCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn parse_status_line(line: &str) -> Result<(String, StatusCode, String), RtspCodecError> {
    // "RTSP/1.0 200 OK"
    let mut parts = line.splitn(3, ' ');
    let version = parts
        .next()
        .filter(|v| v.starts_with("RTSP/"))
        .ok_or_else(|| RtspCodecError::InvalidStatusLine(line.to_string()))?;
    let status = parts
        .next()
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or_else(|| RtspCodecError::InvalidStatusLine(line.to_string()))?;
    let reason = parts.next().unwrap_or("").to_string();
    Ok((version.to_string(), StatusCode(status), reason))
}
