use std::collections::HashMap;

use thiserror::Error;

use super::{MediaDescription, SessionDescription};

/// Errors while parsing an SDP body
#[derive(Debug, Error)]
pub enum SdpParseError {
    /// The `v=` line did not carry a number
    #[error("invalid version line: {0}")]
    InvalidVersion(String),
    /// An `m=` line had fewer than four fields
    #[error("invalid media line: {0}")]
    InvalidMedia(String),
}

/// Line-oriented SDP parser
pub struct SdpParser;

impl SdpParser {
    /// Parse an SDP body.
    ///
    /// Attributes before the first `m=` line are session-level; later ones
    /// belong to the media section they follow. Unknown line types are
    /// ignored, as cameras emit plenty of vendor extras.
    ///
    /// # Errors
    /// Returns `SdpParseError` on malformed `v=` or `m=` lines.
    pub fn parse(input: &str) -> Result<SessionDescription, SdpParseError> {
        let mut sdp = SessionDescription::default();
        let mut current_media: Option<MediaDescription> = None;

        for line in input.lines() {
            let line = line.trim_end_matches('\r').trim();
            if line.len() < 2 || line.as_bytes()[1] != b'=' {
                continue;
            }
            let value = &line[2..];

            match line.as_bytes()[0] {
                b'v' => {
                    sdp.version = value
                        .trim()
                        .parse()
                        .map_err(|_| SdpParseError::InvalidVersion(value.to_string()))?;
                }
                b's' => {
                    sdp.session_name = value.to_string();
                }
                b'c' => {
                    let address = connection_address(value);
                    if let Some(ref mut media) = current_media {
                        media.connection = address;
                    } else {
                        sdp.connection = address;
                    }
                }
                b'm' => {
                    if let Some(media) = current_media.take() {
                        sdp.media.push(media);
                    }
                    current_media = Some(Self::parse_media(value)?);
                }
                b'a' => {
                    let (name, attr_value) = Self::parse_attribute(value);
                    if let Some(ref mut media) = current_media {
                        media.attributes.insert(name, attr_value);
                    } else {
                        sdp.attributes.insert(name, attr_value);
                    }
                }
                _ => {}
            }
        }

        if let Some(media) = current_media {
            sdp.media.push(media);
        }

        Ok(sdp)
    }

    fn parse_media(value: &str) -> Result<MediaDescription, SdpParseError> {
        // "audio 0 RTP/AVP 8"
        let parts: Vec<&str> = value.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(SdpParseError::InvalidMedia(value.to_string()));
        }

        Ok(MediaDescription {
            media_type: parts[0].to_string(),
            port: parts[1].parse().unwrap_or(0),
            protocol: parts[2].to_string(),
            formats: parts[3..].iter().map(ToString::to_string).collect(),
            connection: None,
            attributes: HashMap::new(),
        })
    }

    fn parse_attribute(value: &str) -> (String, Option<String>) {
        match value.split_once(':') {
            Some((name, attr_value)) => (name.to_string(), Some(attr_value.to_string())),
            None => (value.to_string(), None),
        }
    }
}

/// Pull the address out of "IN IP4 192.168.1.64"
fn connection_address(value: &str) -> Option<String> {
    value.split_whitespace().nth(2).map(ToString::to_string)
}
