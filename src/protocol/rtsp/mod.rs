//! RTSP/1.0 request/response framing for the talk-back handshake

pub mod codec;
pub mod headers;
pub mod request;
pub mod response;

pub use codec::{RtspCodec, RtspCodecError};
pub use headers::Headers;
pub use request::{RtspRequest, RtspRequestBuilder};
pub use response::{RtspResponse, StatusCode};

/// The RTSP methods the talk-back handshake uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Fetch the session description (SDP)
    Describe,
    /// Establish transport for the back-channel track
    Setup,
    /// Start the session
    Play,
    /// Keep-alive ping
    Options,
    /// Tear down the session
    Teardown,
}

impl Method {
    /// Render as the on-wire method token
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Describe => "DESCRIBE",
            Method::Setup => "SETUP",
            Method::Play => "PLAY",
            Method::Options => "OPTIONS",
            Method::Teardown => "TEARDOWN",
        }
    }

    /// Parse a method token
    #[must_use]
    pub fn from_token(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "DESCRIBE" => Some(Method::Describe),
            "SETUP" => Some(Method::Setup),
            "PLAY" => Some(Method::Play),
            "OPTIONS" => Some(Method::Options),
            "TEARDOWN" => Some(Method::Teardown),
            _ => None,
        }
    }
}
