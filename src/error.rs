use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::protocol::rtsp::RtspCodecError;
use crate::protocol::sdp::SdpParseError;
use crate::session::Phase;

/// Errors that can occur during a talk-back session
#[derive(Debug, Error)]
pub enum TalkbackError {
    // ===== Input Errors =====
    /// The RTSP URL could not be parsed
    #[error("malformed RTSP URL {url:?}: {reason}")]
    MalformedUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The configured client port cannot span an RTP/RTCP port pair
    #[error("client_port {port} leaves no room for the RTCP port")]
    InvalidClientPort {
        /// The rejected port
        port: u16,
    },

    // ===== Transport Errors =====
    /// Network I/O failed
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),

    /// A read or write exceeded the per-operation timeout
    #[error("operation timed out after {duration:?}")]
    Timeout {
        /// The configured per-operation timeout
        duration: Duration,
    },

    /// The camera closed the connection
    #[error("connection closed by camera")]
    Disconnected,

    // ===== Authentication Errors =====
    /// Digest challenge missing, credentials absent, or credentials rejected
    /// after the single authentication retry
    #[error("authentication failed: {message}")]
    AuthenticationFailed {
        /// Description of the failure
        message: String,
    },

    /// The digest challenge requires parameters this client cannot satisfy
    #[error("unsupported digest challenge: {parameter}={value:?}")]
    UnsupportedChallenge {
        /// The offending challenge parameter
        parameter: &'static str,
        /// Its value
        value: String,
    },

    // ===== Handshake Errors =====
    /// The camera's SDP advertises no back-channel audio track
    #[error("no back-channel track in SDP")]
    NoBackchannelTrack,

    /// A handshake request received a non-2xx response
    #[error("handshake failed in {phase:?} phase: {status} {reason}")]
    Handshake {
        /// The phase the state machine was in
        phase: Phase,
        /// RTSP status code of the response
        status: u16,
        /// Reason phrase of the response
        reason: String,
    },

    /// Operation not valid in the current session phase
    #[error("{operation} not valid in {phase:?} phase")]
    InvalidPhase {
        /// The rejected operation
        operation: &'static str,
        /// The current phase
        phase: Phase,
    },

    // ===== Parse Errors =====
    /// RTSP response framing was invalid
    #[error("RTSP parse error: {0}")]
    Codec(#[from] RtspCodecError),

    /// The DESCRIBE body was not valid SDP
    #[error("SDP parse error: {0}")]
    Sdp(#[from] SdpParseError),
}

impl TalkbackError {
    /// Check whether this error came from the transport rather than the
    /// protocol. Transport errors are non-retryable within one handshake,
    /// but the caller may construct a fresh session and try again.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout { .. } | Self::Disconnected
        )
    }
}

/// Result type alias for talk-back operations
pub type Result<T> = std::result::Result<T, TalkbackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TalkbackError::MalformedUrl {
            url: "http://cam/".to_string(),
            reason: "scheme must be rtsp".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed RTSP URL \"http://cam/\": scheme must be rtsp"
        );
    }

    #[test]
    fn test_handshake_error_carries_phase() {
        let err = TalkbackError::Handshake {
            phase: Phase::SettingUp,
            status: 461,
            reason: "Unsupported Transport".to_string(),
        };
        assert!(err.to_string().contains("SettingUp"));
        assert!(err.to_string().contains("461"));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_is_transport() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionReset, "reset");
        let err: TalkbackError = io_err.into();
        assert!(err.is_transport());
        assert!(TalkbackError::Disconnected.is_transport());
        assert!(!TalkbackError::NoBackchannelTrack.is_transport());
    }

    #[test]
    fn test_error_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TalkbackError>();
    }
}
