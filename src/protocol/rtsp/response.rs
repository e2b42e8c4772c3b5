use super::headers::{Headers, names};

/// RTSP status code newtype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// 200 OK
    pub const OK: StatusCode = StatusCode(200);
    /// 401 Unauthorized
    pub const UNAUTHORIZED: StatusCode = StatusCode(401);
    /// 403 Forbidden
    pub const FORBIDDEN: StatusCode = StatusCode(403);
    /// 454 Session Not Found
    pub const SESSION_NOT_FOUND: StatusCode = StatusCode(454);
    /// 461 Unsupported Transport
    pub const UNSUPPORTED_TRANSPORT: StatusCode = StatusCode(461);
    /// 551 Option Not Supported
    pub const OPTION_NOT_SUPPORTED: StatusCode = StatusCode(551);

    /// Check for a 2xx status
    #[must_use]
    pub fn is_success(self) -> bool {
        (200..300).contains(&self.0)
    }

    /// Check whether this status carries a digest challenge per the
    /// handshake rules (401 or 403)
    #[must_use]
    pub fn is_auth_challenge(self) -> bool {
        self.0 == 401 || self.0 == 403
    }

    /// Get the raw code
    #[must_use]
    pub fn as_u16(self) -> u16 {
        self.0
    }
}

/// An RTSP response message
#[derive(Debug, Clone)]
pub struct RtspResponse {
    /// RTSP version token (normally "RTSP/1.0")
    pub version: String,
    /// Status code
    pub status: StatusCode,
    /// Reason phrase
    pub reason: String,
    /// Response headers (case-insensitive, last value wins)
    pub headers: Headers,
    /// Response body, framed by Content-Length
    pub body: Vec<u8>,
}

impl RtspResponse {
    /// Check whether the response indicates success
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the `CSeq` echoed by the camera
    #[must_use]
    pub fn cseq(&self) -> Option<u32> {
        self.headers.cseq()
    }

    /// Get the session identifier with any `;timeout=` parameter stripped
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        let raw = self.headers.session()?;
        Some(raw.split(';').next().unwrap_or(raw).trim())
    }

    /// Encode back to RTSP/1.0 wire format. A response encoded and fed
    /// through [`super::RtspCodec`] parses back to the same status,
    /// headers, and body.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(128 + self.body.len());

        let status_line = format!("{} {} {}\r\n", self.version, self.status.0, self.reason);
        output.extend_from_slice(status_line.as_bytes());

        for (name, value) in self.headers.iter() {
            if name.eq_ignore_ascii_case(names::CONTENT_LENGTH) {
                continue;
            }
            output.extend_from_slice(name.as_bytes());
            output.extend_from_slice(b": ");
            output.extend_from_slice(value.as_bytes());
            output.extend_from_slice(b"\r\n");
        }

        if !self.body.is_empty() {
            let len_header = format!("{}: {}\r\n", names::CONTENT_LENGTH, self.body.len());
            output.extend_from_slice(len_header.as_bytes());
        }

        output.extend_from_slice(b"\r\n");
        output.extend_from_slice(&self.body);

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(StatusCode::OK.is_success());
        assert!(StatusCode(204).is_success());
        assert!(!StatusCode::SESSION_NOT_FOUND.is_success());
        assert!(StatusCode::UNAUTHORIZED.is_auth_challenge());
        assert!(StatusCode::FORBIDDEN.is_auth_challenge());
        assert!(!StatusCode::OK.is_auth_challenge());
    }

    #[test]
    fn test_session_id_strips_timeout() {
        let mut headers = Headers::new();
        headers.insert("Session", "ABC123;timeout=60");
        let response = RtspResponse {
            version: "RTSP/1.0".to_string(),
            status: StatusCode::OK,
            reason: "OK".to_string(),
            headers,
            body: Vec::new(),
        };
        assert_eq!(response.session_id(), Some("ABC123"));
    }

    #[test]
    fn test_encode_frames_body_with_content_length() {
        let mut headers = Headers::new();
        headers.insert("CSeq", "2");
        let response = RtspResponse {
            version: "RTSP/1.0".to_string(),
            status: StatusCode::OK,
            reason: "OK".to_string(),
            headers,
            body: b"v=0\r\n".to_vec(),
        };
        let encoded = String::from_utf8(response.encode()).unwrap();
        assert!(encoded.starts_with("RTSP/1.0 200 OK\r\n"));
        assert!(encoded.contains("Content-Length: 5\r\n"));
        assert!(encoded.ends_with("\r\n\r\nv=0\r\n"));
    }
}
