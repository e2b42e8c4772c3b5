use super::{Method, headers::Headers, headers::names};

/// An RTSP request message
#[derive(Debug, Clone)]
pub struct RtspRequest {
    /// Request method
    pub method: Method,
    /// Absolute request URI (e.g. `rtsp://192.168.1.64:554/Streaming/Channels/101`)
    pub uri: String,
    /// Request headers, encoded in insertion order
    pub headers: Headers,
    /// Request body (empty for all talk-back requests)
    pub body: Vec<u8>,
}

impl RtspRequest {
    /// Create a bare request
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// Create a builder for constructing requests
    pub fn builder(method: Method, uri: impl Into<String>) -> RtspRequestBuilder {
        RtspRequestBuilder::new(method, uri)
    }

    /// Get the `CSeq` header value
    #[must_use]
    pub fn cseq(&self) -> Option<u32> {
        self.headers.cseq()
    }

    /// Encode to RTSP/1.0 wire format
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(256 + self.body.len());

        output.extend_from_slice(self.method.as_str().as_bytes());
        output.push(b' ');
        output.extend_from_slice(self.uri.as_bytes());
        output.extend_from_slice(b" RTSP/1.0\r\n");

        for (name, value) in self.headers.iter() {
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

/// Builder for RTSP requests
#[derive(Debug)]
pub struct RtspRequestBuilder {
    request: RtspRequest,
}

impl RtspRequestBuilder {
    /// Create a new builder
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            request: RtspRequest::new(method, uri),
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.insert(name, value);
        self
    }

    /// Set the `CSeq` header
    #[must_use]
    pub fn cseq(self, seq: u32) -> Self {
        self.header(names::CSEQ, seq.to_string())
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(self, agent: &str) -> Self {
        self.header(names::USER_AGENT, agent)
    }

    /// Set the Session header
    #[must_use]
    pub fn session(self, session_id: &str) -> Self {
        self.header(names::SESSION, session_id)
    }

    /// Set the Accept header
    #[must_use]
    pub fn accept(self, media_type: &str) -> Self {
        self.header(names::ACCEPT, media_type)
    }

    /// Set the Authorization header
    #[must_use]
    pub fn authorization(self, credentials: &str) -> Self {
        self.header(names::AUTHORIZATION, credentials)
    }

    /// Build the request
    #[must_use]
    pub fn build(self) -> RtspRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_encode_describe() {
        let request = RtspRequest::builder(
            Method::Describe,
            "rtsp://192.168.1.64:554/Streaming/Channels/101",
        )
        .cseq(1)
        .accept("application/sdp")
        .build();

        let encoded = String::from_utf8(request.encode()).unwrap();
        assert!(
            encoded
                .starts_with("DESCRIBE rtsp://192.168.1.64:554/Streaming/Channels/101 RTSP/1.0\r\n")
        );
        assert!(encoded.contains("CSeq: 1\r\n"));
        assert!(encoded.contains("Accept: application/sdp\r\n"));
        assert!(encoded.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_request_headers_encode_in_order() {
        let request = RtspRequest::builder(Method::Setup, "rtsp://cam/trackID=2")
            .cseq(3)
            .header("Transport", "RTP/AVP;unicast;client_port=5000-5001;mode=record")
            .session("ABC123")
            .build();

        let encoded = String::from_utf8(request.encode()).unwrap();
        let cseq_at = encoded.find("CSeq:").unwrap();
        let transport_at = encoded.find("Transport:").unwrap();
        let session_at = encoded.find("Session:").unwrap();
        assert!(cseq_at < transport_at && transport_at < session_at);
    }

    #[test]
    fn test_request_no_content_length_without_body() {
        let request = RtspRequest::builder(Method::Options, "rtsp://cam/")
            .cseq(5)
            .build();
        let encoded = String::from_utf8(request.encode()).unwrap();
        assert!(!encoded.contains("Content-Length"));
    }
}
