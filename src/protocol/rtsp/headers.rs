/// Well-known RTSP header names
#[allow(missing_docs)]
pub mod names {
    pub const CSEQ: &str = "CSeq";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const CONTENT_LENGTH: &str = "Content-Length";
    pub const CONTENT_BASE: &str = "Content-Base";
    pub const SESSION: &str = "Session";
    pub const TRANSPORT: &str = "Transport";
    pub const USER_AGENT: &str = "User-Agent";
    pub const ACCEPT: &str = "Accept";
    pub const REQUIRE: &str = "Require";
    pub const AUTHORIZATION: &str = "Authorization";
    pub const WWW_AUTHENTICATE: &str = "WWW-Authenticate";
}

/// An ordered RTSP header collection.
///
/// Lookup is case-insensitive; insertion order is preserved on encode.
/// Inserting a name that already exists overwrites the previous value in
/// place (last value wins), keeping the new casing.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a header
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            *entry = (name, value);
        } else {
            self.entries.push((name, value));
        }
    }

    /// Get a header value, case-insensitively
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check whether a header is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get the `CSeq` value
    #[must_use]
    pub fn cseq(&self) -> Option<u32> {
        self.get(names::CSEQ)?.trim().parse().ok()
    }

    /// Get the Content-Length value
    #[must_use]
    pub fn content_length(&self) -> Option<usize> {
        self.get(names::CONTENT_LENGTH)?.trim().parse().ok()
    }

    /// Get the Content-Base value
    #[must_use]
    pub fn content_base(&self) -> Option<&str> {
        self.get(names::CONTENT_BASE)
    }

    /// Get the raw Session value (may carry a `;timeout=` parameter)
    #[must_use]
    pub fn session(&self) -> Option<&str> {
        self.get(names::SESSION)
    }

    /// Get the Transport value
    #[must_use]
    pub fn transport(&self) -> Option<&str> {
        self.get(names::TRANSPORT)
    }

    /// Get the WWW-Authenticate value
    #[must_use]
    pub fn www_authenticate(&self) -> Option<&str> {
        self.get(names::WWW_AUTHENTICATE)
    }

    /// Iterate over all headers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of headers
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Headers {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.insert(k, v);
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        let mut headers = Headers::new();
        headers.insert("Content-Base", "rtsp://cam/");
        assert_eq!(headers.get("content-base"), Some("rtsp://cam/"));
        assert_eq!(headers.get("CONTENT-BASE"), Some("rtsp://cam/"));
        assert!(headers.contains("Content-Base"));
    }

    #[test]
    fn test_duplicate_insert_last_wins() {
        let mut headers = Headers::new();
        headers.insert("Session", "AAA");
        headers.insert("session", "BBB");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.session(), Some("BBB"));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut headers = Headers::new();
        headers.insert("CSeq", "3");
        headers.insert("Transport", "RTP/AVP;unicast");
        headers.insert("Authorization", "Digest ...");
        let names: Vec<&str> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["CSeq", "Transport", "Authorization"]);
    }

    #[test]
    fn test_typed_accessors() {
        let mut headers = Headers::new();
        headers.insert("CSeq", " 7 ");
        headers.insert("Content-Length", "128");
        assert_eq!(headers.cseq(), Some(7));
        assert_eq!(headers.content_length(), Some(128));
        assert_eq!(headers.transport(), None);
    }
}
