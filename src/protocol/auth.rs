//! RFC 2617 digest authentication against a camera-issued challenge.
//!
//! A [`DigestChallenge`] is parsed from a 401/403 response's
//! `WWW-Authenticate` header; a [`DigestAuthenticator`] wraps one challenge
//! for the lifetime of the session and signs each request. A fresh
//! challenge from the camera invalidates the old authenticator — callers
//! construct a new one rather than mutating the old.

use md5::{Digest, Md5};
use rand::Rng;

use crate::error::{Result, TalkbackError};
use crate::protocol::rtsp::Method;

/// A parsed `WWW-Authenticate: Digest` challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestChallenge {
    /// Authentication realm
    pub realm: String,
    /// Server nonce
    pub nonce: String,
    /// Quality-of-protection options, verbatim (e.g. `auth` or `auth,auth-int`)
    pub qop: Option<String>,
    /// Digest algorithm (absent means MD5)
    pub algorithm: Option<String>,
    /// Opaque value to echo back, if any
    pub opaque: Option<String>,
}

impl DigestChallenge {
    /// Parse the value of a `WWW-Authenticate` header.
    ///
    /// # Errors
    /// Returns `AuthenticationFailed` when the header is not a digest
    /// challenge or lacks the mandatory realm/nonce parameters.
    pub fn parse(header: &str) -> Result<Self> {
        let rest = header
            .trim()
            .strip_prefix("Digest")
            .ok_or_else(|| TalkbackError::AuthenticationFailed {
                message: format!("not a digest challenge: {header:?}"),
            })?;

        let mut realm = None;
        let mut nonce = None;
        let mut qop = None;
        let mut algorithm = None;
        let mut opaque = None;

        for (key, value) in split_params(rest) {
            match key.to_ascii_lowercase().as_str() {
                "realm" => realm = Some(value),
                "nonce" => nonce = Some(value),
                "qop" => qop = Some(value),
                "algorithm" => algorithm = Some(value),
                "opaque" => opaque = Some(value),
                _ => {}
            }
        }

        match (realm, nonce) {
            (Some(realm), Some(nonce)) => Ok(Self {
                realm,
                nonce,
                qop,
                algorithm,
                opaque,
            }),
            _ => Err(TalkbackError::AuthenticationFailed {
                message: "digest challenge missing realm or nonce".to_string(),
            }),
        }
    }
}

/// Signs requests against one digest challenge.
///
/// Holds the per-session nonce count, which starts at 1 and increments on
/// every [`authorize`](Self::authorize) call reusing the same challenge.
#[derive(Debug)]
pub struct DigestAuthenticator {
    challenge: DigestChallenge,
    nonce_count: u32,
}

impl DigestAuthenticator {
    /// Wrap a freshly issued challenge
    #[must_use]
    pub fn new(challenge: DigestChallenge) -> Self {
        Self {
            challenge,
            nonce_count: 0,
        }
    }

    /// Produce an `Authorization` header value for one request.
    ///
    /// # Errors
    /// Returns `UnsupportedChallenge` when the challenge demands an
    /// algorithm other than MD5 or a qop other than `auth`.
    pub fn authorize(
        &mut self,
        method: Method,
        uri: &str,
        username: &str,
        password: &str,
    ) -> Result<String> {
        let qop = self.negotiated_qop()?;
        if let Some(algorithm) = self.challenge.algorithm.as_deref() {
            if !algorithm.eq_ignore_ascii_case("MD5") {
                return Err(TalkbackError::UnsupportedChallenge {
                    parameter: "algorithm",
                    value: algorithm.to_string(),
                });
            }
        }

        self.nonce_count += 1;
        let cnonce = qop.map(|_| {
            let tail: u32 = rand::thread_rng().r#gen();
            format!("{tail:08x}")
        });
        Ok(self.header_value(method, uri, username, password, cnonce.as_deref()))
    }

    /// Pick `auth` out of the challenge's qop list, or report what the
    /// camera demanded instead.
    fn negotiated_qop(&self) -> Result<Option<&'static str>> {
        match self.challenge.qop.as_deref() {
            None => Ok(None),
            Some(list) if list.split(',').any(|q| q.trim().eq_ignore_ascii_case("auth")) => {
                Ok(Some("auth"))
            }
            Some(list) => Err(TalkbackError::UnsupportedChallenge {
                parameter: "qop",
                value: list.to_string(),
            }),
        }
    }

    fn header_value(
        &self,
        method: Method,
        uri: &str,
        username: &str,
        password: &str,
        cnonce: Option<&str>,
    ) -> String {
        let realm = &self.challenge.realm;
        let nonce = &self.challenge.nonce;
        let ha1 = md5_hex(&format!("{username}:{realm}:{password}"));
        let ha2 = md5_hex(&format!("{}:{uri}", method.as_str()));

        let mut header;
        if let Some(cnonce) = cnonce {
            let nc = self.nonce_count;
            let response =
                md5_hex(&format!("{ha1}:{nonce}:{nc:08x}:{cnonce}:auth:{ha2}"));
            header = format!(
                "Digest username=\"{username}\", realm=\"{realm}\", nonce=\"{nonce}\", \
                 uri=\"{uri}\", response=\"{response}\", qop=auth, nc={nc:08x}, \
                 cnonce=\"{cnonce}\""
            );
        } else {
            let response = md5_hex(&format!("{ha1}:{nonce}:{ha2}"));
            header = format!(
                "Digest username=\"{username}\", realm=\"{realm}\", nonce=\"{nonce}\", \
                 uri=\"{uri}\", response=\"{response}\""
            );
        }
        if let Some(opaque) = self.challenge.opaque.as_deref() {
            header.push_str(&format!(", opaque=\"{opaque}\""));
        }
        header
    }
}

fn md5_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Split `key=value, key="quoted value", ...` challenge parameters,
/// honoring commas inside quoted values.
fn split_params(input: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut rest = input.trim_start_matches([' ', ',']);

    while let Some(eq) = rest.find('=') {
        let key = rest[..eq].trim().to_string();
        rest = &rest[eq + 1..];

        let value;
        if let Some(unquoted) = rest.strip_prefix('"') {
            let end = unquoted.find('"').unwrap_or(unquoted.len());
            value = unquoted[..end].to_string();
            rest = unquoted.get(end + 1..).unwrap_or("");
        } else {
            let end = rest.find(',').unwrap_or(rest.len());
            value = rest[..end].trim().to_string();
            rest = rest.get(end..).unwrap_or("");
        }
        params.push((key, value));
        rest = rest.trim_start_matches([' ', ',']);
    }

    params
}
