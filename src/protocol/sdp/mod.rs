//! SDP session descriptions and back-channel track resolution.
//!
//! A DESCRIBE response carries an SDP body listing the camera's media
//! sections. Exactly one of them is the talk-back target: the first audio
//! section that advertises back-channel capability, by the `sendonly`
//! direction attribute or by a `backchannel` naming convention in its
//! control attribute. Cameras with several qualifying tracks get the
//! first in SDP order.

mod parser;

pub use parser::{SdpParseError, SdpParser};

use std::collections::HashMap;

/// An SDP session description
#[derive(Debug, Clone, Default)]
pub struct SessionDescription {
    /// Protocol version (v=)
    pub version: u8,
    /// Session name (s=)
    pub session_name: String,
    /// Session-level connection address (c=)
    pub connection: Option<String>,
    /// Media sections (m=)
    pub media: Vec<MediaDescription>,
    /// Session-level attributes (a=)
    pub attributes: HashMap<String, Option<String>>,
}

/// One SDP media section
#[derive(Debug, Clone)]
pub struct MediaDescription {
    /// Media type (audio, video, application)
    pub media_type: String,
    /// Advertised port from the m= line
    pub port: u16,
    /// Transport profile (RTP/AVP, ...)
    pub protocol: String,
    /// Payload format list
    pub formats: Vec<String>,
    /// Media-level connection address (c=)
    pub connection: Option<String>,
    /// Media-level attributes (a=)
    pub attributes: HashMap<String, Option<String>>,
}

impl SessionDescription {
    /// Get a session-level attribute value
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)?.as_deref()
    }

    /// Control URL of the first back-channel audio section, if any
    #[must_use]
    pub fn backchannel_control(&self) -> Option<&str> {
        self.media
            .iter()
            .find(|m| m.is_backchannel())
            .and_then(MediaDescription::control)
    }
}

impl MediaDescription {
    /// Get a media-level attribute value
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)?.as_deref()
    }

    /// The section's control identifier (a=control)
    #[must_use]
    pub fn control(&self) -> Option<&str> {
        self.get_attribute("control").map(str::trim)
    }

    /// Whether this section is a talk-back target: an audio section the
    /// camera receives on, marked `a=sendonly` or with a control URL
    /// naming the ONVIF back-channel.
    #[must_use]
    pub fn is_backchannel(&self) -> bool {
        if self.media_type != "audio" {
            return false;
        }
        if self.attributes.contains_key("sendonly") {
            return true;
        }
        self.control()
            .is_some_and(|c| c.to_ascii_lowercase().contains("backchannel"))
    }
}

/// Resolve a track's control identifier against the DESCRIBE response's
/// Content-Base (or the request URI when absent) into an absolute SETUP
/// target. Absolute control URLs pass through; `*` means the base itself.
#[must_use]
pub fn resolve_control(base: &str, control: &str) -> String {
    if control.starts_with("rtsp://") {
        return control.to_string();
    }
    let base = base.trim_end_matches('/');
    if control == "*" || control.is_empty() {
        return base.to_string();
    }
    format!("{base}/{}", control.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SDP_TWO_AUDIO: &str = "v=0\r\n\
        o=- 1109162014 1109162014 IN IP4 0.0.0.0\r\n\
        s=Media Server\r\n\
        c=IN IP4 0.0.0.0\r\n\
        t=0 0\r\n\
        m=video 0 RTP/AVP 96\r\n\
        a=control:trackID=1\r\n\
        a=rtpmap:96 H264/90000\r\n\
        m=audio 0 RTP/AVP 8\r\n\
        a=control:trackID=2\r\n\
        a=rtpmap:8 PCMA/8000\r\n\
        a=recvonly\r\n\
        m=audio 0 RTP/AVP 8\r\n\
        a=control:trackID=3\r\n\
        a=rtpmap:8 PCMA/8000\r\n\
        a=sendonly\r\n";

    #[test]
    fn test_selects_second_audio_section() {
        let sdp = SdpParser::parse(SDP_TWO_AUDIO).unwrap();
        assert_eq!(sdp.media.len(), 3);
        assert_eq!(sdp.backchannel_control(), Some("trackID=3"));
    }

    #[test]
    fn test_no_qualifying_section() {
        let body = "v=0\r\ns=cam\r\n\
            m=audio 0 RTP/AVP 8\r\na=control:trackID=1\r\na=recvonly\r\n";
        let sdp = SdpParser::parse(body).unwrap();
        assert_eq!(sdp.backchannel_control(), None);
    }

    #[test]
    fn test_video_sendonly_does_not_qualify() {
        let body = "v=0\r\ns=cam\r\n\
            m=video 0 RTP/AVP 96\r\na=control:trackID=1\r\na=sendonly\r\n";
        let sdp = SdpParser::parse(body).unwrap();
        assert_eq!(sdp.backchannel_control(), None);
    }

    #[test]
    fn test_backchannel_naming_convention() {
        let body = "v=0\r\ns=cam\r\n\
            m=audio 0 RTP/AVP 0\r\na=control:audioBackchannel\r\n";
        let sdp = SdpParser::parse(body).unwrap();
        assert_eq!(sdp.backchannel_control(), Some("audioBackchannel"));
    }

    #[test]
    fn test_first_match_wins_among_candidates() {
        let body = "v=0\r\ns=cam\r\n\
            m=audio 0 RTP/AVP 8\r\na=control:trackID=4\r\na=sendonly\r\n\
            m=audio 0 RTP/AVP 8\r\na=control:trackID=5\r\na=sendonly\r\n";
        let sdp = SdpParser::parse(body).unwrap();
        assert_eq!(sdp.backchannel_control(), Some("trackID=4"));
    }

    #[test]
    fn test_resolve_control() {
        assert_eq!(
            resolve_control("rtsp://cam:554/ch1/", "trackID=2"),
            "rtsp://cam:554/ch1/trackID=2"
        );
        assert_eq!(
            resolve_control("rtsp://cam:554/ch1", "trackID=2"),
            "rtsp://cam:554/ch1/trackID=2"
        );
        assert_eq!(
            resolve_control("rtsp://cam:554/ch1/", "rtsp://cam:554/other"),
            "rtsp://cam:554/other"
        );
        assert_eq!(resolve_control("rtsp://cam:554/ch1/", "*"), "rtsp://cam:554/ch1");
    }
}
