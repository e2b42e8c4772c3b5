//! RTSP talk-back client for ONVIF back-channel audio.
//!
//! Many IP cameras accept an audio stream from the viewer (two-way
//! audio, "talk-back") over the ONVIF back-channel extension to RTSP.
//! This crate negotiates that session: it sends DESCRIBE with the
//! back-channel feature tag, answers a digest challenge, picks the
//! send-only audio track out of the SDP, runs SETUP and PLAY, and keeps
//! the session alive with OPTIONS. It hands back the host and RTP port
//! to stream audio to; actual RTP packetization and audio encoding are
//! the caller's business.
//!
//! ```no_run
//! use rtsp_talkback::{TalkbackConfig, TalkbackSession};
//!
//! # async fn example() -> rtsp_talkback::Result<()> {
//! let config = TalkbackConfig::builder()
//!     .credentials("admin", "secret")
//!     .client_port(5000)
//!     .build();
//! let mut session =
//!     TalkbackSession::new("rtsp://192.168.1.64:554/Streaming/Channels/101", config)?;
//! let endpoint = session.start().await?;
//! // ... send RTP audio to endpoint.host:endpoint.rtp_port,
//! //     calling session.keep_alive() periodically ...
//! session.terminate().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod net;
pub mod protocol;
pub mod session;
pub mod target;

pub use config::{TalkbackConfig, TalkbackConfigBuilder};
pub use error::{Result, TalkbackError};
pub use session::{Phase, RemoteEndpoint, TalkbackSession};
pub use target::ConnectionTarget;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commonly used types
pub mod prelude {
    pub use crate::config::TalkbackConfig;
    pub use crate::error::{Result, TalkbackError};
    pub use crate::session::{Phase, RemoteEndpoint, TalkbackSession};
}
