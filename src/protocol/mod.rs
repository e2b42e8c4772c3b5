//! Protocol-level building blocks: RTSP wire types, digest authentication,
//! and SDP parsing. All sans-IO; the network lives in [`crate::net`].

pub mod auth;
pub mod rtsp;
pub mod sdp;
