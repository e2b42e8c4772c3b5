//! The persistent RTSP control connection.
//!
//! One [`RtspChannel`] wraps one stream to the camera, frames outgoing
//! requests, and accumulates incoming bytes until a complete response is
//! available. Every read and write is bounded by the configured
//! per-operation timeout; a closed connection or repeated timeout surfaces
//! as a transport error and ends the handshake.

use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::error::{Result, TalkbackError};
use crate::protocol::rtsp::{RtspCodec, RtspRequest, RtspResponse};

/// The stream types an [`RtspChannel`] can run over. Implemented for
/// anything duplex, which lets tests drive the channel over an in-memory
/// pipe instead of a socket.
pub trait RtspStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> RtspStream for T {}

/// A framed RTSP connection to the camera
pub struct RtspChannel {
    stream: Box<dyn RtspStream>,
    codec: RtspCodec,
    timeout: Duration,
    debug_protocol: bool,
}

impl std::fmt::Debug for RtspChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RtspChannel")
            .field("codec", &self.codec)
            .field("timeout", &self.timeout)
            .field("debug_protocol", &self.debug_protocol)
            .finish_non_exhaustive()
    }
}

impl RtspChannel {
    /// Open a TCP connection to the camera.
    ///
    /// # Errors
    /// Returns a transport error when the connection fails or exceeds the
    /// timeout.
    pub async fn connect(
        host: &str,
        port: u16,
        per_op_timeout: Duration,
        debug_protocol: bool,
    ) -> Result<Self> {
        let stream = timeout(per_op_timeout, TcpStream::connect((host, port)))
            .await
            .map_err(|_| TalkbackError::Timeout {
                duration: per_op_timeout,
            })??;
        tracing::debug!("connected to {host}:{port}");
        Ok(Self::from_stream(stream, per_op_timeout, debug_protocol))
    }

    /// Wrap an already-connected stream
    pub fn from_stream(
        stream: impl RtspStream + 'static,
        per_op_timeout: Duration,
        debug_protocol: bool,
    ) -> Self {
        Self {
            stream: Box::new(stream),
            codec: RtspCodec::new(),
            timeout: per_op_timeout,
            debug_protocol,
        }
    }

    /// Send one encoded request.
    ///
    /// # Errors
    /// Returns a transport error on write failure or timeout.
    pub async fn send(&mut self, request: &RtspRequest) -> Result<()> {
        let encoded = request.encode();
        if self.debug_protocol {
            tracing::debug!(
                ">> {}",
                String::from_utf8_lossy(&encoded).trim_end_matches(['\r', '\n'])
            );
        } else {
            tracing::debug!(">> {} {}", request.method.as_str(), request.uri);
        }

        let stream = &mut self.stream;
        bounded(self.timeout, async {
            stream.write_all(&encoded).await?;
            stream.flush().await
        })
        .await??;
        Ok(())
    }

    /// Read until one complete response is available.
    ///
    /// # Errors
    /// Returns a transport error on EOF or timeout, or a codec error on
    /// malformed framing.
    pub async fn read_response(&mut self) -> Result<RtspResponse> {
        let mut buf = [0u8; 4096];
        loop {
            if let Some(response) = self.codec.decode()? {
                if self.debug_protocol {
                    tracing::debug!(
                        "<< {}",
                        String::from_utf8_lossy(&response.encode())
                            .trim_end_matches(['\r', '\n'])
                    );
                } else {
                    tracing::debug!("<< {} {}", response.status.as_u16(), response.reason);
                }
                return Ok(response);
            }

            let n = bounded(self.timeout, self.stream.read(&mut buf)).await??;
            if n == 0 {
                return Err(TalkbackError::Disconnected);
            }
            self.codec.feed(&buf[..n])?;
        }
    }

    /// Shut down the stream, best-effort
    pub async fn close(mut self) {
        let _ = self.stream.shutdown().await;
    }
}

async fn bounded<T>(limit: Duration, fut: impl Future<Output = T>) -> Result<T> {
    timeout(limit, fut)
        .await
        .map_err(|_| TalkbackError::Timeout { duration: limit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::rtsp::Method;

    fn channel_pair() -> (RtspChannel, tokio::io::DuplexStream) {
        let (near, far) = tokio::io::duplex(16 * 1024);
        let channel = RtspChannel::from_stream(near, Duration::from_millis(200), false);
        (channel, far)
    }

    #[tokio::test]
    async fn test_send_writes_encoded_request() {
        let (mut channel, mut far) = channel_pair();
        let request = RtspRequest::builder(Method::Options, "rtsp://cam:554/ch1")
            .cseq(4)
            .build();
        channel.send(&request).await.unwrap();
        drop(channel);

        let mut received = Vec::new();
        far.read_to_end(&mut received).await.unwrap();
        let text = String::from_utf8(received).unwrap();
        assert!(text.starts_with("OPTIONS rtsp://cam:554/ch1 RTSP/1.0\r\n"));
        assert!(text.contains("CSeq: 4\r\n"));
    }

    #[tokio::test]
    async fn test_read_response_accumulates_split_reads() {
        let (mut channel, mut far) = channel_pair();
        far.write_all(b"RTSP/1.0 200 OK\r\nCSeq: 1\r\nContent-Le")
            .await
            .unwrap();
        far.write_all(b"ngth: 4\r\n\r\nbody").await.unwrap();

        let response = channel.read_response().await.unwrap();
        assert_eq!(response.status.as_u16(), 200);
        assert_eq!(response.body, b"body");
    }

    #[tokio::test]
    async fn test_read_response_eof_is_disconnect() {
        let (mut channel, far) = channel_pair();
        drop(far);
        let result = channel.read_response().await;
        assert!(matches!(result, Err(TalkbackError::Disconnected)));
    }

    // Paused time: the clock jumps forward once the read is the only
    // thing left pending, so a 5s timeout fires without waiting 5s.
    #[tokio::test(start_paused = true)]
    async fn test_read_response_times_out() {
        let (near, _far) = tokio::io::duplex(16 * 1024);
        let mut channel = RtspChannel::from_stream(near, Duration::from_secs(5), false);
        let result = channel.read_response().await;
        assert!(matches!(
            result,
            Err(TalkbackError::Timeout { duration }) if duration == Duration::from_secs(5)
        ));
    }

    #[tokio::test]
    async fn test_channel_over_scripted_stream() {
        let request = RtspRequest::builder(Method::Describe, "rtsp://cam:554/ch1")
            .cseq(1)
            .build();
        let stream = tokio_test::io::Builder::new()
            .write(&request.encode())
            .read(b"RTSP/1.0 200 OK\r\nCSeq: 1\r\n")
            .read(b"Content-Length: 5\r\n\r\nv=0\r\n")
            .build();
        let mut channel = RtspChannel::from_stream(stream, Duration::from_secs(1), false);

        channel.send(&request).await.unwrap();
        let response = channel.read_response().await.unwrap();
        assert_eq!(response.cseq(), Some(1));
        assert_eq!(response.body, b"v=0\r\n");
    }
}
