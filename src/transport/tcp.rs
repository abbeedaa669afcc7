//! TCP connections framed with a 4-byte big-endian length prefix.

use std::io::ErrorKind;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::config::{ServerConfig, DEFAULT_IO_TIMEOUT, DEFAULT_MAX_FRAME_SIZE};
use crate::transport::{Frame, FrameReader, FrameWriter, Transport};

pub struct TcpTransport {
    stream: TcpStream,
    io_timeout: Duration,
    max_frame_size: u32,
}

pub struct TcpFrameReader {
    half: OwnedReadHalf,
    max_frame_size: u32,
}

pub struct TcpFrameWriter {
    half: OwnedWriteHalf,
    io_timeout: Duration,
    max_frame_size: u32,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            io_timeout: DEFAULT_IO_TIMEOUT,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }

    pub fn with_config(stream: TcpStream, config: &ServerConfig) -> Self {
        Self {
            stream,
            io_timeout: config.io_timeout,
            max_frame_size: config.max_frame_size,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    /// Split without boxing, for client-side code and tests.
    pub fn into_parts(self) -> (TcpFrameReader, TcpFrameWriter) {
        let (read, write) = self.stream.into_split();
        (
            TcpFrameReader {
                half: read,
                max_frame_size: self.max_frame_size,
            },
            TcpFrameWriter {
                half: write,
                io_timeout: self.io_timeout,
                max_frame_size: self.max_frame_size,
            },
        )
    }
}

impl Transport for TcpTransport {
    fn split(self: Box<Self>) -> (Box<dyn FrameReader>, Box<dyn FrameWriter>) {
        let (reader, writer) = self.into_parts();
        (Box::new(reader), Box::new(writer))
    }
}

fn read_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof => anyhow::anyhow!("Connection closed mid-frame"),
        ErrorKind::ConnectionReset => anyhow::anyhow!("Connection reset by peer"),
        _ => anyhow::anyhow!("Read error: {}", e),
    }
}

fn write_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::BrokenPipe | ErrorKind::ConnectionReset => {
            anyhow::anyhow!("Connection closed by peer")
        }
        _ => anyhow::anyhow!("Write error: {}", e),
    }
}

#[async_trait::async_trait]
impl FrameReader for TcpFrameReader {
    async fn recv(&mut self) -> anyhow::Result<Option<Frame>> {
        let mut len_buf = [0u8; 4];
        // A peer that hangs up between frames has closed cleanly.
        match self.half.read(&mut len_buf).await {
            Ok(0) => return Ok(None),
            Ok(n) => {
                self.half
                    .read_exact(&mut len_buf[n..])
                    .await
                    .map_err(read_error)?;
            }
            Err(e) => return Err(read_error(e)),
        }

        let len = u32::from_be_bytes(len_buf);
        if len == 0 {
            return Err(anyhow::anyhow!("Invalid frame length: 0"));
        }
        if len > self.max_frame_size {
            return Err(anyhow::anyhow!(
                "Frame too large: {} bytes (max: {})",
                len,
                self.max_frame_size
            ));
        }

        let mut buf = vec![0u8; len as usize];
        self.half.read_exact(&mut buf).await.map_err(read_error)?;
        Ok(Some(Frame::from_bytes(buf)))
    }
}

#[async_trait::async_trait]
impl FrameWriter for TcpFrameWriter {
    async fn send(&mut self, frame: Frame) -> anyhow::Result<()> {
        let data = frame.into_bytes();
        if data.is_empty() {
            return Err(anyhow::anyhow!("Refusing to send an empty frame"));
        }
        if data.len() > self.max_frame_size as usize {
            return Err(anyhow::anyhow!(
                "Frame too large: {} bytes (max: {})",
                data.len(),
                self.max_frame_size
            ));
        }

        let send_op = async {
            let len = (data.len() as u32).to_be_bytes();
            self.half.write_all(&len).await.map_err(write_error)?;
            self.half.write_all(&data).await.map_err(write_error)?;
            self.half.flush().await.map_err(write_error)?;
            anyhow::Ok(())
        };
        timeout(self.io_timeout, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", self.io_timeout))?
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.half.shutdown().await.map_err(write_error)
    }
}
