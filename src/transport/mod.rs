//! Persistent bidirectional connections carrying whole frames.
//!
//! A connection is split once into a reader and a writer so a session can
//! receive and send on it concurrently.

/// One payload as delivered by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

impl Frame {
    /// Classify raw bytes: valid UTF-8 becomes text.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Frame::Text(text),
            Err(e) => Frame::Binary(e.into_bytes()),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Frame::Text(text) => text.into_bytes(),
            Frame::Binary(bytes) => bytes,
        }
    }
}

#[async_trait::async_trait]
pub trait FrameReader: Send {
    /// Next frame, or `Ok(None)` once the peer has closed the connection.
    async fn recv(&mut self) -> anyhow::Result<Option<Frame>>;
}

#[async_trait::async_trait]
pub trait FrameWriter: Send {
    async fn send(&mut self, frame: Frame) -> anyhow::Result<()>;
    async fn close(&mut self) -> anyhow::Result<()>;
}

/// A connection that can be handed to a session.
pub trait Transport: Send {
    fn split(self: Box<Self>) -> (Box<dyn FrameReader>, Box<dyn FrameWriter>);
}

pub mod in_memory;
pub mod tcp;
