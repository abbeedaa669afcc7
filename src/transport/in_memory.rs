use tokio::sync::mpsc;

use crate::transport::{Frame, FrameReader, FrameWriter, Transport};

/// One end of an in-process connection. Create both ends with [`InMemoryTransport::pair`].
pub struct InMemoryTransport {
    reader: InMemoryReader,
    writer: InMemoryWriter,
}

pub struct InMemoryReader {
    rx: mpsc::UnboundedReceiver<Frame>,
}

pub struct InMemoryWriter {
    tx: Option<mpsc::UnboundedSender<Frame>>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        (
            Self {
                reader: InMemoryReader { rx: rx1 },
                writer: InMemoryWriter { tx: Some(tx2) },
            },
            Self {
                reader: InMemoryReader { rx: rx2 },
                writer: InMemoryWriter { tx: Some(tx1) },
            },
        )
    }

    /// Split without boxing, for client-side code and tests.
    pub fn into_parts(self) -> (InMemoryReader, InMemoryWriter) {
        (self.reader, self.writer)
    }
}

impl Transport for InMemoryTransport {
    fn split(self: Box<Self>) -> (Box<dyn FrameReader>, Box<dyn FrameWriter>) {
        let (reader, writer) = self.into_parts();
        (Box::new(reader), Box::new(writer))
    }
}

#[async_trait::async_trait]
impl FrameReader for InMemoryReader {
    async fn recv(&mut self) -> anyhow::Result<Option<Frame>> {
        Ok(self.rx.recv().await)
    }
}

#[async_trait::async_trait]
impl FrameWriter for InMemoryWriter {
    async fn send(&mut self, frame: Frame) -> anyhow::Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Transport is closed"))?;
        tx.send(frame)
            .map_err(|_| anyhow::anyhow!("Channel closed"))
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.tx = None;
        Ok(())
    }
}
