//! JSON encoding of [`ClientMessage`] and [`ServerMessage`].

use serde_json::Value;

use super::{ClientMessage, ServerMessage};
use crate::transport::Frame;

/// Why an inbound frame could not be turned into a [`ClientMessage`].
///
/// The display text is what the sender receives in `incorrectRequest`.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Wrong data type")]
    WrongDataType,
    #[error("Can't parse JSON data: {0}")]
    Json(#[source] serde_json::Error),
    #[error("Message has no type")]
    MissingType,
    #[error("Unknown message type: \"{0}\"")]
    UnknownType(String),
    #[error("Invalid \"{kind}\" message: {source}")]
    Shape {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of decoding one inbound frame.
#[derive(Debug)]
pub enum Inbound {
    Message(ClientMessage),
    Malformed(CodecError),
}

impl From<Result<ClientMessage, CodecError>> for Inbound {
    fn from(res: Result<ClientMessage, CodecError>) -> Self {
        match res {
            Ok(msg) => Inbound::Message(msg),
            Err(e) => Inbound::Malformed(e),
        }
    }
}

/// Decode a frame received from a player.
pub fn decode(frame: &Frame) -> Inbound {
    match frame {
        Frame::Text(text) => parse_client(text).into(),
        Frame::Binary(_) => Inbound::Malformed(CodecError::WrongDataType),
    }
}

fn parse_client(text: &str) -> Result<ClientMessage, CodecError> {
    let value: Value = serde_json::from_str(text).map_err(CodecError::Json)?;
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(CodecError::MissingType)?;
    if !ClientMessage::KINDS.contains(&kind) {
        return Err(CodecError::UnknownType(kind.to_string()));
    }
    let kind = kind.to_string();
    serde_json::from_value(value).map_err(|source| CodecError::Shape { kind, source })
}

/// Encode a message for a player.
pub fn encode(msg: &ServerMessage) -> anyhow::Result<Frame> {
    let text = serde_json::to_string(msg)?;
    Ok(Frame::Text(text))
}

/// Encode a message for the server. Used by client-side code.
pub fn encode_client(msg: &ClientMessage) -> anyhow::Result<Frame> {
    let text = serde_json::to_string(msg)?;
    Ok(Frame::Text(text))
}

/// Decode a frame received from the server. Used by client-side code.
pub fn decode_server(frame: &Frame) -> anyhow::Result<ServerMessage> {
    match frame {
        Frame::Text(text) => Ok(serde_json::from_str(text)?),
        Frame::Binary(_) => Err(anyhow::anyhow!("server sent a binary frame")),
    }
}
