//! Commonly used types for servers and clients.

pub use crate::{
    init_logging, Board, ClientMessage, Coord, Match, Phase, RandomBot, Role, ServerConfig,
    ServerMessage, Session, SessionHandle,
};

pub use crate::transport::{
    in_memory::InMemoryTransport, tcp::TcpTransport, Frame, FrameReader, FrameWriter, Transport,
};
