#![cfg_attr(not(feature = "std"), no_std)]

mod bitboard;
mod board;
mod common;
mod config;
#[cfg(feature = "std")]
pub mod bot;
#[cfg(feature = "std")]
pub mod game;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod prelude;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod transport;

pub use bitboard::{BitBoard, BitBoardError, SetBits};
pub use board::*;
pub use common::*;
pub use config::*;
#[cfg(feature = "std")]
pub use bot::{BotOutcome, BotReport, RandomBot};
#[cfg(feature = "std")]
pub use game::{Envelope, Match, MoveError, Phase, Role};
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
#[cfg(feature = "std")]
pub use protocol::{ClientMessage, GameState, Move, ServerMessage};
#[cfg(feature = "std")]
pub use session::{accept_pairs, Session, SessionHandle};
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Frame, Transport};
