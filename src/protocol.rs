//! Wire messages exchanged between the server and a player.
//!
//! Every message is a JSON object carrying a `type` discriminator.

use serde::{Deserialize, Serialize};

use crate::common::{BoardError, Coord, Grid};

pub mod codec;

pub use codec::{decode, decode_server, encode, encode_client, CodecError, Inbound};

/// Target cell of a placement or a shot, one-based.
///
/// Signed so that negative coordinates fail range validation rather than decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub row: i64,
    pub col: i64,
}

impl Move {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

impl From<Coord> for Move {
    fn from(at: Coord) -> Self {
        Move::new(at.row(), at.col())
    }
}

impl TryFrom<Move> for Coord {
    type Error = BoardError;

    fn try_from(mv: Move) -> Result<Self, Self::Error> {
        Coord::new(mv.row, mv.col)
    }
}

/// Messages a player sends to the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Place one piece segment on the sender's own board.
    PlayerPut {
        #[serde(rename = "move")]
        target: Move,
    },
    /// Fire at the opponent's board.
    PlayerRoll {
        #[serde(rename = "move")]
        target: Move,
    },
    /// Start the match over with empty boards.
    RepeatGame,
}

impl ClientMessage {
    /// Every `type` value the server understands.
    pub const KINDS: [&'static str; 3] = ["playerPut", "playerRoll", "repeatGame"];
}

/// Readiness of both sides from the recipient's point of view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub player_ready: bool,
    pub opponent_ready: bool,
}

/// Messages the server sends to a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// A fresh match began (also sent after a restart).
    GameStarted {
        field: Grid,
        field_opposite: Grid,
        my_turn: bool,
        state: GameState,
    },
    /// Board update after a placement by the recipient or after any shot.
    ChangePlayer {
        field: Grid,
        field_opposite: Grid,
        my_turn: bool,
        state: GameState,
    },
    /// Readiness update after the opponent placed a piece.
    ResultPut { state: GameState, my_turn: bool },
    GameResult { win: bool },
    GameAborted,
    IncorrectRequest { message: String },
}

impl ServerMessage {
    pub fn incorrect_request(message: impl Into<String>) -> Self {
        ServerMessage::IncorrectRequest {
            message: message.into(),
        }
    }

    /// The `type` discriminator, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::GameStarted { .. } => "gameStarted",
            ServerMessage::ChangePlayer { .. } => "changePlayer",
            ServerMessage::ResultPut { .. } => "resultPut",
            ServerMessage::GameResult { .. } => "gameResult",
            ServerMessage::GameAborted => "gameAborted",
            ServerMessage::IncorrectRequest { .. } => "incorrectRequest",
        }
    }
}
