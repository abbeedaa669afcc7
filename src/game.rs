//! The match state machine: two boards, phases, turns and the messages each
//! transition produces. No I/O happens here; [`crate::session`] drives it.

use crate::{
    board::Board,
    common::{BoardError, Coord, Shot},
    protocol::{ClientMessage, GameState, Move, ServerMessage},
};

/// Seat of a player within a match. Resolved once when the session is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    One,
    Two,
}

impl Role {
    pub const BOTH: [Role; 2] = [Role::One, Role::Two];

    pub fn opponent(self) -> Role {
        match self {
            Role::One => Role::Two,
            Role::Two => Role::One,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Role::One => 0,
            Role::Two => 1,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Role::One => f.write_str("player 1"),
            Role::Two => f.write_str("player 2"),
        }
    }
}

/// Current stage of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Placement,
    Combat,
    Finished,
}

/// Reasons a move is refused. Nothing changes when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Not your turn")]
    NotYourTurn,
    #[error("{0}")]
    Board(#[from] BoardError),
    #[error("{}", phase_rejection(.0))]
    InvalidPhase(Phase),
}

fn phase_rejection(phase: &Phase) -> &'static str {
    match phase {
        Phase::Placement => "Pieces are not placed yet",
        Phase::Combat => "Placement is over",
        Phase::Finished => "Game is over",
    }
}

/// A message addressed to one side of the match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub to: Role,
    pub message: ServerMessage,
}

impl Envelope {
    pub fn new(to: Role, message: ServerMessage) -> Self {
        Self { to, message }
    }
}

/// Both boards plus the session-wide turn and phase.
#[derive(Clone, Debug)]
pub struct Match {
    boards: [Board; 2],
    phase: Phase,
    current_turn: Role,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    /// A match in Placement with empty boards. Player one will fire first.
    pub fn new() -> Self {
        Self {
            boards: [Board::new(), Board::new()],
            phase: Phase::Placement,
            current_turn: Role::One,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Who fires next. Only meaningful in [`Phase::Combat`].
    pub fn current_turn(&self) -> Role {
        self.current_turn
    }

    pub fn board(&self, role: Role) -> &Board {
        &self.boards[role.index()]
    }

    /// Readiness as seen by `role`.
    pub fn state_for(&self, role: Role) -> GameState {
        GameState {
            player_ready: self.board(role).is_ready(),
            opponent_ready: self.board(role.opponent()).is_ready(),
        }
    }

    fn my_turn(&self, role: Role) -> bool {
        self.current_turn == role
    }

    /// Reset to a fresh Placement phase and greet both players.
    pub fn start(&mut self) -> Vec<Envelope> {
        *self = Match::new();
        Role::BOTH
            .into_iter()
            .map(|role| {
                Envelope::new(
                    role,
                    ServerMessage::GameStarted {
                        field: self.board(role).own_view(),
                        field_opposite: self.board(role.opponent()).opponent_view(),
                        my_turn: self.my_turn(role),
                        state: self.state_for(role),
                    },
                )
            })
            .collect()
    }

    /// Apply one message from `from`. Rejections go back to the sender only.
    pub fn apply(&mut self, from: Role, msg: ClientMessage) -> Vec<Envelope> {
        let result = match msg {
            ClientMessage::PlayerPut { target } => self.place(from, target),
            ClientMessage::PlayerRoll { target } => self.fire(from, target),
            ClientMessage::RepeatGame => Ok(self.start()),
        };
        result.unwrap_or_else(|e| {
            log::debug!("rejected move from {}: {}", from, e);
            vec![Envelope::new(from, ServerMessage::incorrect_request(e.to_string()))]
        })
    }

    fn place(&mut self, from: Role, target: Move) -> Result<Vec<Envelope>, MoveError> {
        if self.phase != Phase::Placement {
            return Err(MoveError::InvalidPhase(self.phase));
        }
        let at = Coord::try_from(target)?;
        self.boards[from.index()].place(at)?;

        // The opponent may have finished first, so check both sides.
        if Role::BOTH.iter().all(|&r| self.board(r).is_ready()) {
            log::info!("both fleets placed, combat begins");
            self.phase = Phase::Combat;
        }

        let opponent = from.opponent();
        Ok(vec![
            Envelope::new(from, self.board_update(from)),
            Envelope::new(
                opponent,
                ServerMessage::ResultPut {
                    state: self.state_for(opponent),
                    my_turn: self.my_turn(opponent),
                },
            ),
        ])
    }

    fn fire(&mut self, from: Role, target: Move) -> Result<Vec<Envelope>, MoveError> {
        if self.phase != Phase::Combat {
            return Err(MoveError::InvalidPhase(self.phase));
        }
        if from != self.current_turn {
            return Err(MoveError::NotYourTurn);
        }
        let at = Coord::try_from(target)?;
        let opponent = from.opponent();
        let shot = self.boards[opponent.index()].fire(at)?;
        log::debug!("{} fired at ({}, {}): {:?}", from, at.row(), at.col(), shot);

        if shot == Shot::Hit && self.board(opponent).remaining_pieces() == 0 {
            log::info!("{} sank the last piece", from);
            self.phase = Phase::Finished;
            return Ok(vec![
                Envelope::new(from, ServerMessage::GameResult { win: true }),
                Envelope::new(opponent, ServerMessage::GameResult { win: false }),
            ]);
        }

        self.current_turn = opponent;
        Ok(vec![
            Envelope::new(opponent, self.board_update(opponent)),
            Envelope::new(from, self.board_update(from)),
        ])
    }

    fn board_update(&self, role: Role) -> ServerMessage {
        ServerMessage::ChangePlayer {
            field: self.board(role).own_view(),
            field_opposite: self.board(role.opponent()).opponent_view(),
            my_turn: self.my_turn(role),
            state: self.state_for(role),
        }
    }
}
