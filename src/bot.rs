//! A client that plays by picking random cells.
//!
//! Useful for local games, the `sim` binary and end-to-end tests. The bot
//! trusts the server for all state: it only remembers which of its own
//! placements are pending and the last opponent board it was shown.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    common::{Cell, Coord, Grid},
    config::{BOARD_SIZE, PLACEMENT_TARGET},
    protocol::{codec, ClientMessage, GameState, Move, ServerMessage},
    transport::{FrameReader, FrameWriter, Transport},
};

/// How a bot's game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotOutcome {
    Won,
    Lost,
    Aborted,
}

/// Summary of one game played by a bot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BotReport {
    pub outcome: BotOutcome,
    pub shots: usize,
    pub rejections: usize,
}

pub struct RandomBot {
    rng: SmallRng,
    placements: Vec<Coord>,
    opponent_view: Grid,
    shots: usize,
    rejections: usize,
}

impl RandomBot {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            rng,
            placements: Vec::new(),
            opponent_view: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            shots: 0,
            rejections: 0,
        }
    }

    /// Play one game on `transport` until a result or an abort arrives.
    pub async fn run(mut self, transport: Box<dyn Transport>) -> anyhow::Result<BotReport> {
        let (mut reader, mut writer) = transport.split();
        let outcome = self.play(reader.as_mut(), writer.as_mut()).await;
        if let Err(e) = writer.close().await {
            log::debug!("bot: closing connection failed: {}", e);
        }
        Ok(BotReport {
            outcome: outcome?,
            shots: self.shots,
            rejections: self.rejections,
        })
    }

    async fn play(
        &mut self,
        reader: &mut dyn FrameReader,
        writer: &mut dyn FrameWriter,
    ) -> anyhow::Result<BotOutcome> {
        loop {
            let frame = reader
                .recv()
                .await?
                .ok_or_else(|| anyhow::anyhow!("server closed the connection"))?;
            let reply = match codec::decode_server(&frame)? {
                ServerMessage::GameStarted { field_opposite, .. } => {
                    self.opponent_view = field_opposite;
                    self.plan_placements();
                    self.next_placement()
                }
                ServerMessage::ChangePlayer {
                    field_opposite,
                    my_turn,
                    state,
                    ..
                } => {
                    self.opponent_view = field_opposite;
                    if !state.player_ready {
                        self.next_placement()
                    } else {
                        self.maybe_fire(state, my_turn)
                    }
                }
                ServerMessage::ResultPut { state, my_turn } => self.maybe_fire(state, my_turn),
                ServerMessage::IncorrectRequest { message } => {
                    log::debug!("bot move rejected: {}", message);
                    self.rejections += 1;
                    None
                }
                ServerMessage::GameResult { win } => {
                    return Ok(if win { BotOutcome::Won } else { BotOutcome::Lost });
                }
                ServerMessage::GameAborted => return Ok(BotOutcome::Aborted),
            };
            if let Some(msg) = reply {
                writer.send(codec::encode_client(&msg)?).await?;
            }
        }
    }

    fn plan_placements(&mut self) {
        let mut cells: Vec<Coord> = Coord::all().collect();
        cells.shuffle(&mut self.rng);
        cells.truncate(PLACEMENT_TARGET);
        self.placements = cells;
    }

    fn next_placement(&mut self) -> Option<ClientMessage> {
        self.placements.pop().map(|at| ClientMessage::PlayerPut {
            target: Move::from(at),
        })
    }

    fn maybe_fire(&mut self, state: GameState, my_turn: bool) -> Option<ClientMessage> {
        if !(state.player_ready && state.opponent_ready && my_turn) {
            return None;
        }
        let open: Vec<Coord> = Coord::all()
            .filter(|at| {
                let (row, col) = at.index();
                !self.opponent_view[row][col].is_resolved()
            })
            .collect();
        if open.is_empty() {
            return None;
        }
        let at = open[self.rng.random_range(0..open.len())];
        self.shots += 1;
        Some(ClientMessage::PlayerRoll {
            target: Move::from(at),
        })
    }
}
