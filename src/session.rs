//! A running match between two connections.
//!
//! Each session is one actor task. Both connections' reader tasks feed the
//! same mailbox, so moves are applied strictly one at a time. Outbound
//! messages are queued to a writer task per connection and never awaited by
//! the actor; a failed send is logged and the game carries on.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{
    config::ServerConfig,
    game::{Envelope, Match, Role},
    protocol::{codec, Inbound, ServerMessage},
    transport::{tcp::TcpTransport, Frame, FrameReader, FrameWriter, Transport},
};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Inputs to the session actor.
#[derive(Debug)]
enum Event {
    Frame(Role, Frame),
    Closed(Role),
    Abort,
}

/// Work for a connection's writer task.
#[derive(Debug)]
enum Outgoing {
    Message(ServerMessage),
    Close,
}

/// Handle given to whoever paired the two connections.
pub struct SessionHandle {
    id: u64,
    events: mpsc::UnboundedSender<Event>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Abort the match and close both connections. Safe to call repeatedly.
    pub fn destroy(&self) {
        // The actor may already be gone; nothing left to tear down then.
        let _ = self.events.send(Event::Abort);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait until the session has been torn down.
    pub async fn closed(self) -> anyhow::Result<()> {
        self.task.await?;
        Ok(())
    }
}

struct Peer {
    outbox: Option<mpsc::UnboundedSender<Outgoing>>,
    open: bool,
}

pub struct Session {
    id: u64,
    game: Match,
    peers: Vec<Peer>,
    readers: Vec<JoinHandle<()>>,
    torn_down: bool,
}

impl Session {
    /// Pair two connections into a new match and greet both players.
    ///
    /// The first connection plays [`Role::One`] and fires first.
    /// Must be called within a tokio runtime.
    pub fn create(first: Box<dyn Transport>, second: Box<dyn Transport>) -> SessionHandle {
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let mut peers = Vec::with_capacity(2);
        let mut readers = Vec::with_capacity(2);
        for (role, transport) in Role::BOTH.into_iter().zip([first, second]) {
            let (reader, writer) = transport.split();
            readers.push(tokio::spawn(read_loop(id, role, reader, events_tx.clone())));
            let (out_tx, out_rx) = mpsc::unbounded_channel();
            tokio::spawn(write_loop(id, role, writer, out_rx));
            peers.push(Peer {
                outbox: Some(out_tx),
                open: true,
            });
        }

        let session = Session {
            id,
            game: Match::new(),
            peers,
            readers,
            torn_down: false,
        };
        let task = tokio::spawn(session.run(events_rx));
        SessionHandle {
            id,
            events: events_tx,
            task,
        }
    }

    async fn run(mut self, mut events: mpsc::UnboundedReceiver<Event>) {
        log::info!("session {}: started", self.id);
        let greeting = self.game.start();
        self.deliver(greeting);

        while let Some(event) = events.recv().await {
            match event {
                Event::Frame(role, frame) => self.handle_frame(role, &frame),
                Event::Closed(role) => {
                    log::info!("session {}: {} disconnected", self.id, role);
                    self.peers[role.index()].open = false;
                    break;
                }
                Event::Abort => {
                    log::info!("session {}: aborted", self.id);
                    break;
                }
            }
        }
        self.teardown();
    }

    fn handle_frame(&mut self, from: Role, frame: &Frame) {
        let envelopes = match codec::decode(frame) {
            Inbound::Message(msg) => self.game.apply(from, msg),
            Inbound::Malformed(e) => {
                log::debug!("session {}: malformed message from {}: {}", self.id, from, e);
                vec![Envelope::new(from, ServerMessage::incorrect_request(e.to_string()))]
            }
        };
        self.deliver(envelopes);
    }

    fn deliver(&mut self, envelopes: Vec<Envelope>) {
        for Envelope { to, message } in envelopes {
            self.post(to, Outgoing::Message(message));
        }
    }

    fn post(&self, to: Role, out: Outgoing) {
        if let Some(tx) = &self.peers[to.index()].outbox {
            if tx.send(out).is_err() {
                log::warn!("session {}: writer for {} is gone, message dropped", self.id, to);
            }
        }
    }

    /// Notify whoever is still connected and close both connections. Runs once.
    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        for role in Role::BOTH {
            if self.peers[role.index()].open {
                self.post(role, Outgoing::Message(ServerMessage::GameAborted));
            }
            self.post(role, Outgoing::Close);
            let peer = &mut self.peers[role.index()];
            peer.open = false;
            peer.outbox = None;
        }
        for reader in self.readers.drain(..) {
            reader.abort();
        }
        log::info!("session {}: closed", self.id);
    }
}

async fn read_loop(
    id: u64,
    role: Role,
    mut reader: Box<dyn FrameReader>,
    events: mpsc::UnboundedSender<Event>,
) {
    loop {
        match reader.recv().await {
            Ok(Some(frame)) => {
                if events.send(Event::Frame(role, frame)).is_err() {
                    return;
                }
            }
            Ok(None) => break,
            Err(e) => {
                log::warn!("session {}: receive from {} failed: {}", id, role, e);
                break;
            }
        }
    }
    let _ = events.send(Event::Closed(role));
}

async fn write_loop(
    id: u64,
    role: Role,
    mut writer: Box<dyn FrameWriter>,
    mut outbox: mpsc::UnboundedReceiver<Outgoing>,
) {
    while let Some(out) = outbox.recv().await {
        match out {
            Outgoing::Message(msg) => {
                let kind = msg.kind();
                let sent = match codec::encode(&msg) {
                    Ok(frame) => writer.send(frame).await,
                    Err(e) => Err(e),
                };
                if let Err(e) = sent {
                    log::warn!("session {}: failed to send {} to {}: {}", id, kind, role, e);
                }
            }
            Outgoing::Close => {
                if let Err(e) = writer.close().await {
                    log::debug!("session {}: closing {} failed: {}", id, role, e);
                }
                return;
            }
        }
    }
}

/// Stand-in matchmaker: the first waiting connection is paired with the next one.
///
/// Runs until the task is dropped. A failed accept is logged and skipped.
pub async fn accept_pairs(listener: TcpListener, config: &ServerConfig) -> anyhow::Result<()> {
    let mut waiting: Option<TcpTransport> = None;
    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                log::warn!("accept failed: {}", e);
                continue;
            }
        };
        log::info!("player connected from {}", addr);
        let transport = TcpTransport::with_config(stream, config);
        match waiting.take() {
            Some(first) => {
                let session = Session::create(Box::new(first), Box::new(transport));
                log::info!("paired players into session {}", session.id());
            }
            None => waiting = Some(transport),
        }
    }
}
