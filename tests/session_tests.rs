use seabattle::protocol::{decode_server, encode_client};
use seabattle::transport::in_memory::{InMemoryReader, InMemoryWriter};
use seabattle::transport::{FrameReader, FrameWriter};
use seabattle::{
    Cell, ClientMessage, Coord, Frame, GameState, InMemoryTransport, Move, ServerMessage, Session,
    SessionHandle, PLACEMENT_TARGET,
};
use tokio::time::{timeout, Duration};

struct Client {
    reader: InMemoryReader,
    writer: InMemoryWriter,
}

impl Client {
    async fn send(&mut self, msg: ClientMessage) {
        self.writer.send(encode_client(&msg).unwrap()).await.unwrap();
    }

    async fn send_raw(&mut self, frame: Frame) {
        self.writer.send(frame).await.unwrap();
    }

    async fn next(&mut self) -> ServerMessage {
        let frame = timeout(Duration::from_secs(2), self.reader.recv())
            .await
            .expect("timed out waiting for a message")
            .unwrap()
            .expect("connection closed");
        decode_server(&frame).unwrap()
    }

    /// `true` if the server closed the connection with nothing else pending.
    async fn is_closed(&mut self) -> bool {
        matches!(
            timeout(Duration::from_secs(2), self.reader.recv()).await,
            Ok(Ok(None))
        )
    }

    /// `true` if nothing arrives for a short while.
    async fn is_quiet(&mut self) -> bool {
        timeout(Duration::from_millis(100), self.reader.recv())
            .await
            .is_err()
    }
}

fn open_session() -> (SessionHandle, Client, Client) {
    let (server1, client1) = InMemoryTransport::pair();
    let (server2, client2) = InMemoryTransport::pair();
    let handle = Session::create(Box::new(server1), Box::new(server2));
    let (r1, w1) = client1.into_parts();
    let (r2, w2) = client2.into_parts();
    (
        handle,
        Client { reader: r1, writer: w1 },
        Client { reader: r2, writer: w2 },
    )
}

fn put(row: i64, col: i64) -> ClientMessage {
    ClientMessage::PlayerPut { target: Move::new(row, col) }
}

fn roll(row: i64, col: i64) -> ClientMessage {
    ClientMessage::PlayerRoll { target: Move::new(row, col) }
}

async fn skip_greeting(p1: &mut Client, p2: &mut Client) {
    assert!(matches!(p1.next().await, ServerMessage::GameStarted { .. }));
    assert!(matches!(p2.next().await, ServerMessage::GameStarted { .. }));
}

async fn place_fleet(player: &mut Client, other: &mut Client) {
    for at in Coord::all().take(PLACEMENT_TARGET) {
        player.send(put(at.row(), at.col())).await;
        assert!(matches!(player.next().await, ServerMessage::ChangePlayer { .. }));
        assert!(matches!(other.next().await, ServerMessage::ResultPut { .. }));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_greets_both_players() {
    let (_handle, mut p1, mut p2) = open_session();
    match p1.next().await {
        ServerMessage::GameStarted { my_turn, state, field, .. } => {
            assert!(my_turn);
            assert_eq!(state, GameState::default());
            assert!(field.iter().flatten().all(|c| *c == Cell::Empty));
        }
        other => panic!("unexpected {:?}", other),
    }
    match p2.next().await {
        ServerMessage::GameStarted { my_turn, .. } => assert!(!my_turn),
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_reply_goes_to_sender_only() {
    let (_handle, mut p1, mut p2) = open_session();
    skip_greeting(&mut p1, &mut p2).await;

    p1.send_raw(Frame::Text("{\"type\":\"dance\"}".into())).await;
    assert_eq!(
        p1.next().await,
        ServerMessage::incorrect_request("Unknown message type: \"dance\"")
    );
    p1.send_raw(Frame::Binary(vec![1, 2, 3])).await;
    assert_eq!(p1.next().await, ServerMessage::incorrect_request("Wrong data type"));
    assert!(p2.is_quiet().await);

    // The session is still usable afterwards.
    p1.send(put(1, 1)).await;
    assert!(matches!(p1.next().await, ServerMessage::ChangePlayer { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_game_over_session() {
    let (handle, mut p1, mut p2) = open_session();
    skip_greeting(&mut p1, &mut p2).await;
    place_fleet(&mut p1, &mut p2).await;
    place_fleet(&mut p2, &mut p1).await;

    p2.send(roll(1, 1)).await;
    assert_eq!(p2.next().await, ServerMessage::incorrect_request("Not your turn"));

    let targets: Vec<Coord> = Coord::all().take(PLACEMENT_TARGET).collect();
    let misses: Vec<Coord> = Coord::all().skip(PLACEMENT_TARGET).collect();
    for (i, at) in targets.iter().enumerate() {
        p1.send(roll(at.row(), at.col())).await;
        if i + 1 == targets.len() {
            break;
        }
        assert!(matches!(p2.next().await, ServerMessage::ChangePlayer { my_turn: true, .. }));
        match p1.next().await {
            ServerMessage::ChangePlayer { my_turn, field_opposite, .. } => {
                assert!(!my_turn);
                let (r, c) = ((at.row() - 1) as usize, (at.col() - 1) as usize);
                assert_eq!(field_opposite[r][c], Cell::Hit);
            }
            other => panic!("unexpected {:?}", other),
        }
        p2.send(roll(misses[i].row(), misses[i].col())).await;
        assert!(matches!(p1.next().await, ServerMessage::ChangePlayer { my_turn: true, .. }));
        assert!(matches!(p2.next().await, ServerMessage::ChangePlayer { my_turn: false, .. }));
    }

    assert_eq!(p1.next().await, ServerMessage::GameResult { win: true });
    assert_eq!(p2.next().await, ServerMessage::GameResult { win: false });

    p2.send(roll(1, 1)).await;
    assert_eq!(p2.next().await, ServerMessage::incorrect_request("Game is over"));

    // Restart is still possible after a result.
    p2.send(ClientMessage::RepeatGame).await;
    skip_greeting(&mut p1, &mut p2).await;
    assert!(!handle.is_finished());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_disconnect_aborts_other_side() {
    let (handle, p1, mut p2) = open_session();
    drop(p1);

    assert!(matches!(p2.next().await, ServerMessage::GameStarted { .. }));
    assert_eq!(p2.next().await, ServerMessage::GameAborted);
    assert!(p2.is_closed().await);
    timeout(Duration::from_secs(2), handle.closed())
        .await
        .expect("session did not finish")
        .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_destroy_is_idempotent() {
    let (handle, mut p1, mut p2) = open_session();
    skip_greeting(&mut p1, &mut p2).await;

    handle.destroy();
    handle.destroy();

    for player in [&mut p1, &mut p2] {
        assert_eq!(player.next().await, ServerMessage::GameAborted);
        assert!(player.is_closed().await);
    }
    timeout(Duration::from_secs(2), handle.closed())
        .await
        .expect("session did not finish")
        .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_send_failure_does_not_stop_session() {
    let (handle, mut p1, p2) = open_session();
    // Player two stops reading but stays connected: every send to it fails.
    let Client { reader, writer: _p2_writer } = p2;
    drop(reader);

    assert!(matches!(p1.next().await, ServerMessage::GameStarted { .. }));
    p1.send(put(4, 4)).await;
    match p1.next().await {
        ServerMessage::ChangePlayer { field, .. } => assert_eq!(field[3][3], Cell::Occupied),
        other => panic!("unexpected {:?}", other),
    }
    assert!(!handle.is_finished());
}
