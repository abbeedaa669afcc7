use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{BotOutcome, InMemoryTransport, RandomBot, Session};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let (server1, client1) = InMemoryTransport::pair();
    let (server2, client2) = InMemoryTransport::pair();
    let session = Session::create(Box::new(server1), Box::new(server2));

    let bot1 = RandomBot::new(SmallRng::seed_from_u64(seed1));
    let bot2 = RandomBot::new(SmallRng::seed_from_u64(seed2));
    let (res1, res2) = tokio::try_join!(bot1.run(Box::new(client1)), bot2.run(Box::new(client2)))?;
    session.closed().await?;

    let winner = match (res1.outcome, res2.outcome) {
        (BotOutcome::Won, BotOutcome::Lost) => Some("player1"),
        (BotOutcome::Lost, BotOutcome::Won) => Some("player2"),
        _ => None,
    };

    let result = json!({
        "player1": {"outcome": format!("{:?}", res1.outcome), "shots": res1.shots},
        "player2": {"outcome": format!("{:?}", res2.outcome), "shots": res2.shots},
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
