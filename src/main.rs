#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use seabattle::{
    accept_pairs, init_logging, BotOutcome, InMemoryTransport, RandomBot, ServerConfig, Session,
    TcpTransport, DEFAULT_BIND, DEFAULT_MAX_FRAME_SIZE,
};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::net::TcpListener;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Accept TCP players and pair every two consecutive connections into a match.
    Serve {
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: String,
        #[arg(long, default_value_t = 30, help = "Seconds allowed for a single frame write")]
        io_timeout: u64,
        #[arg(long, default_value_t = DEFAULT_MAX_FRAME_SIZE)]
        max_frame_size: u32,
    },
    /// Watch two random bots play each other in-process.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Connect a random bot to a running server.
    Bot {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            io_timeout,
            max_frame_size,
        } => {
            let config = ServerConfig {
                bind,
                io_timeout: Duration::from_secs(io_timeout),
                max_frame_size,
            };
            serve(config).await?;
        }
        Commands::Local { seed } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = make_rng(seed);
            let (server1, client1) = InMemoryTransport::pair();
            let (server2, client2) = InMemoryTransport::pair();
            let session = Session::create(Box::new(server1), Box::new(server2));

            let bot1 = RandomBot::new(SmallRng::from_rng(&mut rng));
            let bot2 = RandomBot::new(SmallRng::from_rng(&mut rng));
            let (r1, r2) = tokio::try_join!(bot1.run(Box::new(client1)), bot2.run(Box::new(client2)))?;
            session.closed().await?;

            let winner = match (r1.outcome, r2.outcome) {
                (BotOutcome::Won, _) => "Player 1",
                (_, BotOutcome::Won) => "Player 2",
                _ => "Nobody",
            };
            println!("{} wins after {} shots", winner, r1.shots + r2.shots);
        }
        Commands::Bot { connect, seed } => {
            println!("Connecting to {}...", connect);
            let transport = TcpTransport::connect(&connect).await?;
            let report = RandomBot::new(make_rng(seed)).run(Box::new(transport)).await?;
            println!("{:?} after {} shots", report.outcome, report.shots);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&config.bind).await?;
    log::info!("listening on {}", listener.local_addr()?);
    accept_pairs(listener, &config).await
}
