use broadside::{
    expand_bomb_area, init_logging, play_random_match, Coord, EngineSettings, Grid, MemoryStore, PlayerId,
    RoomCodeGenerator, SessionCoordinator,
};
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an automated match between two random players and print a JSON summary.
    Sim {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Show the cells a special attack centred on (X, Y) would strike.
    BombArea { x: u8, y: u8 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sim { seed } => {
            let mut rng = match seed {
                Some(s) => SmallRng::seed_from_u64(s),
                None => {
                    let mut seed_rng = rand::rng();
                    SmallRng::from_rng(&mut seed_rng)
                }
            };
            let mut coordinator = SessionCoordinator::with_settings(MemoryStore::new(), EngineSettings::from_env());
            if let Some(s) = seed {
                coordinator = coordinator.with_room_codes(RoomCodeGenerator::seeded(s));
            }

            let alice = PlayerId::from("player1");
            let bob = PlayerId::from("player2");
            let summary = play_random_match(&coordinator, &mut rng, &alice, &bob).await?;
            let log = coordinator.move_log(summary.match_id, &alice).await?;

            let result = json!({
                "match": summary.match_id,
                "roomCode": summary.room_code,
                "winner": summary.winner,
                "moves": summary.moves,
                "specialsUsed": summary.specials_used,
                "hits": log.iter().filter(|m| m.hit).count(),
            });
            println!("{}", serde_json::to_string(&result)?);
        }
        Commands::BombArea { x, y } => {
            let center = Coord::new(x, y);
            if !center.in_bounds() {
                anyhow::bail!("{} is outside the board", center);
            }
            let area = Grid::from_coords(expand_bomb_area(center))?;
            println!("{} cells around {}:", area.count_ones(), center);
            println!("{}", area);
        }
    }
    Ok(())
}
