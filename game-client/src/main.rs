use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use game_client::{Config, PlayLearnClient, RouteLoad, UpdateOutcome};
use game_core::GameCatalog;
use game_types::{ProgressUpdate, ScoringType};

/// Drive the PlayLearn client against a backend from the terminal.
#[derive(Parser, Debug)]
#[command(name = "playlearn", version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the session and cached progress
    Status,
    /// List the game catalog
    Games,
    /// Sign in
    Login { email: String, password: String },
    /// Create an account
    Signup { name: String, email: String, password: String },
    /// Forget the stored session
    Logout,
    /// Record one attempt for a game
    Play {
        /// Route id or slug, e.g. 11 or word-builder
        game: String,
        level: i32,
        difficulty: String,
        #[arg(allow_negative_numbers = true)]
        score_delta: i32,
        word: Option<String>,
    },
    /// Submit a score
    Score {
        game_id: String,
        /// session, persistent or highest
        mode: ScoringType,
        #[arg(allow_negative_numbers = true)]
        score: i32,
    },
    /// Submit a level
    Level { game_id: String, level: i32 },
    /// Look a word up in the dictionary
    CheckWord { word: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = Config::new()?;
    info!("Using backend at {}", config.api_base_url);
    let client = PlayLearnClient::connect(config).await?;

    run(args.command, &client).await
}

async fn run(command: Command, client: &PlayLearnClient) -> anyhow::Result<()> {
    match command {
        Command::Status => {
            match client.session().user() {
                Some(user) => println!("Signed in as {} <{}>", user.name, user.email),
                None => println!("Not signed in"),
            }
            match client.cache().get() {
                Some(record) => println!(
                    "Last progress: {} level {} ({:+} points, {}s)",
                    record.game, record.level, record.score_delta, record.time_spent
                ),
                None => println!("No progress recorded yet"),
            }
        }
        Command::Games => {
            for game in GameCatalog::standard().all() {
                println!("{:>2}  {:<18} {:<8} {}", game.id, game.name, game.difficulty, game.description);
            }
        }
        Command::Login { email, password } => {
            let user = client.session().login(client.api(), &email, &password).await?;
            println!("Welcome back, {}!", user.name);
        }
        Command::Signup { name, email, password } => {
            let user = client.session().signup(client.api(), &name, &email, &password).await?;
            println!("Welcome, {}!", user.name);
        }
        Command::Logout => {
            client.session().logout().await?;
            println!("Signed out");
        }
        Command::Play { game, level, difficulty, score_delta, word } => {
            let sync = client.synchronizer();
            if let RouteLoad::Resumed(record) = sync.enter_route(&game).await? {
                println!("Resuming {} at level {}", record.game, record.level);
            }
            let game_name = sync.current_game_name().await.unwrap_or(game);

            let mut update = ProgressUpdate::new(game_name, level, difficulty).with_result(score_delta > 0, score_delta);
            if let Some(word) = word {
                update = update.with_word(word);
            }

            if let UpdateOutcome::Pushed(push) = sync.update(update).await {
                push.await.context("progress push task failed")?;
            }
            println!("Progress recorded");
        }
        Command::Score { game_id, score, mode } => {
            let widget = client.score_widget(&game_id, mode);
            widget.mount().await;
            widget.set_current(score);
            widget.flush().await;
            match widget.high_score() {
                Some(high_score) => println!("Score: {} (best {})", widget.display_value(), high_score),
                None => println!("Score: {}", widget.display_value()),
            }
        }
        Command::Level { game_id, level } => {
            let widget = client.level_widget(&game_id, level);
            widget.mount().await;
            widget.flush().await;
            println!(
                "Level {} of {} ({:.0}%)",
                widget.display_level(),
                client.config().max_level,
                widget.progress_percent()
            );
        }
        Command::CheckWord { word } => {
            if client.dictionary().is_valid_word(&word).await? {
                println!("'{}' is a word", word);
            } else {
                println!("'{}' is not in the dictionary", word);
            }
        }
    }
    Ok(())
}
