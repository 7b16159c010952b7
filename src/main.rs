//! Goban: a Go rules engine with random and MCTS agents.
//!
//! ## Usage
//!
//! - `goban` - Show a demo
//! - `goban selfplay` - Let two agents play each other
//! - `goban gtp` - Start GTP server for GUI integration
//! - `goban demo` - Run the capture and search demo

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use goban::agent::{Agent, RandomBot};
use goban::board::Board;
use goban::constants::{DEFAULT_BOARD_SIZE, GAME_LEN_FACTOR, N_ROUNDS, TEMPERATURE};
use goban::coords::parse_move;
use goban::game_state::{GameState, KoRule};
use goban::gtp::GtpEngine;
use goban::mcts::{MctsAgent, dump_children};
use goban::moves::format_move;
use goban::playout::capture_diff;
use goban::types::Player;

/// Goban: a Go rules engine with random and MCTS agents
#[derive(Parser)]
#[command(name = "goban")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "info", "goban=debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Let two agents play a full game against each other
    Selfplay {
        #[command(flatten)]
        engine: EngineArgs,
        /// Agent playing Black
        #[arg(long, value_enum, default_value_t = AgentKind::Random)]
        black: AgentKind,
        /// Agent playing White
        #[arg(long, value_enum, default_value_t = AgentKind::Random)]
        white: AgentKind,
        /// Stop after this many moves (default: 3 x board area)
        #[arg(long)]
        max_moves: Option<usize>,
        /// Only print the final position
        #[arg(long, short)]
        quiet: bool,
    },
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp {
        #[command(flatten)]
        engine: EngineArgs,
        /// Agent answering genmove
        #[arg(long, value_enum, default_value_t = AgentKind::Mcts)]
        agent: AgentKind,
    },
    /// Run a short demo of captures and the search agent
    Demo,
}

#[derive(clap::Args)]
struct EngineArgs {
    /// Board size (rows = columns)
    #[arg(long, short, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    /// MCTS rounds per move
    #[arg(long, default_value_t = N_ROUNDS)]
    rounds: usize,
    /// MCTS exploration temperature
    #[arg(long, default_value_t = TEMPERATURE)]
    temperature: f64,
    /// Seed for reproducible agents
    #[arg(long)]
    seed: Option<u64>,
    /// Repetition rule
    #[arg(long, value_enum, default_value_t = KoArg::Superko)]
    ko: KoArg,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum AgentKind {
    Random,
    Mcts,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum KoArg {
    Superko,
    Simple,
}

impl From<KoArg> for KoRule {
    fn from(arg: KoArg) -> Self {
        match arg {
            KoArg::Superko => KoRule::PositionalSuperko,
            KoArg::Simple => KoRule::Simple,
        }
    }
}

impl EngineArgs {
    fn make_agent(&self, kind: AgentKind, seed_offset: u64) -> Box<dyn Agent> {
        let seed = self.seed.map(|s| s.wrapping_add(seed_offset));
        match (kind, seed) {
            (AgentKind::Random, Some(seed)) => Box::new(RandomBot::with_seed(seed)),
            (AgentKind::Random, None) => Box::new(RandomBot::new()),
            (AgentKind::Mcts, Some(seed)) => {
                Box::new(MctsAgent::with_seed(self.rounds, self.temperature, seed))
            }
            (AgentKind::Mcts, None) => Box::new(MctsAgent::new(self.rounds, self.temperature)),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so GTP output on stdout stays clean
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Selfplay {
            engine,
            black,
            white,
            max_moves,
            quiet,
        }) => run_selfplay(&engine, black, white, max_moves, quiet),
        Some(Commands::Gtp { engine, agent }) => {
            Board::check_size(engine.size, engine.size)?;
            let agent = engine.make_agent(agent, 0);
            let mut gtp = GtpEngine::with_rule(engine.size, agent, engine.ko.into())?;
            gtp.run().context("GTP session failed")
        }
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn run_selfplay(
    engine: &EngineArgs,
    black: AgentKind,
    white: AgentKind,
    max_moves: Option<usize>,
    quiet: bool,
) -> Result<()> {
    Board::check_size(engine.size, engine.size)?;
    let max_moves = max_moves.unwrap_or(GAME_LEN_FACTOR * engine.size * engine.size);

    let mut black_agent = engine.make_agent(black, 0);
    let mut white_agent = engine.make_agent(white, 1);
    let mut game = GameState::new_game_with_rule(engine.size, engine.ko.into());
    info!(size = engine.size, max_moves, "starting self-play game");

    while !game.is_over() && game.move_number() < max_moves {
        let player = game.next_player();
        let agent = match player {
            Player::Black => &mut black_agent,
            Player::White => &mut white_agent,
        };
        let mv = agent.select_move(&game);
        if !game.is_valid_move(mv) {
            bail!("{player} agent chose illegal move {mv} at move {}", game.move_number() + 1);
        }
        game = game.apply_move(mv);

        if !quiet {
            print!("\x1b[2J\x1b[H");
            print!("{}", game.board());
            println!("{}", format_move(player, mv));
        }
    }

    report_result(&game);
    Ok(())
}

fn report_result(game: &Arc<GameState>) {
    let board = game.board();
    let black = board.stone_count(Player::Black);
    let white = board.stone_count(Player::White);
    println!("{board}");
    match game.winner_by_resignation() {
        Some(winner) => println!("{winner} wins by resignation"),
        None if game.is_over() => println!("Game over after {} moves", game.move_number()),
        None => println!("Stopped after {} moves", game.move_number()),
    }
    println!("Stones on board: Black {black}, White {white}");
    println!(
        "Stone lead for {} (to move): {:+}",
        game.next_player(),
        capture_diff(game)
    );
    info!(moves = game.move_number(), black, white, "game finished");
}

fn run_demo() -> Result<()> {
    println!("Goban: Go rules engine\n");

    // Demo 1: capture in the corner
    println!("=== Capture Demo ===");
    let mut game = GameState::new_game(5);
    for vertex in ["B1", "A1", "A2"] {
        let mv = parse_move(vertex)?;
        let player = game.next_player();
        println!("{}", format_move(player, mv));
        game = game.apply_move(mv);
    }
    println!("{}", game.board());

    // Demo 2: search agent on a small board
    println!("=== MCTS Demo ===");
    let game = GameState::new_game(5);
    let mut agent = MctsAgent::with_seed(200, TEMPERATURE, 1);
    println!("Running 200 MCTS rounds...");
    let tree = agent.search(&game);
    dump_children(&tree);
    let best = agent.select_move(&game);
    println!("Best move: {best}");
    Ok(())
}
