//! Go Text Protocol (GTP) implementation.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements GTP version 2, allowing the engine to be used
//! with graphical Go interfaces like Sabaki, GoGui, or Lizzie.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return GTP protocol version (2)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `boardsize <size>` - Set board size (1 to 19) and clear the board
//! - `clear_board` - Reset the board to empty
//! - `komi <value>` - Set komi (accepted; there is no scoring)
//! - `play <color> <vertex>` - Play a move
//! - `genmove <color>` - Generate and play a move for the given color
//! - `undo` - Take back the last move
//! - `showboard` - Print the board
//!
//! ## Example
//!
//! ```ignore
//! use goban::gtp::GtpEngine;
//! use goban::mcts::MctsAgent;
//! let mut engine = GtpEngine::new(9, Box::new(MctsAgent::default()))?;
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing::debug;

use crate::agent::Agent;
use crate::board::Board;
use crate::constants::MAX_BOARD_SIZE;
use crate::coords::parse_move;
use crate::error::GoError;
use crate::game_state::{GameState, KoRule};
use crate::moves::Move;
use crate::types::Player;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    /// Current game state; earlier states are reachable for `undo`
    game: Arc<GameState>,
    /// Agent used for `genmove`
    agent: Box<dyn Agent>,
    komi: f32,
}

impl GtpEngine {
    /// Create a GTP engine on an empty `size`x`size` board.
    pub fn new(size: usize, agent: Box<dyn Agent>) -> Result<Self, GoError> {
        Self::with_rule(size, agent, KoRule::default())
    }

    pub fn with_rule(size: usize, agent: Box<dyn Agent>, ko_rule: KoRule) -> Result<Self, GoError> {
        Board::check_size(size, size)?;
        Ok(Self {
            game: GameState::new_game_with_rule(size, ko_rule),
            agent,
            komi: 7.5,
        })
    }

    /// The current game state.
    pub fn game(&self) -> &Arc<GameState> {
        &self.game
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;
            let Some((reply, quit)) = self.handle_line(&line) else {
                continue;
            };
            write!(stdout, "{reply}")?;
            stdout.flush()?;
            if quit {
                break;
            }
        }
        Ok(())
    }

    /// Process one input line. Returns the formatted reply and whether the
    /// engine should quit, or `None` for blank lines and comments.
    pub fn handle_line(&mut self, line: &str) -> Option<(String, bool)> {
        // Skip empty lines and comments
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (id, command_line) = Self::parse_id(line);
        let parts: Vec<&str> = command_line.split_whitespace().collect();
        let (command, args) = parts.split_first()?;
        let command = command.to_lowercase();

        debug!(%command, ?args, "gtp command");
        let (success, message) = self.execute(&command, args);

        let prefix = if success { '=' } else { '?' };
        let id_str = id.map(|i| i.to_string()).unwrap_or_default();
        Some((format!("{prefix}{id_str} {message}\n\n"), command == "quit"))
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn parse_color(arg: &str) -> Option<Player> {
        match arg.to_lowercase().as_str() {
            "b" | "black" => Some(Player::Black),
            "w" | "white" => Some(Player::White),
            _ => None,
        }
    }

    /// Only the side to move may play; the history never gets moves the
    /// controller did not send.
    fn check_turn(&self, color: Player) -> Result<(), String> {
        let to_move = self.game.next_player();
        if to_move == color {
            Ok(())
        } else {
            Err(format!("wrong color: {to_move} to move"))
        }
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) if Board::check_size(size, size).is_ok() => {
                        self.game = GameState::new_game_with_rule(size, self.game.ko_rule());
                        (true, String::new())
                    }
                    Ok(_) => (
                        false,
                        format!("unacceptable size, must be 1 to {MAX_BOARD_SIZE}"),
                    ),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                let board = self.game.board();
                let size = (board.num_rows(), board.num_cols());
                self.game = GameState::new_game_with_rule(size, self.game.ko_rule());
                (true, String::new())
            }

            "komi" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<f32>() {
                    Ok(komi) => {
                        self.komi = komi;
                        debug!(komi = self.komi, "komi set");
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid komi".to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let Some(color) = Self::parse_color(args[0]) else {
                    return (false, "invalid color".to_string());
                };
                let mv = match parse_move(args[1]) {
                    Ok(mv) => mv,
                    Err(e) => return (false, e.to_string()),
                };

                if let Err(e) = self.check_turn(color) {
                    return (false, e);
                }
                if !self.game.is_valid_move(mv) {
                    return (false, GoError::IllegalMove(mv.to_string()).to_string());
                }
                self.game = self.game.apply_move(mv);
                (true, String::new())
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|a| Self::parse_color(a)) else {
                    return (false, "invalid color".to_string());
                };
                if let Err(e) = self.check_turn(color) {
                    return (false, e);
                }
                if self.game.is_over() {
                    return (false, "game is over".to_string());
                }

                let mut mv = self.agent.select_move(&self.game);
                if !self.game.is_valid_move(mv) {
                    debug!(%mv, "agent proposed an illegal move, passing");
                    mv = Move::pass_turn();
                }
                self.game = self.game.apply_move(mv);
                (true, mv.to_string())
            }

            "undo" => match self.game.previous_state() {
                Some(previous) => {
                    self.game = Arc::clone(previous);
                    (true, String::new())
                }
                None => (false, "cannot undo".to_string()),
            },

            "showboard" => {
                let board = self.game.board().to_string();
                (true, format!("\n{}", board.trim_end()))
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
