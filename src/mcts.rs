//! Monte Carlo Tree Search (MCTS) agent.
//!
//! Plain UCT over [`GameState`] nodes:
//! - Selection by UCB1, `win_frac + temperature * sqrt(ln N / n)`
//! - Expansion of one untried move per round
//! - Random playouts for value estimation
//! - Backpropagation of per-player win counts
//!
//! Nodes live in an arena (`Vec<TreeNode>`) and refer to each other by index,
//! so a child can point back at its parent without shared ownership.

use std::sync::Arc;

use tracing::debug;

use crate::agent::{Agent, is_point_an_eye};
use crate::constants::{N_ROUNDS, RESIGN_MIN_ROLLOUTS, RESIGN_THRES, TEMPERATURE};
use crate::game_state::GameState;
use crate::moves::Move;
use crate::playout::simulate_random_game;
use crate::types::Player;

/// A node in the search tree.
pub struct TreeNode {
    /// The game state at this node
    pub game_state: Arc<GameState>,
    /// Parent node index (None for the root)
    pub parent: Option<usize>,
    /// The move that led here from the parent
    pub mv: Option<Move>,
    /// Rollouts won, indexed by [`Player::index`]
    pub win_counts: [u32; 2],
    /// Number of rollouts through this node
    pub num_rollouts: u32,
    /// Child node indices
    pub children: Vec<usize>,
    /// Legal moves not yet expanded into children
    pub unvisited_moves: Vec<Move>,
}

impl TreeNode {
    fn new(game_state: Arc<GameState>, parent: Option<usize>, mv: Option<Move>) -> Self {
        let unvisited_moves = candidate_moves(&game_state);
        TreeNode {
            game_state,
            parent,
            mv,
            win_counts: [0; 2],
            num_rollouts: 0,
            children: Vec::new(),
            unvisited_moves,
        }
    }

    /// Fraction of rollouts through this node won by `player`.
    #[inline]
    pub fn winning_frac(&self, player: Player) -> f64 {
        if self.num_rollouts == 0 {
            return 0.0;
        }
        self.win_counts[player.index()] as f64 / self.num_rollouts as f64
    }

    #[inline]
    fn can_add_child(&self) -> bool {
        !self.unvisited_moves.is_empty()
    }

    #[inline]
    fn is_terminal(&self) -> bool {
        self.game_state.is_over()
    }
}

/// Moves worth searching: legal plays that do not fill our own eyes.
/// Passing is only considered when there is nothing else to do.
fn candidate_moves(game_state: &GameState) -> Vec<Move> {
    if game_state.is_over() {
        return Vec::new();
    }
    let board = game_state.board();
    let player = game_state.next_player();
    let mut moves: Vec<Move> = board
        .points()
        .filter(|&p| !is_point_an_eye(board, p, player))
        .map(Move::play)
        .filter(|&mv| game_state.is_valid_move(mv))
        .collect();
    if moves.is_empty() {
        moves.push(Move::pass_turn());
    }
    moves
}

/// UCB1 score of `child` from the point of view of `player`.
fn uct_score(parent_rollouts: u32, child: &TreeNode, player: Player, temperature: f64) -> f64 {
    let exploration = ((parent_rollouts as f64).ln() / child.num_rollouts as f64).sqrt();
    child.winning_frac(player) + temperature * exploration
}

/// A search agent that runs a fixed number of MCTS rounds per move.
pub struct MctsAgent {
    num_rounds: usize,
    temperature: f64,
    rng: fastrand::Rng,
}

impl Default for MctsAgent {
    fn default() -> Self {
        Self::new(N_ROUNDS, TEMPERATURE)
    }
}

impl MctsAgent {
    pub fn new(num_rounds: usize, temperature: f64) -> Self {
        MctsAgent {
            num_rounds,
            temperature,
            rng: fastrand::Rng::new(),
        }
    }

    /// An agent with reproducible rollouts.
    pub fn with_seed(num_rounds: usize, temperature: f64, seed: u64) -> Self {
        MctsAgent {
            num_rounds,
            temperature,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Build a search tree rooted at `game_state`. Index 0 is the root.
    pub fn search(&mut self, game_state: &Arc<GameState>) -> Vec<TreeNode> {
        let mut tree = vec![TreeNode::new(Arc::clone(game_state), None, None)];

        for _ in 0..self.num_rounds {
            // Descend while the node is fully expanded
            let mut node = 0;
            while !tree[node].can_add_child() && !tree[node].is_terminal() {
                match self.select_child(&tree, node) {
                    Some(child) => node = child,
                    None => break,
                }
            }

            if tree[node].can_add_child() {
                node = self.add_random_child(&mut tree, node);
            }

            let winner = simulate_random_game(&tree[node].game_state, &mut self.rng);

            // Propagate the result up to the root
            let mut current = Some(node);
            while let Some(idx) = current {
                let n = &mut tree[idx];
                n.win_counts[winner.index()] += 1;
                n.num_rollouts += 1;
                current = n.parent;
            }
        }

        tree
    }

    /// Child of `node` with the highest UCB1 score for the player to move.
    fn select_child(&self, tree: &[TreeNode], node: usize) -> Option<usize> {
        let parent = &tree[node];
        let player = parent.game_state.next_player();
        parent.children.iter().copied().max_by(|&a, &b| {
            let sa = uct_score(parent.num_rollouts, &tree[a], player, self.temperature);
            let sb = uct_score(parent.num_rollouts, &tree[b], player, self.temperature);
            sa.partial_cmp(&sb).unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Expand one random untried move of `node` and return the new child.
    fn add_random_child(&mut self, tree: &mut Vec<TreeNode>, node: usize) -> usize {
        let unvisited = &mut tree[node].unvisited_moves;
        let i = self.rng.usize(..unvisited.len());
        let mv = unvisited.swap_remove(i);

        let next_state = tree[node].game_state.apply_move(mv);
        let child = tree.len();
        tree.push(TreeNode::new(next_state, Some(node), Some(mv)));
        tree[node].children.push(child);
        child
    }
}

/// The root child with the best win fraction for the player to move.
fn best_child(tree: &[TreeNode]) -> Option<&TreeNode> {
    let root = &tree[0];
    let player = root.game_state.next_player();
    root.children.iter().map(|&c| &tree[c]).max_by(|a, b| {
        a.winning_frac(player)
            .partial_cmp(&b.winning_frac(player))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Print debug information about the root's children.
pub fn dump_children(tree: &[TreeNode]) {
    let player = tree[0].game_state.next_player();
    for &c in &tree[0].children {
        let child = &tree[c];
        if let Some(mv) = child.mv {
            eprintln!(
                "move {mv} n={} wr={:.3}",
                child.num_rollouts,
                child.winning_frac(player)
            );
        }
    }
}

impl Agent for MctsAgent {
    fn select_move(&mut self, game_state: &Arc<GameState>) -> Move {
        let tree = self.search(game_state);
        let player = game_state.next_player();

        let Some(best) = best_child(&tree) else {
            return Move::pass_turn();
        };
        let mv = best.mv.unwrap_or(Move::pass_turn());
        let win_frac = best.winning_frac(player);
        debug!(
            %mv,
            win_frac,
            rollouts = tree[0].num_rollouts,
            nodes = tree.len(),
            "search finished"
        );

        if tree[0].num_rollouts >= RESIGN_MIN_ROLLOUTS && win_frac < RESIGN_THRES {
            return Move::resign();
        }
        mv
    }
}
