//! Uniform-cost search for the cheapest way to sort the burrow.
//!
//! The search is Dijkstra over the move graph with lazy deletion: the
//! frontier may hold several entries for one burrow, and any entry popped
//! after that burrow has been committed is skipped.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::burrow::{Burrow, Energy};
use crate::error::SolveError;
use crate::moves::{successors, Move};

/// Configuration for the solver
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Give up after this long and report [`Outcome::Incomplete`]
    pub timeout: Option<Duration>,
    /// Verify that every generated move conserves the amphipod inventory
    pub check_invariants: bool,
}

/// How the search ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A sorted burrow was reached; `moves` is one cheapest way there
    Solved { energy: Energy, moves: Vec<Move> },
    /// Every reachable burrow was explored and none is sorted
    Unreachable,
    /// The deadline passed before the search finished
    Incomplete,
}

impl Outcome {
    /// Minimum energy, if solved
    pub fn energy(&self) -> Option<Energy> {
        match self {
            Outcome::Solved { energy, .. } => Some(*energy),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Solved { .. } => "solved",
            Outcome::Unreachable => "unreachable",
            Outcome::Incomplete => "incomplete",
        }
    }
}

/// Result of a solver run
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub outcome: Outcome,
    /// Number of burrows whose successors were generated
    pub states_expanded: usize,
    /// Number of burrows committed with their final energy
    pub states_committed: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

/// A burrow committed by [`Search::advance`] at its minimum energy
#[derive(Debug, Clone)]
pub struct Commit {
    pub energy: Energy,
    pub burrow: Burrow,
    pub solved: bool,
}

/// Frontier entry. Ordered by energy only, reversed so the heap pops the cheapest.
#[derive(Debug)]
struct FrontierEntry {
    energy: Energy,
    burrow: Burrow,
    via: Option<(Burrow, Move)>,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.energy == other.energy
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.energy.cmp(&self.energy)
    }
}

/// Step-wise search engine.
///
/// Each call to [`Search::advance`] commits one burrow. Burrows are
/// committed in non-decreasing energy order, so the first sorted burrow
/// committed is reached at minimum energy.
pub struct Search {
    frontier: BinaryHeap<FrontierEntry>,
    best: HashMap<Burrow, Energy>,
    came_from: HashMap<Burrow, (Burrow, Move)>,
    states_expanded: usize,
    check_invariants: bool,
}

impl Search {
    pub fn new(start: Burrow) -> Self {
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry {
            energy: 0,
            burrow: start,
            via: None,
        });
        Self {
            frontier,
            best: HashMap::new(),
            came_from: HashMap::new(),
            states_expanded: 0,
            check_invariants: false,
        }
    }

    /// Enable inventory checks on every generated move
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }

    pub fn states_expanded(&self) -> usize {
        self.states_expanded
    }

    pub fn states_committed(&self) -> usize {
        self.best.len()
    }

    /// Commit the next cheapest burrow.
    ///
    /// Sorted burrows are committed but not expanded. Returns `Ok(None)`
    /// once the frontier is empty.
    pub fn advance(&mut self) -> Result<Option<Commit>, SolveError> {
        while let Some(entry) = self.frontier.pop() {
            if self
                .best
                .get(&entry.burrow)
                .is_some_and(|&known| known <= entry.energy)
            {
                continue;
            }

            self.best.insert(entry.burrow.clone(), entry.energy);
            if let Some(via) = entry.via {
                self.came_from.insert(entry.burrow.clone(), via);
            }

            let solved = entry.burrow.is_solved();
            trace!(energy = entry.energy, solved, "committed burrow");
            if !solved {
                self.expand(&entry.burrow, entry.energy)?;
            }

            return Ok(Some(Commit {
                energy: entry.energy,
                burrow: entry.burrow,
                solved,
            }));
        }
        Ok(None)
    }

    fn expand(&mut self, burrow: &Burrow, energy: Energy) -> Result<(), SolveError> {
        self.states_expanded += 1;
        let before = burrow.inventory();

        for successor in successors(burrow) {
            if self.check_invariants {
                let after = successor.burrow.inventory();
                if after != before {
                    return Err(SolveError::InventoryChanged {
                        step: successor.step,
                        before,
                        after,
                    });
                }
            }

            if self.best.contains_key(&successor.burrow) {
                continue;
            }
            self.frontier.push(FrontierEntry {
                energy: energy + successor.step.energy,
                burrow: successor.burrow,
                via: Some((burrow.clone(), successor.step)),
            });
        }
        Ok(())
    }

    /// Moves leading from the start to a committed burrow, in order
    pub fn path_to(&self, burrow: &Burrow) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut current = burrow;
        while let Some((parent, step)) = self.came_from.get(current) {
            moves.push(*step);
            current = parent;
        }
        moves.reverse();
        moves
    }
}

/// Find the minimum energy needed to sort `start`.
///
/// # Errors
///
/// Only fails with [`SolveError`] when `config.check_invariants` is set and
/// a generated move breaks amphipod conservation.
pub fn solve(start: &Burrow, config: &SolverConfig) -> Result<SolverResult, SolveError> {
    let start_time = Instant::now();
    // A timeout too large to represent as an instant means no deadline
    let deadline = config
        .timeout
        .and_then(|timeout| start_time.checked_add(timeout));

    debug!(
        depth = start.depth(),
        in_hallway = start.hallway().iter().flatten().count(),
        "starting search"
    );

    let mut search = Search::new(start.clone()).with_invariant_checks(config.check_invariants);
    let outcome = loop {
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            warn!(
                states_committed = search.states_committed(),
                "deadline reached before the search finished"
            );
            break Outcome::Incomplete;
        }

        match search.advance()? {
            Some(commit) if commit.solved => {
                break Outcome::Solved {
                    energy: commit.energy,
                    moves: search.path_to(&commit.burrow),
                };
            }
            Some(_) => {}
            None => break Outcome::Unreachable,
        }
    };

    let result = SolverResult {
        outcome,
        states_expanded: search.states_expanded(),
        states_committed: search.states_committed(),
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    };
    info!(
        outcome = result.outcome.label(),
        energy = result.outcome.energy(),
        states_expanded = result.states_expanded,
        time_elapsed_ms = result.time_elapsed_ms,
        "search finished"
    );
    Ok(result)
}
