//! Move generation.
//!
//! An amphipod either leaves a room for a parking cell in the hallway, or
//! walks from the hallway straight into its own room. There are no other
//! moves: nothing stops on a room mouth and nothing goes room to room in
//! one step.

use serde::{Deserialize, Serialize};

use crate::burrow::{Amphipod, Burrow, Cell, Energy, Slot, HALLWAY_LEN, PARKING};

/// A single move and the energy it costs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub amphipod: Amphipod,
    pub from: Cell,
    pub to: Cell,
    pub energy: Energy,
}

impl Move {
    /// Apply this move to `burrow`, returning the resulting burrow
    pub fn apply(&self, burrow: &Burrow) -> Burrow {
        burrow.relocate(self.from, self.to)
    }
}

/// A successor state together with the move that produced it
#[derive(Debug, Clone)]
pub struct Successor {
    pub burrow: Burrow,
    pub step: Move,
}

/// Whether every hallway cell after `from`, up to and including `to`, is empty
fn path_clear(hallway: &[Slot; HALLWAY_LEN], from: usize, to: usize) -> bool {
    if from == to {
        return true;
    }
    let cells = if from < to {
        &hallway[from + 1..=to]
    } else {
        &hallway[to..from]
    };
    cells.iter().all(Option::is_none)
}

fn energy_for(amphipod: Amphipod, steps: usize) -> Energy {
    steps as Energy * amphipod.step_energy()
}

/// All moves taking the top amphipod of `room` out to a parking cell.
///
/// Rooms that are empty, or whose occupants all belong there, produce none.
pub fn moves_from_room(burrow: &Burrow, room: Amphipod) -> Vec<Successor> {
    let slots = burrow.room(room);
    let Some((depth, amphipod)) = slots
        .iter()
        .enumerate()
        .find_map(|(depth, slot)| slot.map(|a| (depth, a)))
    else {
        return Vec::new();
    };

    // Settled: this one and everything below it are home already
    if slots[depth..].iter().all(|slot| *slot == Some(room)) {
        return Vec::new();
    }

    let mouth = room.room_mouth();
    let from = Cell::Room { room, depth };
    PARKING
        .iter()
        .copied()
        .filter(|&target| path_clear(burrow.hallway(), mouth, target))
        .map(|target| {
            let to = Cell::Hallway { index: target };
            let step = Move {
                amphipod,
                from,
                to,
                energy: energy_for(amphipod, depth + 1 + mouth.abs_diff(target)),
            };
            Successor {
                burrow: step.apply(burrow),
                step,
            }
        })
        .collect()
}

/// All moves taking a hallway amphipod into its own room.
///
/// A room can only be entered while it holds nothing but its own type, and
/// the newcomer always drops to the deepest empty slot.
pub fn moves_to_room(burrow: &Burrow) -> Vec<Successor> {
    let hallway = burrow.hallway();
    let mut successors = Vec::new();

    for (index, slot) in hallway.iter().enumerate() {
        let Some(amphipod) = *slot else {
            continue;
        };

        let room = burrow.room(amphipod);
        if room.iter().flatten().any(|&occupant| occupant != amphipod) {
            continue;
        }

        let mouth = amphipod.room_mouth();
        if !path_clear(hallway, index, mouth) {
            continue;
        }

        let Some(depth) = room.iter().rposition(Option::is_none) else {
            continue;
        };

        let step = Move {
            amphipod,
            from: Cell::Hallway { index },
            to: Cell::Room {
                room: amphipod,
                depth,
            },
            energy: energy_for(amphipod, index.abs_diff(mouth) + depth + 1),
        };
        successors.push(Successor {
            burrow: step.apply(burrow),
            step,
        });
    }

    successors
}

/// Every legal successor of `burrow`: room exits for all four rooms, then
/// hallway entries.
pub fn successors(burrow: &Burrow) -> Vec<Successor> {
    let mut all: Vec<Successor> = Amphipod::ALL
        .iter()
        .flat_map(|&room| moves_from_room(burrow, room))
        .collect();
    all.extend(moves_to_room(burrow));
    all
}
