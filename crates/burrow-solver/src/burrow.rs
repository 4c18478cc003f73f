//! Burrow state representation.
//!
//! A burrow is an 11-cell hallway with four side rooms hanging below it.
//! Every room has the same depth, indexed from the top (0, next to the
//! hallway) to the bottom (depth - 1).

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of hallway cells
pub const HALLWAY_LEN: usize = 11;

/// Number of side rooms
pub const ROOM_COUNT: usize = 4;

/// Hallway index directly above each room, in room order A..D
pub const ROOM_MOUTHS: [usize; ROOM_COUNT] = [2, 4, 6, 8];

/// Hallway indices an amphipod may stop on
pub const PARKING: [usize; 7] = [0, 1, 3, 5, 7, 9, 10];

/// Energy is accumulated per step moved
pub type Energy = u64;

/// Amphipod type. Each type owns one room and has a fixed per-step energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Amphipod {
    #[serde(rename = "A")]
    Amber,
    #[serde(rename = "B")]
    Bronze,
    #[serde(rename = "C")]
    Copper,
    #[serde(rename = "D")]
    Desert,
}

impl Amphipod {
    /// All types in room order
    pub const ALL: [Amphipod; ROOM_COUNT] = [
        Amphipod::Amber,
        Amphipod::Bronze,
        Amphipod::Copper,
        Amphipod::Desert,
    ];

    /// Energy spent per step
    pub fn step_energy(self) -> Energy {
        match self {
            Amphipod::Amber => 1,
            Amphipod::Bronze => 10,
            Amphipod::Copper => 100,
            Amphipod::Desert => 1000,
        }
    }

    /// Index of this type's home room
    pub fn index(self) -> usize {
        self as usize
    }

    /// Hallway index above this type's home room
    pub fn room_mouth(self) -> usize {
        ROOM_MOUTHS[self.index()]
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Amphipod::Amber),
            'B' => Some(Amphipod::Bronze),
            'C' => Some(Amphipod::Copper),
            'D' => Some(Amphipod::Desert),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Amphipod::Amber => 'A',
            Amphipod::Bronze => 'B',
            Amphipod::Copper => 'C',
            Amphipod::Desert => 'D',
        }
    }
}

impl fmt::Display for Amphipod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Contents of a single cell: empty or one amphipod
pub type Slot = Option<Amphipod>;

/// Room stack, top first. Depth 2 and 4 stay inline.
pub type Room = SmallVec<[Slot; 4]>;

/// Address of a single cell in the burrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Cell {
    Hallway { index: usize },
    Room { room: Amphipod, depth: usize },
}

/// Full puzzle state: hallway plus the four rooms.
///
/// Values are immutable from the outside; successors are built by
/// [`Burrow::relocate`], which returns a fresh copy.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Burrow {
    hallway: [Slot; HALLWAY_LEN],
    rooms: [Room; ROOM_COUNT],
}

impl Burrow {
    /// Assemble a burrow from already-validated parts.
    ///
    /// All rooms must have the same non-zero depth; the diagram parser
    /// guarantees this.
    pub(crate) fn from_parts(hallway: [Slot; HALLWAY_LEN], rooms: [Room; ROOM_COUNT]) -> Self {
        debug_assert!(rooms.iter().all(|r| r.len() == rooms[0].len() && !r.is_empty()));
        Self { hallway, rooms }
    }

    /// Room depth (uniform across rooms)
    pub fn depth(&self) -> usize {
        self.rooms[0].len()
    }

    pub fn hallway(&self) -> &[Slot; HALLWAY_LEN] {
        &self.hallway
    }

    /// Slots of the room owned by `owner`, top first
    pub fn room(&self, owner: Amphipod) -> &[Slot] {
        &self.rooms[owner.index()]
    }

    /// Contents of a cell. Out-of-range addresses read as empty.
    pub fn get(&self, cell: Cell) -> Slot {
        match cell {
            Cell::Hallway { index } => self.hallway.get(index).copied().flatten(),
            Cell::Room { room, depth } => self.rooms[room.index()].get(depth).copied().flatten(),
        }
    }

    fn set(&mut self, cell: Cell, slot: Slot) {
        match cell {
            Cell::Hallway { index } => self.hallway[index] = slot,
            Cell::Room { room, depth } => self.rooms[room.index()][depth] = slot,
        }
    }

    /// Copy of this burrow with the contents of `from` moved to `to`
    pub fn relocate(&self, from: Cell, to: Cell) -> Self {
        let mut next = self.clone();
        let slot = next.get(from);
        next.set(from, None);
        next.set(to, slot);
        next
    }

    /// Whether every room holds only its own type, with no empty slots
    pub fn is_solved(&self) -> bool {
        Amphipod::ALL
            .iter()
            .all(|&owner| self.room(owner).iter().all(|slot| *slot == Some(owner)))
    }

    /// Number of amphipods of each type, in room order
    pub fn inventory(&self) -> [usize; ROOM_COUNT] {
        let mut counts = [0; ROOM_COUNT];
        let room_slots = self.rooms.iter().flat_map(|room| room.iter());
        for amphipod in self.hallway.iter().chain(room_slots).flatten() {
            counts[amphipod.index()] += 1;
        }
        counts
    }
}

fn slot_char(slot: Slot) -> char {
    slot.map_or('.', Amphipod::to_char)
}

/// Renders the burrow in the same diagram format the parser reads.
impl fmt::Display for Burrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#############")?;
        let hallway: String = self.hallway.iter().map(|s| slot_char(*s)).collect();
        writeln!(f, "#{}#", hallway)?;
        for depth in 0..self.depth() {
            let [a, b, c, d] = Amphipod::ALL.map(|owner| slot_char(self.room(owner)[depth]));
            if depth == 0 {
                writeln!(f, "###{}#{}#{}#{}###", a, b, c, d)?;
            } else {
                writeln!(f, "  #{}#{}#{}#{}#", a, b, c, d)?;
            }
        }
        write!(f, "  #########")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::parse;

    const EXAMPLE: &str = "\
#############
#...........#
###B#C#B#D###
  #A#D#C#A#
  #########";

    const SOLVED: &str = "\
#############
#...........#
###A#B#C#D###
  #A#B#C#D#
  #########";

    #[test]
    fn test_step_energy_scales_by_ten() {
        let energies: Vec<Energy> = Amphipod::ALL.iter().map(|a| a.step_energy()).collect();
        assert_eq!(energies, vec![1, 10, 100, 1000]);
    }

    #[test]
    fn test_room_mouths_are_not_parking() {
        for mouth in ROOM_MOUTHS {
            assert!(!PARKING.contains(&mouth));
        }
        assert_eq!(PARKING.len() + ROOM_MOUTHS.len(), HALLWAY_LEN);
    }

    #[test]
    fn test_goal_test() {
        let example = parse(EXAMPLE).unwrap();
        assert!(!example.is_solved());

        let solved = parse(SOLVED).unwrap();
        assert!(solved.is_solved());
        // Asking twice changes nothing
        assert!(solved.is_solved());
    }

    #[test]
    fn test_inventory() {
        let example = parse(EXAMPLE).unwrap();
        assert_eq!(example.inventory(), [2, 2, 2, 2]);
    }

    #[test]
    fn test_relocate_leaves_original_untouched() {
        let example = parse(EXAMPLE).unwrap();
        let from = Cell::Room {
            room: Amphipod::Amber,
            depth: 0,
        };
        let to = Cell::Hallway { index: 3 };
        let next = example.relocate(from, to);

        assert_eq!(example.get(from), Some(Amphipod::Bronze));
        assert_eq!(example.get(to), None);
        assert_eq!(next.get(from), None);
        assert_eq!(next.get(to), Some(Amphipod::Bronze));
        assert_eq!(next.inventory(), example.inventory());
    }

    #[test]
    fn test_display_round_trips() {
        let example = parse(EXAMPLE).unwrap();
        assert_eq!(example.to_string(), EXAMPLE);
        assert_eq!(parse(&example.to_string()).unwrap(), example);
    }
}
