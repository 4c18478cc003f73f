//! Diagram parsing.
//!
//! A burrow diagram looks like this:
//!
//! ```text
//! #############
//! #...........#
//! ###B#C#B#D###
//!   #A#D#C#A#
//!   #########
//! ```
//!
//! Line 2 is the hallway (columns 2..=12), every line between it and the
//! bottom wall is one room row, read at columns 4, 6, 8 and 10 for rooms
//! A to D. Room depth is the line count minus three.

use crate::burrow::{Amphipod, Burrow, Room, Slot, HALLWAY_LEN, ROOM_COUNT, ROOM_MOUTHS};
use crate::error::ParseError;

/// 0-based character offsets of each room within a room row
const ROOM_COLUMNS: [usize; ROOM_COUNT] = [3, 5, 7, 9];

/// 0-based character offsets of the walls between rooms
const ROOM_WALL_COLUMNS: [usize; ROOM_COUNT + 1] = [2, 4, 6, 8, 10];

/// Rows inserted by [`unfold`] below the first room row
pub const UNFOLDED_ROWS: [&str; 2] = ["  #D#C#B#A#", "  #D#B#A#C#"];

/// Split input into lines, dropping trailing whitespace and trailing blank lines.
fn diagram_lines(input: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = input.lines().map(str::trim_end).collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Parses a burrow diagram.
///
/// # Errors
///
/// Returns a [`ParseError`] if the framing is wrong, a cell holds anything
/// other than `.` or `A`..`D`, an amphipod sits on a room mouth or above an
/// empty room slot, or the diagram does not hold exactly `depth` amphipods
/// of every type.
///
/// # Examples
///
/// ```
/// use burrow_solver::diagram::parse;
///
/// let burrow = parse(
///     "#############\n\
///      #...........#\n\
///      ####A#B#C#D###\n  \
///        #########",
/// )
/// .unwrap();
/// assert_eq!(burrow.depth(), 1);
/// assert!(burrow.is_solved());
/// ```
pub fn parse(input: &str) -> Result<Burrow, ParseError> {
    parse_lines(&diagram_lines(input))
}

/// Parses a diagram that has already been split into lines.
pub fn parse_lines(lines: &[&str]) -> Result<Burrow, ParseError> {
    if lines.len() < 4 {
        return Err(ParseError::TooFewLines { found: lines.len() });
    }
    let depth = lines.len() - 3;

    check_wall(lines[0], 1)?;
    let hallway = parse_hallway(lines[1])?;

    let mut rooms: [Room; ROOM_COUNT] = Default::default();
    for (row_index, row) in lines[2..2 + depth].iter().enumerate() {
        let cells = parse_room_row(row, row_index + 3)?;
        for (room, slot) in rooms.iter_mut().zip(cells) {
            room.push(slot);
        }
    }

    check_wall(lines[lines.len() - 1], lines.len())?;
    check_floating(&rooms)?;

    let burrow = Burrow::from_parts(hallway, rooms);
    check_inventory(&burrow)?;
    Ok(burrow)
}

/// Inserts [`UNFOLDED_ROWS`] below the first room row, turning a depth-2
/// diagram into a depth-4 one.
pub fn unfold(input: &str) -> Result<String, ParseError> {
    let lines = diagram_lines(input);
    if lines.len() < 4 {
        return Err(ParseError::TooFewLines { found: lines.len() });
    }

    let mut unfolded = Vec::with_capacity(lines.len() + UNFOLDED_ROWS.len());
    unfolded.extend_from_slice(&lines[..3]);
    unfolded.extend_from_slice(&UNFOLDED_ROWS);
    unfolded.extend_from_slice(&lines[3..]);
    Ok(unfolded.join("\n"))
}

fn check_wall(row: &str, line: usize) -> Result<(), ParseError> {
    let wall = row.trim();
    if wall.is_empty() || !wall.chars().all(|c| c == '#') {
        return Err(ParseError::MalformedRow {
            line,
            detail: format!("expected a wall of '#', found {:?}", row),
        });
    }
    Ok(())
}

fn parse_slot(character: char, line: usize, column: usize) -> Result<Slot, ParseError> {
    if character == '.' {
        return Ok(None);
    }
    Amphipod::from_char(character)
        .map(Some)
        .ok_or(ParseError::UnrecognizedCharacter {
            character,
            line,
            column,
        })
}

fn parse_hallway(row: &str) -> Result<[Slot; HALLWAY_LEN], ParseError> {
    let chars: Vec<char> = row.chars().collect();
    if chars.len() < HALLWAY_LEN + 2 || chars[0] != '#' || chars[HALLWAY_LEN + 1] != '#' {
        return Err(ParseError::MalformedRow {
            line: 2,
            detail: format!(
                "expected '#' followed by {} hallway cells and '#', found {:?}",
                HALLWAY_LEN, row
            ),
        });
    }

    let mut hallway = [None; HALLWAY_LEN];
    for (index, cell) in hallway.iter_mut().enumerate() {
        let column = index + 2;
        *cell = parse_slot(chars[index + 1], 2, column)?;
        if cell.is_some() && ROOM_MOUTHS.contains(&index) {
            return Err(ParseError::TokenAtRoomMouth { line: 2, column });
        }
    }
    Ok(hallway)
}

fn parse_room_row(row: &str, line: usize) -> Result<[Slot; ROOM_COUNT], ParseError> {
    let chars: Vec<char> = row.chars().collect();
    let framed = chars.len() > ROOM_WALL_COLUMNS[ROOM_COUNT]
        && ROOM_WALL_COLUMNS.iter().all(|&offset| chars[offset] == '#');
    if !framed {
        return Err(ParseError::MalformedRow {
            line,
            detail: format!("expected a room row like \"  #A#B#C#D#\", found {:?}", row),
        });
    }

    let mut cells = [None; ROOM_COUNT];
    for (cell, &offset) in cells.iter_mut().zip(ROOM_COLUMNS.iter()) {
        *cell = parse_slot(chars[offset], line, offset + 1)?;
    }
    Ok(cells)
}

fn check_floating(rooms: &[Room; ROOM_COUNT]) -> Result<(), ParseError> {
    for (room, offset) in rooms.iter().zip(ROOM_COLUMNS) {
        for (depth, pair) in room.windows(2).enumerate() {
            if pair[0].is_some() && pair[1].is_none() {
                return Err(ParseError::FloatingToken {
                    line: depth + 3,
                    column: offset + 1,
                });
            }
        }
    }
    Ok(())
}

fn check_inventory(burrow: &Burrow) -> Result<(), ParseError> {
    let counts = burrow.inventory();
    for amphipod in Amphipod::ALL {
        let found = counts[amphipod.index()];
        if found != burrow.depth() {
            return Err(ParseError::Inventory {
                amphipod,
                expected: burrow.depth(),
                found,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
#############
#...........#
###B#C#B#D###
  #A#D#C#A#
  #########
";

    #[test]
    fn test_parse_example() {
        let burrow = parse(EXAMPLE).unwrap();
        assert_eq!(burrow.depth(), 2);
        assert!(burrow.hallway().iter().all(Option::is_none));
        assert_eq!(
            burrow.room(Amphipod::Amber),
            &[Some(Amphipod::Bronze), Some(Amphipod::Amber)]
        );
        assert_eq!(
            burrow.room(Amphipod::Bronze),
            &[Some(Amphipod::Copper), Some(Amphipod::Desert)]
        );
        assert_eq!(
            burrow.room(Amphipod::Copper),
            &[Some(Amphipod::Bronze), Some(Amphipod::Copper)]
        );
        assert_eq!(
            burrow.room(Amphipod::Desert),
            &[Some(Amphipod::Desert), Some(Amphipod::Amber)]
        );
    }

    #[test]
    fn test_parse_hallway_occupants() {
        let burrow = parse(
            "#############\n\
             #.B.A.......#\n\
             ###.#.#C#D###\n\
             \x20 #########",
        )
        .unwrap();
        assert_eq!(burrow.depth(), 1);
        assert_eq!(burrow.hallway()[1], Some(Amphipod::Bronze));
        assert_eq!(burrow.hallway()[3], Some(Amphipod::Amber));
        assert_eq!(burrow.room(Amphipod::Amber), &[None]);
    }

    #[test]
    fn test_parse_too_few_lines() {
        let result = parse("#############\n#...........#\n  #########");
        assert_eq!(result, Err(ParseError::TooFewLines { found: 3 }));
    }

    #[test]
    fn test_parse_unrecognized_character() {
        let result = parse(&EXAMPLE.replace("###B#C", "###E#C"));
        assert_eq!(
            result,
            Err(ParseError::UnrecognizedCharacter {
                character: 'E',
                line: 3,
                column: 4,
            })
        );
    }

    #[test]
    fn test_parse_wall_in_room_column() {
        // A room that looks shallower than the others
        let result = parse(&EXAMPLE.replace("#A#D#C#A#", "#A###C#A#"));
        assert_eq!(
            result,
            Err(ParseError::UnrecognizedCharacter {
                character: '#',
                line: 4,
                column: 6,
            })
        );
    }

    #[test]
    fn test_parse_short_room_row() {
        let result = parse(&EXAMPLE.replace("  #A#D#C#A#", "  #A#D#"));
        assert!(matches!(result, Err(ParseError::MalformedRow { line: 4, .. })));
    }

    #[test]
    fn test_parse_broken_hallway() {
        let result = parse(&EXAMPLE.replace("#...........#", "#.........#"));
        assert!(matches!(result, Err(ParseError::MalformedRow { line: 2, .. })));
    }

    #[test]
    fn test_parse_broken_top_wall() {
        let result = parse(&EXAMPLE.replace("#############\n#...", "##.##\n#..."));
        assert!(matches!(result, Err(ParseError::MalformedRow { line: 1, .. })));
    }

    #[test]
    fn test_parse_token_at_room_mouth() {
        let result = parse(
            "#############\n\
             #..A........#\n\
             ###.#B#C#D###\n\
             \x20 #########",
        );
        assert_eq!(
            result,
            Err(ParseError::TokenAtRoomMouth { line: 2, column: 4 })
        );
    }

    #[test]
    fn test_parse_floating_token() {
        let result = parse(
            "#############\n\
             #A..........#\n\
             ###A#B#C#D###\n\
             \x20 #.#B#C#D#\n\
             \x20 #########",
        );
        assert_eq!(result, Err(ParseError::FloatingToken { line: 3, column: 4 }));
    }

    #[test]
    fn test_parse_inventory_mismatch() {
        let result = parse(&EXAMPLE.replace("###B#C#B#D###", "###B#C#B#B###"));
        assert_eq!(
            result,
            Err(ParseError::Inventory {
                amphipod: Amphipod::Bronze,
                expected: 2,
                found: 3,
            })
        );
    }

    #[test]
    fn test_unfold() {
        let unfolded = unfold(EXAMPLE).unwrap();
        let burrow = parse(&unfolded).unwrap();
        assert_eq!(burrow.depth(), 4);
        assert_eq!(
            burrow.room(Amphipod::Amber),
            &[
                Some(Amphipod::Bronze),
                Some(Amphipod::Desert),
                Some(Amphipod::Desert),
                Some(Amphipod::Amber),
            ]
        );
        assert_eq!(burrow.inventory(), [4, 4, 4, 4]);
    }

    #[test]
    fn test_unfold_too_short() {
        assert_eq!(
            unfold("#############\n#...........#"),
            Err(ParseError::TooFewLines { found: 2 })
        );
    }
}
