use regex::Regex;
use std::io;
use super::board::Board;
use super::board::Cell;
use super::board::Point;

// board sizes above this are unplayable in a terminal; the engine itself
// accepts any dimension, so the cap lives here with the rest of the input
// validation
pub const MAX_DIMENSION: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionType {
    Reveal(Point),
    Flag(Point),
    Quit
}

pub fn get_move() -> ActionType {
    println!("Please input your move: reveal R C | flag R C | quit");
    loop {
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return ActionType::Quit
        }
        match action_from_string(&input) {
            Some(action) => return action,
            None => println!("Must be of the form: reveal R C, flag R C, or quit")
        }
    }
}

fn action_from_string(input: &str) -> Option<ActionType> {
    let input = input.trim();
    if input == "quit" {
        return Some(ActionType::Quit)
    }
    let re = Regex::new(r"^(reveal|flag)\s+(\d+)\s+(\d+)$").unwrap();
    let cap = re.captures(input)?;
    let row: usize = cap[2].parse().ok()?;
    let col: usize = cap[3].parse().ok()?;
    let point = Point(row, col);
    match &cap[1] {
        "reveal" => Some(ActionType::Reveal(point)),
        "flag" => Some(ActionType::Flag(point)),
        _ => None
    }
}

/// Prompt for board settings until a valid pair arrives. Returns None when
/// the player quits instead.
pub fn read_setup() -> Option<(usize, usize)> {
    println!("Board setup: 1 = 5x5 with 10 mines, 2 = 10x10 with 20 mines,");
    println!("or DIMENSION MINES for a custom board (quit to exit)");
    loop {
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return None
        }
        if input.trim() == "quit" {
            return None
        }
        match setup_from_string(&input) {
            None => println!("Enter 1, 2, or two numbers: DIMENSION MINES"),
            Some((dimension, mine_count)) => match setup_error(dimension, mine_count) {
                None => return Some((dimension, mine_count)),
                Some(message) => println!("{}", message)
            }
        }
    }
}

fn setup_from_string(input: &str) -> Option<(usize, usize)> {
    match input.trim() {
        "1" => Some((5, 10)),
        "2" => Some((10, 20)),
        custom => {
            let re = Regex::new(r"^(\d+)\s+(\d+)$").unwrap();
            let cap = re.captures(custom)?;
            let dimension: usize = cap[1].parse().ok()?;
            let mine_count: usize = cap[2].parse().ok()?;
            Some((dimension, mine_count))
        }
    }
}

fn setup_error(dimension: usize, mine_count: usize) -> Option<String> {
    if dimension == 0 || dimension > MAX_DIMENSION {
        return Some(format!("Dimension must be between 1 and {}", MAX_DIMENSION))
    }
    if mine_count == 0 || mine_count >= dimension * dimension {
        return Some(format!(
            "Mine count must be between 1 and {} for a {}x{} board",
            dimension * dimension - 1, dimension, dimension
        ))
    }
    None
}

pub fn confirm_replay() -> bool {
    println!("Replay with the same settings? (y/n)");
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false
    }
    input.trim().starts_with('y')
}

// projection from logical cell state to a display glyph; the engine never
// knows how cells look
fn cell_glyph(cell: &Cell) -> String {
    if !cell.revealed {
        return if cell.flagged {
            String::from("▶")
        } else {
            String::from("□")
        }
    }
    if cell.is_mine() {
        return String::from("X")
    }
    if cell.adjacent_mines == 0 {
        String::from("_")
    } else {
        cell.adjacent_mines.to_string()
    }
}

pub fn render(board: &Board) -> String {
    let mut result = "  ".to_owned();
    for col in 0..board.dimension() {
        result += &(col % 10).to_string()[..];
    }
    result += "\n";
    for row in 0..board.dimension() {
        result += &(row % 10).to_string()[..];
        result += " ";
        for col in 0..board.dimension() {
            let cell = board.cell(&Point(row, col)).expect("point drawn from board bounds");
            result += &cell_glyph(cell)[..];
        }
        result += "\n";
    }
    result
}

#[cfg(test)]
mod interaction_tests {
    use super::*;

    #[test]
    fn parses_reveal_and_flag_commands() {
        assert_eq!(action_from_string("reveal 2 3"), Some(ActionType::Reveal(Point(2, 3))));
        assert_eq!(action_from_string("flag 0 4\n"), Some(ActionType::Flag(Point(0, 4))));
        assert_eq!(action_from_string("  quit  "), Some(ActionType::Quit));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert_eq!(action_from_string("poke 1 1"), None);
        assert_eq!(action_from_string("reveal 1"), None);
        assert_eq!(action_from_string("reveal one two"), None);
        assert_eq!(action_from_string(""), None);
    }

    #[test]
    fn setup_presets_match_the_menu() {
        assert_eq!(setup_from_string("1"), Some((5, 10)));
        assert_eq!(setup_from_string("2"), Some((10, 20)));
        assert_eq!(setup_from_string("8 12"), Some((8, 12)));
        assert_eq!(setup_from_string("custom"), None);
    }

    #[test]
    fn setup_validation_bounds() {
        assert!(setup_error(5, 10).is_none());
        assert!(setup_error(0, 1).is_some());
        assert!(setup_error(MAX_DIMENSION + 1, 10).is_some());
        assert!(setup_error(5, 0).is_some());
        assert!(setup_error(5, 25).is_some());
        assert!(setup_error(5, 24).is_none());
    }

    #[test]
    fn glyphs_cover_every_logical_state() {
        // center mine: every cell is numbered, so no flood interferes
        let mut board = Board::with_mine_layout(3, &[Point(1, 1)]).unwrap();
        board.toggle_flag(&Point(0, 0));
        board.reveal(&Point(0, 1));
        assert_eq!(cell_glyph(board.cell(&Point(0, 0)).unwrap()), "▶");
        assert_eq!(cell_glyph(board.cell(&Point(0, 1)).unwrap()), "1");
        assert_eq!(cell_glyph(board.cell(&Point(2, 2)).unwrap()), "□");

        // corner mine leaves (2,2) with a zero count
        let mut board = Board::with_mine_layout(3, &[Point(0, 0)]).unwrap();
        board.reveal(&Point(2, 2));
        assert_eq!(cell_glyph(board.cell(&Point(2, 2)).unwrap()), "_");
    }

    #[test]
    fn render_shows_exposed_mine_after_loss() {
        let mut board = Board::with_mine_layout(2, &[Point(0, 0)]).unwrap();
        board.reveal(&Point(0, 0));
        let drawn = render(&board);
        assert!(drawn.contains('X'));
    }
}
