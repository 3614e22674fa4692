use rand::thread_rng;
use rand::seq::SliceRandom;
use std::fmt;
use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    Mine,
    Empty
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Lost
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid configuration: {dimension}x{dimension} board with {mine_count} mines")]
    InvalidConfiguration { dimension: usize, mine_count: usize },
}

#[derive(Debug, Eq, Clone, Hash, Copy)]
pub struct Point(pub usize, pub usize);

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub content: Content,
    pub adjacent_mines: u8,
    pub revealed: bool,
    pub flagged: bool,
    pub point: Point
}

impl Cell {
    fn create_empty(point: Point) -> Cell {
        Cell{content: Content::Empty, adjacent_mines: 0, revealed: false, flagged: false, point}
    }

    pub fn is_mine(&self) -> bool {
        self.content == Content::Mine
    }

    // zero-count safe cells are the seeds the flood reveal spreads from
    pub fn is_flood_seed(&self) -> bool {
        !self.is_mine() && self.adjacent_mines == 0
    }
}

/// Cells whose `revealed` flag flipped during one `reveal` call, plus the
/// status the board ended up in. Everything a host needs to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealOutcome {
    pub changed: Vec<Point>,
    pub status: Status
}

fn sample_points(dimension: usize, n: usize) -> Vec<Point> {
    let mut possible: Vec<usize> = (0..dimension * dimension).collect();
    possible.shuffle(&mut thread_rng());
    possible.iter()
            .take(n)
            .map(|&i| Point(i / dimension, i % dimension))
            .collect()
}

/// A square minesweeper grid. Mines are placed at construction and never
/// move; `reveal` and `toggle_flag` are the only mutations, and both become
/// no-ops once the status is terminal.
#[derive(Debug, Clone)]
pub struct Board {
    dimension: usize,
    field: Vec<Vec<Cell>>,
    mine_count: usize,
    mines: Vec<Point>,
    safe_revealed: usize,
    status: Status,
}

impl Board {
    pub fn new(dimension: usize, mine_count: usize) -> Result<Board, BoardError> {
        if dimension == 0 || mine_count == 0 || mine_count >= dimension * dimension {
            return Err(BoardError::InvalidConfiguration{dimension, mine_count})
        }
        Ok(Board::from_layout(dimension, sample_points(dimension, mine_count)))
    }

    /// Deterministic constructor: the given points become the mines. Rejects
    /// duplicates and out-of-bounds points with the same error as `new`.
    pub fn with_mine_layout(dimension: usize, mines: &[Point]) -> Result<Board, BoardError> {
        let mine_count = mines.len();
        let valid = dimension > 0
            && mine_count > 0
            && mine_count < dimension * dimension
            && mines.iter().unique().count() == mine_count
            && mines.iter().all(|point| point.0 < dimension && point.1 < dimension);
        if !valid {
            return Err(BoardError::InvalidConfiguration{dimension, mine_count})
        }
        Ok(Board::from_layout(dimension, mines.to_vec()))
    }

    fn from_layout(dimension: usize, mines: Vec<Point>) -> Board {
        let field = (0..dimension)
            .map(|row| (0..dimension).map(|col| Cell::create_empty(Point(row, col))).collect())
            .collect();
        let mine_count = mines.len();
        let mut board = Board{dimension, field, mine_count, mines, safe_revealed: 0, status: Status::InProgress};
        for i in 0..board.mines.len() {
            let point = board.mines[i];
            board.field[point.0][point.1].content = Content::Mine;
            for neighbor in board.neighbor_points(&point) {
                board.field[neighbor.0][neighbor.1].adjacent_mines += 1;
            }
        }
        board
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn mine_positions(&self) -> &[Point] {
        &self.mines
    }

    pub fn safe_revealed_count(&self) -> usize {
        self.safe_revealed
    }

    /// Number of safe reveals needed to win.
    pub fn safe_target(&self) -> usize {
        self.dimension * self.dimension - self.mine_count
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        point.0 < self.dimension && point.1 < self.dimension
    }

    pub fn cell(&self, point: &Point) -> Option<&Cell> {
        if self.in_bounds(point) {
            Some(&self.field[point.0][point.1])
        } else {
            None
        }
    }

    fn retrieve_cell_mutable(&mut self, point: &Point) -> &mut Cell {
        &mut self.field[point.0][point.1]
    }

    pub fn points(&self) -> impl Iterator<Item = Point> {
        let dimension = self.dimension;
        (0..dimension).cartesian_product(0..dimension)
                      .map(|(row, col)| Point(row, col))
    }

    pub fn neighbor_points(&self, point: &Point) -> Vec<Point> {
        let dimension = self.dimension as i32;
        (-1..2).cartesian_product(-1..2)
               .filter(|(i, j)| !(*i == 0 && *j == 0))
               .map(|(i, j)| (point.0 as i32 + i, point.1 as i32 + j))
               .filter(|(row, col)| *row >= 0 && *row < dimension && *col >= 0 && *col < dimension)
               .map(|(row, col)| Point(row as usize, col as usize))
               .collect()
    }

    /// Reveal a cell. Out-of-bounds, flagged, already-revealed targets and
    /// terminal boards are silent no-ops. Revealing a mine loses the game and
    /// exposes every mine for the end screen; revealing a flood seed spreads
    /// to its unrevealed, unflagged, non-mine neighbors.
    pub fn reveal(&mut self, point: &Point) -> RevealOutcome {
        let mut changed = Vec::new();
        if self.status != Status::InProgress || !self.in_bounds(point) {
            return self.outcome(changed)
        }
        {
            let cell = &self.field[point.0][point.1];
            if cell.revealed || cell.flagged {
                return self.outcome(changed)
            }
        }

        if self.field[point.0][point.1].is_mine() {
            self.field[point.0][point.1].revealed = true;
            changed.push(*point);
            self.status = Status::Lost;
            // expose the remaining mines so a host can draw the end screen;
            // these auxiliary reveals never touch safe_revealed
            for i in 0..self.mines.len() {
                let mine = self.mines[i];
                let cell = self.retrieve_cell_mutable(&mine);
                if !cell.revealed {
                    cell.revealed = true;
                    changed.push(mine);
                }
            }
            return self.outcome(changed)
        }

        // work-list flood; the revealed flag doubles as the visited guard,
        // so each cell is processed at most once
        let mut frontier = vec![*point];
        while let Some(next) = frontier.pop() {
            let spreads = {
                let cell = self.retrieve_cell_mutable(&next);
                if cell.revealed || cell.flagged || cell.is_mine() {
                    continue;
                }
                cell.revealed = true;
                cell.is_flood_seed()
            };
            self.safe_revealed += 1;
            changed.push(next);
            if spreads {
                frontier.extend(self.neighbor_points(&next));
            }
        }

        if self.safe_revealed == self.safe_target() {
            self.status = Status::Won;
        }
        self.outcome(changed)
    }

    /// Flip the flag on an unrevealed cell. Returns the new flag state, or
    /// None when the toggle is rejected (terminal board, out of bounds, or
    /// revealed target).
    pub fn toggle_flag(&mut self, point: &Point) -> Option<bool> {
        if self.status != Status::InProgress || !self.in_bounds(point) {
            return None
        }
        let cell = self.retrieve_cell_mutable(point);
        if cell.revealed {
            return None
        }
        cell.flagged = !cell.flagged;
        Some(cell.flagged)
    }

    fn outcome(&self, changed: Vec<Point>) -> RevealOutcome {
        RevealOutcome{changed, status: self.status}
    }
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
mod cell_tests {
    use super::*;

    #[test]
    fn flood_seed_detection() {
        let mut cell = Cell::create_empty(Point(0, 0));
        assert!(cell.is_flood_seed());
        cell.adjacent_mines = 3;
        assert!(!cell.is_flood_seed());
        cell.adjacent_mines = 0;
        cell.content = Content::Mine;
        assert!(!cell.is_flood_seed());
    }
}
