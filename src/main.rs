use minegrid::board::Board;
use minegrid::board::Status;
use minegrid::game_loop;
use minegrid::interaction;

fn main() {
    let (dimension, mine_count) = match interaction::read_setup() {
        Some(settings) => settings,
        None => return
    };
    loop {
        // restart always builds a fresh board so mines are re-randomized
        let mut board = match Board::new(dimension, mine_count) {
            Ok(board) => board,
            Err(error) => {
                println!("{}", error);
                return
            }
        };
        game_loop(&mut board);
        if board.status() == Status::InProgress {
            // player quit mid-game
            return
        }
        if !interaction::confirm_replay() {
            return
        }
    }
}
