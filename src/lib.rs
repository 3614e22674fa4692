pub mod board;
pub mod interaction;

use board::Board;
use board::Status;
use interaction::ActionType;

pub fn game_loop(board: &mut Board) {
    while board.status() == Status::InProgress {
        println!("{}", interaction::render(board));
        match interaction::get_move() {
            ActionType::Reveal(point) => {
                board.reveal(&point);
            }
            ActionType::Flag(point) => {
                board.toggle_flag(&point);
            }
            ActionType::Quit => return
        }
    }
    println!("{}", interaction::render(board));
    match board.status() {
        Status::Won => println!("you win!"),
        Status::Lost => println!("you lose"),
        Status::InProgress => {}
    }
}
