use std::fmt;

use super::{Cell, GameEvent, GameObserver, Grid, Player, Position};
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// A single game of Connect Four: grid, whose turn it is, and whether the
/// game has ended. Observers registered with [`Game::subscribe`] are told
/// about every change.
pub struct Game {
    grid: Grid,
    current_player: Player,
    status: GameStatus,
    winning_line: Option<Vec<Position>>,
    last_move: Option<Position>,
    observers: Vec<Box<dyn GameObserver>>,
}

impl Game {
    /// Create a game with an empty grid and Red to move
    pub fn new() -> Self {
        Game {
            grid: Grid::new(),
            current_player: Player::Red, // Red starts
            status: GameStatus::InProgress,
            winning_line: None,
            last_move: None,
            observers: Vec::new(),
        }
    }

    /// Register an observer. It stays subscribed across restarts.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Cells of the winning run, once somebody has won
    pub fn winning_line(&self) -> Option<&[Position]> {
        self.winning_line.as_deref()
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn move_count(&self) -> usize {
        self.grid.count_pieces()
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Returns where the piece landed, or `None` when the move is rejected
    /// (column full or out of range, game already over). A rejected move
    /// leaves the game untouched and notifies nobody.
    pub fn drop_piece(&mut self, column: usize) -> Option<Position> {
        match self.try_drop(column) {
            Ok(pos) => Some(pos),
            Err(e) => {
                log::debug!("ignoring drop into column {column}: {e}");
                None
            }
        }
    }

    /// Like [`Game::drop_piece`], but reports why a move was rejected.
    pub fn try_drop(&mut self, column: usize) -> Result<Position, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let player = self.current_player;
        let pos = self.grid.place(column, player)?;
        self.last_move = Some(pos);
        log::info!("{player} dropped into column {column}, landed at row {}", pos.row);
        self.emit(GameEvent::PiecePlaced {
            position: pos,
            player,
        });

        if let Some(line) = self.grid.winning_line(pos) {
            log::info!("{player} wins after {} moves", self.move_count());
            self.status = GameStatus::Won(player);
            self.winning_line = Some(line.clone());
            self.emit(GameEvent::GameWon { player, line });
        } else if self.grid.is_full() {
            log::info!("grid full, game drawn");
            self.status = GameStatus::Draw;
            self.emit(GameEvent::GameDrawn);
        } else {
            self.current_player = player.other();
            self.emit(GameEvent::TurnChanged(self.current_player));
        }

        Ok(pos)
    }

    /// Winner through the piece at `(row, col)`, if it is part of a run of
    /// four or more. Empty and out-of-range cells have no winner.
    pub fn check_winner(&self, row: usize, col: usize) -> Option<Player> {
        let pos = Position::new(row, col);
        self.grid.winning_line(pos)?;
        self.grid.cell(pos).and_then(Cell::owner)
    }

    /// Clear the grid and start over with Red to move
    pub fn restart(&mut self) {
        self.grid.clear();
        self.current_player = Player::Red;
        self.status = GameStatus::InProgress;
        self.winning_line = None;
        self.last_move = None;
        log::info!("game restarted");
        self.emit(GameEvent::Restarted);
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("grid", &self.grid)
            .field("current_player", &self.current_player)
            .field("status", &self.status)
            .field("last_move", &self.last_move)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{COLS, ROWS};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Red fills the bottom row from the left; Black stacks on top of Red.
    fn play_red_horizontal_win(game: &mut Game) {
        for col in 0..4 {
            game.drop_piece(col).unwrap(); // Red
            if col < 3 {
                game.drop_piece(col).unwrap(); // Black, one row up
            }
        }
    }

    fn recording(game: &mut Game) -> Rc<RefCell<Vec<GameEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        game.subscribe(move |event: &GameEvent| sink.borrow_mut().push(event.clone()));
        events
    }

    /// Column order that fills the grid without four in a row. Colours
    /// alternate up every column and the bottom row reads R R B B R R B.
    fn draw_sequence() -> Vec<usize> {
        let mut moves = Vec::new();
        for (red_col, black_col) in [(0, 2), (1, 3), (4, 6)] {
            for _ in 0..ROWS / 2 {
                moves.extend([red_col, black_col, black_col, red_col]);
            }
        }
        moves.extend(std::iter::repeat(5).take(ROWS));
        moves
    }

    #[test]
    fn test_initial_state() {
        let game = Game::new();
        assert_eq!(game.current_player(), Player::Red);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.move_count(), 0);
        assert!(game.last_move().is_none());
    }

    #[test]
    fn test_drop_piece() {
        let mut game = Game::new();
        let pos = game.drop_piece(3).unwrap();

        assert_eq!(pos, Position::new(5, 3));
        assert_eq!(game.grid().get(5, 3), Cell::Owned(Player::Red));
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.last_move(), Some(pos));
    }

    #[test]
    fn test_turn_alternates() {
        let mut game = Game::new();
        let mut expected = Player::Red;
        for col in [0, 1, 2, 0, 1, 2, 4, 5] {
            assert_eq!(game.current_player(), expected);
            let pos = game.drop_piece(col).unwrap();
            assert_eq!(game.grid().get(pos.row, pos.col), Cell::Owned(expected));
            expected = expected.other();
        }
        assert_eq!(game.current_player(), expected);
    }

    #[test]
    fn test_full_column_is_noop() {
        let mut game = Game::new();
        for _ in 0..ROWS {
            game.drop_piece(2).unwrap();
        }
        let grid = *game.grid();
        let player = game.current_player();

        assert_eq!(game.drop_piece(2), None);
        assert_eq!(game.try_drop(2), Err(MoveError::ColumnFull(2)));
        assert_eq!(*game.grid(), grid);
        assert_eq!(game.current_player(), player);
    }

    #[test]
    fn test_invalid_column_is_noop() {
        let mut game = Game::new();
        assert_eq!(game.drop_piece(COLS), None);
        assert_eq!(game.try_drop(42), Err(MoveError::InvalidColumn(42)));
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.current_player(), Player::Red);
    }

    #[test]
    fn test_win_detection() {
        let mut game = Game::new();
        play_red_horizontal_win(&mut game);

        assert_eq!(game.status(), GameStatus::Won(Player::Red));
        assert!(game.is_over());
        // Winner keeps the turn marker
        assert_eq!(game.current_player(), Player::Red);
        assert_eq!(game.winning_line().map(<[_]>::len), Some(4));
        assert_eq!(game.check_winner(5, 0), Some(Player::Red));
        assert_eq!(game.check_winner(4, 0), None);
    }

    #[test]
    fn test_vertical_win_for_black() {
        let mut game = Game::new();
        for col in [0, 6, 1, 6, 0, 6, 1, 6] {
            game.drop_piece(col);
        }
        assert_eq!(game.status(), GameStatus::Won(Player::Black));
        assert_eq!(game.check_winner(2, 6), Some(Player::Black));
    }

    #[test]
    fn test_no_moves_after_win() {
        let mut game = Game::new();
        play_red_horizontal_win(&mut game);
        let grid = *game.grid();

        for col in 0..COLS {
            assert_eq!(game.drop_piece(col), None);
        }
        assert_eq!(game.try_drop(5), Err(MoveError::GameOver));
        assert_eq!(*game.grid(), grid);
    }

    #[test]
    fn test_check_winner_empty_and_out_of_range() {
        let game = Game::new();
        assert_eq!(game.check_winner(5, 0), None);
        assert_eq!(game.check_winner(ROWS, COLS), None);
    }

    #[test]
    fn test_draw() {
        let mut game = Game::new();
        for col in draw_sequence() {
            assert!(game.drop_piece(col).is_some(), "column {col} rejected");
        }
        assert!(game.grid().is_full());
        assert_eq!(game.status(), GameStatus::Draw);
        assert_eq!(game.drop_piece(0), None);
    }

    #[test]
    fn test_restart() {
        let mut game = Game::new();
        play_red_horizontal_win(&mut game);
        game.restart();

        assert_eq!(*game.grid(), Grid::new());
        assert_eq!(game.current_player(), Player::Red);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.winning_line().is_none());
        assert!(game.drop_piece(0).is_some());
    }

    #[test]
    fn test_observer_events() {
        let mut game = Game::new();
        let events = recording(&mut game);

        game.drop_piece(3);
        game.drop_piece(COLS); // rejected, no events
        assert_eq!(
            *events.borrow(),
            vec![
                GameEvent::PiecePlaced {
                    position: Position::new(5, 3),
                    player: Player::Red,
                },
                GameEvent::TurnChanged(Player::Black),
            ]
        );
    }

    #[test]
    fn test_observer_sees_win_and_restart() {
        let mut game = Game::new();
        let events = recording(&mut game);
        play_red_horizontal_win(&mut game);
        game.restart();

        let events = events.borrow();
        let n = events.len();
        assert!(matches!(
            &events[n - 2],
            GameEvent::GameWon { player: Player::Red, line } if line.len() == 4
        ));
        assert_eq!(events[n - 1], GameEvent::Restarted);
    }

    #[test]
    fn test_observer_sees_draw() {
        let mut game = Game::new();
        let events = recording(&mut game);
        for col in draw_sequence() {
            game.drop_piece(col);
        }
        assert_eq!(events.borrow().last(), Some(&GameEvent::GameDrawn));
    }
}
