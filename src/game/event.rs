use std::sync::mpsc;

use super::{Player, Position};

/// Notification emitted by [`Game`](super::Game) after every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    PiecePlaced { position: Position, player: Player },
    TurnChanged(Player),
    GameWon { player: Player, line: Vec<Position> },
    GameDrawn,
    Restarted,
}

/// Receives [`GameEvent`]s from a game it is subscribed to.
pub trait GameObserver {
    fn notify(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Observer that forwards every event over a channel. Events sent after the
/// receiver is dropped are discarded.
pub fn channel_observer(tx: mpsc::Sender<GameEvent>) -> impl GameObserver {
    move |event: &GameEvent| {
        let _ = tx.send(event.clone());
    }
}
