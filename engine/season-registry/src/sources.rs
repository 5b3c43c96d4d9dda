//! Interfaces for the external collaborators the core consults but does
//! not implement: league roster availability and the advisory position
//! classifier.

use crate::types::{Player, Position};

/// Answers "is this name currently on a league roster?". Implemented by
/// the excluded roster service; used by presentation layers to flag
/// freely-available players.
pub trait RosterSource {
    fn is_active(&self, name: &str) -> bool;
}

/// Advisory source for a player's position when the box score never stated
/// one. Implemented by the excluded machine-learning classifier.
pub trait PositionClassifier {
    fn classify(&self, player: &Player) -> Position;
}

/// The player's recorded position, falling back to the classifier's advice
/// only when the position is unknown.
pub fn position_or_best_guess(player: &Player, classifier: &dyn PositionClassifier) -> Position {
    if player.position != Position::Unknown {
        player.position
    } else {
        classifier.classify(player)
    }
}
