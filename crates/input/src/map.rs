//! Button mapping from physical buttons to game intents.

use crate::types::{Button, Direction, GamePhase};

/// What a button press means to the game controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonIntent {
    /// Leave the ready screen and start playing.
    Start,
    /// Abandon the game and return to the menu.
    Quit,
    /// Steer the falling piece.
    Steer(Direction),
    Ignore,
}

/// Map a physical button to a simulation direction while playing.
///
/// The badge is rotated 90° clockwise for play, so the pad is remapped:
/// LEFT→UP, RIGHT→DOWN, DOWN→LEFT, UP→RIGHT. OK drops the piece fast.
pub fn remap_playing(button: Button) -> Option<Direction> {
    match button {
        Button::Left => Some(Direction::Up),
        Button::Right => Some(Direction::Down),
        Button::Down => Some(Direction::Left),
        Button::Up => Some(Direction::Right),
        Button::Ok => Some(Direction::FastDown),
        _ => None,
    }
}

/// Interpret a button press for the given phase.
pub fn button_intent(phase: GamePhase, button: Button) -> ButtonIntent {
    match phase {
        GamePhase::Waiting => match button {
            Button::Ok => ButtonIntent::Start,
            b if b.is_back() => ButtonIntent::Quit,
            _ => ButtonIntent::Ignore,
        },
        GamePhase::Playing => {
            if button.is_back() {
                return ButtonIntent::Quit;
            }
            remap_playing(button)
                .map(ButtonIntent::Steer)
                .unwrap_or(ButtonIntent::Ignore)
        }
        // Leaving a finished game is driven by the tick, never by input.
        GamePhase::GameOver => ButtonIntent::Ignore,
    }
}
