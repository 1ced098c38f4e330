//! Failures reported by game actions.
//!
//! Every failure is expected business logic: the action leaves the game
//! untouched and the `Display` text is shown to the player as-is.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("{what} \"{name}\" could not be found")]
    NotFound { what: &'static str, name: String },
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("cannot afford any {0}")]
    Unaffordable(String),
    #[error("no {0} for sale here")]
    InsufficientStock(String),
    #[error("no {0} in the hold")]
    InsufficientCargo(String),
    #[error("not enough fuel: {needed} units needed, {available} in the tank")]
    InsufficientFuel { needed: u32, available: u32 },
    #[error("no room in the hold for any {0}")]
    InsufficientHoldSpace(String),
    #[error("{0} not installed")]
    NotInstalled(String),
    #[error("{0} already installed")]
    AlreadyInstalled(String),
    #[error("{0} has no active use")]
    NotUsable(String),
    #[error("{name} needs tech level {required}, this system has {available}")]
    TechLevelTooLow {
        name: String,
        required: u8,
        available: u8,
    },
    #[error("you are banned from legal trade at {0}")]
    BannedFromTrading(String),
    #[error("fuel tank is full")]
    TankFull,
    #[error("jump not possible: already at {0}")]
    BadJump(String),
    #[error("name must not be empty")]
    InvalidName,
    #[error("hold too full to shrink to {0}t")]
    HoldTooFull(u32),
}

impl GameError {
    pub(crate) fn not_found(what: &'static str, name: &str) -> Self {
        GameError::NotFound {
            what,
            name: name.trim().to_string(),
        }
    }
}

/// Result of a state-changing action: a message for the player.
pub type ActionResult = Result<String, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            GameError::not_found("System", " zzz ").to_string(),
            "System \"zzz\" could not be found"
        );
        assert_eq!(
            GameError::BadJump("Lave".into()).to_string(),
            "jump not possible: already at Lave"
        );
        assert_eq!(
            GameError::InsufficientFuel {
                needed: 30,
                available: 12
            }
            .to_string(),
            "not enough fuel: 30 units needed, 12 in the tank"
        );
    }
}
