//! Contest Games - pure board logic for remote turn-based contests
//!
//! This crate holds everything about Connect4 and Pingouins that does not
//! touch the network or the terminal.
//!
//! # Architecture
//!
//! - **Codec**: the server's compact text encodings (player lists, player
//!   actions, rewards) and the round outcome rule
//! - **Animation**: transient per-entity tween records that drive busy state
//! - **Layout**: surface geometry shared by both boards
//! - **Connect4**: 7x6 column-drop grid with falling-stone animation
//! - **Pingouins**: 8x8 staggered hex grid, movement codec, game-state
//!   decoder, ice tiles with dissolve animation and penguin entities
//!
//! # Example
//!
//! ```
//! use contest_games::pingouins::{Direction, HexCoord, HexMove};
//! use contest_games::LegalAction;
//!
//! let action = HexMove::decode("(3,4,TR,2)").unwrap();
//! let LegalAction::Move(mv) = action else { panic!("expected a move") };
//! assert_eq!(mv.from, HexCoord::new(3, 4));
//! assert_eq!(mv.direction, Direction::TopRight);
//! assert_eq!(mv.to_string(), "(3,4,TR,2)");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod animation;
mod codec;
mod error;
mod layout;
mod outcome;

pub mod connect4;
pub mod pingouins;

pub use animation::{Animation, AnimationKind};
pub use codec::{
    ActionSet, LegalAction, NO_OP, Player, PlayerAction, PlayerReward, is_terminal_state,
    parse_player_actions, parse_player_rewards, parse_players,
};
pub use error::{CodecError, CodecErrorKind};
pub use layout::{Point, Surface};
pub use outcome::Outcome;
