//! Monster battle engine: a CSV-backed roster and a turn-based battle.

pub mod battle;
pub mod config;
pub mod error;
pub mod media;
pub mod monster;
pub mod roster;
pub mod session;

pub use battle::{
    first_turn, AttackReport, Battle, BattleAction, BattleState, Combatant, Outcome, Phase, Side,
};
pub use config::RosterConfig;
pub use error::{MalformedReason, RosterError, StateError};
pub use media::{resolve_media, MediaUrls};
pub use monster::{MonsterRecord, DEFAULT_SPEED};
pub use roster::{parse_record, Roster};
pub use session::SharedBattle;
