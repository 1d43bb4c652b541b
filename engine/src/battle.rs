//! Two-participant, turn-based battle.
//!
//! The state is a plain value owned by the host. Every transition is total:
//! actions that do not apply (wrong side, battle already decided) are
//! ignored without touching health, turn or log.

use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::monster::MonsterRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Player number shown to users (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Side::One => 1,
            Side::Two => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "winner")]
pub enum Outcome {
    InProgress,
    Won(Side),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    InProgress,
    Finished(Side),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum BattleAction {
    Attack { side: Side },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub record: MonsterRecord,
    pub current_hp: i32,
}

impl Combatant {
    fn fresh(record: MonsterRecord) -> Self {
        let current_hp = record.hp;
        Self { record, current_hp }
    }

    pub fn is_down(&self) -> bool {
        self.current_hp <= 0
    }
}

/// What an accepted attack did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttackReport {
    pub actor: Side,
    pub damage: i32,
    pub defender_hp: i32,
    pub finished: bool,
}

/// Higher speed acts first; ties go to side one.
pub fn first_turn(one: &MonsterRecord, two: &MonsterRecord) -> Side {
    if one.speed >= two.speed {
        Side::One
    } else {
        Side::Two
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBattleState")]
pub struct BattleState {
    one: Combatant,
    two: Combatant,
    active_turn: Side,
    log: Vec<String>,
    outcome: Outcome,
}

/// Wire shape of [`BattleState`] before its invariants are checked.
#[derive(Deserialize)]
struct RawBattleState {
    one: Combatant,
    two: Combatant,
    active_turn: Side,
    log: Vec<String>,
    outcome: Outcome,
}

impl TryFrom<RawBattleState> for BattleState {
    type Error = StateError;

    fn try_from(raw: RawBattleState) -> Result<Self, StateError> {
        let state = Self {
            one: raw.one,
            two: raw.two,
            active_turn: raw.active_turn,
            log: raw.log,
            outcome: raw.outcome,
        };
        state.validate()?;
        Ok(state)
    }
}

impl BattleState {
    pub fn new(one: MonsterRecord, two: MonsterRecord) -> Self {
        let active_turn = first_turn(&one, &two);
        let mut state = Self {
            one: Combatant::fresh(one),
            two: Combatant::fresh(two),
            active_turn,
            log: Vec::new(),
            outcome: Outcome::InProgress,
        };
        state.log.push(state.start_line());
        tracing::debug!(
            "Battle started: {} vs {}, side {} first",
            state.one.record.name,
            state.two.record.name,
            active_turn.number()
        );
        state
    }

    /// Check a state that did not come from [`BattleState::new`]: valid
    /// records, `0 <= current_hp <= hp`, and an outcome that agrees with
    /// who is still standing.
    pub fn validate(&self) -> Result<(), StateError> {
        for side in [Side::One, Side::Two] {
            let c = self.combatant(side);
            c.record.check().map_err(|reason| StateError::Record {
                side: side.number(),
                reason,
            })?;
            if !(0..=c.record.hp).contains(&c.current_hp) {
                return Err(StateError::HpOutOfRange {
                    side: side.number(),
                    current_hp: c.current_hp,
                    max_hp: c.record.hp,
                });
            }
        }
        let consistent = match self.outcome {
            Outcome::InProgress => !self.one.is_down() && !self.two.is_down(),
            Outcome::Won(side) => {
                !self.combatant(side).is_down() && self.combatant(side.other()).is_down()
            }
        };
        if !consistent {
            return Err(StateError::OutcomeMismatch);
        }
        if self.log.is_empty() {
            return Err(StateError::EmptyLog);
        }
        Ok(())
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::One => &self.one,
            Side::Two => &self.two,
        }
    }

    pub fn active_turn(&self) -> Side {
        self.active_turn
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn winner(&self) -> Option<Side> {
        match self.outcome {
            Outcome::Won(side) => Some(side),
            Outcome::InProgress => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.winner().is_some()
    }

    /// Attack with `actor`'s move. Returns `None` and changes nothing when
    /// the battle is over or it is not `actor`'s turn.
    pub fn attempt_attack(&mut self, actor: Side) -> Option<AttackReport> {
        if self.is_finished() || actor != self.active_turn {
            tracing::debug!("Ignored attack by side {}", actor.number());
            return None;
        }

        let (attacker, defender) = match actor {
            Side::One => (&self.one, &mut self.two),
            Side::Two => (&self.two, &mut self.one),
        };
        let damage = attacker.record.move_power;
        defender.current_hp = defender.current_hp.saturating_sub(damage).max(0);
        let defender_hp = defender.current_hp;
        self.log.push(format!(
            "P{}: {} used {}! → {} takes {} damage (HP left {})",
            actor.number(),
            attacker.record.name,
            attacker.record.move_name,
            defender.record.name,
            damage,
            defender_hp
        ));

        let finished = defender_hp <= 0;
        if finished {
            self.outcome = Outcome::Won(actor);
            tracing::debug!("Side {} wins", actor.number());
        } else {
            self.active_turn = actor.other();
        }

        Some(AttackReport {
            actor,
            damage,
            defender_hp,
            finished,
        })
    }

    /// Restore full health, recompute the first turn and restart the log.
    pub fn reset(&mut self) {
        self.one.current_hp = self.one.record.hp;
        self.two.current_hp = self.two.record.hp;
        self.active_turn = first_turn(&self.one.record, &self.two.record);
        self.outcome = Outcome::InProgress;
        self.log = vec![self.start_line()];
    }

    /// Dispatch a host action. Returns whether the state changed.
    pub fn apply(&mut self, action: BattleAction) -> bool {
        match action {
            BattleAction::Attack { side } => self.attempt_attack(side).is_some(),
            BattleAction::Reset => {
                self.reset();
                true
            }
        }
    }

    fn start_line(&self) -> String {
        format!(
            "Battle start! {} (SPD {}) vs {} (SPD {}) / first: {}",
            self.one.record.name,
            self.one.record.speed,
            self.two.record.name,
            self.two.record.speed,
            self.combatant(self.active_turn).record.name
        )
    }
}

/// A battle slot that may not have participants yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    state: Option<BattleState>,
}

impl Battle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin (or replace) the battle with two resolved monsters.
    pub fn start(&mut self, one: MonsterRecord, two: MonsterRecord) -> &BattleState {
        self.state.insert(BattleState::new(one, two))
    }

    pub fn state(&self) -> Option<&BattleState> {
        self.state.as_ref()
    }

    pub fn phase(&self) -> Phase {
        match self.state.as_ref().map(BattleState::outcome) {
            None => Phase::Uninitialized,
            Some(Outcome::InProgress) => Phase::InProgress,
            Some(Outcome::Won(side)) => Phase::Finished(side),
        }
    }

    pub fn attempt_attack(&mut self, actor: Side) -> Option<AttackReport> {
        self.state.as_mut()?.attempt_attack(actor)
    }

    /// Returns `false` when there is nothing to reset yet.
    pub fn reset(&mut self) -> bool {
        match self.state.as_mut() {
            Some(state) => {
                state.reset();
                true
            }
            None => false,
        }
    }

    pub fn apply(&mut self, action: BattleAction) -> bool {
        self.state
            .as_mut()
            .is_some_and(|state| state.apply(action))
    }
}
