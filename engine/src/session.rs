//! Thread-safe handle for hosts that share one battle between threads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::battle::{AttackReport, Battle, BattleAction, Phase, Side};
use crate::monster::MonsterRecord;

/// Serializes every transition of a single battle behind one mutex.
#[derive(Debug, Clone, Default)]
pub struct SharedBattle {
    inner: Arc<Mutex<Battle>>,
}

impl SharedBattle {
    pub fn new(battle: Battle) -> Self {
        Self {
            inner: Arc::new(Mutex::new(battle)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Battle> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start(&self, one: MonsterRecord, two: MonsterRecord) {
        self.lock().start(one, two);
    }

    pub fn attempt_attack(&self, actor: Side) -> Option<AttackReport> {
        self.lock().attempt_attack(actor)
    }

    pub fn reset(&self) -> bool {
        self.lock().reset()
    }

    pub fn apply(&self, action: BattleAction) -> bool {
        self.lock().apply(action)
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }

    /// Copy of the battle as of now.
    pub fn snapshot(&self) -> Battle {
        self.lock().clone()
    }
}
