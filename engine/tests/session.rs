use std::thread;

use engine::{BattleAction, MonsterRecord, Phase, SharedBattle, Side};

#[test]
fn concurrent_attacks_are_serialized() {
    let shared = SharedBattle::default();
    shared.start(
        MonsterRecord::new("A", 1000, "Jab", 1, 10),
        MonsterRecord::new("B", 1000, "Jab", 1, 10),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let shared = shared.clone();
            let side = if i % 2 == 0 { Side::One } else { Side::Two };
            thread::spawn(move || (0..50).filter(|_| shared.attempt_attack(side).is_some()).count())
        })
        .collect();
    let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    let battle = shared.snapshot();
    let state = battle.state().unwrap();
    let one_lost = 1000 - state.combatant(Side::One).current_hp;
    let two_lost = 1000 - state.combatant(Side::Two).current_hp;
    assert_eq!((one_lost + two_lost) as usize, accepted);
    assert_eq!(state.log().len(), accepted + 1);
    assert!(two_lost == one_lost || two_lost == one_lost + 1);
}

#[test]
fn shared_handle_exposes_the_same_transitions() {
    let shared = SharedBattle::default();
    assert_eq!(shared.phase(), Phase::Uninitialized);
    assert!(!shared.reset());

    shared.start(
        MonsterRecord::new("A", 10, "Crush", 50, 5),
        MonsterRecord::new("B", 10, "Flick", 1, 5),
    );
    assert!(shared.apply(BattleAction::Attack { side: Side::One }));
    assert_eq!(shared.phase(), Phase::Finished(Side::One));
    assert!(shared.reset());
    assert_eq!(shared.phase(), Phase::InProgress);
}
