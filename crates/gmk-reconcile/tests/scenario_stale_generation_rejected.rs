use gmk_reconcile::{Freshness, GenerationGate};

#[test]
fn scenario_stale_generation_rejected() {
    let mut gate = GenerationGate::new();

    // Refresh 1 dispatched; its remote query is slow.
    let slow = gate.dispatch();

    // User triggers refresh 2 before refresh 1 resolves.
    let current = gate.dispatch();

    // Refresh 2's result lands first and is accepted.
    assert!(gate.accept(current).is_fresh());

    // Refresh 1's late result must not overwrite the newer state.
    assert_eq!(gate.accept(slow), Freshness::Stale { latest: 2, got: 1 });
}
