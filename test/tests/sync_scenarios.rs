use std::{
    collections::BTreeSet,
    sync::Arc,
    time::{Duration, Instant},
};

use flotilla_client::{
    dispatch_queue,
    routines::{
        load_candidates, DebrisCleanupRoutine, DefinitionBroadcastRoutine, LoadRoutine,
        OwnVesselCheckRoutine, RefreshRoutine,
    },
    DispatchReceiver, Routine, Scene, SyncConfig, SyncContext, VesselProtoSystem,
};
use flotilla_shared::{MessageData, Position, VesselId, VesselType};
use flotilla_test::{init_logger, proto, proto_at, vessel_id, TestHost};

fn context() -> (SyncContext, DispatchReceiver) {
    init_logger();
    let (queue, receiver) = dispatch_queue();
    (SyncContext::new(SyncConfig::default(), queue), receiver)
}

fn parts(ids: &[u32]) -> BTreeSet<u32> {
    ids.iter().copied().collect()
}

/// Loads `id` with the given parts through the load routine
fn loaded(context: &SyncContext, host: &mut TestHost, id: u128, parts: &[u32], now: Instant) {
    context.store.handle_proto_update(proto(id, parts), now);
    LoadRoutine::new()
        .run(context, &mut host.host(), now)
        .unwrap();
    assert!(context.store.status(vessel_id(id)).unwrap().exists);
}

// Scenario A
#[test]
fn load_pass_instantiates_unloaded_vessel() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let now = Instant::now();
    context.store.handle_proto_update(proto(1, &[1, 2, 3]), now);

    LoadRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();

    let status = context.store.status(vessel_id(1)).unwrap();
    assert!(status.exists);
    assert!(!status.in_safety_bubble);
    assert_eq!(host.live_part_ids(vessel_id(1)), Some(parts(&[1, 2, 3])));
}

// Scenario B
#[test]
fn refresh_pass_merges_pending_definition_while_spectating() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let now = Instant::now();
    loaded(&context, &mut host, 1, &[1, 2, 3], now);

    host.authority.spectating = true;
    host.view.active_vessel_id = Some(vessel_id(9));
    context.store.handle_proto_update(proto(1, &[2, 3, 4, 5]), now);
    assert!(context.store.status(vessel_id(1)).unwrap().has_update);

    RefreshRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();

    let status = context.store.status(vessel_id(1)).unwrap();
    assert!(!status.has_update);
    assert_eq!(host.live_part_ids(vessel_id(1)), Some(parts(&[2, 3, 4, 5])));

    let record = context.store.record(vessel_id(1)).unwrap();
    let record = record.lock();
    assert_eq!(record.known_parts(), &parts(&[2, 3, 4, 5]));
    assert_eq!(record.live().unwrap().part_count(), 4);
}

// Scenario C
#[test]
fn kill_list_addition_mid_pass_is_honored() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let now = Instant::now();
    context.store.handle_proto_update(proto(1, &[1]), now);
    context.store.handle_proto_update(proto(2, &[1]), now);

    let candidates = load_candidates(&context.store, &context.removal, &host.view, 100.0);
    assert_eq!(candidates, vec![vessel_id(1), vessel_id(2)]);

    // Loading vessel 1 triggers a removal of vessel 2 from elsewhere
    let removal = Arc::clone(&context.removal);
    host.loader.on_load = Some(Box::new(move |id: VesselId| {
        if id == vessel_id(1) {
            removal.add(vessel_id(2));
        }
    }));

    LoadRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();

    assert_eq!(host.loader.loads, vec![vessel_id(1)]);
    assert!(!context.store.status(vessel_id(2)).unwrap().exists);

    // And the next cycle does not even consider it
    let candidates = load_candidates(&context.store, &context.removal, &host.view, 100.0);
    assert!(candidates.is_empty());
}

// Scenario D
#[test]
fn debris_pass_schedules_unknown_local_vessels() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let now = Instant::now();
    loaded(&context, &mut host, 1, &[1], now);
    host.spawn_local(vessel_id(77), &[1, 2]);
    host.authority.spectating = true;

    DebrisCleanupRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();

    let pending = context.removal.pending_ids();
    assert!(pending.contains(&vessel_id(77)));
    assert!(!pending.contains(&vessel_id(1)));
}

#[test]
fn debris_pass_does_nothing_while_flying() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    host.spawn_local(vessel_id(77), &[1]);

    DebrisCleanupRoutine::new()
        .run(&context, &mut host.host(), Instant::now())
        .unwrap();

    assert!(context.removal.pending_ids().is_empty());
}

// Scenario E
#[test]
fn policy_denial_is_surfaced_and_not_retried() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    host.policy.banned_parts.push(String::from("structuralPanel"));
    let now = Instant::now();
    context.store.handle_proto_update(proto(1, &[1]), now);

    let mut routine = LoadRoutine::new();
    routine.run(&context, &mut host.host(), now).unwrap();
    routine.run(&context, &mut host.host(), now).unwrap();

    assert!(!context.store.status(vessel_id(1)).unwrap().exists);
    assert_eq!(host.denials.denials.len(), 1);
    assert_eq!(host.denials.denials[0].0, vessel_id(1));
    assert_eq!(
        host.denials.denials[0].1,
        vec![String::from("banned part structuralPanel")]
    );
    assert!(host.loader.loads.is_empty());

    // A new definition gets evaluated again
    context.store.handle_proto_update(proto(1, &[1]), now);
    routine.run(&context, &mut host.host(), now).unwrap();
    assert_eq!(host.denials.denials.len(), 2);
}

#[test]
fn flags_and_kerbals_bypass_the_content_policy() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    host.policy.banned_parts.push(String::from("structuralPanel"));
    let now = Instant::now();

    let mut flag = proto(1, &[1]);
    flag.vessel_type = VesselType::Flag;
    let mut kerbal = proto(2, &[1]);
    kerbal.vessel_type = VesselType::Eva;
    context.store.handle_proto_update(flag, now);
    context.store.handle_proto_update(kerbal, now);

    LoadRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();

    assert!(host.denials.denials.is_empty());
    assert_eq!(host.loader.loads, vec![vessel_id(1), vessel_id(2)]);
}

#[test]
fn vessels_in_other_subspaces_are_not_loaded() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let now = Instant::now();
    let mut future = proto(1, &[1]);
    future.subspace = 4;
    context.store.handle_proto_update(future, now);

    LoadRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();
    assert!(host.loader.loads.is_empty());

    host.view.subspace = 4;
    LoadRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();
    assert_eq!(host.loader.loads, vec![vessel_id(1)]);
}

#[test]
fn safety_bubble_defers_loading_only_in_flight() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let now = Instant::now();
    host.view.safety_bubble_center = Some(Position::new(0.0, 0.0, 0.0));
    context
        .store
        .handle_proto_update(proto_at(1, &[1], Position::new(10.0, 0.0, 0.0)), now);

    LoadRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();
    let status = context.store.status(vessel_id(1)).unwrap();
    assert!(status.in_safety_bubble);
    assert!(!status.exists);

    host.view.scene = Scene::TrackingStation;
    LoadRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();
    assert!(context.store.status(vessel_id(1)).unwrap().exists);
}

#[test]
fn nothing_loads_before_the_space_center() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    host.view.scene = Scene::MainMenu;
    context.store.handle_proto_update(proto(1, &[1]), Instant::now());

    LoadRoutine::new()
        .run(&context, &mut host.host(), Instant::now())
        .unwrap();
    assert!(host.loader.loads.is_empty());
}

#[test]
fn failed_load_is_retried_next_pass() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let now = Instant::now();
    context.store.handle_proto_update(proto(1, &[1]), now);
    host.loader.failing.insert(vessel_id(1));

    let mut routine = LoadRoutine::new();
    routine.run(&context, &mut host.host(), now).unwrap();
    assert!(!context.store.status(vessel_id(1)).unwrap().exists);

    host.loader.failing.clear();
    routine.run(&context, &mut host.host(), now).unwrap();
    assert!(context.store.status(vessel_id(1)).unwrap().exists);
}

#[test]
fn own_live_vessel_is_never_instantiated_again() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let now = Instant::now();
    host.spawn_local(vessel_id(5), &[1, 2]);
    host.view.active_vessel_id = Some(vessel_id(5));
    host.authority.authoritative.insert(vessel_id(5));
    context.store.handle_proto_update(proto(5, &[1, 2, 3]), now);

    let candidates = load_candidates(&context.store, &context.removal, &host.view, 100.0);
    assert!(candidates.is_empty());

    LoadRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();
    RefreshRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();

    assert!(host.loader.loads.is_empty());
    assert!(host.loader.adopted.is_empty());
    assert!(!context.store.status(vessel_id(5)).unwrap().exists);
    assert_eq!(host.live_part_ids(vessel_id(5)), Some(parts(&[1, 2])));
}

#[test]
fn live_vessel_of_another_player_is_adopted_then_merged() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let now = Instant::now();
    host.spawn_local(vessel_id(6), &[1, 2]);
    context.store.handle_proto_update(proto(6, &[2, 3]), now);

    LoadRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();

    assert!(host.loader.loads.is_empty());
    assert_eq!(host.loader.adopted, vec![vessel_id(6)]);
    let status = context.store.status(vessel_id(6)).unwrap();
    assert!(status.exists);
    assert!(status.has_update);

    RefreshRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();

    assert!(!context.store.status(vessel_id(6)).unwrap().has_update);
    assert_eq!(host.live_part_ids(vessel_id(6)), Some(parts(&[2, 3])));
}

#[test]
fn spectated_player_vessel_is_adopted() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let now = Instant::now();
    host.spawn_local(vessel_id(7), &[1]);
    host.view.active_vessel_id = Some(vessel_id(7));
    host.authority.spectating = true;
    context.store.handle_proto_update(proto(7, &[1]), now);

    LoadRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();

    assert!(host.loader.loads.is_empty());
    assert_eq!(host.loader.adopted, vec![vessel_id(7)]);
}

#[test]
fn own_authoritative_vessel_is_not_refreshed_while_flying() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let now = Instant::now();
    loaded(&context, &mut host, 1, &[1, 2], now);

    host.view.active_vessel_id = Some(vessel_id(1));
    host.authority.authoritative.insert(vessel_id(1));
    context.store.handle_proto_update(proto(1, &[1]), now);

    RefreshRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();

    assert!(context.store.status(vessel_id(1)).unwrap().has_update);
    assert_eq!(host.live_part_ids(vessel_id(1)), Some(parts(&[1, 2])));
}

#[test]
fn refresh_is_debounced() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let start = Instant::now();
    loaded(&context, &mut host, 1, &[1], start);

    let mut routine = RefreshRoutine::new();
    routine.run(&context, &mut host.host(), start).unwrap();

    context.store.handle_proto_update(proto(1, &[1, 2]), start);
    routine
        .run(&context, &mut host.host(), start + Duration::from_millis(1000))
        .unwrap();
    assert!(context.store.status(vessel_id(1)).unwrap().has_update);

    routine
        .run(&context, &mut host.host(), start + Duration::from_millis(1600))
        .unwrap();
    assert!(!context.store.status(vessel_id(1)).unwrap().has_update);
}

#[test]
fn spectated_vessel_drift_forces_a_remerge() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let now = Instant::now();
    loaded(&context, &mut host, 1, &[1, 2, 3], now);
    host.authority.spectating = true;
    host.view.active_vessel_id = Some(vessel_id(1));

    host.break_off_part(vessel_id(1), 3);
    assert!(!context.store.status(vessel_id(1)).unwrap().has_update);

    OwnVesselCheckRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();
    assert!(context.store.status(vessel_id(1)).unwrap().has_update);

    RefreshRoutine::new()
        .run(&context, &mut host.host(), now)
        .unwrap();
    assert_eq!(host.live_part_ids(vessel_id(1)), Some(parts(&[1, 2, 3])));
}

#[test]
fn definitions_are_broadcast_only_for_vessels_under_local_authority() {
    let (context, receiver) = context();
    let mut host = TestHost::new();
    host.view.active_vessel_id = Some(vessel_id(1));
    host.view.secondary_vessel_ids = vec![vessel_id(2), vessel_id(3)];
    host.authority.authoritative.insert(vessel_id(1));
    host.authority.authoritative.insert(vessel_id(2));
    for id in 1..=3 {
        host.view.snapshots.insert(vessel_id(id), proto(id, &[1]));
    }

    DefinitionBroadcastRoutine::new()
        .run(&context, &mut host.host(), Instant::now())
        .unwrap();

    let mut broadcast = Vec::new();
    while let Some(envelope) = receiver.try_dequeue() {
        match envelope.into_data() {
            MessageData::VesselProto(data) => broadcast.push(data.vessel.vessel_id),
            other => panic!("unexpected {:?}", other),
        }
    }
    assert_eq!(broadcast, vec![vessel_id(1), vessel_id(2)]);
}

#[test]
fn nothing_is_broadcast_while_spectating() {
    let (context, receiver) = context();
    let mut host = TestHost::new();
    host.view.active_vessel_id = Some(vessel_id(1));
    host.view.snapshots.insert(vessel_id(1), proto(1, &[1]));
    host.authority.authoritative.insert(vessel_id(1));
    host.authority.spectating = true;

    DefinitionBroadcastRoutine::new()
        .run(&context, &mut host.host(), Instant::now())
        .unwrap();
    assert!(receiver.try_dequeue().is_none());
}

#[test]
fn broadcast_reports_a_closed_queue() {
    let (context, receiver) = context();
    drop(receiver);
    let mut host = TestHost::new();
    host.view.active_vessel_id = Some(vessel_id(1));
    host.view.snapshots.insert(vessel_id(1), proto(1, &[1]));
    host.authority.authoritative.insert(vessel_id(1));

    let result = DefinitionBroadcastRoutine::new().run(&context, &mut host.host(), Instant::now());
    assert!(result.is_err());
}

#[test]
fn system_tick_executes_removals_after_the_routines() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let mut system = VesselProtoSystem::new(context.clone());
    system.enable();
    let now = Instant::now();

    context.store.handle_proto_update(proto(1, &[1]), now);
    system.tick(&mut host.host(), now);
    assert!(host.is_live(vessel_id(1)));

    context.removal.add(vessel_id(1));
    system.tick(&mut host.host(), now + Duration::from_millis(10));

    assert!(!host.is_live(vessel_id(1)));
    assert!(!context.store.contains(vessel_id(1)));
    assert!(context.removal.pending_ids().is_empty());
    assert!(context.removal.was_recently_removed(vessel_id(1), now + Duration::from_secs(1)));
}

#[test]
fn disabled_system_does_nothing_and_disable_tears_down() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let mut system = VesselProtoSystem::new(context.clone());
    let now = Instant::now();
    context.store.handle_proto_update(proto(1, &[1]), now);

    system.tick(&mut host.host(), now);
    assert!(host.loader.loads.is_empty());

    system.enable();
    context.removal.add(vessel_id(5));
    system.disable();

    assert!(context.store.is_empty());
    assert!(context.removal.pending_ids().is_empty());
}

#[test]
fn routines_run_on_their_own_cadence() {
    let (context, _receiver) = context();
    let mut host = TestHost::new();
    let mut system = VesselProtoSystem::new(context.clone());
    system.enable();
    let start = Instant::now();

    system.tick(&mut host.host(), start);
    system.tick(&mut host.host(), start + Duration::from_millis(500));
    system.tick(&mut host.host(), start + Duration::from_millis(1000));
    system.tick(&mut host.host(), start + Duration::from_millis(2000));

    assert_eq!(system.profile(LoadRoutine::NAME).unwrap().runs, 2);
    assert_eq!(system.profile(DebrisCleanupRoutine::NAME).unwrap().runs, 3);
    assert_eq!(system.profile(DefinitionBroadcastRoutine::NAME).unwrap().runs, 1);

    let report = system.profiler_report();
    assert_eq!(report.lines().count(), 5);
    assert!(report
        .lines()
        .any(|line| line.starts_with("LoadVessels: runs=2 last=")));
}
