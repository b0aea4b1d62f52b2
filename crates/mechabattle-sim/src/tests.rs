//! Tests for the battle engine, gauge flow, combat pipeline and win checks.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use mechabattle_core::blueprint::{MachineBlueprint, TeamSetup};
use mechabattle_core::commands::{LogicalInput, PlayerCommand};
use mechabattle_core::components::*;
use mechabattle_core::constants::SKIP_ACTION_DURATION;
use mechabattle_core::enums::*;
use mechabattle_core::events::BattleEvent;
use mechabattle_core::state::ActionOption;
use mechabattle_core::types::MachineId;

use mechabattle_behavior::resolution::CombatResult;
use mechabattle_data::loadout::random_team;
use mechabattle_data::GameData;

use crate::action::{ActionEvent, DamageEvent};
use crate::context::BattleContext;
use crate::engine::{BattleConfig, BattleEngine};
use crate::roster::PartSet;
use crate::systems::{damage, execution, gauge, log_wait};

// ---- Fixtures ----

fn offense(attack: i32, success: i32, trait_kind: TraitKind) -> Option<PartOffense> {
    Some(PartOffense {
        attack,
        success,
        trait_kind,
        skill: SkillKind::Shoot,
        time_modifier: 1.0,
    })
}

fn part(slot: PartSlot, hp: u32, offense: Option<PartOffense>) -> Part {
    Part {
        slot,
        name: format!("Test {}", slot.label()),
        attribute: Attribute::Undefined,
        hp,
        max_hp: hp,
        offense,
        mobility: if slot == PartSlot::Legs { 20 } else { 0 },
        defense: if slot == PartSlot::Legs { 10 } else { 0 },
    }
}

/// Rifle head and right arm, sword left arm.
fn gunner(name: &str) -> MachineBlueprint {
    MachineBlueprint {
        name: name.to_string(),
        medal: Medal {
            name: name.to_string(),
            personality: PersonalityKind::Random,
            attribute: Attribute::Undefined,
        },
        head: part(PartSlot::Head, 40, offense(10, 30, TraitKind::Rifle)),
        right_arm: part(PartSlot::RightArm, 40, offense(30, 40, TraitKind::Rifle)),
        left_arm: part(PartSlot::LeftArm, 40, offense(25, 40, TraitKind::Sword)),
        legs: part(PartSlot::Legs, 50, None),
    }
}

fn team(prefix: &str, size: usize) -> TeamSetup {
    TeamSetup {
        members: (0..size).map(|i| gunner(&format!("{prefix}{i}"))).collect(),
        leader: 0,
        strategy: StrategyKind::Strongest,
    }
}

/// 2v2 battle: ids 0-1 are team one, 2-3 team two. Leaders are 0 and 2.
fn engine_with(config: BattleConfig) -> BattleEngine {
    let mut engine = BattleEngine::new(config);
    engine.start_battle(&team("A", 2), &team("B", 2));
    engine
}

fn headless_engine(seed: u64) -> BattleEngine {
    engine_with(BattleConfig::headless(seed))
}

fn entity(engine: &BattleEngine, id: u32) -> hecs::Entity {
    engine.context().entity(MachineId(id)).unwrap()
}

fn set_part_hp(engine: &mut BattleEngine, id: u32, slot: PartSlot, hp: u32) {
    let machine = entity(engine, id);
    let part_entity = engine.world().get::<&PartSet>(machine).unwrap().get(slot);
    engine.world_mut().get::<&mut Part>(part_entity).unwrap().hp = hp;
}

fn part_hp(engine: &BattleEngine, id: u32, slot: PartSlot) -> u32 {
    crate::roster::part_hp(engine.world(), entity(engine, id), slot).unwrap()
}

fn gauge_of(engine: &BattleEngine, id: u32) -> Gauge {
    let gauge = engine.world().get::<&Gauge>(entity(engine, id)).unwrap();
    (*gauge).clone()
}

fn set_gauge(engine: &mut BattleEngine, id: u32, gauge: Gauge) {
    let machine = entity(engine, id);
    *engine.world_mut().get::<&mut Gauge>(machine).unwrap() = gauge;
}

fn defeated(engine: &BattleEngine, id: u32) -> bool {
    engine
        .world()
        .get::<&MachineInfo>(entity(engine, id))
        .unwrap()
        .defeated
}

/// A machine charging a right-arm rifle shot at `target`'s `slot`.
fn charging_rifle(progress: f64, target: u32, slot: PartSlot) -> Gauge {
    let mut gauge = Gauge {
        status: GaugeStatus::Charging,
        progress,
        charging_time: 2.0,
        cooldown_time: 2.0,
        action: Some(ActionKind::Attack),
        part: Some(PartSlot::RightArm),
        ..Default::default()
    };
    gauge.selections.insert(
        PartSlot::RightArm,
        TargetSelection {
            machine: MachineId(target),
            part: slot,
        },
    );
    gauge
}

// ---- Determinism ----

fn builtin_engine(seed: u64) -> BattleEngine {
    let data = GameData::builtin();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let one = random_team(&data, 3, StrategyKind::Random, &mut rng);
    let two = random_team(&data, 3, StrategyKind::Strongest, &mut rng);
    let mut engine = BattleEngine::new(BattleConfig::headless(seed));
    engine.start_battle(&one, &two);
    engine
}

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = builtin_engine(12345);
    let mut engine_b = builtin_engine(12345);

    for _ in 0..600 {
        engine_a.update(0.1);
        engine_b.update(0.1);
        let json_a = serde_json::to_string(&engine_a.snapshot()).unwrap();
        let json_b = serde_json::to_string(&engine_b.snapshot()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = headless_engine(111);
    let mut engine_b = headless_engine(222);

    let mut diverged = false;
    for _ in 0..2000 {
        engine_a.update(0.1);
        engine_b.update(0.1);
        let json_a = serde_json::to_string(&engine_a.snapshot()).unwrap();
        let json_b = serde_json::to_string(&engine_b.snapshot()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce different battles");
}

// ---- Engine basics ----

#[test]
fn test_update_before_start_is_inert() {
    let mut engine = BattleEngine::new(BattleConfig::default());
    engine.update(0.1);
    assert_eq!(engine.phase(), BattlePhase::Idle);
    assert!(engine.outcome().is_none());
    assert_eq!(engine.time().tick, 0);
}

#[test]
fn test_dt_is_clamped() {
    let mut engine = headless_engine(1);
    let max_dt = engine.config().max_dt;
    engine.update(10.0);
    assert!((engine.time().elapsed - max_dt).abs() < 1e-12);
    engine.update(-1.0);
    engine.update(f64::NAN);
    assert!((engine.time().elapsed - max_dt).abs() < 1e-12);
    assert_eq!(engine.time().tick, 3);
}

#[test]
fn test_config_defaults_from_partial_json() {
    let config: BattleConfig = serde_json::from_str(r#"{ "seed": 7 }"#).unwrap();
    assert_eq!(config.seed, 7);
    assert!(config.player_controlled);
    assert!(!config.auto_advance_log);
    assert!(config.max_dt > 0.0);
}

#[test]
fn test_snapshot_lists_machines_and_parts() {
    let mut engine = headless_engine(3);
    engine.update(0.1);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.machines.len(), 4);
    assert!(snapshot.machines.iter().all(|m| m.parts.len() == 4));
    assert_eq!(snapshot.machines[0].team, Team::One);
    assert_eq!(snapshot.machines[2].team, Team::Two);
    assert!(snapshot.machines[0].leader);
    assert!(!snapshot.machines[1].leader);
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"machines\""));
}

#[test]
fn test_target_preselection_for_ranged_parts_only() {
    let mut engine = headless_engine(5);
    engine.update(0.1);
    // Machine 3 is still waiting its turn in action choice.
    let gauge = gauge_of(&engine, 3);
    assert_eq!(gauge.status, GaugeStatus::ActionChoice);
    let slots: Vec<PartSlot> = gauge.selections.keys().copied().collect();
    assert_eq!(slots, vec![PartSlot::Head, PartSlot::RightArm]);
    for selection in gauge.selections.values() {
        assert!(selection.machine.0 < 2, "should target team one");
    }
}

#[test]
fn test_ai_commits_strongest_part() {
    let mut engine = headless_engine(9);
    engine.update(0.1);
    let gauge = gauge_of(&engine, 0);
    assert_eq!(gauge.status, GaugeStatus::Charging);
    assert_eq!(gauge.part, Some(PartSlot::RightArm));
    // 1 + log10(30)
    assert!((gauge.charging_time - (1.0 + 30f64.log10())).abs() < 1e-9);
    assert!(engine.events().contains(&BattleEvent::ActionCommitted {
        machine: MachineId(0),
        action: ActionKind::Attack,
        slot: Some(PartSlot::RightArm),
    }));
}

// ---- Gauge ----

#[test]
fn test_gauge_completes_into_executing() {
    let mut gauge = Gauge {
        status: GaugeStatus::Charging,
        charging_time: 1.0,
        ..Default::default()
    };
    assert!(!gauge::advance(&mut gauge, 0.5));
    assert!((gauge.progress - 50.0).abs() < 1e-9);
    assert!(gauge::advance(&mut gauge, 0.6));
    assert_eq!(gauge.status, GaugeStatus::Executing);
    assert_eq!(gauge.progress, 100.0);
}

#[test]
fn test_cooldown_completes_into_action_choice() {
    let mut gauge = Gauge {
        status: GaugeStatus::Cooldown,
        progress: 90.0,
        cooldown_time: 1.0,
        action: Some(ActionKind::Attack),
        ..Default::default()
    };
    assert!(gauge::advance(&mut gauge, 0.2));
    assert_eq!(gauge.status, GaugeStatus::ActionChoice);
    assert_eq!(gauge.progress, 0.0);
    assert!(gauge.action.is_none());
    assert!(gauge.selections.is_empty());
}

#[test]
fn test_freeze_delays_progress() {
    // Stop of 1.0 at dt 0.3: three frozen ticks, progress resumes on the fourth.
    let mut gauge = Gauge {
        status: GaugeStatus::Charging,
        charging_time: 2.0,
        ..Default::default()
    };
    gauge.effects.push(StatusEffect {
        kind: StatusEffectKind::Stop,
        remaining: 1.0,
    });
    for _ in 0..3 {
        gauge::advance(&mut gauge, 0.3);
        assert_eq!(gauge.progress, 0.0);
        assert_eq!(gauge.effects.len(), 1);
    }
    gauge::advance(&mut gauge, 0.3);
    assert!(gauge.progress > 0.0);
    assert!((gauge.progress - 0.2 / 2.0 * 100.0).abs() < 1e-6);
    assert!(gauge.effects.is_empty());
}

#[test]
fn test_freeze_budget_is_shared_across_effects() {
    let mut effects = vec![
        StatusEffect {
            kind: StatusEffectKind::Stop,
            remaining: 0.1,
        },
        StatusEffect {
            kind: StatusEffectKind::Stop,
            remaining: 0.5,
        },
    ];
    let left = gauge::consume_freeze(&mut effects, 0.3);
    assert_eq!(left, 0.0);
    assert_eq!(effects.len(), 1);
    assert!((effects[0].remaining - 0.3).abs() < 1e-9);
}

#[test]
fn test_interruption_inverts_progress() {
    let mut engine = headless_engine(4);
    set_gauge(&mut engine, 0, charging_rifle(30.0, 2, PartSlot::LeftArm));
    set_part_hp(&mut engine, 2, PartSlot::LeftArm, 0);

    engine.update(0.0);

    let gauge = gauge_of(&engine, 0);
    assert_eq!(gauge.status, GaugeStatus::Cooldown);
    assert!((gauge.progress - 70.0).abs() < 1e-9);
    assert!(gauge.selections.is_empty());
    assert!(gauge.action.is_none());
    assert!(!engine.context().waiting.contains(&MachineId(0)));
    assert!(engine.events().contains(&BattleEvent::ActionInterrupted {
        machine: MachineId(0),
        reason: InterruptReason::TargetLost,
    }));
}

#[test]
fn test_broken_reserved_part_interrupts() {
    let mut engine = headless_engine(4);
    set_gauge(&mut engine, 0, charging_rifle(80.0, 2, PartSlot::Head));
    set_part_hp(&mut engine, 0, PartSlot::RightArm, 0);

    engine.update(0.0);

    let gauge = gauge_of(&engine, 0);
    assert_eq!(gauge.status, GaugeStatus::Cooldown);
    assert!((gauge.progress - 20.0).abs() < 1e-9);
    assert!(engine.events().contains(&BattleEvent::ActionInterrupted {
        machine: MachineId(0),
        reason: InterruptReason::PartBroken,
    }));
    assert!(engine.context().pending_log.len() + engine.context().battle_log.len() > 0);
}

#[test]
fn test_valid_charge_is_not_interrupted() {
    let mut engine = headless_engine(4);
    set_gauge(&mut engine, 0, charging_rifle(30.0, 2, PartSlot::Head));
    engine.update(0.0);
    assert_eq!(gauge_of(&engine, 0).status, GaugeStatus::Charging);
}

#[test]
fn test_lost_target_at_initiation_cools_down() {
    let mut engine = headless_engine(4);
    let mut gauge = charging_rifle(100.0, 2, PartSlot::LeftArm);
    gauge.status = GaugeStatus::Executing;
    set_gauge(&mut engine, 0, gauge);
    set_part_hp(&mut engine, 2, PartSlot::LeftArm, 0);
    engine.context_mut().waiting.push_back(MachineId(0));

    engine.update(0.0);

    let gauge = gauge_of(&engine, 0);
    assert_eq!(gauge.status, GaugeStatus::Cooldown);
    assert_eq!(gauge.progress, 0.0);
    assert!(engine.events().contains(&BattleEvent::ActionInterrupted {
        machine: MachineId(0),
        reason: InterruptReason::TargetLost,
    }));
    assert!(engine.context().action_event.is_none());
}

// ---- Targeting ----

#[test]
fn test_melee_targets_closest_enemy() {
    let mut engine = headless_engine(6);
    set_gauge(
        &mut engine,
        2,
        Gauge {
            status: GaugeStatus::Charging,
            progress: 50.0,
            ..Default::default()
        },
    );
    set_gauge(
        &mut engine,
        3,
        Gauge {
            status: GaugeStatus::Cooldown,
            progress: 10.0,
            ..Default::default()
        },
    );
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let target = execution::resolve_target(
        engine.world(),
        engine.context(),
        Team::One,
        TraitKind::Sword,
        None,
        &mut rng,
    )
    .unwrap();
    // Cooldown at 10% sits at ratio 0.9, ahead of charging at 0.5.
    assert_eq!(target.machine, MachineId(3));
}

#[test]
fn test_melee_tie_goes_to_lowest_id() {
    let engine = headless_engine(6);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let target = execution::resolve_target(
        engine.world(),
        engine.context(),
        Team::Two,
        TraitKind::Hammer,
        None,
        &mut rng,
    )
    .unwrap();
    assert_eq!(target.machine, MachineId(0));
}

#[test]
fn test_ranged_target_revalidated() {
    let mut engine = headless_engine(6);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let selection = TargetSelection {
        machine: MachineId(3),
        part: PartSlot::Legs,
    };
    let kept = execution::resolve_target(
        engine.world(),
        engine.context(),
        Team::One,
        TraitKind::Rifle,
        Some(selection),
        &mut rng,
    );
    assert_eq!(kept, Some(selection));

    set_part_hp(&mut engine, 3, PartSlot::Legs, 0);
    let lost = execution::resolve_target(
        engine.world(),
        engine.context(),
        Team::One,
        TraitKind::Rifle,
        Some(selection),
        &mut rng,
    );
    assert!(lost.is_none());
    assert!(execution::resolve_target(
        engine.world(),
        engine.context(),
        Team::One,
        TraitKind::Gatling,
        None,
        &mut rng,
    )
    .is_none());
}

#[test]
fn test_berserk_exposed_while_cooling_down() {
    let mut engine = headless_engine(8);
    let machine = entity(&engine, 2);
    let arm = engine.world().get::<&PartSet>(machine).unwrap().get(PartSlot::RightArm);
    if let Some(offense) = engine.world_mut().get::<&mut Part>(arm).unwrap().offense.as_mut() {
        offense.skill = SkillKind::Berserk;
    }

    // Machine 2 finishes a berserk swing and starts cooling down.
    let mut swing = charging_rifle(100.0, 0, PartSlot::Head);
    swing.status = GaugeStatus::Executing;
    set_gauge(&mut engine, 2, swing);
    {
        let (world, ctx) = engine.split_mut();
        ctx.action_event = Some(ActionEvent {
            attacker: MachineId(2),
            kind: ActionKind::Attack,
            part: Some(PartSlot::RightArm),
            original_target: Some(MachineId(0)),
            current_target: Some(MachineId(0)),
            desired_part: Some(PartSlot::Head),
            result: CombatResult::miss(),
        });
        ctx.set_phase(BattlePhase::Executing, 0);
        execution::resolve(world, ctx, 0);
    }
    let cooling = gauge_of(&engine, 2);
    assert_eq!(cooling.status, GaugeStatus::Cooldown);
    assert_eq!(cooling.action, Some(ActionKind::Attack));
    assert_eq!(cooling.part, Some(PartSlot::RightArm));

    // Untouchable legs do not help: the cooling berserker is hit critically.
    let legs = engine.world().get::<&PartSet>(machine).unwrap().get(PartSlot::Legs);
    engine.world_mut().get::<&mut Part>(legs).unwrap().mobility = 1_000_000;
    let mut shot = charging_rifle(100.0, 2, PartSlot::Head);
    shot.status = GaugeStatus::Executing;
    set_gauge(&mut engine, 0, shot);
    {
        let (world, ctx) = engine.split_mut();
        ctx.set_phase(BattlePhase::Idle, 1);
        ctx.active_actor = Some(MachineId(0));
        ctx.set_phase(BattlePhase::Initiation, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        execution::initiate(world, ctx, &mut rng, 1);
    }
    let event = engine.context().action_event.clone().unwrap();
    assert_eq!(event.current_target, Some(MachineId(2)));
    assert!(event.result.hit);
    assert!(event.result.critical);
    assert!(!event.result.guarded);

    // Back at action choice the reservation is gone.
    let mut gauge = gauge_of(&engine, 2);
    gauge.progress = 99.0;
    gauge.cooldown_time = 1.0;
    assert!(gauge::advance(&mut gauge, 0.5));
    assert_eq!(gauge.status, GaugeStatus::ActionChoice);
    assert!(gauge.action.is_none());
    assert!(gauge.part.is_none());
}

// ---- Damage and defeat ----

fn damage_event(target: u32, part: PartSlot, damage: u32) -> DamageEvent {
    DamageEvent {
        attacker: MachineId(0),
        attacker_part: PartSlot::RightArm,
        target: MachineId(target),
        part,
        damage,
        critical: false,
        effects: Vec::new(),
    }
}

#[test]
fn test_damage_saturates_at_zero() {
    let mut engine = headless_engine(2);
    engine.context_mut().damage_event = Some(damage_event(3, PartSlot::RightArm, 999));
    let (world, ctx) = engine.split_mut();
    damage::run(world, ctx);

    assert_eq!(part_hp(&engine, 3, PartSlot::RightArm), 0);
    assert!(!defeated(&engine, 3), "only the head defeats a machine");
    assert!(engine.context().events.contains(&BattleEvent::PartBroken {
        machine: MachineId(3),
        slot: PartSlot::RightArm,
    }));
    assert!(engine.context().damage_event.is_none());
}

#[test]
fn test_defeat_only_via_head() {
    let mut engine = headless_engine(2);
    for slot in [PartSlot::RightArm, PartSlot::LeftArm, PartSlot::Legs] {
        engine.context_mut().damage_event = Some(damage_event(3, slot, 999));
        let (world, ctx) = engine.split_mut();
        damage::run(world, ctx);
    }
    assert!(!defeated(&engine, 3));

    engine.context_mut().waiting.push_back(MachineId(3));
    engine.context_mut().damage_event = Some(damage_event(3, PartSlot::Head, 999));
    let (world, ctx) = engine.split_mut();
    damage::run(world, ctx);
    assert!(defeated(&engine, 3));
    assert!(!engine.context().waiting.contains(&MachineId(3)));
    assert!(engine.context().events.contains(&BattleEvent::MachineDefeated {
        machine: MachineId(3),
    }));
}

#[test]
fn test_hammer_stop_lands_on_target_gauge() {
    let mut engine = headless_engine(2);
    let mut event = damage_event(3, PartSlot::Legs, 5);
    event.effects.push(StatusEffect {
        kind: StatusEffectKind::Stop,
        remaining: 1.0,
    });
    engine.context_mut().damage_event = Some(event);
    let (world, ctx) = engine.split_mut();
    damage::run(world, ctx);

    assert_eq!(gauge_of(&engine, 3).effects.len(), 1);
    assert_eq!(part_hp(&engine, 3, PartSlot::Legs), 45);
    assert!(engine.context().pending_log.iter().any(|l| l.contains("stopped")));
}

#[test]
fn test_non_leader_defeat_continues_battle() {
    let mut engine = headless_engine(8);
    set_part_hp(&mut engine, 3, PartSlot::Head, 0);
    engine.update(0.1);
    assert!(defeated(&engine, 3));
    assert!(!engine.is_over());
}

#[test]
fn test_leader_defeat_ends_battle() {
    let mut engine = headless_engine(8);
    set_part_hp(&mut engine, 2, PartSlot::Head, 0);
    engine.update(0.1);
    assert!(engine.is_over());
    assert_eq!(engine.phase(), BattlePhase::GameOver);
    assert_eq!(engine.outcome(), Some(BattleOutcome::Victory(Team::One)));
    assert!(engine.events().contains(&BattleEvent::BattleOver {
        outcome: BattleOutcome::Victory(Team::One),
    }));

    // Nothing moves once the battle is over.
    let tick = engine.time().tick;
    engine.update(0.1);
    assert_eq!(engine.time().tick, tick);
}

#[test]
fn test_both_leaders_down_is_a_draw() {
    let mut engine = headless_engine(8);
    set_part_hp(&mut engine, 0, PartSlot::Head, 0);
    set_part_hp(&mut engine, 2, PartSlot::Head, 0);
    engine.update(0.1);
    assert_eq!(engine.outcome(), Some(BattleOutcome::Draw));
}

#[test]
fn test_auto_battle_reaches_game_over() {
    let mut engine = headless_engine(2024);
    for _ in 0..20_000 {
        engine.update(0.1);
        if engine.is_over() {
            break;
        }
    }
    let outcome = engine.outcome().expect("battle should finish");
    let snapshot = engine.snapshot();
    let fallen_leaders: Vec<Team> = snapshot
        .machines
        .iter()
        .filter(|m| m.leader && m.defeated)
        .map(|m| m.team)
        .collect();
    match outcome {
        BattleOutcome::Victory(winner) => assert_eq!(fallen_leaders, vec![winner.opponent()]),
        BattleOutcome::Draw => assert_eq!(fallen_leaders.len(), 2),
    }
    for machine in &snapshot.machines {
        let head = machine.parts.iter().find(|p| p.slot == PartSlot::Head).unwrap();
        assert_eq!(machine.defeated, head.hp == 0);
    }
    assert!(!snapshot.battle_log.is_empty());
}

// ---- Player input ----

fn wait_for_player(engine: &mut BattleEngine) {
    for _ in 0..100 {
        engine.update(0.1);
        if engine.phase() == BattlePhase::PlayerInput {
            return;
        }
    }
    panic!("player never got a turn");
}

#[test]
fn test_player_menu_navigation() {
    let mut engine = engine_with(BattleConfig::default());
    wait_for_player(&mut engine);
    assert_eq!(engine.context().active_actor, Some(MachineId(0)));
    assert_eq!(
        engine.available_actions(),
        vec![
            ActionOption::Attack(PartSlot::Head),
            ActionOption::Attack(PartSlot::RightArm),
            ActionOption::Attack(PartSlot::LeftArm),
            ActionOption::Skip,
        ]
    );

    engine.queue_command(PlayerCommand::SelectPart {
        slot: PartSlot::Legs,
    });
    engine.update(0.1);
    assert_eq!(engine.phase(), BattlePhase::PlayerInput, "legs cannot attack");

    engine.queue_command(PlayerCommand::MoveCursor { delta: -1 });
    engine.update(0.1);
    assert_eq!(engine.snapshot().cursor, 3);

    engine.queue_command(PlayerCommand::Cancel);
    engine.update(0.1);
    assert_eq!(engine.snapshot().cursor, 0);

    engine.apply_input(&LogicalInput {
        down: true,
        ..Default::default()
    });
    engine.apply_input(&LogicalInput {
        right: true,
        ..Default::default()
    });
    engine.update(0.1);
    assert_eq!(engine.snapshot().cursor, 2);

    engine.apply_input(&LogicalInput {
        confirm: true,
        ..Default::default()
    });
    engine.update(0.1);
    let gauge = gauge_of(&engine, 0);
    assert_eq!(gauge.status, GaugeStatus::Charging);
    assert_eq!(gauge.part, Some(PartSlot::LeftArm));
    assert!(engine.context().active_actor != Some(MachineId(0)));
}

#[test]
fn test_player_click_commits_entry_under_pointer() {
    let mut engine = engine_with(BattleConfig::default());
    wait_for_player(&mut engine);
    let entry_at = |_x: i32, y: i32| usize::try_from(y / 10).ok();

    // Entry 1 is the right arm; an out-of-range entry leaves the cursor alone.
    engine.apply_input_with_menu(
        &LogicalInput {
            pointer: Some((0, 90)),
            ..Default::default()
        },
        entry_at,
    );
    engine.update(0.1);
    assert_eq!(engine.phase(), BattlePhase::PlayerInput);
    assert_eq!(engine.snapshot().cursor, 0);

    engine.apply_input_with_menu(
        &LogicalInput {
            pointer: Some((0, 15)),
            click: true,
            ..Default::default()
        },
        entry_at,
    );
    engine.update(0.1);
    let gauge = gauge_of(&engine, 0);
    assert_eq!(gauge.status, GaugeStatus::Charging);
    assert_eq!(gauge.part, Some(PartSlot::RightArm));
}

#[test]
fn test_player_gauges_wait_for_input() {
    let mut engine = engine_with(BattleConfig::default());
    wait_for_player(&mut engine);
    let before = serde_json::to_string(&engine.snapshot().machines).unwrap();
    for _ in 0..10 {
        engine.update(0.1);
    }
    let after = serde_json::to_string(&engine.snapshot().machines).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_skip_path() {
    let mut engine = engine_with(BattleConfig::default());
    wait_for_player(&mut engine);
    engine.queue_command(PlayerCommand::Skip);
    engine.update(0.1);

    let gauge = gauge_of(&engine, 0);
    assert_eq!(gauge.status, GaugeStatus::Charging);
    assert_eq!(gauge.action, Some(ActionKind::Skip));
    assert_eq!(gauge.charging_time, SKIP_ACTION_DURATION);
    assert!(engine.events().contains(&BattleEvent::ActionCommitted {
        machine: MachineId(0),
        action: ActionKind::Skip,
        slot: None,
    }));

    let mut skip_logged = false;
    for _ in 0..2000 {
        match engine.phase() {
            BattlePhase::PlayerInput => engine.queue_command(PlayerCommand::Skip),
            BattlePhase::LogWait => engine.queue_command(PlayerCommand::AdvanceLog),
            _ => {}
        }
        engine.update(0.1);
        for event in engine.events() {
            if let BattleEvent::AttackResolved { attacker, .. } = event {
                assert_ne!(*attacker, MachineId(0), "skip must not attack");
            }
        }
        if engine.context().battle_log.iter().any(|l| l.contains("A0 is biding")) {
            skip_logged = true;
            break;
        }
        if engine.is_over() {
            break;
        }
    }
    assert!(skip_logged);
}

// ---- Log wait ----

#[test]
fn test_log_wait_reveals_lines_in_order() {
    let mut ctx = BattleContext::default();
    ctx.log("first");
    ctx.log("second");
    log_wait::run(&mut ctx, false, 0);
    assert_eq!(ctx.phase, BattlePhase::LogWait);
    assert_eq!(ctx.battle_log, vec!["first".to_string()]);

    // Without acknowledgement nothing moves.
    log_wait::run(&mut ctx, false, 1);
    assert_eq!(ctx.battle_log, vec!["first".to_string()]);

    log_wait::acknowledge(&mut ctx, 2);
    assert_eq!(ctx.battle_log, vec!["second".to_string()]);
    assert_eq!(ctx.phase, BattlePhase::LogWait);

    log_wait::acknowledge(&mut ctx, 3);
    assert!(ctx.battle_log.is_empty());
    assert_eq!(ctx.phase, BattlePhase::Idle);
}

#[test]
fn test_log_wait_auto_advance_holds_each_line_a_tick() {
    let mut ctx = BattleContext::default();
    ctx.log("only");
    log_wait::run(&mut ctx, true, 5);
    assert_eq!(ctx.battle_log, vec!["only".to_string()]);
    log_wait::run(&mut ctx, true, 6);
    assert!(ctx.battle_log.is_empty());
    assert_eq!(ctx.phase, BattlePhase::Idle);
}

#[test]
fn test_entering_idle_clears_in_flight_state() {
    let mut ctx = BattleContext::default();
    ctx.set_phase(BattlePhase::Initiation, 1);
    ctx.active_actor = Some(MachineId(1));
    ctx.cursor = 2;
    ctx.set_phase(BattlePhase::Idle, 2);
    assert!(ctx.active_actor.is_none());
    assert!(ctx.action_event.is_none());
    assert_eq!(ctx.cursor, 0);
    assert_eq!(ctx.events.len(), 2);
}
