use relay_defence_core::{baseline_catalog, Owner};
use relay_defence_system_enemy_factory::{EnemyFactory, EnemySpawnRequest};

#[test]
fn scaled_stats_never_escape_the_catalog_caps() {
    let catalog = baseline_catalog();
    let factory = EnemyFactory::default();
    let caps = catalog.caps;

    for tier in &catalog.tiers {
        for enemy in &catalog.enemies {
            for (wave, difficulty) in [(1_u32, 1.0_f32), (50, 4.0), (10_000, 80.0)] {
                let request = EnemySpawnRequest {
                    archetype_id: &enemy.id,
                    owner: Owner::Enemy,
                    wave_index: wave,
                    tier,
                    mission_difficulty: difficulty,
                    unit_count: 5,
                    is_elite: true,
                    is_boss: true,
                    run_boss_hp_mul: 40.0,
                    run_boss_damage_mul: 40.0,
                    boss_hp_mul: 25.0,
                    boss_damage_mul: 25.0,
                };

                let packet = factory
                    .create_enemy_packet(&catalog, &request)
                    .expect("catalog archetype");

                assert!(
                    (caps.min_hp..=caps.max_hp).contains(&packet.hp_per_unit),
                    "{} wave {wave}: hp {} escaped caps",
                    enemy.id,
                    packet.hp_per_unit,
                );
                assert!(
                    (caps.min_damage..=caps.max_damage).contains(&packet.damage),
                    "{} wave {wave}: damage {} escaped caps",
                    enemy.id,
                    packet.damage,
                );
                assert!(
                    (caps.min_speed..=caps.max_speed).contains(&packet.speed),
                    "{} wave {wave}: speed {} escaped caps",
                    enemy.id,
                    packet.speed,
                );
            }
        }
    }
}

#[test]
fn boss_factors_are_floored_not_zeroed() {
    let catalog = baseline_catalog();
    let tier = catalog.tier("NORMAL").expect("NORMAL tier");
    let factory = EnemyFactory::default();

    let mut crippled = EnemySpawnRequest::new("overlord", tier, 10);
    crippled.is_boss = true;
    crippled.run_boss_hp_mul = 0.0;
    crippled.boss_hp_mul = 0.0;

    let mut neutral = crippled.clone();
    neutral.run_boss_hp_mul = 0.5;
    neutral.boss_hp_mul = 0.5;

    let crippled_packet = factory
        .create_enemy_packet(&catalog, &crippled)
        .expect("spawn");
    let neutral_packet = factory
        .create_enemy_packet(&catalog, &neutral)
        .expect("spawn");

    // Sub-0.5 factors are floored to 0.5, so both requests scale equally.
    assert_eq!(crippled_packet.hp_per_unit, neutral_packet.hp_per_unit);
}

#[test]
fn elite_spawns_swap_visuals_and_resolve_drops() {
    let catalog = baseline_catalog();
    let tier = catalog.tier("NORMAL").expect("NORMAL tier");
    let factory = EnemyFactory::default();

    // The tank defines its own drop table.
    let mut elite_tank = EnemySpawnRequest::new("tank", tier, 1);
    elite_tank.is_elite = true;
    let packet = factory
        .create_enemy_packet(&catalog, &elite_tank)
        .expect("spawn");
    let tank = catalog.enemy("tank").expect("tank definition");

    assert_eq!(packet.size_scale, tank.visuals.elite_size_scale);
    assert_eq!(packet.tint, tank.visuals.elite_tint);
    assert_eq!(packet.elite_drop.as_ref(), tank.elite_drop.as_ref());
    assert_eq!(packet.hp_per_unit, tank.hp * catalog.balance.elite.hp_mul);

    // The runner has none and falls back to the catalog default.
    let mut elite_runner = EnemySpawnRequest::new("runner", tier, 1);
    elite_runner.is_elite = true;
    let packet = factory
        .create_enemy_packet(&catalog, &elite_runner)
        .expect("spawn");
    assert_eq!(
        packet.elite_drop.as_ref(),
        Some(&catalog.balance.default_elite_drop),
    );
}

#[test]
fn scaling_grows_monotonically_with_wave_index() {
    let catalog = baseline_catalog();
    let tier = catalog.tier("NORMAL").expect("NORMAL tier");
    let factory = EnemyFactory::default();

    let mut previous_hp = 0.0_f32;
    for wave in [1_u32, 5, 10, 20, 30] {
        let packet = factory
            .create_enemy_packet(&catalog, &EnemySpawnRequest::new("runner", tier, wave))
            .expect("spawn");
        assert!(
            packet.hp_per_unit > previous_hp,
            "hp must grow with wave index",
        );
        previous_hp = packet.hp_per_unit;
    }
}

#[test]
fn packet_carries_archetype_identity_and_behavior() {
    let catalog = baseline_catalog();
    let tier = catalog.tier("NORMAL").expect("NORMAL tier");
    let factory = EnemyFactory::default();

    let mut request = EnemySpawnRequest::new("splitter", tier, 3);
    request.unit_count = 4;
    let packet = factory
        .create_enemy_packet(&catalog, &request)
        .expect("spawn");

    assert_eq!(packet.archetype_id, "splitter");
    assert_eq!(packet.count, 4);
    assert_eq!(packet.base_count, 4);
    assert!(packet.behavior.split_on_death);
    assert_eq!(packet.owner, Owner::Enemy);
    assert_eq!(packet.progress, 0.0);
    assert_eq!(packet.age_sec, 0.0);
}
