//! Baseline tuning catalog compiled into the engine.
//!
//! Shipped missions load their catalogs from data; the baseline exists so
//! tools and tests always have a valid catalog without touching the
//! filesystem. Values here are the reference tuning the data files started
//! from.

use crate::content::{
    ArchetypeVisuals, BaselineCaps, BehaviorFlags, BossBalance, ContentCatalog,
    DifficultyTierDefinition, EliteBalance, EliteDrop, EnemyArchetypeDefinition, EnemyScaling,
    HandcraftedWave, HandcraftedWaveEntry, LinkLevelDefinition, MinibossBalance, PhaseRamp,
    TagWeightMul, WaveBalance, WaveModifierDefinition,
};
use crate::TintColor;

/// Builds the baseline content catalog.
#[must_use]
pub fn baseline_catalog() -> ContentCatalog {
    ContentCatalog {
        enemies: baseline_enemies(),
        modifiers: baseline_modifiers(),
        handcrafted_waves: baseline_handcrafted_waves(),
        balance: baseline_balance(),
        tiers: baseline_tiers(),
        link_levels: baseline_link_levels(),
        caps: BaselineCaps {
            min_hp: 1.0,
            max_hp: 50_000.0,
            min_damage: 0.5,
            max_damage: 2_500.0,
            min_speed: 0.05,
            max_speed: 6.0,
            max_outgoing_links_per_tower: 2,
        },
    }
}

fn baseline_enemies() -> Vec<EnemyArchetypeDefinition> {
    vec![
        archetype(
            "runner",
            "Runner",
            Stats {
                hp: 30.0,
                speed: 1.4,
                damage: 4.0,
                attack_range: 6.0,
                attack_cooldown_sec: 0.8,
            },
            &[],
            Spawn {
                cost: 10.0,
                weight: 30.0,
            },
            1.0,
            BehaviorFlags::default(),
            TintColor::from_rgb(0x2f, 0x95, 0x32),
            None,
        ),
        archetype(
            "swarmling",
            "Swarmling",
            Stats {
                hp: 9.0,
                speed: 1.8,
                damage: 1.5,
                attack_range: 4.0,
                attack_cooldown_sec: 0.6,
            },
            &["swarm"],
            Spawn {
                cost: 3.0,
                weight: 24.0,
            },
            1.0,
            BehaviorFlags::default(),
            TintColor::from_rgb(0xff, 0xc1, 0x07),
            None,
        ),
        archetype(
            "tank",
            "Tank",
            Stats {
                hp: 90.0,
                speed: 0.7,
                damage: 9.0,
                attack_range: 5.0,
                attack_cooldown_sec: 1.4,
            },
            &["tank"],
            Spawn {
                cost: 26.0,
                weight: 14.0,
            },
            1.5,
            BehaviorFlags::default(),
            TintColor::from_rgb(0x58, 0x47, 0xff),
            Some(EliteDrop {
                gold: 35,
                buff_id: "tower_regen_surge".to_owned(),
            }),
        ),
        archetype(
            "shieldbearer",
            "Shieldbearer",
            Stats {
                hp: 60.0,
                speed: 0.9,
                damage: 5.0,
                attack_range: 5.0,
                attack_cooldown_sec: 1.1,
            },
            &[],
            Spawn {
                cost: 20.0,
                weight: 12.0,
            },
            1.3,
            BehaviorFlags {
                shield_cycling: true,
                ..BehaviorFlags::default()
            },
            TintColor::from_rgb(0x4d, 0x7a, 0x8c),
            None,
        ),
        archetype(
            "splitter",
            "Splitter",
            Stats {
                hp: 44.0,
                speed: 1.0,
                damage: 4.0,
                attack_range: 5.0,
                attack_cooldown_sec: 1.0,
            },
            &[],
            Spawn {
                cost: 16.0,
                weight: 10.0,
            },
            1.0,
            BehaviorFlags {
                split_on_death: true,
                ..BehaviorFlags::default()
            },
            TintColor::from_rgb(0xc8, 0x2a, 0x36),
            None,
        ),
        // Spawned only as a split child; the generator never picks it.
        archetype(
            "splitling",
            "Splitling",
            Stats {
                hp: 12.0,
                speed: 1.5,
                damage: 2.0,
                attack_range: 4.0,
                attack_cooldown_sec: 0.7,
            },
            &["swarm"],
            Spawn {
                cost: 2.0,
                weight: 6.0,
            },
            1.0,
            BehaviorFlags::default(),
            TintColor::from_rgb(0xde, 0x6a, 0x73),
            None,
        ),
        archetype(
            "severer",
            "Severer",
            Stats {
                hp: 38.0,
                speed: 1.1,
                damage: 6.0,
                attack_range: 7.0,
                attack_cooldown_sec: 1.2,
            },
            &[],
            Spawn {
                cost: 18.0,
                weight: 8.0,
            },
            1.1,
            BehaviorFlags {
                cuts_links: true,
                ..BehaviorFlags::default()
            },
            TintColor::from_rgb(0x8a, 0x2b, 0xe2),
            None,
        ),
        archetype(
            "herald",
            "Herald",
            Stats {
                hp: 52.0,
                speed: 0.95,
                damage: 3.0,
                attack_range: 5.0,
                attack_cooldown_sec: 1.3,
            },
            &["support"],
            Spawn {
                cost: 22.0,
                weight: 7.0,
            },
            1.2,
            BehaviorFlags {
                support_aura: true,
                ..BehaviorFlags::default()
            },
            TintColor::from_rgb(0x3c, 0xb4, 0xa4),
            None,
        ),
        archetype(
            "warden",
            "Warden",
            Stats {
                hp: 420.0,
                speed: 0.6,
                damage: 18.0,
                attack_range: 7.0,
                attack_cooldown_sec: 1.6,
            },
            &["miniboss"],
            Spawn {
                cost: 90.0,
                weight: 0.0,
            },
            1.8,
            BehaviorFlags {
                shield_cycling: true,
                ..BehaviorFlags::default()
            },
            TintColor::from_rgb(0xb8, 0x86, 0x0b),
            Some(EliteDrop {
                gold: 120,
                buff_id: "link_overcharge".to_owned(),
            }),
        ),
        archetype(
            "overlord",
            "Overlord",
            Stats {
                hp: 2_400.0,
                speed: 0.45,
                damage: 40.0,
                attack_range: 9.0,
                attack_cooldown_sec: 2.0,
            },
            &["boss"],
            Spawn {
                cost: 400.0,
                weight: 0.0,
            },
            2.2,
            BehaviorFlags {
                shield_cycling: true,
                support_aura: true,
                ..BehaviorFlags::default()
            },
            TintColor::from_rgb(0x1a, 0x1a, 0x2e),
            None,
        ),
    ]
}

struct Stats {
    hp: f32,
    speed: f32,
    damage: f32,
    attack_range: f32,
    attack_cooldown_sec: f32,
}

struct Spawn {
    cost: f32,
    weight: f32,
}

#[allow(clippy::too_many_arguments)]
fn archetype(
    id: &str,
    name: &str,
    stats: Stats,
    tags: &[&str],
    spawn: Spawn,
    armor_mul: f32,
    behavior: BehaviorFlags,
    tint: TintColor,
    elite_drop: Option<EliteDrop>,
) -> EnemyArchetypeDefinition {
    EnemyArchetypeDefinition {
        id: id.to_owned(),
        name: name.to_owned(),
        hp: stats.hp,
        speed: stats.speed,
        damage: stats.damage,
        attack_range: stats.attack_range,
        attack_cooldown_sec: stats.attack_cooldown_sec,
        tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
        spawn_cost: spawn.cost,
        spawn_weight: spawn.weight,
        armor_mul,
        behavior,
        visuals: ArchetypeVisuals {
            size_scale: 1.0,
            tint,
            elite_size_scale: 1.35,
            elite_tint: TintColor::from_rgb(
                tint.red().saturating_add(40),
                tint.green().saturating_add(24),
                tint.blue().saturating_sub(10),
            ),
        },
        elite_drop,
    }
}

fn baseline_modifiers() -> Vec<WaveModifierDefinition> {
    vec![
        modifier("swift", "Swift", |def| def.speed_mul = 1.25),
        modifier("armored", "Armored", |def| def.armor_mul = 1.4),
        modifier("relentless", "Relentless", |def| {
            def.spawn_rate_mul = 1.35;
        }),
        modifier("gilded", "Gilded", |def| def.elite_chance_bonus = 0.12),
        modifier("warden_call", "Warden's Call", |def| {
            def.force_miniboss_escort = true;
        }),
        modifier("teeming", "Teeming", |def| {
            def.spawn_rate_mul = 1.15;
            def.tag_weight_muls = vec![TagWeightMul {
                tag: "swarm".to_owned(),
                mul: 2.5,
            }];
        }),
        modifier("bulwark", "Bulwark", |def| {
            def.armor_mul = 1.2;
            def.tag_weight_muls = vec![TagWeightMul {
                tag: "tank".to_owned(),
                mul: 2.0,
            }];
        }),
    ]
}

fn modifier(
    id: &str,
    name: &str,
    configure: impl FnOnce(&mut WaveModifierDefinition),
) -> WaveModifierDefinition {
    let mut definition = WaveModifierDefinition {
        id: id.to_owned(),
        name: name.to_owned(),
        speed_mul: 1.0,
        armor_mul: 1.0,
        spawn_rate_mul: 1.0,
        elite_chance_bonus: 0.0,
        force_miniboss_escort: false,
        tag_weight_muls: Vec::new(),
    };
    configure(&mut definition);
    definition
}

fn baseline_handcrafted_waves() -> Vec<HandcraftedWave> {
    vec![HandcraftedWave {
        wave_index: 1,
        modifier_ids: Vec::new(),
        has_miniboss_escort: false,
        entries: vec![
            HandcraftedWaveEntry {
                time_offset_sec: 0.0,
                enemy_id: "runner".to_owned(),
                count: 3,
                elite_chance: 0.0,
                lane_index: 0,
            },
            HandcraftedWaveEntry {
                time_offset_sec: 4.0,
                enemy_id: "runner".to_owned(),
                count: 4,
                elite_chance: 0.0,
                lane_index: 1,
            },
            HandcraftedWaveEntry {
                time_offset_sec: 9.0,
                enemy_id: "swarmling".to_owned(),
                count: 6,
                elite_chance: 0.0,
                lane_index: 2,
            },
        ],
    }]
}

fn baseline_balance() -> WaveBalance {
    WaveBalance {
        total_waves: 30,
        spawn_interval_sec: 2.4,
        jitter_min: 0.8,
        jitter_max: 1.25,
        budget_base: 40.0,
        budget_per_wave: 14.0,
        budget_min: 30.0,
        budget_max: 1_400.0,
        count_cap: 6,
        swarm_count_cap: 10,
        ramp: PhaseRamp {
            early_rate: 0.04,
            mid_rate: 0.06,
            late_rate: 0.09,
        },
        elite: EliteBalance {
            hp_mul: 2.6,
            damage_mul: 1.8,
            base_chance: 0.02,
            chance_per_wave: 0.006,
            chance_cap: 0.35,
        },
        boss: BossBalance {
            final_wave_index: 30,
            hp_multiplier: 4.0,
            damage_multiplier: 2.0,
        },
        miniboss: MinibossBalance {
            start_wave: 8,
            chance_mul: 1.6,
        },
        scaling: EnemyScaling {
            hp_per_wave: 0.11,
            hp_per_difficulty_tier: 0.35,
            damage_per_wave: 0.07,
            damage_per_difficulty_tier: 0.25,
            speed_per_wave: 0.012,
        },
        excluded_enemy_ids: vec!["splitling".to_owned()],
        default_elite_drop: EliteDrop {
            gold: 20,
            buff_id: "gold_rush".to_owned(),
        },
    }
}

fn baseline_tiers() -> Vec<DifficultyTierDefinition> {
    vec![
        DifficultyTierDefinition {
            id: "NORMAL".to_owned(),
            spawn_count_mul: 1.0,
            intensity_mul: 1.0,
            boss_hp_mul: 1.0,
            boss_damage_mul: 1.0,
            guaranteed_miniboss_wave: 12,
        },
        DifficultyTierDefinition {
            id: "HARD".to_owned(),
            spawn_count_mul: 1.25,
            intensity_mul: 1.2,
            boss_hp_mul: 1.5,
            boss_damage_mul: 1.3,
            guaranteed_miniboss_wave: 9,
        },
        DifficultyTierDefinition {
            id: "ASCENDED".to_owned(),
            spawn_count_mul: 1.6,
            intensity_mul: 1.45,
            boss_hp_mul: 2.25,
            boss_damage_mul: 1.7,
            guaranteed_miniboss_wave: 6,
        },
    ]
}

fn baseline_link_levels() -> Vec<LinkLevelDefinition> {
    vec![
        LinkLevelDefinition {
            level: 1,
            speed_mul: 1.0,
            armor_bonus: 0.0,
            damage_bonus: 0.0,
            max_integrity: 100.0,
            overcharge_drain: 0.0,
        },
        LinkLevelDefinition {
            level: 2,
            speed_mul: 1.15,
            armor_bonus: 1.0,
            damage_bonus: 1.0,
            max_integrity: 160.0,
            overcharge_drain: 0.5,
        },
        LinkLevelDefinition {
            level: 3,
            speed_mul: 1.3,
            armor_bonus: 2.0,
            damage_bonus: 2.5,
            max_integrity: 240.0,
            overcharge_drain: 1.2,
        },
        LinkLevelDefinition {
            level: 4,
            speed_mul: 1.45,
            armor_bonus: 3.5,
            damage_bonus: 4.0,
            max_integrity: 340.0,
            overcharge_drain: 2.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_excludes_splitling_from_direct_spawning() {
        let catalog = baseline_catalog();
        assert!(catalog
            .balance
            .excluded_enemy_ids
            .iter()
            .any(|id| id == "splitling"));
        assert!(catalog.enemy("splitling").is_some());
    }

    #[test]
    fn baseline_bosses_carry_no_spawn_weight() {
        let catalog = baseline_catalog();
        for enemy in &catalog.enemies {
            if enemy.has_tag("boss") || enemy.has_tag("miniboss") {
                assert_eq!(enemy.spawn_weight, 0.0, "{} must not be rolled", enemy.id);
            }
        }
    }

    #[test]
    fn baseline_normal_tier_is_identity() {
        let catalog = baseline_catalog();
        let normal = catalog.tier("NORMAL").expect("NORMAL tier");
        assert_eq!(normal.spawn_count_mul, 1.0);
        assert_eq!(normal.intensity_mul, 1.0);
        assert_eq!(normal.boss_hp_mul, 1.0);
        assert_eq!(normal.boss_damage_mul, 1.0);
    }

    #[test]
    fn baseline_defines_required_roles() {
        let catalog = baseline_catalog();
        assert!(catalog.first_with_tag("boss").is_some());
        assert!(catalog.first_with_tag("miniboss").is_some());
        assert!(catalog.first_with_tag("support").is_some());
        assert!(catalog.first_with_tag("swarm").is_some());
    }
}
