#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy stat-scaling pipeline.
//!
//! Turns one [`EnemySpawnRequest`] into one fully-initialized [`UnitPacket`].
//! The pipeline is a fixed sequence of multipliers followed by a hard clamp
//! against the catalog-wide caps; no PRNG is involved, so identical requests
//! against the same catalog produce bit-identical stats.

use relay_defence_core::{
    ContentCatalog, DifficultyTierDefinition, Owner, UnitPacket,
};
use thiserror::Error;

/// Lowest value any boss multiplier factor may contribute.
const BOSS_FACTOR_FLOOR: f32 = 0.5;
/// Armor points granted per whole step of the armor multiplier above 1.0.
const ARMOR_PER_MULTIPLIER_STEP: f32 = 10.0;

/// One spawn request resolved by the orchestrator.
#[derive(Clone, Debug)]
pub struct EnemySpawnRequest<'a> {
    /// Archetype to spawn; must exist in the loaded catalog.
    pub archetype_id: &'a str,
    /// Faction the packet fights for.
    pub owner: Owner,
    /// Wave the spawn belongs to; scaling is neutral at wave 1.
    pub wave_index: u32,
    /// Resolved difficulty tier configuration.
    pub tier: &'a DifficultyTierDefinition,
    /// Mission difficulty scalar; 1.0 is baseline.
    pub mission_difficulty: f32,
    /// Units in the spawned packet.
    pub unit_count: u32,
    /// Whether the spawn is promoted to elite.
    pub is_elite: bool,
    /// Whether the spawn is a boss.
    pub is_boss: bool,
    /// Per-run boss hit-point multiplier from the difficulty context.
    pub run_boss_hp_mul: f32,
    /// Per-run boss damage multiplier from the difficulty context.
    pub run_boss_damage_mul: f32,
    /// Per-spawn boss hit-point sub-modifier.
    pub boss_hp_mul: f32,
    /// Per-spawn boss damage sub-modifier.
    pub boss_damage_mul: f32,
}

impl<'a> EnemySpawnRequest<'a> {
    /// Baseline request for a single-unit regular spawn.
    #[must_use]
    pub fn new(archetype_id: &'a str, tier: &'a DifficultyTierDefinition, wave_index: u32) -> Self {
        Self {
            archetype_id,
            owner: Owner::Enemy,
            wave_index,
            tier,
            mission_difficulty: 1.0,
            unit_count: 1,
            is_elite: false,
            is_boss: false,
            run_boss_hp_mul: 1.0,
            run_boss_damage_mul: 1.0,
            boss_hp_mul: 1.0,
            boss_damage_mul: 1.0,
        }
    }
}

/// The one runtime failure in the simulation core: a spawn request naming
/// content that was never loaded is a programmer error, and recovering
/// silently would insert an invalid entity into the world.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// The requested archetype id is absent from the loaded catalog.
    #[error("unknown enemy archetype '{0}'")]
    UnknownArchetype(String),
}

/// Pure factory that produces fully-scaled enemy packets.
#[derive(Debug, Default)]
pub struct EnemyFactory;

impl EnemyFactory {
    /// Builds one packet from a spawn request.
    pub fn create_enemy_packet(
        &self,
        catalog: &ContentCatalog,
        request: &EnemySpawnRequest<'_>,
    ) -> Result<UnitPacket, SpawnError> {
        let archetype = catalog
            .enemy(request.archetype_id)
            .ok_or_else(|| SpawnError::UnknownArchetype(request.archetype_id.to_owned()))?;

        let scaling = &catalog.balance.scaling;
        let waves_past_first = request.wave_index.saturating_sub(1) as f32;
        let difficulty_past_base = (request.mission_difficulty - 1.0).max(0.0);

        let hp_scale = 1.0
            + waves_past_first * scaling.hp_per_wave
            + difficulty_past_base * scaling.hp_per_difficulty_tier;
        let damage_scale = 1.0
            + waves_past_first * scaling.damage_per_wave
            + difficulty_past_base * scaling.damage_per_difficulty_tier;
        let speed_scale = 1.0 + waves_past_first * scaling.speed_per_wave;

        let mut hp = archetype.hp * hp_scale;
        let mut damage = archetype.damage * damage_scale;
        let speed = archetype.speed * speed_scale;

        if request.is_elite {
            hp *= catalog.balance.elite.hp_mul;
            damage *= catalog.balance.elite.damage_mul;
        }

        if request.is_boss {
            hp *= catalog.balance.boss.hp_multiplier.max(BOSS_FACTOR_FLOOR)
                * request.tier.boss_hp_mul.max(BOSS_FACTOR_FLOOR)
                * request.run_boss_hp_mul.max(BOSS_FACTOR_FLOOR)
                * request.boss_hp_mul.max(BOSS_FACTOR_FLOOR);
            damage *= catalog.balance.boss.damage_multiplier.max(BOSS_FACTOR_FLOOR)
                * request.tier.boss_damage_mul.max(BOSS_FACTOR_FLOOR)
                * request.run_boss_damage_mul.max(BOSS_FACTOR_FLOOR)
                * request.boss_damage_mul.max(BOSS_FACTOR_FLOOR);
        }

        // The caps have the last word; no downstream code may exceed them.
        let caps = &catalog.caps;
        let hp = hp.clamp(caps.min_hp, caps.max_hp);
        let damage = damage.clamp(caps.min_damage, caps.max_damage);
        let speed = speed.clamp(caps.min_speed, caps.max_speed);

        let (size_scale, tint) = if request.is_elite {
            (
                archetype.visuals.elite_size_scale,
                archetype.visuals.elite_tint,
            )
        } else {
            (archetype.visuals.size_scale, archetype.visuals.tint)
        };

        let elite_drop = if request.is_elite {
            Some(
                archetype
                    .elite_drop
                    .clone()
                    .unwrap_or_else(|| catalog.balance.default_elite_drop.clone()),
            )
        } else {
            None
        };

        let armor = armor_for_multiplier(archetype.armor_mul);

        Ok(UnitPacket {
            owner: request.owner,
            count: request.unit_count,
            base_count: request.unit_count,
            base_hp_per_unit: hp,
            hp_per_unit: hp,
            base_damage: damage,
            damage,
            base_speed: speed,
            speed,
            base_armor: armor,
            armor,
            archetype_id: archetype.id.clone(),
            tags: archetype.tags.clone(),
            attack_range: archetype.attack_range,
            attack_cooldown_sec: archetype.attack_cooldown_sec,
            behavior: archetype.behavior,
            size_scale,
            tint,
            is_elite: request.is_elite,
            is_boss: request.is_boss,
            elite_drop,
            ..UnitPacket::default()
        })
    }
}

/// Derives flat armor points from an armor multiplier.
///
/// Base and effective armor are both seeded from this value at spawn time
/// and remain independently mutable afterwards.
#[must_use]
pub fn armor_for_multiplier(multiplier: f32) -> f32 {
    ((multiplier - 1.0) * ARMOR_PER_MULTIPLIER_STEP).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_defence_core::baseline_catalog;

    #[test]
    fn wave_one_baseline_spawn_equals_raw_base_stats() {
        let catalog = baseline_catalog();
        let tier = catalog.tier("NORMAL").expect("NORMAL tier");
        let factory = EnemyFactory::default();

        let packet = factory
            .create_enemy_packet(&catalog, &EnemySpawnRequest::new("tank", tier, 1))
            .expect("tank exists");

        let tank = catalog.enemy("tank").expect("tank definition");
        assert_eq!(packet.hp_per_unit, tank.hp);
        assert_eq!(packet.damage, tank.damage);
        assert_eq!(packet.speed, tank.speed);
        assert_eq!(packet.base_hp_per_unit, tank.hp);
        assert_eq!(packet.attack_range, tank.attack_range);
        assert!(!packet.is_elite);
        assert!(packet.elite_drop.is_none());
    }

    #[test]
    fn unknown_archetype_is_rejected() {
        let catalog = baseline_catalog();
        let tier = catalog.tier("NORMAL").expect("NORMAL tier");
        let factory = EnemyFactory::default();

        let result =
            factory.create_enemy_packet(&catalog, &EnemySpawnRequest::new("gremlin", tier, 1));
        assert_eq!(
            result,
            Err(SpawnError::UnknownArchetype("gremlin".to_owned())),
        );
    }

    #[test]
    fn armor_derivation_is_pure_and_floored() {
        assert_eq!(armor_for_multiplier(1.0), 0.0);
        assert_eq!(armor_for_multiplier(1.5), 5.0);
        assert_eq!(armor_for_multiplier(0.5), 0.0);
    }

    #[test]
    fn identical_requests_yield_identical_packets() {
        let catalog = baseline_catalog();
        let tier = catalog.tier("ASCENDED").expect("ASCENDED tier");
        let factory = EnemyFactory::default();

        let mut request = EnemySpawnRequest::new("shieldbearer", tier, 17);
        request.mission_difficulty = 2.5;
        request.is_elite = true;

        let first = factory
            .create_enemy_packet(&catalog, &request)
            .expect("spawn");
        let second = factory
            .create_enemy_packet(&catalog, &request)
            .expect("spawn");
        assert_eq!(first, second);
    }
}
