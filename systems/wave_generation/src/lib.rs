#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic procedural wave generation.
//!
//! Maps `(run seed, wave index, difficulty tier, mission difficulty, lane
//! count)` to a reproducible [`WavePlan`]. Handcrafted and boss waves are
//! pure functions of their inputs; procedural waves consume a fresh
//! [`rng::Mulberry32`] seeded per wave, so plans are byte-identical for
//! identical inputs regardless of call order or process restarts.

pub mod rng;

use std::cmp::Ordering;

use relay_defence_core::{
    ContentCatalog, DifficultyTierDefinition, EnemyArchetypeDefinition, HandcraftedWave,
    ModifierEffects, WaveBalance, WaveModifierDefinition, WavePlan, WaveSpawnEntry,
};
use sha2::{Digest, Sha256};

use rng::{mix_seed, Mulberry32};

/// Seconds between the last main entry and the escort miniboss.
const ESCORT_MINIBOSS_DELAY_SEC: f32 = 2.0;
/// Seconds between the last main entry and the escort support packet.
const ESCORT_SUPPORT_DELAY_SEC: f32 = 3.0;
/// Seconds between the last main entry and the escort tank packet.
const ESCORT_TANK_DELAY_SEC: f32 = 4.5;

/// Inputs resolved by the difficulty context for one wave generation call.
#[derive(Clone, Copy, Debug)]
pub struct WaveRequest<'a> {
    /// Seed fixed for the whole run.
    pub run_seed: u32,
    /// Index of the wave to generate.
    pub wave_index: u32,
    /// Resolved difficulty tier configuration.
    pub tier: &'a DifficultyTierDefinition,
    /// Mission difficulty scalar; 1.0 is baseline.
    pub mission_difficulty: f32,
    /// Number of lanes enemy packets may travel.
    pub lane_count: u32,
}

/// Pure system that generates deterministic [`WavePlan`] values.
#[derive(Debug, Default)]
pub struct WaveGeneration;

impl WaveGeneration {
    /// Generates the plan for one wave index.
    #[must_use]
    pub fn generate(&self, catalog: &ContentCatalog, request: &WaveRequest<'_>) -> WavePlan {
        if let Some(handcrafted) = catalog.handcrafted(request.wave_index) {
            return scaled_handcrafted(catalog, request, handcrafted);
        }

        if request.wave_index == catalog.balance.boss.final_wave_index {
            return boss_plan(catalog, request);
        }

        procedural_plan(catalog, request)
    }
}

/// Derives a 32-bit seed salt from a difficulty tier identifier.
#[must_use]
pub fn tier_seed_salt(tier_id: &str) -> u32 {
    let digest = Sha256::digest(tier_id.as_bytes());
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

fn scaled_handcrafted(
    catalog: &ContentCatalog,
    request: &WaveRequest<'_>,
    handcrafted: &HandcraftedWave,
) -> WavePlan {
    let balance = &catalog.balance;
    let count_mul = spawn_count_multiplier(balance, request);

    let mut entries: Vec<WaveSpawnEntry> = handcrafted
        .entries
        .iter()
        .map(|entry| WaveSpawnEntry {
            time_offset_sec: entry.time_offset_sec,
            enemy_id: entry.enemy_id.clone(),
            count: scale_count(entry.count, count_mul),
            elite_chance: (entry.elite_chance * count_mul).clamp(0.0, balance.elite.chance_cap),
            lane_index: normalize_lane(entry.lane_index, request.lane_count),
        })
        .collect();
    sort_entries(&mut entries);

    WavePlan::new(
        request.wave_index,
        handcrafted.modifier_ids.clone(),
        entries,
        handcrafted.has_miniboss_escort,
        false,
    )
}

fn boss_plan(catalog: &ContentCatalog, request: &WaveRequest<'_>) -> WavePlan {
    let count_mul = request.tier.spawn_count_mul;
    let spawnable = spawnable_archetypes(catalog);
    let mut entries = Vec::new();

    if let Some(boss) = catalog.first_with_tag("boss") {
        entries.push(fixed_entry(0.0, &boss.id, 1, 0));
    }

    if let Some(miniboss) = catalog.first_with_tag("miniboss") {
        entries.push(fixed_entry(4.0, &miniboss.id, 1, 0));
    }

    // Two support waves flank the boss, drawn from the regular roster.
    if let Some(first) = spawnable.first() {
        entries.push(fixed_entry(8.0, &first.id, scale_count(4, count_mul), 0));
    }
    if let Some(second) = spawnable.get(1).or_else(|| spawnable.first()) {
        entries.push(fixed_entry(14.0, &second.id, scale_count(6, count_mul), 1));
    }

    for entry in &mut entries {
        entry.lane_index = normalize_lane(entry.lane_index, request.lane_count);
    }
    sort_entries(&mut entries);

    WavePlan::new(request.wave_index, Vec::new(), entries, true, true)
}

fn procedural_plan(catalog: &ContentCatalog, request: &WaveRequest<'_>) -> WavePlan {
    let balance = &catalog.balance;
    let seed = mix_seed(
        request.run_seed,
        request.wave_index,
        tier_seed_salt(&request.tier.id),
    );
    let mut rng = Mulberry32::new(seed);

    let applied = roll_modifiers(catalog, request, &mut rng);
    let effects = ModifierEffects::combine(applied.iter().copied());
    let modifier_ids: Vec<String> = applied.iter().map(|modifier| modifier.id.clone()).collect();

    let count_mul = spawn_count_multiplier(balance, request);
    let spawnable = spawnable_archetypes(catalog);
    let elite_chance = (balance.elite.base_chance
        + request.wave_index as f32 * balance.elite.chance_per_wave
        + effects.elite_chance_bonus)
        .clamp(0.0, balance.elite.chance_cap);

    let mut budget = ((balance.budget_base + request.wave_index as f32 * balance.budget_per_wave)
        * request.mission_difficulty
        * request.tier.intensity_mul)
        .clamp(balance.budget_min, balance.budget_max);

    let base_interval = balance.spawn_interval_sec
        / (effects.spawn_rate_mul * request.tier.intensity_mul.max(0.55)).max(0.3);

    let mut entries = Vec::new();
    let mut offset = 0.0_f32;

    while budget > 0.0 && !spawnable.is_empty() {
        let archetype = pick_weighted(&spawnable, &effects, &mut rng);
        let cap = if archetype.has_tag("swarm") {
            balance.swarm_count_cap
        } else {
            balance.count_cap
        };

        let sampled = 1 + rng.below(cap.max(1));
        let mut count = scale_count(sampled, count_mul);
        // Clamp to whole affordable units, but never below one: only the
        // final entry may overshoot, by less than one spawn's cost.
        let affordable = (budget / archetype.spawn_cost).floor() as u32;
        count = count.min(affordable.max(1));

        budget -= count as f32 * archetype.spawn_cost;
        entries.push(WaveSpawnEntry {
            time_offset_sec: offset,
            enemy_id: archetype.id.clone(),
            count,
            elite_chance,
            lane_index: rng.below(request.lane_count.max(1)),
        });

        let jitter = rng.range_f32(balance.jitter_min, balance.jitter_max);
        offset += base_interval * jitter;
    }

    let has_escort = maybe_inject_escort(catalog, request, &effects, &mut rng, &mut entries);
    sort_entries(&mut entries);

    WavePlan::new(
        request.wave_index,
        modifier_ids,
        entries,
        has_escort,
        false,
    )
}

fn roll_modifiers<'a>(
    catalog: &'a ContentCatalog,
    request: &WaveRequest<'_>,
    rng: &mut Mulberry32,
) -> Vec<&'a WaveModifierDefinition> {
    let mut pool: Vec<&WaveModifierDefinition> = catalog.modifiers.iter().collect();
    let mut applied = Vec::new();
    let roll_count = if request.wave_index >= 4 { 2 } else { 1 };

    // Guaranteed escort cadence: consumed from the pool before random picks
    // so the same modifier cannot be double-selected.
    let escort_due = request.wave_index >= request.tier.guaranteed_miniboss_wave
        && request.wave_index % 3 == 0;
    if escort_due {
        if let Some(position) = pool
            .iter()
            .position(|modifier| modifier.force_miniboss_escort)
        {
            applied.push(pool.remove(position));
        }
    }

    while applied.len() < roll_count && !pool.is_empty() {
        let pick = rng.below(pool.len() as u32) as usize;
        applied.push(pool.remove(pick));
    }

    applied
}

fn spawnable_archetypes(catalog: &ContentCatalog) -> Vec<&EnemyArchetypeDefinition> {
    catalog
        .enemies
        .iter()
        .filter(|enemy| {
            enemy.spawn_weight > 0.0
                && enemy.spawn_cost > 0.0
                && !enemy.has_tag("boss")
                && !enemy.has_tag("miniboss")
                && !catalog
                    .balance
                    .excluded_enemy_ids
                    .iter()
                    .any(|excluded| excluded == &enemy.id)
        })
        .collect()
}

fn pick_weighted<'a>(
    candidates: &[&'a EnemyArchetypeDefinition],
    effects: &ModifierEffects,
    rng: &mut Mulberry32,
) -> &'a EnemyArchetypeDefinition {
    let weights: Vec<f32> = candidates
        .iter()
        .map(|enemy| enemy.spawn_weight * effects.weight_mul_for_tags(&enemy.tags))
        .collect();
    let total: f32 = weights.iter().sum();

    let mut roll = rng.next_unit() * total;
    for (&enemy, weight) in candidates.iter().zip(&weights) {
        roll -= weight;
        if roll <= 0.0 {
            return enemy;
        }
    }

    // Floating-point ties are vanishingly unlikely; the final candidate is
    // the deterministic fallback when the roll never goes non-positive.
    candidates[candidates.len() - 1]
}

fn maybe_inject_escort(
    catalog: &ContentCatalog,
    request: &WaveRequest<'_>,
    effects: &ModifierEffects,
    rng: &mut Mulberry32,
    entries: &mut Vec<WaveSpawnEntry>,
) -> bool {
    let Some(miniboss) = catalog.first_with_tag("miniboss") else {
        return false;
    };

    let balance = &catalog.balance;
    let guaranteed = request.wave_index >= request.tier.guaranteed_miniboss_wave;
    let wants_escort = effects.force_miniboss_escort
        || guaranteed
        || rng.next_unit() < escort_chance(balance, request.wave_index);
    if !wants_escort {
        return false;
    }

    let count_mul = spawn_count_multiplier(balance, request);
    let last_offset = entries
        .last()
        .map(|entry| entry.time_offset_sec)
        .unwrap_or(0.0);
    let lane = rng.below(request.lane_count.max(1));

    entries.push(WaveSpawnEntry {
        time_offset_sec: last_offset + ESCORT_MINIBOSS_DELAY_SEC,
        enemy_id: miniboss.id.clone(),
        count: 1,
        elite_chance: 0.0,
        lane_index: lane,
    });

    let spawnable = spawnable_archetypes(catalog);
    let support = catalog
        .first_with_tag("support")
        .or_else(|| spawnable.first().copied());
    if let Some(support) = support {
        entries.push(WaveSpawnEntry {
            time_offset_sec: last_offset + ESCORT_SUPPORT_DELAY_SEC,
            enemy_id: support.id.clone(),
            count: scale_count(3, count_mul),
            elite_chance: 0.0,
            lane_index: lane,
        });
    }

    let tank = catalog
        .first_with_tag("tank")
        .or_else(|| spawnable.first().copied());
    if let Some(tank) = tank {
        entries.push(WaveSpawnEntry {
            time_offset_sec: last_offset + ESCORT_TANK_DELAY_SEC,
            enemy_id: tank.id.clone(),
            count: scale_count(2, count_mul),
            elite_chance: 0.0,
            lane_index: lane,
        });
    }

    true
}

fn escort_chance(balance: &WaveBalance, wave_index: u32) -> f32 {
    let start = balance.miniboss.start_wave;
    if wave_index < start || balance.total_waves <= start {
        return 0.0;
    }

    let progress = (wave_index - start) as f32 / (balance.total_waves - start) as f32;
    (progress * balance.miniboss.chance_mul).min(1.0)
}

fn spawn_count_multiplier(balance: &WaveBalance, request: &WaveRequest<'_>) -> f32 {
    request.tier.spawn_count_mul
        * request.tier.intensity_mul
        * phase_ramp(balance, request.wave_index)
        * request.mission_difficulty
}

fn phase_ramp(balance: &WaveBalance, wave_index: u32) -> f32 {
    let total = balance.total_waves.max(1);
    let third = (total / 3).max(1);

    let (phase_start, rate) = if wave_index < third {
        (0, balance.ramp.early_rate)
    } else if wave_index < third * 2 {
        (third, balance.ramp.mid_rate)
    } else {
        (third * 2, balance.ramp.late_rate)
    };

    (1.0 + (wave_index - phase_start) as f32 * rate).max(0.5)
}

fn scale_count(count: u32, multiplier: f32) -> u32 {
    ((count as f32 * multiplier).round() as u32).max(1)
}

fn normalize_lane(lane_index: u32, lane_count: u32) -> u32 {
    if lane_count == 0 {
        return 0;
    }
    lane_index % lane_count
}

fn fixed_entry(offset: f32, enemy_id: &str, count: u32, lane: u32) -> WaveSpawnEntry {
    WaveSpawnEntry {
        time_offset_sec: offset,
        enemy_id: enemy_id.to_owned(),
        count,
        elite_chance: 0.0,
        lane_index: lane,
    }
}

fn sort_entries(entries: &mut [WaveSpawnEntry]) {
    // Stable sort: insertion order is the tiebreak for identical offsets.
    entries.sort_by(|a, b| {
        a.time_offset_sec
            .partial_cmp(&b.time_offset_sec)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_defence_core::baseline_catalog;

    fn normal_request(catalog: &ContentCatalog, wave_index: u32) -> WaveRequest<'_> {
        WaveRequest {
            run_seed: 13_371_337,
            wave_index,
            tier: catalog.tier("NORMAL").expect("NORMAL tier"),
            mission_difficulty: 1.0,
            lane_count: 3,
        }
    }

    #[test]
    fn phase_ramp_grows_within_phases_and_floors() {
        let balance = baseline_catalog().balance;
        assert_eq!(phase_ramp(&balance, 0), 1.0);
        assert!(phase_ramp(&balance, 9) > phase_ramp(&balance, 3));
        assert_eq!(phase_ramp(&balance, 10), 1.0, "phase boundary resets");
        assert!(phase_ramp(&balance, 29) > phase_ramp(&balance, 20));
        assert!(phase_ramp(&balance, 0) >= 0.5);
    }

    #[test]
    fn tier_salt_distinguishes_tiers() {
        assert_eq!(tier_seed_salt("NORMAL"), tier_seed_salt("NORMAL"));
        assert_ne!(tier_seed_salt("NORMAL"), tier_seed_salt("HARD"));
        assert_ne!(tier_seed_salt("HARD"), tier_seed_salt("ASCENDED"));
    }

    #[test]
    fn spawnable_filter_excludes_bosses_and_split_children() {
        let catalog = baseline_catalog();
        let spawnable = spawnable_archetypes(&catalog);
        assert!(!spawnable.is_empty());
        for enemy in spawnable {
            assert!(!enemy.has_tag("boss"));
            assert!(!enemy.has_tag("miniboss"));
            assert_ne!(enemy.id, "splitling");
            assert!(enemy.spawn_weight > 0.0);
        }
    }

    #[test]
    fn handcrafted_wave_is_scaled_without_prng() {
        let catalog = baseline_catalog();
        let generator = WaveGeneration::default();
        let plan = generator.generate(&catalog, &normal_request(&catalog, 1));

        assert!(!plan.is_boss_wave());
        let counts: Vec<u32> = plan.entries().iter().map(|entry| entry.count).collect();
        assert_eq!(counts, vec![3, 4, 6], "NORMAL wave 1 matches authored counts");
    }

    #[test]
    fn handcrafted_lanes_normalize_modulo_lane_count() {
        let catalog = baseline_catalog();
        let generator = WaveGeneration::default();
        let mut request = normal_request(&catalog, 1);
        request.lane_count = 2;

        let plan = generator.generate(&catalog, &request);
        for entry in plan.entries() {
            assert!(entry.lane_index < 2);
        }
    }

    #[test]
    fn boss_wave_emits_fixed_sequence() {
        let catalog = baseline_catalog();
        let generator = WaveGeneration::default();
        let wave = catalog.balance.boss.final_wave_index;
        let plan = generator.generate(&catalog, &normal_request(&catalog, wave));

        assert!(plan.is_boss_wave());
        assert!(plan.has_miniboss_escort());
        assert_eq!(plan.entries()[0].enemy_id, "overlord");
        assert_eq!(plan.entries()[1].enemy_id, "warden");
        assert!(plan.entries().len() >= 4);
    }

    #[test]
    fn empty_spawnable_roster_yields_valid_empty_plan() {
        let mut catalog = baseline_catalog();
        for enemy in &mut catalog.enemies {
            enemy.spawn_weight = 0.0;
        }
        for modifier in &mut catalog.modifiers {
            modifier.force_miniboss_escort = false;
        }
        let generator = WaveGeneration::default();
        let plan = generator.generate(&catalog, &normal_request(&catalog, 5));
        assert!(plan.is_empty());
        assert!(!plan.has_miniboss_escort());
    }

    #[test]
    fn weighted_pick_always_returns_a_candidate() {
        let catalog = baseline_catalog();
        let no_modifiers: [&WaveModifierDefinition; 0] = [];
        let effects = ModifierEffects::combine(no_modifiers);
        let mut rng = Mulberry32::new(0);

        // A degenerate zero-weight roster must still resolve to a candidate
        // rather than panicking.
        let zeroed: Vec<EnemyArchetypeDefinition> = spawnable_archetypes(&catalog)
            .iter()
            .map(|enemy| {
                let mut clone = (*enemy).clone();
                clone.spawn_weight = 0.0;
                clone
            })
            .collect();
        let refs: Vec<&EnemyArchetypeDefinition> = zeroed.iter().collect();
        let picked = pick_weighted(&refs, &effects, &mut rng);
        assert!(zeroed.iter().any(|enemy| enemy.id == picked.id));
    }

    #[test]
    fn weighted_pick_favors_dominant_weights() {
        let catalog = baseline_catalog();
        let no_modifiers: [&WaveModifierDefinition; 0] = [];
        let effects = ModifierEffects::combine(no_modifiers);
        let mut rng = Mulberry32::new(7);

        let mut weighted: Vec<EnemyArchetypeDefinition> = spawnable_archetypes(&catalog)
            .iter()
            .map(|enemy| (*enemy).clone())
            .collect();
        for enemy in &mut weighted {
            enemy.spawn_weight = if enemy.id == "tank" { 1.0e9 } else { 1.0 };
        }

        let refs: Vec<&EnemyArchetypeDefinition> = weighted.iter().collect();
        let tank_picks = (0..100)
            .filter(|_| pick_weighted(&refs, &effects, &mut rng).id == "tank")
            .count();
        assert!(tank_picks >= 99, "dominant weight must dominate picks");
    }
}
