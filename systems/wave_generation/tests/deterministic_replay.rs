use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use relay_defence_core::{baseline_catalog, ContentCatalog, WavePlan};
use relay_defence_system_wave_generation::{WaveGeneration, WaveRequest};

fn generate(catalog: &ContentCatalog, seed: u32, wave: u32, tier: &str, lanes: u32) -> WavePlan {
    let generator = WaveGeneration::default();
    generator.generate(
        catalog,
        &WaveRequest {
            run_seed: seed,
            wave_index: wave,
            tier: catalog.tier(tier).expect("tier exists"),
            mission_difficulty: 1.0,
            lane_count: lanes,
        },
    )
}

fn fingerprint(plan: &WavePlan) -> u64 {
    let mut hasher = DefaultHasher::new();
    format!("{plan:?}").hash(&mut hasher);
    hasher.finish()
}

#[test]
fn identical_inputs_replay_identically() {
    let catalog = baseline_catalog();

    for wave in [0, 2, 5, 9, 15, 22, 29] {
        let first = generate(&catalog, 13_371_337, wave, "NORMAL", 3);
        let second = generate(&catalog, 13_371_337, wave, "NORMAL", 3);
        assert_eq!(first, second, "wave {wave} diverged between runs");
        assert_eq!(fingerprint(&first), fingerprint(&second));
    }
}

#[test]
fn generation_is_independent_of_call_order() {
    let catalog = baseline_catalog();

    let direct = generate(&catalog, 777, 5, "HARD", 3);
    let _ = generate(&catalog, 777, 9, "HARD", 3);
    let _ = generate(&catalog, 123, 2, "NORMAL", 1);
    let after_other_waves = generate(&catalog, 777, 5, "HARD", 3);

    assert_eq!(direct, after_other_waves, "no PRNG state leaks across waves");
}

#[test]
fn distinct_seeds_and_tiers_produce_distinct_plans() {
    let catalog = baseline_catalog();

    let base = generate(&catalog, 13_371_337, 5, "NORMAL", 3);
    let reseeded = generate(&catalog, 13_371_338, 5, "NORMAL", 3);
    let retiered = generate(&catalog, 13_371_337, 5, "ASCENDED", 3);

    assert_ne!(base, reseeded);
    assert_ne!(base, retiered);
}

#[test]
fn example_scenario_yields_sorted_valid_entries() {
    let catalog = baseline_catalog();
    let plan = generate(&catalog, 13_371_337, 5, "NORMAL", 3);

    assert!(!plan.is_empty(), "wave 5 must schedule spawns");

    let entries = plan.entries();
    for pair in entries.windows(2) {
        assert!(
            pair[0].time_offset_sec <= pair[1].time_offset_sec,
            "entries must be sorted ascending by offset",
        );
    }

    for entry in entries {
        assert!(
            catalog.enemy(&entry.enemy_id).is_some(),
            "unknown enemy id {}",
            entry.enemy_id,
        );
        assert!(entry.lane_index < 3, "lane out of range");
        assert!(entry.count >= 1);
        assert!(entry.elite_chance <= catalog.balance.elite.chance_cap);
    }
}

#[test]
fn budget_is_conserved_within_one_spawn_cost() {
    let mut catalog = baseline_catalog();
    // Strip the escort-forcing modifier so every entry is budget-funded.
    catalog.modifiers.retain(|modifier| !modifier.force_miniboss_escort);
    assert!(catalog.validate().is_ok(), "catalog still valid after strip");

    let tier = catalog.tier("NORMAL").expect("NORMAL tier").clone();
    let balance = catalog.balance.clone();

    for seed in [1_u32, 42, 9_000, 13_371_337] {
        for wave in [2_u32, 4, 6] {
            assert!(
                wave < tier.guaranteed_miniboss_wave && wave < balance.miniboss.start_wave,
                "test waves must not inject escorts",
            );

            let plan = generate(&catalog, seed, wave, "NORMAL", 3);
            let budget = ((balance.budget_base + wave as f32 * balance.budget_per_wave)
                * tier.intensity_mul)
                .clamp(balance.budget_min, balance.budget_max);

            let mut spent = 0.0_f32;
            let mut max_cost = 0.0_f32;
            for entry in plan.entries() {
                let enemy = catalog.enemy(&entry.enemy_id).expect("catalog enemy");
                spent += entry.count as f32 * enemy.spawn_cost;
                max_cost = max_cost.max(enemy.spawn_cost);
            }

            assert!(
                spent <= budget + max_cost,
                "seed {seed} wave {wave}: spent {spent} exceeds budget {budget} + {max_cost}",
            );
        }
    }
}

#[test]
fn two_modifiers_apply_from_wave_four() {
    let catalog = baseline_catalog();

    let early = generate(&catalog, 5, 2, "NORMAL", 3);
    assert_eq!(early.modifier_ids().len(), 1);

    let later = generate(&catalog, 5, 6, "NORMAL", 3);
    assert_eq!(later.modifier_ids().len(), 2);

    let unique: std::collections::HashSet<&String> = later.modifier_ids().iter().collect();
    assert_eq!(unique.len(), 2, "a modifier cannot be double-selected");
}

#[test]
fn guaranteed_escort_cadence_forces_minibosses() {
    let catalog = baseline_catalog();
    let tier = catalog.tier("ASCENDED").expect("ASCENDED tier");

    // Every 3rd wave past the tier threshold must carry an escort.
    let wave = tier.guaranteed_miniboss_wave.next_multiple_of(3);
    let plan = generate(&catalog, 2_024, wave, "ASCENDED", 3);
    assert!(plan.has_miniboss_escort());
    assert!(plan
        .entries()
        .iter()
        .any(|entry| entry.enemy_id == "warden"));
}

#[test]
fn handcrafted_waves_replay_without_prng_divergence() {
    let catalog = baseline_catalog();

    // Handcrafted plans depend only on their inputs, never on the seed.
    let first = generate(&catalog, 1, 1, "NORMAL", 3);
    let second = generate(&catalog, 999_999, 1, "NORMAL", 3);
    assert_eq!(first, second);
}
