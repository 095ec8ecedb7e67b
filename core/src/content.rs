//! Static content definitions loaded once at startup and validated before use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TintColor;

/// Minimum number of enemy archetypes a playable catalog must define.
pub(crate) const MIN_ENEMY_ARCHETYPES: usize = 6;
/// Minimum number of wave modifiers a playable catalog must define.
pub(crate) const MIN_WAVE_MODIFIERS: usize = 6;
/// Link levels that must be present for the simulation to degrade safely.
pub(crate) const REQUIRED_LINK_LEVELS: [u32; 3] = [1, 2, 3];

/// Static description of one enemy archetype.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyArchetypeDefinition {
    /// Content key referenced by spawn entries and requests.
    pub id: String,
    /// Display name surfaced by presentation layers.
    pub name: String,
    /// Hit points per unit before scaling.
    pub hp: f32,
    /// Travel speed in link progress units per second before scaling.
    pub speed: f32,
    /// Damage per unit per attack before scaling.
    pub damage: f32,
    /// Attack range in world units.
    pub attack_range: f32,
    /// Seconds between attacks.
    pub attack_cooldown_sec: f32,
    /// Classification tags ("swarm", "boss", "miniboss", "support", ...).
    pub tags: Vec<String>,
    /// Budget currency consumed per spawned unit.
    pub spawn_cost: f32,
    /// Selection probability mass for the procedural roulette.
    pub spawn_weight: f32,
    /// Multiplier the armor derivation is seeded from.
    pub armor_mul: f32,
    /// Optional behaviors evaluated by the combat step.
    pub behavior: BehaviorFlags,
    /// Visual presentation hints.
    pub visuals: ArchetypeVisuals,
    /// Drop granted when an elite of this archetype dies, if any.
    pub elite_drop: Option<EliteDrop>,
}

impl EnemyArchetypeDefinition {
    /// Reports whether the archetype carries the provided tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }
}

/// Optional behaviors an archetype may carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorFlags {
    /// Periodically raises a damage-immune shield.
    pub shield_cycling: bool,
    /// Splits into child packets on death.
    pub split_on_death: bool,
    /// Buffs nearby enemy packets while alive.
    pub support_aura: bool,
    /// Damages link integrity instead of tower troops.
    pub cuts_links: bool,
}

/// Visual presentation hints for an archetype and its elite variant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeVisuals {
    /// Render scale of the regular variant.
    pub size_scale: f32,
    /// Tint of the regular variant.
    pub tint: TintColor,
    /// Render scale swapped in for elites.
    pub elite_size_scale: f32,
    /// Tint swapped in for elites.
    pub elite_tint: TintColor,
}

/// Reward granted when an elite packet dies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliteDrop {
    /// Gold awarded to the player.
    pub gold: u32,
    /// Identifier of the temporary buff granted, if the content defines one.
    pub buff_id: String,
}

/// Designer-authored wave modifier composed onto procedural waves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveModifierDefinition {
    /// Content key listed on generated plans.
    pub id: String,
    /// Display name surfaced by presentation layers.
    pub name: String,
    /// Multiplies enemy speed for the wave.
    pub speed_mul: f32,
    /// Multiplies enemy armor for the wave.
    pub armor_mul: f32,
    /// Multiplies the spawn rate for the wave.
    pub spawn_rate_mul: f32,
    /// Added to the wave's elite chance.
    pub elite_chance_bonus: f32,
    /// Forces a miniboss escort onto the wave.
    pub force_miniboss_escort: bool,
    /// Per-tag spawn-weight multipliers applied to the roulette.
    pub tag_weight_muls: Vec<TagWeightMul>,
}

/// Spawn-weight multiplier applied to archetypes carrying a tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagWeightMul {
    /// Tag the multiplier applies to.
    pub tag: String,
    /// Weight multiplier for matching archetypes.
    pub mul: f32,
}

/// Aggregated effect bundle of the modifiers active on one wave.
///
/// Overlapping multipliers compose by multiplication, additive bonuses by
/// summation, boolean flags by OR, and per-tag weight multipliers by
/// multiplying across all active modifiers.
#[derive(Clone, Debug, PartialEq)]
pub struct ModifierEffects {
    /// Combined enemy speed multiplier.
    pub speed_mul: f32,
    /// Combined enemy armor multiplier.
    pub armor_mul: f32,
    /// Combined spawn rate multiplier.
    pub spawn_rate_mul: f32,
    /// Combined additive elite chance bonus.
    pub elite_chance_bonus: f32,
    /// Whether any active modifier forces a miniboss escort.
    pub force_miniboss_escort: bool,
    tag_weight_muls: Vec<TagWeightMul>,
}

impl ModifierEffects {
    /// Combines the provided modifiers into one effect bundle.
    #[must_use]
    pub fn combine<'a>(modifiers: impl IntoIterator<Item = &'a WaveModifierDefinition>) -> Self {
        let mut effects = Self {
            speed_mul: 1.0,
            armor_mul: 1.0,
            spawn_rate_mul: 1.0,
            elite_chance_bonus: 0.0,
            force_miniboss_escort: false,
            tag_weight_muls: Vec::new(),
        };

        for modifier in modifiers {
            effects.speed_mul *= modifier.speed_mul;
            effects.armor_mul *= modifier.armor_mul;
            effects.spawn_rate_mul *= modifier.spawn_rate_mul;
            effects.elite_chance_bonus += modifier.elite_chance_bonus;
            effects.force_miniboss_escort |= modifier.force_miniboss_escort;

            for entry in &modifier.tag_weight_muls {
                match effects
                    .tag_weight_muls
                    .iter_mut()
                    .find(|existing| existing.tag == entry.tag)
                {
                    Some(existing) => existing.mul *= entry.mul,
                    None => effects.tag_weight_muls.push(entry.clone()),
                }
            }
        }

        effects
    }

    /// Combined spawn-weight multiplier for an archetype's tag set.
    #[must_use]
    pub fn weight_mul_for_tags(&self, tags: &[String]) -> f32 {
        self.tag_weight_muls
            .iter()
            .filter(|entry| tags.iter().any(|tag| tag == &entry.tag))
            .map(|entry| entry.mul)
            .product()
    }
}

/// Designer-authored wave that replaces procedural generation for one index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandcraftedWave {
    /// Wave index the handcrafted wave overrides.
    pub wave_index: u32,
    /// Modifier ids listed on the resulting plan.
    pub modifier_ids: Vec<String>,
    /// Whether the wave ships with a miniboss escort.
    pub has_miniboss_escort: bool,
    /// Authored spawn entries, scaled by the shared multiplier pipeline.
    pub entries: Vec<HandcraftedWaveEntry>,
}

/// One authored spawn entry within a handcrafted wave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandcraftedWaveEntry {
    /// Seconds after wave start the entry is scheduled at.
    pub time_offset_sec: f32,
    /// Archetype spawned by the entry.
    pub enemy_id: String,
    /// Authored unit count before scaling.
    pub count: u32,
    /// Authored elite chance before clamping.
    pub elite_chance: f32,
    /// Authored lane, normalized modulo the mission lane count.
    pub lane_index: u32,
}

/// Tuning constants governing wave generation and enemy scaling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveBalance {
    /// Total waves in a full run; phases are thirds of this count.
    pub total_waves: u32,
    /// Base seconds between procedural spawn entries.
    pub spawn_interval_sec: f32,
    /// Lower bound of the per-entry interval jitter.
    pub jitter_min: f32,
    /// Upper bound of the per-entry interval jitter.
    pub jitter_max: f32,
    /// Budget currency granted at wave zero.
    pub budget_base: f32,
    /// Budget currency added per wave index.
    pub budget_per_wave: f32,
    /// Lower clamp applied to the computed budget.
    pub budget_min: f32,
    /// Upper clamp applied to the computed budget.
    pub budget_max: f32,
    /// Per-entry unit-count cap for regular archetypes.
    pub count_cap: u32,
    /// Per-entry unit-count cap for "swarm"-tagged archetypes.
    pub swarm_count_cap: u32,
    /// Per-phase ramp growth rates.
    pub ramp: PhaseRamp,
    /// Elite tuning constants.
    pub elite: EliteBalance,
    /// Boss tuning constants.
    pub boss: BossBalance,
    /// Miniboss escort tuning constants.
    pub miniboss: MinibossBalance,
    /// Per-wave and per-tier stat growth rates.
    pub scaling: EnemyScaling,
    /// Archetypes never spawned directly by the generator.
    pub excluded_enemy_ids: Vec<String>,
    /// Fallback drop for elites whose archetype defines none.
    pub default_elite_drop: EliteDrop,
}

/// Per-phase growth rates for the wave ramp multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseRamp {
    /// Ramp growth per wave during the early third.
    pub early_rate: f32,
    /// Ramp growth per wave during the middle third.
    pub mid_rate: f32,
    /// Ramp growth per wave during the late third.
    pub late_rate: f32,
}

/// Elite spawn tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EliteBalance {
    /// Hit-point multiplier applied to elite packets.
    pub hp_mul: f32,
    /// Damage multiplier applied to elite packets.
    pub damage_mul: f32,
    /// Elite chance at wave zero.
    pub base_chance: f32,
    /// Elite chance added per wave index.
    pub chance_per_wave: f32,
    /// Hard cap on any entry's elite chance.
    pub chance_cap: f32,
}

/// Boss wave tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BossBalance {
    /// Wave index that triggers the fixed boss sequence.
    pub final_wave_index: u32,
    /// Base hit-point multiplier applied to boss packets.
    pub hp_multiplier: f32,
    /// Base damage multiplier applied to boss packets.
    pub damage_multiplier: f32,
}

/// Miniboss escort tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinibossBalance {
    /// First wave index at which random escorts may appear.
    pub start_wave: u32,
    /// Multiplier on the normalized progress used for the escort roll.
    pub chance_mul: f32,
}

/// Per-wave and per-difficulty-tier enemy stat growth.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyScaling {
    /// Hit-point growth per wave past the first.
    pub hp_per_wave: f32,
    /// Hit-point growth per mission-difficulty point past 1.0.
    pub hp_per_difficulty_tier: f32,
    /// Damage growth per wave past the first.
    pub damage_per_wave: f32,
    /// Damage growth per mission-difficulty point past 1.0.
    pub damage_per_difficulty_tier: f32,
    /// Speed growth per wave past the first.
    pub speed_per_wave: f32,
}

/// Named difficulty configuration supplying multiplier bundles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTierDefinition {
    /// Tier key ("NORMAL", "HARD", "ASCENDED").
    pub id: String,
    /// Multiplies procedural spawn counts.
    pub spawn_count_mul: f32,
    /// Multiplies wave intensity (budget and spawn pacing).
    pub intensity_mul: f32,
    /// Multiplies boss hit points.
    pub boss_hp_mul: f32,
    /// Multiplies boss damage.
    pub boss_damage_mul: f32,
    /// Wave index from which a miniboss escort is guaranteed.
    pub guaranteed_miniboss_wave: u32,
}

/// Per-level link characteristics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkLevelDefinition {
    /// Level the definition describes (1..N).
    pub level: u32,
    /// Multiplies packet travel speed along the link.
    pub speed_mul: f32,
    /// Armor added to packets traveling the link.
    pub armor_bonus: f32,
    /// Damage added to packets traveling the link.
    pub damage_bonus: f32,
    /// Integrity the link starts with.
    pub max_integrity: f32,
    /// Troop drain per second while overcharged.
    pub overcharge_drain: f32,
}

impl LinkLevelDefinition {
    /// Synthetic zero-effect definition used when content is malformed.
    #[must_use]
    pub const fn fallback() -> Self {
        Self {
            level: 1,
            speed_mul: 1.0,
            armor_bonus: 0.0,
            damage_bonus: 0.0,
            max_integrity: 100.0,
            overcharge_drain: 0.0,
        }
    }
}

/// Catalog-wide baselines and hard caps.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaselineCaps {
    /// Lower clamp on scaled hit points.
    pub min_hp: f32,
    /// Upper clamp on scaled hit points.
    pub max_hp: f32,
    /// Lower clamp on scaled damage.
    pub min_damage: f32,
    /// Upper clamp on scaled damage.
    pub max_damage: f32,
    /// Lower clamp on scaled speed.
    pub min_speed: f32,
    /// Upper clamp on scaled speed.
    pub max_speed: f32,
    /// Base outgoing-link allowance per tower.
    pub max_outgoing_links_per_tower: u32,
}

/// Immutable bundle of all content required by the simulation core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentCatalog {
    /// Enemy archetype definitions.
    pub enemies: Vec<EnemyArchetypeDefinition>,
    /// Wave modifier definitions.
    pub modifiers: Vec<WaveModifierDefinition>,
    /// Handcrafted wave overrides.
    pub handcrafted_waves: Vec<HandcraftedWave>,
    /// Wave generation and scaling tuning.
    pub balance: WaveBalance,
    /// Difficulty tier definitions.
    pub tiers: Vec<DifficultyTierDefinition>,
    /// Link level definitions.
    pub link_levels: Vec<LinkLevelDefinition>,
    /// Catalog-wide baselines and caps.
    pub caps: BaselineCaps,
}

impl ContentCatalog {
    /// Looks up an enemy archetype by id.
    #[must_use]
    pub fn enemy(&self, id: &str) -> Option<&EnemyArchetypeDefinition> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    /// Looks up a wave modifier by id.
    #[must_use]
    pub fn modifier(&self, id: &str) -> Option<&WaveModifierDefinition> {
        self.modifiers.iter().find(|modifier| modifier.id == id)
    }

    /// Looks up a difficulty tier by id.
    #[must_use]
    pub fn tier(&self, id: &str) -> Option<&DifficultyTierDefinition> {
        self.tiers.iter().find(|tier| tier.id == id)
    }

    /// Looks up the handcrafted override for a wave index, if any.
    #[must_use]
    pub fn handcrafted(&self, wave_index: u32) -> Option<&HandcraftedWave> {
        self.handcrafted_waves
            .iter()
            .find(|wave| wave.wave_index == wave_index)
    }

    /// First archetype carrying the provided tag, in catalog order.
    #[must_use]
    pub fn first_with_tag(&self, tag: &str) -> Option<&EnemyArchetypeDefinition> {
        self.enemies.iter().find(|enemy| enemy.has_tag(tag))
    }

    /// Validates structural requirements once at load time.
    ///
    /// This is the only place hard failures are appropriate: structurally
    /// broken content has no safe default and must stop startup.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.enemies.len() < MIN_ENEMY_ARCHETYPES {
            return Err(ContentError::TooFewArchetypes {
                found: self.enemies.len(),
                required: MIN_ENEMY_ARCHETYPES,
            });
        }

        if self.modifiers.len() < MIN_WAVE_MODIFIERS {
            return Err(ContentError::TooFewModifiers {
                found: self.modifiers.len(),
                required: MIN_WAVE_MODIFIERS,
            });
        }

        if self.link_levels.len() < REQUIRED_LINK_LEVELS.len() {
            return Err(ContentError::TooFewLinkLevels {
                found: self.link_levels.len(),
                required: REQUIRED_LINK_LEVELS.len(),
            });
        }

        for level in REQUIRED_LINK_LEVELS {
            if !self.link_levels.iter().any(|entry| entry.level == level) {
                return Err(ContentError::MissingLinkLevel(level));
            }
        }

        if self.tiers.is_empty() {
            return Err(ContentError::NoDifficultyTiers);
        }

        if self.balance.boss.final_wave_index > self.balance.total_waves {
            return Err(ContentError::BossWaveOutOfRange {
                final_wave_index: self.balance.boss.final_wave_index,
                total_waves: self.balance.total_waves,
            });
        }

        Ok(())
    }
}

/// Fatal structural problems detected while validating loaded content.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContentError {
    /// The enemy catalog is smaller than the playable minimum.
    #[error("content defines {found} enemy archetypes, at least {required} are required")]
    TooFewArchetypes {
        /// Archetype count found in the catalog.
        found: usize,
        /// Minimum archetype count required.
        required: usize,
    },
    /// The modifier catalog is smaller than the playable minimum.
    #[error("content defines {found} wave modifiers, at least {required} are required")]
    TooFewModifiers {
        /// Modifier count found in the catalog.
        found: usize,
        /// Minimum modifier count required.
        required: usize,
    },
    /// The link level table is smaller than the playable minimum.
    #[error("content defines {found} link levels, at least {required} are required")]
    TooFewLinkLevels {
        /// Link level count found in the catalog.
        found: usize,
        /// Minimum link level count required.
        required: usize,
    },
    /// A required link level is absent from the table.
    #[error("link level {0} is missing from the content catalog")]
    MissingLinkLevel(u32),
    /// No difficulty tier was defined.
    #[error("content defines no difficulty tiers")]
    NoDifficultyTiers,
    /// The boss wave lies outside the configured run length.
    #[error("boss wave {final_wave_index} exceeds the configured {total_waves} total waves")]
    BossWaveOutOfRange {
        /// Configured boss wave index.
        final_wave_index: u32,
        /// Configured total wave count.
        total_waves: u32,
    },
}
