//! Wave plan contract produced by the generation system.

use serde::{Deserialize, Serialize};

/// One scheduled spawn within a generated wave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveSpawnEntry {
    /// Seconds after wave start the spawn is scheduled at.
    pub time_offset_sec: f32,
    /// Archetype to spawn.
    pub enemy_id: String,
    /// Units in the spawned packet.
    pub count: u32,
    /// Probability that the spawn is promoted to elite.
    pub elite_chance: f32,
    /// Lane the packet travels, in `[0, lane_count)`.
    pub lane_index: u32,
}

/// Immutable output of wave generation for one wave index.
///
/// Entries are always ordered by ascending time offset; insertion order is
/// the tiebreak when offsets coincide. The orchestrator owns scheduling the
/// plan; the plan itself never changes after generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WavePlan {
    wave_index: u32,
    modifier_ids: Vec<String>,
    entries: Vec<WaveSpawnEntry>,
    has_miniboss_escort: bool,
    is_boss_wave: bool,
}

impl WavePlan {
    /// Assembles a plan from its parts.
    #[must_use]
    pub fn new(
        wave_index: u32,
        modifier_ids: Vec<String>,
        entries: Vec<WaveSpawnEntry>,
        has_miniboss_escort: bool,
        is_boss_wave: bool,
    ) -> Self {
        Self {
            wave_index,
            modifier_ids,
            entries,
            has_miniboss_escort,
            is_boss_wave,
        }
    }

    /// Empty plan for a wave with nothing to spawn.
    #[must_use]
    pub fn empty(wave_index: u32) -> Self {
        Self::new(wave_index, Vec::new(), Vec::new(), false, false)
    }

    /// Wave index the plan was generated for.
    #[must_use]
    pub const fn wave_index(&self) -> u32 {
        self.wave_index
    }

    /// Ids of the modifiers applied to the wave.
    #[must_use]
    pub fn modifier_ids(&self) -> &[String] {
        &self.modifier_ids
    }

    /// Spawn entries ordered by ascending time offset.
    #[must_use]
    pub fn entries(&self) -> &[WaveSpawnEntry] {
        &self.entries
    }

    /// Whether the wave ships with a miniboss escort.
    #[must_use]
    pub const fn has_miniboss_escort(&self) -> bool {
        self.has_miniboss_escort
    }

    /// Whether the plan is the fixed final boss sequence.
    #[must_use]
    pub const fn is_boss_wave(&self) -> bool {
        self.is_boss_wave
    }

    /// Reports whether the plan schedules no spawns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
