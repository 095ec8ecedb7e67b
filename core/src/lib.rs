#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Relay Defence engine.
//!
//! This crate defines the data surface that connects the content loader, the
//! authoritative world, and the pure generation systems. Content catalogs are
//! loaded once, validated, and treated as immutable; the wave generation
//! system turns catalog data into [`WavePlan`] values; the enemy factory
//! turns spawn requests into [`UnitPacket`] entities that the orchestrator
//! inserts into the world.

mod baseline;
mod content;
mod events;
mod packet;
mod plan;

pub use baseline::baseline_catalog;
pub use content::{
    ArchetypeVisuals, BaselineCaps, BehaviorFlags, BossBalance, ContentCatalog, ContentError,
    DifficultyTierDefinition, EliteBalance, EliteDrop, EnemyArchetypeDefinition, EnemyScaling,
    HandcraftedWave, HandcraftedWaveEntry, LinkLevelDefinition, MinibossBalance, ModifierEffects,
    PhaseRamp, TagWeightMul, WaveBalance, WaveModifierDefinition,
};
pub use events::{LinkDestroyedEvent, TowerCapturedEvent};
pub use packet::UnitPacket;
pub use plan::{WavePlan, WaveSpawnEntry};

use serde::{Deserialize, Serialize};

/// Faction that owns a tower, link, or packet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// Entities controlled by the player.
    Player,
    /// Entities controlled by the wave director.
    Enemy,
    /// Unclaimed entities awaiting capture.
    #[default]
    Neutral,
}

/// Content-authored identifier naming a tower within a mission.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(String);

impl TowerId {
    /// Creates a tower identifier from a content-authored key.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrows the underlying key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TowerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier naming a directed link between two towers.
///
/// Player-created links always use the `"{from}->{to}"` form produced by
/// [`LinkId::directed`]; scripted links carry designer-authored ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(String);

impl LinkId {
    /// Creates a link identifier from a designer-authored key.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Canonical identifier for a player-created link between two towers.
    #[must_use]
    pub fn directed(from: &TowerId, to: &TowerId) -> Self {
        Self(format!("{from}->{to}"))
    }

    /// Borrows the underlying key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal world coordinate.
    pub x: f32,
    /// Vertical world coordinate.
    pub y: f32,
}

impl Point {
    /// Creates a point from explicit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Visual tint applied to an archetype or packet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TintColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl TintColor {
    /// Creates a new tint from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the tint.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the tint.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the tint.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}
