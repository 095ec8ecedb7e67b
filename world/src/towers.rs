//! Authoritative tower state stored inside the world.

use relay_defence_core::{Owner, Point, TowerId};

/// One tower within the simulation graph.
///
/// Towers are created at level load and never destroyed mid-mission;
/// ownership flips instead of deletion.
#[derive(Clone, Debug, PartialEq)]
pub struct Tower {
    /// Content-authored identifier.
    pub id: TowerId,
    /// Faction currently holding the tower.
    pub owner: Owner,
    /// World position.
    pub position: Point,
    /// Current structural hit points.
    pub hp: f32,
    /// Maximum structural hit points.
    pub max_hp: f32,
    /// Troops currently garrisoned.
    pub troops: f32,
    /// Garrison capacity.
    pub max_troops: f32,
    /// Troops regenerated per second.
    pub regen_rate: f32,
    /// Multiplies incoming damage taken by the garrison.
    pub defense_mul: f32,
    /// Multiplies damage dealt by packets sent from this tower.
    pub packet_damage_mul: f32,
    /// Added to the speed of links leaving this tower.
    pub link_speed_bonus: f32,
    /// Outgoing links allowed beyond the baseline cap.
    pub extra_outgoing_links: u32,
    /// Radius of the tower's support aura; zero when absent.
    pub aura_radius: f32,
    /// Bonus granted inside the aura.
    pub aura_bonus: f32,
    /// Multiplies capture progress made against this tower.
    pub capture_speed_taken_mul: f32,
    /// Gold generated per second while player-held.
    pub gold_per_sec: f32,
}

impl Tower {
    /// Creates a tower with neutral archetype modifiers.
    #[must_use]
    pub fn new(id: TowerId, owner: Owner, position: Point, max_hp: f32, max_troops: f32) -> Self {
        Self {
            id,
            owner,
            position,
            hp: max_hp,
            max_hp,
            troops: 0.0,
            max_troops,
            regen_rate: 1.0,
            defense_mul: 1.0,
            packet_damage_mul: 1.0,
            link_speed_bonus: 0.0,
            extra_outgoing_links: 0,
            aura_radius: 0.0,
            aura_bonus: 0.0,
            capture_speed_taken_mul: 1.0,
            gold_per_sec: 0.0,
        }
    }
}
