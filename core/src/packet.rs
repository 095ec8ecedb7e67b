//! Pooled packet entity shared between the factory and the world.

use serde::{Deserialize, Serialize};

use crate::{BehaviorFlags, EliteDrop, LinkId, Owner, TintColor};

/// A traveling stack of units moving along one link.
///
/// Packets are pooled: [`UnitPacket::default`] is the canonical pooled state
/// and [`UnitPacket::reset`] restores every mutable field to it. A packet
/// pulled from the pool must be indistinguishable from a freshly constructed
/// one with zeroed combat state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitPacket {
    /// Identifier allocated when the packet enters the world.
    pub id: u32,
    /// Faction the packet fights for.
    pub owner: Owner,
    /// Live unit count, reduced by combat.
    pub count: u32,
    /// Unit count at spawn time; never mutated afterwards.
    pub base_count: u32,
    /// Hit points per unit at spawn time.
    pub base_hp_per_unit: f32,
    /// Current hit points per unit, including temporary effects.
    pub hp_per_unit: f32,
    /// Damage per unit at spawn time.
    pub base_damage: f32,
    /// Current damage per unit, including temporary effects.
    pub damage: f32,
    /// Travel speed at spawn time.
    pub base_speed: f32,
    /// Current travel speed, including temporary effects.
    pub speed: f32,
    /// Armor at spawn time.
    pub base_armor: f32,
    /// Current armor, including temporary effects.
    pub armor: f32,
    /// Fractional progress along the link, in `[0, 1]`.
    pub progress: f32,
    /// Link the packet travels, if it has been inserted.
    pub link: Option<LinkId>,
    /// Archetype the packet was spawned from.
    pub archetype_id: String,
    /// Tags inherited from the archetype.
    pub tags: Vec<String>,
    /// Attack range in world units.
    pub attack_range: f32,
    /// Seconds between attacks.
    pub attack_cooldown_sec: f32,
    /// Seconds until the next attack is available.
    pub cooldown_remaining_sec: f32,
    /// Seconds the packet holds position before advancing.
    pub hold_remaining_sec: f32,
    /// Behaviors inherited from the archetype.
    pub behavior: BehaviorFlags,
    /// Render scale hint.
    pub size_scale: f32,
    /// Render tint hint.
    pub tint: TintColor,
    /// Whether the packet is an elite variant.
    pub is_elite: bool,
    /// Whether the packet is a boss.
    pub is_boss: bool,
    /// Whether the packet has enraged.
    pub is_enraged: bool,
    /// Drop granted when an elite packet dies.
    pub elite_drop: Option<EliteDrop>,
    /// Seconds since the packet spawned.
    pub age_sec: f32,
    /// Temporary speed multiplier applied by buffs; 1.0 when none.
    pub temp_speed_mul: f32,
    /// Temporary damage multiplier applied by buffs; 1.0 when none.
    pub temp_damage_mul: f32,
}

impl UnitPacket {
    /// Reports whether the packet carries the provided tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }

    /// Restores every mutable field to the canonical pooled state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for UnitPacket {
    fn default() -> Self {
        Self {
            id: 0,
            owner: Owner::Neutral,
            count: 0,
            base_count: 0,
            base_hp_per_unit: 0.0,
            hp_per_unit: 0.0,
            base_damage: 0.0,
            damage: 0.0,
            base_speed: 0.0,
            speed: 0.0,
            base_armor: 0.0,
            armor: 0.0,
            progress: 0.0,
            link: None,
            archetype_id: String::new(),
            tags: Vec::new(),
            attack_range: 0.0,
            attack_cooldown_sec: 0.0,
            cooldown_remaining_sec: 0.0,
            hold_remaining_sec: 0.0,
            behavior: BehaviorFlags::default(),
            size_scale: 1.0,
            tint: TintColor::default(),
            is_elite: false,
            is_boss: false,
            is_enraged: false,
            elite_drop: None,
            age_sec: 0.0,
            temp_speed_mul: 1.0,
            temp_damage_mul: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_pooled_defaults() {
        let mut packet = UnitPacket {
            id: 9,
            owner: Owner::Enemy,
            count: 12,
            base_count: 12,
            hp_per_unit: 40.0,
            damage: 5.0,
            progress: 0.75,
            link: Some(LinkId::new("a->b")),
            archetype_id: "tank".to_owned(),
            tags: vec!["armored".to_owned()],
            is_elite: true,
            is_enraged: true,
            temp_speed_mul: 1.4,
            ..UnitPacket::default()
        };

        packet.reset();
        assert_eq!(packet, UnitPacket::default());
    }

    #[test]
    fn pooled_default_has_neutral_multipliers() {
        let packet = UnitPacket::default();
        assert_eq!(packet.temp_speed_mul, 1.0);
        assert_eq!(packet.temp_damage_mul, 1.0);
        assert_eq!(packet.size_scale, 1.0);
        assert_eq!(packet.count, 0);
        assert!(packet.link.is_none());
    }
}
