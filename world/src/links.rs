//! Link state and scripted-link seeding.

use relay_defence_core::{LinkId, Owner, Point, TowerId};

/// Seconds the under-attack flash timer is armed for after link damage.
pub(crate) const UNDER_ATTACK_FLASH_SEC: f32 = 0.85;

/// Directed edge between two towers along which packets travel.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    /// Identifier; `"{from}->{to}"` for player links, authored for scripted.
    pub id: LinkId,
    /// Faction that owns the link.
    pub owner: Owner,
    /// Tower the link leaves.
    pub from: TowerId,
    /// Tower the link enters.
    pub to: TowerId,
    /// Geometry the link follows; endpoints inclusive.
    pub waypoints: Vec<Point>,
    /// Level resolving to a `LinkLevelDefinition`.
    pub level: u32,
    /// Remaining structural integrity.
    pub integrity: f32,
    /// Seconds the link still flashes as under attack.
    pub under_attack_timer_sec: f32,
    /// Designer-authored links are exempt from player capacity rules.
    pub is_scripted: bool,
    /// Hidden links are simulated but not rendered.
    pub hide_in_render: bool,
}

/// Seed describing a designer- or system-authored link to upsert.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedLinkSeed {
    /// Authored identifier the upsert is keyed by.
    pub id: LinkId,
    /// Faction that owns the link.
    pub owner: Owner,
    /// Tower the link leaves.
    pub from: TowerId,
    /// Tower the link enters.
    pub to: TowerId,
    /// Geometry the link follows.
    pub waypoints: Vec<Point>,
    /// Level resolving to a `LinkLevelDefinition`.
    pub level: u32,
    /// Whether the link is simulated but never rendered.
    pub hide_in_render: bool,
}

impl ScriptedLinkSeed {
    pub(crate) fn into_link(self, max_integrity: f32) -> Link {
        Link {
            id: self.id,
            owner: self.owner,
            from: self.from,
            to: self.to,
            waypoints: self.waypoints,
            level: self.level,
            integrity: max_integrity,
            under_attack_timer_sec: 0.0,
            is_scripted: true,
            hide_in_render: self.hide_in_render,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_seed_becomes_scripted_link_at_full_integrity() {
        let seed = ScriptedLinkSeed {
            id: LinkId::new("intro_supply"),
            owner: Owner::Enemy,
            from: TowerId::new("nest"),
            to: TowerId::new("gate"),
            waypoints: vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0)],
            level: 2,
            hide_in_render: true,
        };

        let link = seed.into_link(160.0);
        assert!(link.is_scripted);
        assert!(link.hide_in_render);
        assert_eq!(link.integrity, 160.0);
        assert_eq!(link.under_attack_timer_sec, 0.0);
    }
}
