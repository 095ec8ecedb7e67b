#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for Relay Defence.
//!
//! The world owns the mutable simulation graph: towers, directed links, and
//! pooled packet entities. It performs no per-frame physics itself; the
//! orchestrator runs the combat step and calls the mutation surface here.
//! Malformed runtime input (unknown ids, non-positive damage, degenerate
//! geometry) is handled by silent no-ops and safe fallbacks so a single bad
//! frame can never crash a running mission — content is validated once,
//! upstream, at load time.

mod geometry;
mod links;
mod towers;

pub use geometry::{polyline_length, sample_point_on_polyline};
pub use links::{Link, ScriptedLinkSeed};
pub use towers::Tower;

use std::collections::HashSet;

use relay_defence_core::{
    LinkDestroyedEvent, LinkId, LinkLevelDefinition, Owner, Point, TowerCapturedEvent, TowerId,
    UnitPacket,
};

use links::UNDER_ATTACK_FLASH_SEC;

/// Static configuration the world is constructed from.
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Link level definitions resolved by [`World::link_level`].
    pub link_levels: Vec<LinkLevelDefinition>,
    /// Base outgoing-link allowance per tower.
    pub max_outgoing_links_per_tower: u32,
}

/// Represents the authoritative Relay Defence world state.
#[derive(Debug)]
pub struct World {
    link_levels: Vec<LinkLevelDefinition>,
    max_outgoing_links_per_tower: u32,
    towers: Vec<Tower>,
    links: Vec<Link>,
    packets: Vec<UnitPacket>,
    packet_pool: Vec<UnitPacket>,
    next_packet_id: u32,
    link_destroyed_events: Vec<LinkDestroyedEvent>,
    tower_captured_events: Vec<TowerCapturedEvent>,
}

impl World {
    /// Creates an empty world ready for level-load population.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        Self {
            link_levels: config.link_levels,
            max_outgoing_links_per_tower: config.max_outgoing_links_per_tower,
            towers: Vec::new(),
            links: Vec::new(),
            packets: Vec::new(),
            packet_pool: Vec::new(),
            next_packet_id: 0,
            link_destroyed_events: Vec::new(),
            tower_captured_events: Vec::new(),
        }
    }

    /// Inserts a tower at level load, replacing any entry with the same id.
    pub fn insert_tower(&mut self, tower: Tower) {
        if let Some(existing) = self.towers.iter_mut().find(|entry| entry.id == tower.id) {
            *existing = tower;
        } else {
            self.towers.push(tower);
        }
    }

    /// Flips a tower's ownership, buffering a [`TowerCapturedEvent`].
    ///
    /// Towers are never destroyed mid-mission; capture is the only ownership
    /// transition. Unknown ids and no-op transitions are ignored.
    pub fn capture_tower(&mut self, id: &TowerId, new_owner: Owner) {
        let Some(tower) = self.towers.iter_mut().find(|tower| &tower.id == id) else {
            return;
        };

        if tower.owner == new_owner {
            return;
        }

        let previous_owner = tower.owner;
        tower.owner = new_owner;
        self.tower_captured_events.push(TowerCapturedEvent {
            tower: id.clone(),
            previous_owner,
            new_owner,
        });
    }

    /// Creates or replaces the player-created outgoing link `from -> to`.
    ///
    /// No-op when `from == to`, when either tower is missing, or when an
    /// identical non-scripted link already exists. When the owning tower is
    /// at its outgoing cap (`max_outgoing_links_per_tower +
    /// extra_outgoing_links`), the oldest non-scripted outgoing link is
    /// evicted first. Scripted links never count toward the cap.
    pub fn set_outgoing_link(&mut self, from: &TowerId, to: &TowerId, level: u32) {
        if from == to {
            return;
        }

        let Some(source) = self.towers.iter().find(|tower| &tower.id == from) else {
            return;
        };
        if !self.towers.iter().any(|tower| &tower.id == to) {
            return;
        }

        let id = LinkId::directed(from, to);
        if self
            .links
            .iter()
            .any(|link| !link.is_scripted && link.id == id)
        {
            return;
        }

        let owner = source.owner;
        let cap = self
            .max_outgoing_links_per_tower
            .saturating_add(source.extra_outgoing_links) as usize;
        let outgoing = self
            .links
            .iter()
            .filter(|link| !link.is_scripted && &link.from == from)
            .count();

        if outgoing >= cap {
            if let Some(oldest) = self
                .links
                .iter()
                .position(|link| !link.is_scripted && &link.from == from)
            {
                self.destroy_link_at(oldest);
            }
        }

        let waypoints = self.endpoint_waypoints(from, to);
        let integrity = self.link_level(level).max_integrity;
        self.links.push(Link {
            id,
            owner,
            from: from.clone(),
            to: to.clone(),
            waypoints,
            level,
            integrity,
            under_attack_timer_sec: 0.0,
            is_scripted: false,
            hide_in_render: false,
        });
    }

    /// Idempotently upserts a designer-authored link keyed by its id.
    ///
    /// An existing entry is replaced in place rather than appended as a
    /// duplicate, so scripted sequences may re-seed every frame.
    pub fn upsert_scripted_link(&mut self, seed: ScriptedLinkSeed) {
        let integrity = self.link_level(seed.level).max_integrity;
        let link = seed.into_link(integrity);

        if let Some(existing) = self.links.iter_mut().find(|entry| entry.id == link.id) {
            *existing = link;
        } else {
            self.links.push(link);
        }
    }

    /// Garbage-collects scripted links absent from the active id set.
    ///
    /// Non-scripted (player) links are never touched.
    pub fn remove_scripted_links_not_in(&mut self, active_ids: &HashSet<LinkId>) {
        let mut index = 0;
        while index < self.links.len() {
            let link = &self.links[index];
            if link.is_scripted && !active_ids.contains(&link.id) {
                self.destroy_link_at(index);
            } else {
                index += 1;
            }
        }
    }

    /// Applies damage to a link's integrity.
    ///
    /// Non-positive damage and unknown ids are no-ops, which also makes the
    /// operation idempotent for already-destroyed links. Damage re-arms the
    /// under-attack flash timer; at zero integrity the link is destroyed and
    /// a [`LinkDestroyedEvent`] is buffered at the polyline midpoint.
    /// Returns whether destruction occurred.
    pub fn damage_link_integrity(&mut self, id: &LinkId, damage: f32) -> bool {
        if damage <= 0.0 {
            return false;
        }

        let Some(index) = self.links.iter().position(|link| &link.id == id) else {
            return false;
        };

        let link = &mut self.links[index];
        link.integrity -= damage;
        link.under_attack_timer_sec = UNDER_ATTACK_FLASH_SEC;

        if link.integrity <= 0.0 {
            self.destroy_link_at(index);
            return true;
        }

        false
    }

    /// Explicitly removes a link, emitting the same destruction event as
    /// integrity loss. Returns whether a link was removed.
    pub fn remove_link(&mut self, id: &LinkId) -> bool {
        match self.links.iter().position(|link| &link.id == id) {
            Some(index) => {
                self.destroy_link_at(index);
                true
            }
            None => false,
        }
    }

    /// Decays per-link presentation timers; called once per frame.
    pub fn tick_timers(&mut self, dt_sec: f32) {
        if dt_sec <= 0.0 {
            return;
        }

        for link in &mut self.links {
            link.under_attack_timer_sec = (link.under_attack_timer_sec - dt_sec).max(0.0);
        }
    }

    /// Resolves a link level, degrading instead of failing on bad content.
    ///
    /// Falls back to level 1's definition when the requested level is
    /// undefined, and to a synthetic zero-effect definition if even level 1
    /// is missing.
    #[must_use]
    pub fn link_level(&self, level: u32) -> LinkLevelDefinition {
        self.link_levels
            .iter()
            .find(|entry| entry.level == level)
            .or_else(|| self.link_levels.iter().find(|entry| entry.level == 1))
            .copied()
            .unwrap_or_else(LinkLevelDefinition::fallback)
    }

    /// Samples the world position at `progress` along a link's polyline.
    #[must_use]
    pub fn sample_link_point(&self, id: &LinkId, progress: f32) -> Option<Point> {
        self.links
            .iter()
            .find(|link| &link.id == id)
            .map(|link| sample_point_on_polyline(&link.waypoints, progress))
    }

    /// Inserts a packet, reusing a pooled slot when one is available.
    ///
    /// A pooled slot is overwritten field-by-field from the caller's packet
    /// (reusing its buffers); otherwise the caller's object is taken as-is.
    /// The world allocates the packet id. Returns the live index.
    pub fn acquire_packet(&mut self, fresh: UnitPacket) -> usize {
        let id = self.next_packet_id;
        self.next_packet_id = self.next_packet_id.wrapping_add(1);

        let mut packet = match self.packet_pool.pop() {
            Some(mut pooled) => {
                pooled.clone_from(&fresh);
                pooled
            }
            None => fresh,
        };
        packet.id = id;

        self.packets.push(packet);
        self.packets.len() - 1
    }

    /// Removes the packet at `index`, resetting it into the pool.
    ///
    /// Every mutable field is restored to the pooled default before the slot
    /// is recycled, so a reused packet can never leak stale combat state
    /// into a new spawn. Out-of-range indices are ignored.
    pub fn remove_packet_at(&mut self, index: usize) {
        if index >= self.packets.len() {
            return;
        }

        let mut packet = self.packets.swap_remove(index);
        packet.reset();
        self.packet_pool.push(packet);
    }

    /// Mutable access to live packets for the external simulation step.
    #[must_use]
    pub fn packets_mut(&mut self) -> &mut [UnitPacket] {
        &mut self.packets
    }

    /// Drains buffered link-destroyed events; call exactly once per tick.
    #[must_use]
    pub fn drain_link_destroyed_events(&mut self) -> Vec<LinkDestroyedEvent> {
        std::mem::take(&mut self.link_destroyed_events)
    }

    /// Drains buffered tower-captured events; call exactly once per tick.
    #[must_use]
    pub fn drain_tower_captured_events(&mut self) -> Vec<TowerCapturedEvent> {
        std::mem::take(&mut self.tower_captured_events)
    }

    fn destroy_link_at(&mut self, index: usize) {
        let link = self.links.remove(index);
        let midpoint = sample_point_on_polyline(&link.waypoints, 0.5);
        self.link_destroyed_events.push(LinkDestroyedEvent {
            link: link.id,
            owner: link.owner,
            midpoint,
        });
    }

    fn endpoint_waypoints(&self, from: &TowerId, to: &TowerId) -> Vec<Point> {
        let mut waypoints = Vec::with_capacity(2);
        for id in [from, to] {
            if let Some(tower) = self.towers.iter().find(|tower| &tower.id == id) {
                waypoints.push(tower.position);
            }
        }
        waypoints
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use relay_defence_core::{LinkId, TowerId, UnitPacket};

    use super::{Link, Tower, World};

    /// All towers in insertion order.
    #[must_use]
    pub fn towers(world: &World) -> &[Tower] {
        &world.towers
    }

    /// Looks up a tower by id.
    #[must_use]
    pub fn tower<'world>(world: &'world World, id: &TowerId) -> Option<&'world Tower> {
        world.towers.iter().find(|tower| &tower.id == id)
    }

    /// All links in creation order (oldest first).
    #[must_use]
    pub fn links(world: &World) -> &[Link] {
        &world.links
    }

    /// Looks up a link by id.
    #[must_use]
    pub fn link<'world>(world: &'world World, id: &LinkId) -> Option<&'world Link> {
        world.links.iter().find(|link| &link.id == id)
    }

    /// Non-scripted outgoing links from the provided tower, oldest first.
    #[must_use]
    pub fn outgoing_links<'world>(world: &'world World, from: &TowerId) -> Vec<&'world Link> {
        world
            .links
            .iter()
            .filter(|link| !link.is_scripted && &link.from == from)
            .collect()
    }

    /// All live packets.
    #[must_use]
    pub fn packets(world: &World) -> &[UnitPacket] {
        &world.packets
    }

    /// Number of recycled packets waiting in the pool.
    #[must_use]
    pub fn pooled_packet_count(world: &World) -> usize {
        world.packet_pool.len()
    }
}
