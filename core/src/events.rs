//! Events buffered by the world and drained once per orchestrator tick.

use serde::{Deserialize, Serialize};

use crate::{LinkId, Owner, Point, TowerId};

/// Announces that a link was destroyed, for presentation effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkDestroyedEvent {
    /// Identifier of the destroyed link.
    pub link: LinkId,
    /// Owner of the link at destruction time.
    pub owner: Owner,
    /// Midpoint of the link's polyline, where effects play.
    pub midpoint: Point,
}

/// Announces that a tower changed ownership.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerCapturedEvent {
    /// Identifier of the captured tower.
    pub tower: TowerId,
    /// Owner the tower was taken from.
    pub previous_owner: Owner,
    /// Owner the tower now belongs to.
    pub new_owner: Owner,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_destroyed_event_round_trips_through_bincode() {
        let event = LinkDestroyedEvent {
            link: LinkId::new("gate->keep"),
            owner: Owner::Player,
            midpoint: Point::new(4.0, 2.5),
        };
        let bytes = bincode::serialize(&event).expect("serialize");
        let restored: LinkDestroyedEvent = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, event);
    }

    #[test]
    fn tower_captured_event_round_trips_through_bincode() {
        let event = TowerCapturedEvent {
            tower: TowerId::new("keep"),
            previous_owner: Owner::Enemy,
            new_owner: Owner::Player,
        };
        let bytes = bincode::serialize(&event).expect("serialize");
        let restored: TowerCapturedEvent = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, event);
    }
}
