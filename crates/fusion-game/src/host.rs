//! Host collaborators
//!
//! The engine never draws, plays particles or shows panels itself. It tells
//! the host through [`GameHost`], which the host hands to the engine when it
//! builds it.

use fusion_core::{ItemKind, Vec2};
use fusion_ecs::{Item, ItemHandle};

use crate::discovery::DiscoveryProgress;

/// Presentation and lifecycle callbacks fired by the engine.
///
/// Every method defaults to doing nothing so a host only implements what it
/// shows.
pub trait GameHost {
    /// An item was placed in the world (create its sprite)
    fn item_spawned(&mut self, _handle: ItemHandle, _item: &Item) {}

    /// An item left the world (destroy its sprite)
    fn item_despawned(&mut self, _handle: ItemHandle) {}

    /// The discovery counter changed
    fn discovery_progress(&mut self, _progress: DiscoveryProgress) {}

    /// A combination produced a never-before-seen item at `position`
    fn play_discovery_effect(&mut self, _position: Vec2) {}

    /// The discovery threshold was reached
    fn victory(&mut self) {}
}

/// Host that ignores every callback
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl GameHost for NullHost {}

/// One recorded host callback
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Spawned {
        handle: ItemHandle,
        kind: ItemKind,
        position: Vec2,
    },
    Despawned(ItemHandle),
    Progress(DiscoveryProgress),
    DiscoveryEffect(Vec2),
    Victory,
}

/// Host that records every callback in order
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded events, leaving the log empty
    pub fn take(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn effect_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HostEvent::DiscoveryEffect(_)))
            .count()
    }

    pub fn victory_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HostEvent::Victory))
            .count()
    }

    /// Most recent progress notification, if any
    pub fn last_progress(&self) -> Option<DiscoveryProgress> {
        self.events.iter().rev().find_map(|e| match e {
            HostEvent::Progress(progress) => Some(*progress),
            _ => None,
        })
    }
}

impl GameHost for RecordingHost {
    fn item_spawned(&mut self, handle: ItemHandle, item: &Item) {
        self.events.push(HostEvent::Spawned {
            handle,
            kind: item.kind.clone(),
            position: item.position,
        });
    }

    fn item_despawned(&mut self, handle: ItemHandle) {
        self.events.push(HostEvent::Despawned(handle));
    }

    fn discovery_progress(&mut self, progress: DiscoveryProgress) {
        self.events.push(HostEvent::Progress(progress));
    }

    fn play_discovery_effect(&mut self, position: Vec2) {
        self.events.push(HostEvent::DiscoveryEffect(position));
    }

    fn victory(&mut self) {
        self.events.push(HostEvent::Victory);
    }
}

impl<H: GameHost + ?Sized> GameHost for &mut H {
    fn item_spawned(&mut self, handle: ItemHandle, item: &Item) {
        (**self).item_spawned(handle, item);
    }

    fn item_despawned(&mut self, handle: ItemHandle) {
        (**self).item_despawned(handle);
    }

    fn discovery_progress(&mut self, progress: DiscoveryProgress) {
        (**self).discovery_progress(progress);
    }

    fn play_discovery_effect(&mut self, position: Vec2) {
        (**self).play_discovery_effect(position);
    }

    fn victory(&mut self) {
        (**self).victory();
    }
}
