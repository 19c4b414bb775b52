//! Combination engine
//!
//! Owns the live items, the discovery set and the drag/hover state, and turns
//! "drop the dragged item on the hovered one" into despawns, a spawn and
//! discovery bookkeeping.
//!
//! State machine:
//!
//! ```text
//!   Idle ──begin_drag──▶ Holding { dragged, hovered } ──end_drag──▶ Resolving ──▶ Idle
//!                            │  ▲
//!                            └──┘ set_hovered
//! ```
//!
//! `Resolving` only exists while a combination is being applied. Any drag,
//! drop or reset that arrives in that window is rejected.

use fusion_core::{midpoint, ItemKind, SpawnArea, Vec2};
use fusion_ecs::{Item, ItemHandle, ItemWorld};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::discovery::{DiscoveryProgress, DiscoveryTracker};
use crate::error::ConfigError;
use crate::host::{GameHost, NullHost};
use crate::recipe::RecipeBook;

/// Where the pointer interaction currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    /// Nothing is being dragged
    #[default]
    Idle,
    /// An item is held; `hovered` is the item under the pointer, if any
    Holding {
        dragged: ItemHandle,
        hovered: Option<ItemHandle>,
    },
    /// A combination is being applied
    Resolving,
}

/// Why a request did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// A combination is already being applied
    AlreadyResolving,
    /// Released without holding anything
    NothingDragged,
    /// Released over empty space
    NothingHovered,
    /// Dropped an item onto itself
    SelfCombination,
    /// A handle referred to an item that no longer exists
    StaleHandle,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::AlreadyResolving => "a combination is already in progress",
            Self::NothingDragged => "nothing is being dragged",
            Self::NothingHovered => "nothing under the pointer",
            Self::SelfCombination => "an item cannot be combined with itself",
            Self::StaleHandle => "that item no longer exists",
        };
        f.write_str(text)
    }
}

/// Result of [`CombinationEngine::begin_drag`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Started,
    Rejected(RejectReason),
}

/// Result of [`CombinationEngine::end_drag`]
#[derive(Debug, Clone, PartialEq)]
pub enum CombineOutcome {
    /// Both inputs were consumed and `result` spawned at `position`
    Combined {
        result: ItemHandle,
        kind: ItemKind,
        position: Vec2,
        newly_discovered: bool,
        victory: bool,
    },
    /// The pair has no recipe; both items are untouched
    NoRecipe,
    Rejected(RejectReason),
}

impl CombineOutcome {
    pub fn is_combined(&self) -> bool {
        matches!(self, Self::Combined { .. })
    }
}

/// Result of [`CombinationEngine::reset`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Done,
    Rejected(RejectReason),
}

/// The game's single authoritative state object.
///
/// Built once by the host, which then passes `&mut` access to whatever drives
/// it (input adapter, buttons). The host's callbacks are injected as `H`.
pub struct CombinationEngine<H: GameHost = NullHost> {
    recipes: RecipeBook,
    discoveries: DiscoveryTracker,
    world: ItemWorld,
    starters: Vec<ItemKind>,
    spawn_area: SpawnArea,
    rng: StdRng,
    state: InteractionState,
    /// Set once victory has been reported; cleared by `reset`.
    victory_signaled: bool,
    host: H,
}

impl<H: GameHost> CombinationEngine<H> {
    /// Validate `config`, build the engine and lay out the starter items.
    pub fn new(config: GameConfig, host: H) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut engine = Self {
            recipes: config.recipe_book(),
            discoveries: DiscoveryTracker::new(config.victory_threshold),
            world: ItemWorld::new(),
            starters: config.starter_items,
            spawn_area: config.spawn_area,
            rng,
            state: InteractionState::Idle,
            victory_signaled: false,
            host,
        };
        engine.restart();
        info!(
            "Combination engine ready: {} recipes, {} starters, {} to win",
            engine.recipes.len(),
            engine.starters.len(),
            engine.discoveries.threshold()
        );
        Ok(engine)
    }

    // ---- Drag system ----

    /// Pick up `handle`. Ignored while a combination is being applied.
    pub fn begin_drag(&mut self, handle: ItemHandle) -> DragOutcome {
        if self.is_resolving() {
            debug!("Drag of {handle} suppressed: combination in progress");
            return DragOutcome::Rejected(RejectReason::AlreadyResolving);
        }
        if !self.world.is_alive(handle) {
            warn!("Drag requested for stale item {handle}");
            return DragOutcome::Rejected(RejectReason::StaleHandle);
        }

        self.state = InteractionState::Holding {
            dragged: handle,
            hovered: None,
        };
        DragOutcome::Started
    }

    /// Record the item under the pointer, or clear it with `None`.
    ///
    /// Only meaningful while holding an item; returns whether it was recorded.
    pub fn set_hovered(&mut self, handle: Option<ItemHandle>) -> bool {
        let InteractionState::Holding { hovered, .. } = &mut self.state else {
            return false;
        };
        match handle {
            Some(h) if !self.world.is_alive(h) => {
                warn!("Hover reported for stale item {h}");
                *hovered = None;
                false
            }
            _ => {
                *hovered = handle;
                true
            }
        }
    }

    /// Drop the held item onto the hovered one and try to combine them.
    ///
    /// Whatever happens, the hold ends and the engine is `Idle` afterwards,
    /// except when called mid-resolution, which changes nothing.
    pub fn end_drag(&mut self) -> CombineOutcome {
        let (dragged, hovered) = match self.state {
            InteractionState::Resolving => {
                debug!("Already processing a combination");
                return CombineOutcome::Rejected(RejectReason::AlreadyResolving);
            }
            InteractionState::Idle => {
                debug!("No dragged item");
                return CombineOutcome::Rejected(RejectReason::NothingDragged);
            }
            InteractionState::Holding { dragged, hovered } => (dragged, hovered),
        };
        self.state = InteractionState::Idle;

        let Some(hovered) = hovered else {
            debug!("No hovered item");
            return CombineOutcome::Rejected(RejectReason::NothingHovered);
        };
        if dragged == hovered {
            debug!("Self-combination blocked for {dragged}");
            return CombineOutcome::Rejected(RejectReason::SelfCombination);
        }

        self.state = InteractionState::Resolving;
        let outcome = self.resolve(dragged, hovered);
        self.state = InteractionState::Idle;
        outcome
    }

    fn resolve(&mut self, dragged: ItemHandle, hovered: ItemHandle) -> CombineOutcome {
        let (Some(first), Some(second)) = (self.world.get(dragged), self.world.get(hovered)) else {
            warn!("Combination of {dragged} and {hovered} refers to a destroyed item");
            return CombineOutcome::Rejected(RejectReason::StaleHandle);
        };
        debug!("Attempting combination: {} + {}", first.kind, second.kind);

        let position = midpoint(first.position, second.position);
        let kind = match self.recipes.find(first.kind.as_str(), second.kind.as_str()) {
            Some(recipe) => recipe.result.clone(),
            None => {
                debug!("No recipe for {} + {}", first.kind, second.kind);
                return CombineOutcome::NoRecipe;
            }
        };

        self.despawn(dragged);
        self.despawn(hovered);
        let result = self.spawn_at(kind.clone(), position);

        let newly_discovered = self.discoveries.record(&kind);
        let mut victory = false;
        if newly_discovered {
            info!("New discovery: {} ({})", kind, self.discoveries.progress());
            self.host.discovery_progress(self.discoveries.progress());
            self.host.play_discovery_effect(position);
            victory = self.check_victory();
        } else {
            info!("Combined into {}", kind);
        }

        CombineOutcome::Combined {
            result,
            kind,
            position,
            newly_discovered,
            victory,
        }
    }

    // ---- Spawning ----

    /// Place an item of `kind`, at a random point of the spawn area unless a
    /// position is given.
    ///
    /// With `count_as_discovered`, a kind not seen before joins the discovery
    /// set (no discovery effect is played for it).
    pub fn spawn_item(
        &mut self,
        kind: impl Into<ItemKind>,
        position: Option<Vec2>,
        count_as_discovered: bool,
    ) -> ItemHandle {
        let kind = kind.into();
        let position = position.unwrap_or_else(|| self.spawn_area.random_point(&mut self.rng));
        let handle = self.spawn_at(kind.clone(), position);

        if count_as_discovered && self.discoveries.record(&kind) {
            info!("Discovered {} by spawning ({})", kind, self.discoveries.progress());
            self.host.discovery_progress(self.discoveries.progress());
            self.check_victory();
        }
        handle
    }

    fn spawn_at(&mut self, kind: ItemKind, position: Vec2) -> ItemHandle {
        let handle = self.world.spawn(kind, position);
        if let Some(item) = self.world.get(handle) {
            self.host.item_spawned(handle, item);
        }
        handle
    }

    fn despawn(&mut self, handle: ItemHandle) -> Option<Item> {
        let item = self.world.despawn(handle)?;
        self.host.item_despawned(handle);
        Some(item)
    }

    // ---- Reset ----

    /// Destroy every item, forget all discoveries and lay out the starters
    /// again. Starters count as discovered but play no effect.
    pub fn reset(&mut self) -> ResetOutcome {
        if self.is_resolving() {
            debug!("Reset suppressed: combination in progress");
            return ResetOutcome::Rejected(RejectReason::AlreadyResolving);
        }
        self.restart();
        info!("Play area reset ({})", self.discoveries.progress());
        ResetOutcome::Done
    }

    fn restart(&mut self) {
        self.state = InteractionState::Idle;
        for handle in self.world.clear() {
            self.host.item_despawned(handle);
        }

        self.discoveries.reset(&self.starters);
        self.victory_signaled = false;

        let starters = self.starters.clone();
        for kind in starters {
            let position = self.spawn_area.random_point(&mut self.rng);
            self.spawn_at(kind, position);
        }

        self.host.discovery_progress(self.discoveries.progress());
        self.check_victory();
    }

    /// Report victory the first time the threshold is reached.
    fn check_victory(&mut self) -> bool {
        if self.victory_signaled || !self.discoveries.is_victory() {
            return false;
        }
        self.victory_signaled = true;
        info!("Victory! {} discoveries", self.discoveries.count());
        self.host.victory();
        true
    }

    // ---- Queries ----

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_resolving(&self) -> bool {
        matches!(self.state, InteractionState::Resolving)
    }

    /// The item currently held, if any
    pub fn dragged(&self) -> Option<ItemHandle> {
        match self.state {
            InteractionState::Holding { dragged, .. } => Some(dragged),
            _ => None,
        }
    }

    /// The item currently under the pointer while holding, if any
    pub fn hovered(&self) -> Option<ItemHandle> {
        match self.state {
            InteractionState::Holding { hovered, .. } => hovered,
            _ => None,
        }
    }

    pub fn world(&self) -> &ItemWorld {
        &self.world
    }

    pub fn discoveries(&self) -> &DiscoveryTracker {
        &self.discoveries
    }

    pub fn progress(&self) -> DiscoveryProgress {
        self.discoveries.progress()
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    pub fn spawn_area(&self) -> SpawnArea {
        self.spawn_area
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
