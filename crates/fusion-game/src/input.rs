//! Input adapter
//!
//! Translates pointer-device vocabulary (press, enter, exit, release) into the
//! engine's drag operations. Hosts push [`Command`]s onto a [`CommandQueue`]
//! from their event callbacks and drain it once per frame, so nothing fired
//! during a combination can reach back into the engine mid-way.

use std::collections::VecDeque;

use fusion_core::{ItemKind, Vec2};
use fusion_ecs::ItemHandle;

use crate::engine::{CombinationEngine, CombineOutcome, DragOutcome, ResetOutcome};
use crate::host::GameHost;

/// Raw pointer events reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Button pressed over an item
    Pressed(ItemHandle),
    /// Pointer moved onto an item
    Entered(ItemHandle),
    /// Pointer left an item
    Exited(ItemHandle),
    /// Button released
    Released,
}

/// Everything a host can ask of the engine
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Pointer(PointerEvent),
    /// Spawn an item from the discovery list or a debug button
    Spawn {
        kind: ItemKind,
        position: Option<Vec2>,
    },
    /// The "clear" button
    Reset,
}

impl From<PointerEvent> for Command {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}

/// What applying a command did
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Drag(DragOutcome),
    /// Whether a hover change was recorded
    Hover(bool),
    Combine(CombineOutcome),
    Spawned(ItemHandle),
    Reset(ResetOutcome),
}

/// FIFO of pending commands
#[derive(Debug, Default, Clone)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: impl Into<Command>) {
        self.pending.push_back(command.into());
    }

    /// Queue a full press-enter-release gesture
    pub fn push_drop(&mut self, dragged: ItemHandle, target: ItemHandle) {
        self.push(PointerEvent::Pressed(dragged));
        self.push(PointerEvent::Entered(target));
        self.push(PointerEvent::Released);
    }

    pub fn pop(&mut self) -> Option<Command> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<H: GameHost> CombinationEngine<H> {
    /// Apply one command
    pub fn apply(&mut self, command: Command) -> Response {
        match command {
            Command::Pointer(PointerEvent::Pressed(handle)) => {
                Response::Drag(self.begin_drag(handle))
            }
            // Enter only counts while an item is held, which `set_hovered` enforces.
            Command::Pointer(PointerEvent::Entered(handle)) => {
                Response::Hover(self.set_hovered(Some(handle)))
            }
            Command::Pointer(PointerEvent::Exited(handle)) => {
                // Leaving an item the pointer is no longer over changes nothing.
                if self.hovered() == Some(handle) {
                    Response::Hover(self.set_hovered(None))
                } else {
                    Response::Hover(false)
                }
            }
            Command::Pointer(PointerEvent::Released) => Response::Combine(self.end_drag()),
            Command::Spawn { kind, position } => {
                Response::Spawned(self.spawn_item(kind, position, true))
            }
            Command::Reset => Response::Reset(self.reset()),
        }
    }

    /// Apply every queued command in order
    pub fn drain(&mut self, queue: &mut CommandQueue) -> Vec<Response> {
        let mut responses = Vec::with_capacity(queue.len());
        while let Some(command) = queue.pop() {
            responses.push(self.apply(command));
        }
        responses
    }
}
