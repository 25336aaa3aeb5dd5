//! Single-entity selection state machine.
//!
//! Independent of the collection: loading an entity never touches the list,
//! and a failed load keeps the previously selected entity on screen.
//! When a second entity is requested before the first arrives, only the
//! newest request may update the selection.

use sync_types::{Entity, EntityId, FetchError};

use crate::state::{Action, StoreEvent};
use crate::view::EntityView;

/// Identifies one entity request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityTicket {
    /// The requested entity.
    pub id: EntityId,
    /// Monotonic request number.
    pub seq: u64,
}

/// Inputs to the selection state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityEvent {
    /// A consumer asked for an entity.
    EntityRequested {
        /// The entity to fetch.
        id: EntityId,
    },
    /// The transport returned the entity.
    EntityLoaded {
        /// Ticket from the matching [`Action::FetchEntity`].
        ticket: EntityTicket,
        /// The fetched entity.
        entity: Entity,
    },
    /// The transport failed to return the entity.
    EntityFailed {
        /// Ticket from the matching [`Action::FetchEntity`].
        ticket: EntityTicket,
        /// Why it failed.
        error: FetchError,
    },
    /// A consumer set the selection directly (e.g. from a list row).
    Selected(Option<Entity>),
    /// A consumer dismissed the current error.
    ErrorCleared,
}

/// State of the single-entity lookup.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Option<Entity>,
    loading: bool,
    error: Option<FetchError>,
    seq: u64,
    in_flight: Option<EntityTicket>,
}

impl SelectionState {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an event and return the actions to execute.
    pub fn on_event(&mut self, event: EntityEvent) -> Vec<Action> {
        match event {
            EntityEvent::EntityRequested { id } => {
                self.seq = self.seq.wrapping_add(1);
                let ticket = EntityTicket { id, seq: self.seq };
                self.in_flight = Some(ticket);
                self.loading = true;
                self.error = None;
                vec![Action::FetchEntity { ticket }]
            }

            EntityEvent::EntityLoaded { ticket, entity } => {
                if self.in_flight != Some(ticket) {
                    return vec![stale(ticket)];
                }
                self.in_flight = None;
                self.loading = false;
                let id = entity.id;
                self.selected = Some(entity);
                vec![Action::EmitEvent(StoreEvent::EntityLoaded { id })]
            }

            EntityEvent::EntityFailed { ticket, error } => {
                if self.in_flight != Some(ticket) {
                    return vec![stale(ticket)];
                }
                self.in_flight = None;
                self.loading = false;
                self.error = Some(error.clone());
                vec![Action::EmitEvent(StoreEvent::EntityFailed {
                    id: ticket.id,
                    error,
                })]
            }

            EntityEvent::Selected(entity) => {
                // A direct selection wins over any fetch still running.
                self.in_flight = None;
                self.loading = false;
                self.selected = entity;
                vec![]
            }

            EntityEvent::ErrorCleared => {
                self.error = None;
                vec![]
            }
        }
    }

    /// The selected entity, if any.
    pub fn selected(&self) -> Option<&Entity> {
        self.selected.as_ref()
    }

    /// Whether an entity fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last entity fetch error, if not yet cleared.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Read-only projection for observers.
    pub fn view(&self) -> EntityView {
        EntityView {
            selected: self.selected.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

fn stale(ticket: EntityTicket) -> Action {
    Action::EmitEvent(StoreEvent::StaleEntityDiscarded { id: ticket.id })
}
