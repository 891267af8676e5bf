//! Headless sortable engine.
//!
//! `SortableCore` owns the list registry and one `DragState` per group. The
//! host forwards pointer input and animation ticks; every entry point returns
//! the `Action`s the host must apply to the page (show/hide elements, move the
//! helper, relocate the placeholder) plus the notifications listeners care
//! about. Nothing here touches the DOM, so the whole state machine runs in
//! native tests against a `StaticLayout`.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::candidate::{Candidate, CandidateKind, Query, compute_candidates, detect_grid};
use crate::config::{GridMode, SortOptions, Tolerance};
use crate::error::SortableError;
use crate::geometry::{Point, Rect};
use crate::layout::{Layout, Node};
use crate::pointer::PointerEvent;
use crate::registry::{ContainerId, ItemId, ListKey, ListRegistry, Templates};
use crate::session::{Anchor, DragSession, DragState, Gesture, Revert, Source};

static IDLE: DragState = DragState::Idle;

/// A committed reorder, reported once per completed drag that changed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortCompleted {
    pub item: ItemId,
    pub from_container: ContainerId,
    pub to_container: ContainerId,
    pub index_from: usize,
    pub index_to: usize,
}

/// Side effect requested by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// The group's drag flag flipped (disable text selection while true).
    SortingInProgress { key: ListKey, active: bool },
    HideSource { item: ItemId },
    ShowSource { item: ItemId },
    /// Create the floating helper over `rect`, from `template` or a clone.
    CreateHelper { item: ItemId, template: Option<Uuid>, rect: Rect },
    /// Create the placeholder sized like the source.
    CreatePlaceholder { template: Option<Uuid>, width: f64, height: f64 },
    MoveHelper { origin: Point },
    MovePlaceholder { anchor: Anchor },
    /// Candidate highlight moved; `None` clears it.
    Highlight { item: Option<ItemId> },
    DragStarted { item: ItemId, container: ContainerId, index: usize },
    RevertStarted { from: Point, to: Point, duration: f64 },
    SortCompleted(SortCompleted),
    RemoveHelper,
    RemovePlaceholder,
    DragStopped { item: ItemId, container: ContainerId, index: usize },
}

#[derive(Debug, Clone, Copy)]
struct GridCache {
    version: u64,
    tolerance: f64,
    grid: bool,
}

/// Core engine state for every sortable group on the page.
#[derive(Debug, Default)]
pub struct SortableCore {
    registry: ListRegistry,
    sessions: HashMap<ListKey, DragState>,
    grid: HashMap<ListKey, GridCache>,
}

impl SortableCore {
    #[must_use]
    pub fn new(registry: ListRegistry) -> Self {
        Self { registry, sessions: HashMap::new(), grid: HashMap::new() }
    }

    #[must_use]
    pub fn registry(&self) -> &ListRegistry {
        &self.registry
    }

    /// Gesture state of `key`'s group.
    #[must_use]
    pub fn state(&self, key: &ListKey) -> &DragState {
        self.sessions.get(key).unwrap_or(&IDLE)
    }

    #[must_use]
    pub fn is_sorting(&self, key: &ListKey) -> bool {
        self.registry.group(key).is_some_and(crate::registry::Group::is_sorting)
    }

    // --- Registration ---

    /// Register a container under `key`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateContainer` if `id` is already registered.
    pub fn register_container(&mut self, key: &ListKey, id: ContainerId) -> Result<(), SortableError> {
        self.registry.register_container(key, id)
    }

    /// Register an item in `container`, appended unless `index` is given.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContainer` or `DuplicateItem`.
    pub fn register_item(
        &mut self,
        key: &ListKey,
        container: ContainerId,
        item: ItemId,
        index: Option<usize>,
    ) -> Result<usize, SortableError> {
        self.registry.register_item(key, container, item, index)
    }

    /// Attach a drag handle to `item`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem` if `item` is not registered.
    pub fn add_handle(&mut self, item: ItemId, handle: Uuid) -> Result<(), SortableError> {
        self.registry.add_handle(item, handle)
    }

    /// # Errors
    ///
    /// Returns `UnknownItem` if `item` is not registered.
    pub fn set_item_templates(&mut self, item: ItemId, templates: Templates) -> Result<(), SortableError> {
        self.registry.set_item_templates(item, templates)
    }

    /// # Errors
    ///
    /// Returns `UnknownContainer` if `container` is not registered.
    pub fn set_container_templates(
        &mut self,
        container: ContainerId,
        templates: Templates,
    ) -> Result<(), SortableError> {
        self.registry.set_container_templates(container, templates)
    }

    /// Remove an item or container. Removing the item being dragged (or its
    /// container) cancels the gesture first; the returned actions clean up.
    pub fn deregister(&mut self, id: Uuid) -> Vec<Action> {
        let Some(key) = self.registry.key_of(id).cloned() else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        if let Some(source) = self.state(&key).source_item() {
            let owner = self.registry.position(source).map(|(container, _)| container);
            if source == id || owner == Some(id) {
                warn!(%key, %id, "deregistered during drag; cancelling");
                actions = self.pointer_cancel(source);
            }
        }
        self.registry.deregister(id);
        if self.registry.group(&key).is_none() {
            self.sessions.remove(&key);
            self.grid.remove(&key);
        }
        actions
    }

    // --- Layout ---

    /// Whether `key`'s group lays out as a grid under `options`.
    ///
    /// Auto detection is cached per group and recomputed whenever membership
    /// or order changes.
    pub fn is_grid(&mut self, key: &ListKey, options: &SortOptions, layout: &dyn Layout) -> bool {
        match options.grid {
            GridMode::Grid => true,
            GridMode::List => false,
            GridMode::Auto => {
                let Some(group) = self.registry.group(key) else {
                    return false;
                };
                let version = group.version();
                if let Some(cached) = self.grid.get(key)
                    && cached.version == version
                    && cached.tolerance.total_cmp(&options.grid_tolerance).is_eq()
                {
                    return cached.grid;
                }
                let grid = detect_grid(group, layout, options.grid_tolerance);
                debug!(%key, grid, "grid detection");
                self.grid.insert(key.clone(), GridCache { version, tolerance: options.grid_tolerance, grid });
                grid
            }
        }
    }

    // --- Input ---

    /// Pointer pressed on `target` (an item or one of its handles).
    ///
    /// Arms a gesture when the group is idle and the press is a primary
    /// button or single touch; anything else is ignored.
    pub fn pointer_down(
        &mut self,
        target: Uuid,
        event: &PointerEvent,
        options: &SortOptions,
        layout: &dyn Layout,
    ) -> Vec<Action> {
        let Some(item) = self.registry.resolve_target(target) else {
            return Vec::new();
        };
        if !event.is_primary() {
            return Vec::new();
        }
        let Some(start) = event.position() else {
            return Vec::new();
        };
        let Some(key) = self.registry.key_of(item).cloned() else {
            return Vec::new();
        };
        if self.is_sorting(&key) || !self.state(&key).is_idle() {
            debug!(%key, %item, "pointer down ignored; drag in progress");
            return Vec::new();
        }
        let (Some((container, index)), Some(group)) = (self.registry.position(item), self.registry.group(&key))
        else {
            return Vec::new();
        };
        let Some(source_rect) = layout.bounds(Node::Item(item)) else {
            warn!(%item, "pointer down on item without bounds");
            return Vec::new();
        };

        let offset = Point::new(
            fraction(start.x - source_rect.left, source_rect.width),
            fraction(start.y - source_rect.top, source_rect.height),
        );
        let containment = options.containment.as_deref().and_then(|sel| layout.containment_bounds(item, sel));
        let gesture = Gesture {
            source: Source { item, container, index },
            options: options.clone(),
            start,
            started_at: event.timestamp,
            offset,
            source_rect,
            containment,
            templates: group.templates(item),
        };

        let mut actions = Vec::new();
        if gesture.hides_source_early() {
            actions.push(Action::HideSource { item });
        }
        self.sessions.insert(key, DragState::Armed(gesture));
        actions
    }

    /// Pointer moved during a gesture on `item`.
    pub fn pointer_move(&mut self, item: ItemId, event: &PointerEvent, layout: &dyn Layout) -> Vec<Action> {
        let Some(point) = event.position() else {
            return Vec::new();
        };
        let Some(key) = self.registry.key_of(item).cloned() else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        let next = match self.sessions.remove(&key).unwrap_or_default() {
            DragState::Armed(gesture) if gesture.source.item == item => {
                if gesture.start.distance(point) < gesture.options.drag_threshold {
                    DragState::Armed(gesture)
                } else {
                    let mut session = self.begin_drag(&key, gesture, layout, &mut actions);
                    self.update_drag(&key, &mut session, point, layout, &mut actions);
                    DragState::Dragging(session)
                }
            }
            DragState::Dragging(mut session) if session.gesture.source.item == item => {
                self.update_drag(&key, &mut session, point, layout, &mut actions);
                DragState::Dragging(session)
            }
            other => other,
        };
        self.store(key, next);
        actions
    }

    /// Pointer released. Commits the move when a target was selected and
    /// starts the revert animation if one is configured.
    pub fn pointer_up(&mut self, item: ItemId, layout: &dyn Layout) -> Vec<Action> {
        let Some(key) = self.registry.key_of(item).cloned() else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        let next = match self.sessions.remove(&key).unwrap_or_default() {
            DragState::Armed(gesture) if gesture.source.item == item => {
                if gesture.hides_source_early() {
                    actions.push(Action::ShowSource { item });
                }
                DragState::Idle
            }
            DragState::Dragging(session) if session.gesture.source.item == item => {
                self.drop_session(&key, session, layout, &mut actions)
            }
            other => other,
        };
        self.store(key, next);
        actions
    }

    /// Abandon the gesture on `item` without committing anything.
    pub fn pointer_cancel(&mut self, item: ItemId) -> Vec<Action> {
        let Some(key) = self.registry.key_of(item).cloned() else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        let next = match self.sessions.remove(&key).unwrap_or_default() {
            DragState::Armed(gesture) if gesture.source.item == item => {
                if gesture.hides_source_early() {
                    actions.push(Action::ShowSource { item });
                }
                DragState::Idle
            }
            DragState::Dragging(session) | DragState::Settling { session, .. }
                if session.gesture.source.item == item =>
            {
                debug!(%key, %item, "drag cancelled");
                self.finish(&key, &session, &mut actions);
                DragState::Idle
            }
            other => other,
        };
        self.store(key, next);
        actions
    }

    /// Advance revert animations by `dt` milliseconds.
    pub fn tick(&mut self, dt: f64) -> Vec<Action> {
        let settling: Vec<ListKey> = self
            .sessions
            .iter()
            .filter(|(_, state)| matches!(state, DragState::Settling { .. }))
            .map(|(key, _)| key.clone())
            .collect();

        let mut actions = Vec::new();
        for key in settling {
            let Some(DragState::Settling { session, mut revert }) = self.sessions.remove(&key) else {
                continue;
            };
            let origin = revert.advance(dt);
            actions.push(Action::MoveHelper { origin });
            if revert.is_done() {
                self.finish(&key, &session, &mut actions);
            } else {
                self.sessions.insert(key, DragState::Settling { session, revert });
            }
        }
        actions
    }

    // --- Internals ---

    fn store(&mut self, key: ListKey, state: DragState) {
        if state.is_idle() {
            self.sessions.remove(&key);
        } else {
            self.sessions.insert(key, state);
        }
    }

    fn begin_drag(
        &mut self,
        key: &ListKey,
        gesture: Gesture,
        layout: &dyn Layout,
        actions: &mut Vec<Action>,
    ) -> DragSession {
        let grid = self.is_grid(key, &gesture.options, layout);
        self.registry.set_sorting(key, true);

        let Source { item, container, index } = gesture.source;
        let rect = gesture.source_rect;
        actions.push(Action::SortingInProgress { key: key.clone(), active: true });
        actions.push(Action::CreateHelper { item, template: gesture.templates.helper, rect });
        actions.push(Action::CreatePlaceholder {
            template: gesture.templates.placeholder,
            width: rect.width,
            height: rect.height,
        });
        actions.push(Action::MovePlaceholder { anchor: Anchor::After(item) });
        if !gesture.hides_source_early() {
            actions.push(Action::HideSource { item });
        }
        actions.push(Action::DragStarted { item, container, index });
        info!(%key, %item, index, grid, "drag started");

        DragSession::new(gesture, grid)
    }

    fn update_drag(
        &mut self,
        key: &ListKey,
        session: &mut DragSession,
        point: Point,
        layout: &dyn Layout,
        actions: &mut Vec<Action>,
    ) {
        let origin = session.helper_origin(point);
        session.helper = session.helper.at(origin);
        actions.push(Action::MoveHelper { origin });

        session.grid = self.is_grid(key, &session.gesture.options, layout);
        let focus = match session.gesture.options.tolerance {
            Tolerance::Pointer => point,
            Tolerance::Element => session.helper.center(),
        };
        let Some(group) = self.registry.group(key) else {
            return;
        };
        let query = Query {
            pointer: focus,
            grid: session.grid,
            containment: session.gesture.options.containment.as_deref(),
            source: Some(session.gesture.source.item),
        };
        session.candidates = compute_candidates(group, layout, &query);

        // The placeholder winning keeps the previous target; only an item
        // keeps the highlight.
        let best = session.candidates.first().copied();
        let placement = best.and_then(|best| match (best.kind, best.container) {
            (CandidateKind::Item { item, after }, _) => {
                Some((best, if after { Anchor::After(item) } else { Anchor::Before(item) }, Some(item)))
            }
            (CandidateKind::EmptyContainer, Some(container)) => Some((best, Anchor::AppendTo(container), None)),
            _ => None,
        });
        let highlight = placement.and_then(|(_, _, highlight)| highlight);
        if let Some((best, anchor, _)) = placement {
            session.target = Some(best);
            if anchor != session.placeholder {
                session.placeholder = anchor;
                actions.push(Action::MovePlaceholder { anchor });
            }
        }
        if highlight != session.highlighted {
            session.highlighted = highlight;
            actions.push(Action::Highlight { item: highlight });
        }
    }

    fn drop_session(
        &mut self,
        key: &ListKey,
        session: DragSession,
        layout: &dyn Layout,
        actions: &mut Vec<Action>,
    ) -> DragState {
        if let Some(target) = session.target {
            self.commit(key, &session, target, actions);
        }

        let from = session.helper.origin();
        if let Some(to) = layout.bounds(Node::Placeholder).map(|rect| rect.origin())
            && let Some(duration) = session.gesture.options.revert_duration(from.distance(to))
            && duration > 0.0
        {
            actions.push(Action::RevertStarted { from, to, duration });
            return DragState::Settling { session, revert: Revert::new(from, to, duration) };
        }

        self.finish(key, &session, actions);
        DragState::Idle
    }

    fn commit(&mut self, key: &ListKey, session: &DragSession, target: Candidate, actions: &mut Vec<Action>) {
        let item = session.gesture.source.item;
        let Some(dest) = target.container else {
            return;
        };
        let (index, after) = match target.kind {
            CandidateKind::Item { item: near, after } => {
                let index = self.registry.position(near).map_or(target.target_index, |(_, index)| index);
                (index, after)
            }
            CandidateKind::EmptyContainer => (0, false),
            CandidateKind::Placeholder => return,
        };
        let Some(moved) = self.registry.commit_move(item, dest, index, after) else {
            warn!(%key, %item, %dest, "drop target vanished; order unchanged");
            return;
        };
        if moved.changed() {
            info!(
                %key,
                %item,
                index_from = moved.index_from,
                index_to = moved.index_to,
                cross = moved.from_container != moved.to_container,
                "sort completed"
            );
            actions.push(Action::SortCompleted(SortCompleted {
                item,
                from_container: moved.from_container,
                to_container: moved.to_container,
                index_from: moved.index_from,
                index_to: moved.index_to,
            }));
        }
    }

    fn finish(&mut self, key: &ListKey, session: &DragSession, actions: &mut Vec<Action>) {
        let Source { item, container, index } = session.gesture.source;
        self.registry.set_sorting(key, false);
        actions.push(Action::SortingInProgress { key: key.clone(), active: false });
        actions.push(Action::RemovePlaceholder);
        actions.push(Action::RemoveHelper);
        actions.push(Action::ShowSource { item });
        if session.highlighted.is_some() {
            actions.push(Action::Highlight { item: None });
        }
        actions.push(Action::DragStopped { item, container, index });
        debug!(%key, %item, "drag stopped");
    }
}

fn fraction(delta: f64, extent: f64) -> f64 {
    if extent > 0.0 { delta / extent } else { 0.0 }
}
