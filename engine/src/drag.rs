//! Pointer-driven bubble dragging and drop-zone resolution.
//!
//! The presentation layer republishes zone and bubble bounds every frame, so
//! resolution always sees the current layout — zones may reflow, and nothing
//! here caches stale geometry across frames.

use mindsweep_types::{Bounds, Category, Point, ThoughtId};

/// Drop-zone identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneId {
    Keep,
    LetGo,
}

impl ZoneId {
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Keep => Category::Keep,
            Self::LetGo => Category::LetGo,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Keep => "Keep",
            Self::LetGo => "Let Go",
        }
    }
}

/// Zone bounds registry, replacing ambient lookup-by-id with explicit state.
///
/// Registration order is resolution priority: should two zones ever overlap,
/// the first registered wins.
#[derive(Debug, Default)]
pub struct ZoneRegistry {
    zones: Vec<(ZoneId, Bounds)>,
}

impl ZoneRegistry {
    /// Publish a zone's current bounds, keeping its original priority slot if
    /// it was already registered.
    pub fn publish(&mut self, zone: ZoneId, bounds: Bounds) {
        if let Some(entry) = self.zones.iter_mut().find(|(id, _)| *id == zone) {
            entry.1 = bounds;
        } else {
            self.zones.push((zone, bounds));
        }
    }

    /// The first registered zone whose bounds contain `point`, if any.
    #[must_use]
    pub fn resolve(&self, point: Point) -> Option<ZoneId> {
        self.zones
            .iter()
            .find(|(_, bounds)| bounds.contains(point))
            .map(|(zone, _)| *zone)
    }
}

/// One rendered bubble's interactive geometry for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct BubbleEntry {
    pub id: ThoughtId,
    pub bounds: Bounds,
    /// Cell of the remove affordance; a press here deletes instead of drags.
    pub remove_cell: Point,
}

/// Rendered bubble geometry, cleared and republished in paint order each
/// frame. The topmost (last painted) bubble wins hit-tests.
#[derive(Debug, Default)]
pub struct BubbleRegistry {
    entries: Vec<BubbleEntry>,
}

impl BubbleRegistry {
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn publish(&mut self, entry: BubbleEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<BubbleEntry> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.bounds.contains(point))
            .copied()
    }
}

/// A drag in progress: the grabbed thought, the pointer's offset within the
/// bubble at grab time, and the live bubble position.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    id: ThoughtId,
    offset_x: u16,
    offset_y: u16,
    position: Point,
}

/// Pointer-drag state machine: `Idle` or `Dragging`.
///
/// While dragging, the live position (pointer minus grab offset) is both the
/// rendered bubble position and the zone hit-test point.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
    hover: Option<ZoneId>,
}

impl DragController {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The dragged thought and its live position, while a drag is active.
    #[must_use]
    pub fn dragged(&self) -> Option<(ThoughtId, Point)> {
        self.session.map(|session| (session.id, session.position))
    }

    /// Zone the live position currently resolves to, for highlighting.
    #[must_use]
    pub fn hover(&self) -> Option<ZoneId> {
        self.hover
    }

    /// Idle → Dragging on pointer-down over a bubble. Ignored mid-drag.
    pub fn begin(&mut self, id: ThoughtId, grab: Point, origin: Point) {
        if self.session.is_some() {
            return;
        }
        self.session = Some(DragSession {
            id,
            offset_x: grab.x.saturating_sub(origin.x),
            offset_y: grab.y.saturating_sub(origin.y),
            position: origin,
        });
    }

    /// Recompute the live position from a pointer move and refresh the zone
    /// highlight. Ignored while idle.
    pub fn update(&mut self, pointer: Point, zones: &ZoneRegistry) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.position = Point::new(
            pointer.x.saturating_sub(session.offset_x),
            pointer.y.saturating_sub(session.offset_y),
        );
        self.hover = zones.resolve(session.position);
    }

    /// Dragging → Idle. Resolves the drop zone once from the final live
    /// position and clears the highlight regardless of outcome.
    pub fn finish(&mut self, zones: &ZoneRegistry) -> Option<DropOutcome> {
        self.hover = None;
        let session = self.session.take()?;
        Some(DropOutcome {
            id: session.id,
            position: session.position,
            zone: zones.resolve(session.position),
        })
    }
}

/// Result of drop-zone resolution at drag end.
#[derive(Debug, Clone, Copy)]
pub struct DropOutcome {
    pub id: ThoughtId,
    /// Final live position; becomes the thought's stored position.
    pub position: Point,
    /// `None` leaves the thought's category unchanged.
    pub zone: Option<ZoneId>,
}
