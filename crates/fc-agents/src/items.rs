//! The item rack: carryable food/water props with snap-back.

use fc_core::{ItemId, NeedKind, Point, Rect};

/// Registration-time description of one item.
#[derive(Clone, Debug)]
pub struct ItemSpec {
    pub kind: NeedKind,
    pub rect: Rect,
}

impl ItemSpec {
    pub fn new(kind: NeedKind, rect: Rect) -> Self {
        Self { kind, rect }
    }
}

/// A carryable prop.  Items are never consumed: every drop attempt,
/// successful or not, returns the item to `rest`.
#[derive(Clone, Debug)]
pub struct Item {
    pub id:   ItemId,
    pub kind: NeedKind,
    /// Current footprint — follows the pointer while dragging.
    pub rect: Rect,
    /// Top-left corner the item returns to after any drop.
    pub rest: Point,
    pub dragging: bool,
}

/// All items for one session, indexed by `ItemId`.
pub struct ItemRack {
    items: Vec<Item>,
}

impl ItemRack {
    pub fn new(specs: Vec<ItemSpec>) -> Self {
        let items = specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Item {
                id:       ItemId(i as u32),
                kind:     spec.kind,
                rect:     spec.rect,
                rest:     Point::new(spec.rect.x, spec.rect.y),
                dragging: false,
            })
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())
    }

    // ── Drag lifecycle ────────────────────────────────────────────────────

    /// Start dragging the first item whose footprint contains `p`.
    /// Returns the picked item, or `None` if the press missed everything.
    pub fn pick_up(&mut self, p: Point) -> Option<ItemId> {
        let item = self.items.iter_mut().find(|i| !i.dragging && i.rect.contains(p))?;
        item.dragging = true;
        Some(item.id)
    }

    /// Recenter a dragged item's footprint on the pointer.  No-op unless the
    /// item is currently dragging.
    pub fn drag_to(&mut self, id: ItemId, p: Point) {
        if let Some(item) = self.items.get_mut(id.index())
            && item.dragging
        {
            item.rect = item.rect.centered_at(p);
        }
    }

    /// Return the item to its rest position and end the drag.  Called after
    /// every release regardless of delivery outcome.
    pub fn snap_back(&mut self, id: ItemId) {
        if let Some(item) = self.items.get_mut(id.index()) {
            item.rect = item.rect.moved_to(item.rest);
            item.dragging = false;
        }
    }

    /// Snap everything back.  Called on session start and restart.
    pub fn reset(&mut self) {
        let ids: Vec<ItemId> = self.items.iter().map(|i| i.id).collect();
        for id in ids {
            self.snap_back(id);
        }
    }
}
