//! Memory of front cards that reached the stopping line.
//!
//! Once a front card pins, the generic stacking formula no longer describes
//! it: on the next page it is not in the visible range at all.  The cache
//! keeps its last pinned record so the layout can keep drawing it at the
//! edge.  Entries are overwritten when the same card pins again and are
//! never removed; at most one exists per item.

use std::collections::HashMap;

use super::attributes::{CardAttributes, PINNED_Z_INDEX};
use super::geometry::{Point, Size};

/// A pinned record plus the scroll offset it was captured at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinnedCard {
    pub offset_when_pinned: f64,
    pub attributes: CardAttributes,
}

#[derive(Debug, Clone, Default)]
pub struct PinnedCardCache {
    entries: HashMap<usize, PinnedCard>,
}

impl PinnedCardCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&PinnedCard> {
        self.entries.get(&index)
    }

    /// Store (or replace) the entry for `index`, returning what was there.
    pub fn put(&mut self, index: usize, card: PinnedCard) -> Option<PinnedCard> {
        self.entries.insert(index, card)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The cached record for `index`, re-anchored to the current viewport.
    ///
    /// Transform and opacity are replayed.  Centre and size come from the
    /// caller, so the card stays glued to the edge while the strip keeps
    /// moving and follows the stage through a resize.
    pub fn reanchored(&self, index: usize, center: Point, size: Size) -> Option<CardAttributes> {
        let card = self.entries.get(&index)?;
        let mut attributes = card.attributes;
        attributes.center = center;
        attributes.size = size;
        attributes.z_index = PINNED_Z_INDEX;
        attributes.is_pinned = true;
        Some(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Transform;

    fn record(index: usize, x: f64) -> CardAttributes {
        CardAttributes {
            index,
            center: Point::new(x, 250.0),
            size: Size::new(260.0, 500.0),
            transform: Transform::scale(1.05),
            opacity: 1.0,
            z_index: 4,
            is_pinned: true,
        }
    }

    #[test]
    fn put_overwrites_previous_entry() {
        let mut cache = PinnedCardCache::new();
        assert!(cache.is_empty());
        let first = PinnedCard {
            offset_when_pinned: 860.0,
            attributes: record(2, 900.0),
        };
        assert!(cache.put(2, first).is_none());

        let second = PinnedCard {
            offset_when_pinned: 870.0,
            attributes: record(2, 910.0),
        };
        let old = cache.put(2, second);
        assert_eq!(old.map(|c| c.offset_when_pinned), Some(860.0));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(2).map(|c| c.attributes.center.x), Some(910.0));
    }

    #[test]
    fn reanchor_replaces_geometry_and_keeps_transform() {
        let mut cache = PinnedCardCache::new();
        let card = PinnedCard {
            offset_when_pinned: 262.0,
            attributes: record(0, 302.0),
        };
        cache.put(0, card);

        let moved = cache
            .reanchored(0, Point::new(440.0, 150.0), Size::new(520.0, 250.0))
            .unwrap();
        assert_eq!(moved.center, Point::new(440.0, 150.0));
        assert_eq!(moved.size, Size::new(520.0, 250.0));
        assert_eq!(moved.transform, Transform::scale(1.05));
        assert_eq!(moved.opacity, 1.0);
        assert_eq!(moved.z_index, PINNED_Z_INDEX);
        assert!(moved.is_pinned);

        // The stored record itself is untouched.
        assert_eq!(cache.get(0).unwrap().attributes.center.x, 302.0);
        let anywhere = Point::new(0.0, 0.0);
        assert!(cache.reanchored(1, anywhere, Size::new(1.0, 1.0)).is_none());
    }
}
