use crate::domain::model::Bounds;
use crate::domain::ports::{ElementId, Page};
use std::collections::BTreeSet;

/// Visible share of `bounds` inside the band `[view_top, view_bottom)`.
pub fn intersection_ratio(bounds: Bounds, view_top: f64, view_bottom: f64) -> f64 {
    let bottom = bounds.top + bounds.height;
    if bounds.height <= 0.0 {
        return if bounds.top >= view_top && bounds.top < view_bottom {
            1.0
        } else {
            0.0
        };
    }
    let overlap = bottom.min(view_bottom) - bounds.top.max(view_top);
    (overlap / bounds.height).clamp(0.0, 1.0)
}

/// Watches elements until each has been seen once. A fired element is never
/// watched again.
#[derive(Debug, Clone)]
pub struct OneShotObserver {
    pending: BTreeSet<ElementId>,
    fired: BTreeSet<ElementId>,
    threshold: f64,
    bottom_margin: f64,
}

impl OneShotObserver {
    pub fn new(threshold: f64, bottom_margin: f64) -> Self {
        Self {
            pending: BTreeSet::new(),
            fired: BTreeSet::new(),
            threshold,
            bottom_margin,
        }
    }

    /// Returns false when the element is already watched or has already fired.
    pub fn observe(&mut self, element: ElementId) -> bool {
        if self.fired.contains(&element) {
            return false;
        }
        self.pending.insert(element)
    }

    pub fn is_observing(&self, element: &str) -> bool {
        self.pending.contains(element)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Elements that crossed into view at `scroll_y`. They are unobserved
    /// before returning, so each one comes back at most once.
    pub fn take_intersecting<P: Page + ?Sized>(&mut self, page: &P, scroll_y: f64) -> Vec<ElementId> {
        let view_top = scroll_y;
        let view_bottom = scroll_y + (page.viewport_height() - self.bottom_margin).max(0.0);

        let hits: Vec<ElementId> = self
            .pending
            .iter()
            .filter(|el| {
                page.bounds(el).is_some_and(|b| {
                    let ratio = intersection_ratio(b, view_top, view_bottom);
                    ratio > 0.0 && ratio >= self.threshold
                })
            })
            .cloned()
            .collect();

        for el in &hits {
            self.pending.remove(el);
            self.fired.insert(el.clone());
        }
        hits
    }
}
