//! Binds computed placements to caller-owned panel content.

use crate::params::LayoutParameters;
use crate::placement::{PanelPlacement, PanelSlot, PanelSlots};
use crate::solver::LayoutVariant;
use glam::DAffine3;
use tracing::debug;

/// One occupied slot: content plus the parent transform it should hang from.
#[derive(Debug, Clone, Copy)]
pub struct PanelGroup<'a, T> {
    /// Slot the content is bound to.
    pub slot: PanelSlot,
    /// Placement computed for that slot.
    pub placement: PanelPlacement,
    /// The caller's content handle.
    pub content: &'a T,
}

impl<T> PanelGroup<'_, T> {
    /// Parent transform: translate `(x, 0, z)`, yaw about +Y.
    pub fn transform(&self) -> DAffine3 {
        self.placement.to_affine()
    }
}

/// Three-slot layout container.
///
/// Holds up to three content handles in Left/Center/Right order and the
/// placements for the selected variant. Placements are recomputed only when
/// the variant or the parameters actually change.
#[derive(Debug, Clone)]
pub struct LayoutContainer<T> {
    variant: LayoutVariant,
    params: LayoutParameters,
    placements: PanelSlots<PanelPlacement>,
    slots: PanelSlots<Option<T>>,
    solves: u64,
}

impl<T> LayoutContainer<T> {
    /// Empty container.
    pub fn new(variant: LayoutVariant, params: LayoutParameters) -> Self {
        Self {
            variant,
            params,
            placements: variant.solve(&params),
            slots: PanelSlots::new(None, None, None),
            solves: 1,
        }
    }

    /// Container bound to `children` in source order. Anything past the third
    /// child is dropped.
    pub fn with_children<I>(variant: LayoutVariant, params: LayoutParameters, children: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut container = Self::new(variant, params);
        container.set_children(children);
        container
    }

    /// Replace all content. Anything past the third item is dropped.
    pub fn set_children<I>(&mut self, children: I)
    where
        I: IntoIterator<Item = T>,
    {
        let (slots, overflow) = PanelSlots::assign(children);
        if overflow > 0 {
            debug!(overflow, "layout holds three panels; extra content ignored");
        }
        self.slots = slots;
    }

    /// Put `content` in a specific slot, returning what was there.
    pub fn insert(&mut self, slot: PanelSlot, content: T) -> Option<T> {
        self.slots[slot].replace(content)
    }

    /// Take the content out of `slot`.
    pub fn remove(&mut self, slot: PanelSlot) -> Option<T> {
        self.slots[slot].take()
    }

    /// Content bound to `slot`.
    pub fn get(&self, slot: PanelSlot) -> Option<&T> {
        self.slots[slot].as_ref()
    }

    /// Mutable content bound to `slot`.
    pub fn get_mut(&mut self, slot: PanelSlot) -> Option<&mut T> {
        self.slots[slot].as_mut()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.occupied()
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Selected variant.
    pub fn variant(&self) -> LayoutVariant {
        self.variant
    }

    /// Current parameters.
    pub fn parameters(&self) -> &LayoutParameters {
        &self.params
    }

    /// Placements for all three slots, occupied or not.
    pub fn placements(&self) -> &PanelSlots<PanelPlacement> {
        &self.placements
    }

    /// How many times the solver has run for this container.
    pub fn solve_count(&self) -> u64 {
        self.solves
    }

    /// Switch variant; recomputes only if it differs.
    pub fn set_variant(&mut self, variant: LayoutVariant) {
        if variant != self.variant {
            self.variant = variant;
            self.resolve();
        }
    }

    /// Advance to the next variant and return it.
    pub fn cycle_variant(&mut self) -> LayoutVariant {
        self.set_variant(self.variant.next());
        self.variant
    }

    /// Replace parameters; recomputes only if they differ.
    pub fn set_parameters(&mut self, params: LayoutParameters) {
        // NaN never compares equal, so NaN input always resolves again.
        if params != self.params {
            self.params = params;
            self.resolve();
        }
    }

    /// Occupied slots in Left/Center/Right order with their transforms.
    pub fn groups(&self) -> impl Iterator<Item = PanelGroup<'_, T>> + '_ {
        PanelSlot::ALL.into_iter().filter_map(move |slot| {
            self.slots[slot].as_ref().map(|content| PanelGroup {
                slot,
                placement: self.placements[slot],
                content,
            })
        })
    }

    /// Mutable access to every occupied slot with its placement.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(PanelSlot, PanelPlacement, &mut T)) {
        for slot in PanelSlot::ALL {
            let placement = self.placements[slot];
            if let Some(content) = self.slots[slot].as_mut() {
                f(slot, placement, content);
            }
        }
    }

    fn resolve(&mut self) {
        self.placements = self.variant.solve(&self.params);
        self.solves += 1;
        debug!(
            variant = %self.variant,
            angle = self.params.angle_degrees,
            "recomputed panel placements"
        );
    }
}
