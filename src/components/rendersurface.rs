//! Renderable surface with a reversible highlight overlay.
//!
//! A [`RenderSurface`] owns the ordered material list an external renderer
//! draws. The interaction probe highlights a focused object by appending a
//! single overlay material with [`RenderSurface::apply_overlay`] and restores
//! it with [`RenderSurface::remove_overlay`]. The pair is exactly inverse:
//! removing after applying leaves the list identical to what it was, and
//! removing when nothing is applied does nothing.

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

/// Opaque handle to a material owned by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u32);

/// Ordered list of materials plus the overlay currently appended, if any.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct RenderSurface {
    materials: SmallVec<[MaterialId; 4]>,
    overlay: Option<MaterialId>,
}

impl RenderSurface {
    pub fn new(materials: impl IntoIterator<Item = MaterialId>) -> Self {
        Self {
            materials: materials.into_iter().collect(),
            overlay: None,
        }
    }

    /// Materials as the renderer should draw them, overlay included.
    pub fn materials(&self) -> &[MaterialId] {
        &self.materials
    }

    /// Materials without the overlay.
    pub fn original(&self) -> &[MaterialId] {
        match self.overlay {
            Some(_) => &self.materials[..self.materials.len() - 1],
            None => &self.materials,
        }
    }

    /// The overlay currently applied.
    pub fn overlay(&self) -> Option<MaterialId> {
        self.overlay
    }

    pub fn is_highlighted(&self) -> bool {
        self.overlay.is_some()
    }

    /// Append `highlight` to the list. A surface holds at most one overlay;
    /// applying again swaps it in place.
    pub fn apply_overlay(&mut self, highlight: MaterialId) {
        if self.overlay.is_some() {
            self.materials.pop();
        }
        self.materials.push(highlight);
        self.overlay = Some(highlight);
    }

    /// Strip the overlay if one is applied. Returns true when something was removed.
    pub fn remove_overlay(&mut self) -> bool {
        match self.overlay.take() {
            Some(_) => {
                self.materials.pop();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIGHLIGHT: MaterialId = MaterialId(99);

    #[test]
    fn test_remove_after_apply_restores_exactly() {
        let lists: [&[u32]; 4] = [&[1], &[1, 2, 3], &[99], &[5, 99, 5, 1, 7]];
        for list in lists {
            let mut surface = RenderSurface::new(list.iter().copied().map(MaterialId));
            let before = surface.clone();
            surface.apply_overlay(HIGHLIGHT);
            assert_eq!(surface.materials().len(), list.len() + 1);
            assert_eq!(surface.materials().last(), Some(&HIGHLIGHT));
            assert_eq!(surface.original(), before.materials());
            assert!(surface.remove_overlay());
            assert_eq!(surface, before);
        }
    }

    #[test]
    fn test_remove_without_overlay_is_noop() {
        let mut surface = RenderSurface::new([MaterialId(1), HIGHLIGHT]);
        let before = surface.clone();
        assert!(!surface.remove_overlay());
        assert!(!surface.remove_overlay());
        assert_eq!(surface, before);
    }

    #[test]
    fn test_apply_twice_keeps_single_overlay() {
        let mut surface = RenderSurface::new([MaterialId(1)]);
        surface.apply_overlay(HIGHLIGHT);
        surface.apply_overlay(MaterialId(42));
        assert_eq!(surface.materials(), &[MaterialId(1), MaterialId(42)]);
        surface.remove_overlay();
        assert_eq!(surface.materials(), &[MaterialId(1)]);
    }

    #[test]
    fn test_empty_surface_round_trips() {
        let mut surface = RenderSurface::default();
        surface.apply_overlay(HIGHLIGHT);
        assert_eq!(surface.original(), &[] as &[MaterialId]);
        surface.remove_overlay();
        assert!(surface.materials().is_empty());
    }
}
