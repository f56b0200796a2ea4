//! Interaction prompt shown by the UI collaborator.
//!
//! The probe writes this resource when focus changes or the ray misses. A UI
//! layer reads [`InteractionPrompt::text`] and renders it; an empty string
//! means nothing should be shown.

use bevy_ecs::prelude::*;

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionPrompt {
    text: String,
    /// Incremented on every write so UIs can skip redundant redraws.
    revision: u64,
}

impl InteractionPrompt {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_visible(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.revision += 1;
    }
}
