//! Display surfaces
//!
//! A surface is the one piece of shared output: whoever shows a view last
//! owns it. [`BufferedSurface`] keeps every view it was given so adapters
//! (and tests) can render or inspect them afterwards.

use std::sync::Mutex;

use crate::view::View;

/// Applies views to some display
pub trait Surface: Send + Sync {
    fn show(&self, view: &View);
}

/// Surface that records views instead of drawing them
#[derive(Debug, Default)]
pub struct BufferedSurface {
    views: Mutex<Vec<View>>,
}

impl BufferedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The view currently on display
    pub fn latest(&self) -> Option<View> {
        self.lock().last().cloned()
    }

    /// Every view shown, oldest first
    pub fn history(&self) -> Vec<View> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<View>> {
        self.views.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Surface for BufferedSurface {
    fn show(&self, view: &View) {
        self.lock().push(view.clone());
    }
}
