//! In-view toggles for page sections

/// Boolean "in view" flag driven by an intersection ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionToggle {
    threshold: f64,
    sticky: bool,
    in_view: bool,
}

impl RegionToggle {
    /// Toggle that clears again when the region scrolls back out.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            sticky: false,
            in_view: false,
        }
    }

    /// Toggle that stays on once set.
    pub fn sticky(threshold: f64) -> Self {
        Self {
            sticky: true,
            ..Self::new(threshold)
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }

    /// Feed a new intersection ratio; returns the new state if it changed.
    pub fn observe(&mut self, ratio: f64) -> Option<bool> {
        let next = ratio >= self.threshold || (self.sticky && self.in_view);
        if next == self.in_view {
            return None;
        }
        self.in_view = next;
        Some(next)
    }
}

/// A tracked page region: its selector and toggle.
#[derive(Clone, Debug)]
pub struct Region {
    pub selector: &'static str,
    pub toggle: RegionToggle,
}

impl Region {
    pub fn new(selector: &'static str, threshold: f64) -> Self {
        Self {
            selector,
            toggle: RegionToggle::new(threshold),
        }
    }
}
