//! Word-by-word reveal
//!
//! Words are revealed as a prefix: at progress `p` with `n` words, every
//! word whose index is at most `floor(p * n)` targets full opacity and the
//! rest target zero. Each change of target starts a short fade from the
//! word's current opacity; a newer target replaces a fade in flight.

use crate::progress::clamp01;

/// Split text into reveal units on whitespace.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// `floor(progress * total)` with progress clamped to `[0, 1]`.
pub fn visible_count(progress: f64, total: usize) -> usize {
    ((clamp01(progress) * total as f64).floor() as usize).min(total)
}

/// Target visibility of the word at `index`.
pub fn is_revealed(index: usize, progress: f64, total: usize) -> bool {
    index <= visible_count(progress, total)
}

/// Lifecycle of a single word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitState {
    Hidden,
    Revealing,
    Revealed,
    Hiding,
}

#[derive(Clone, Copy, Debug)]
struct Fade {
    from: f32,
    to: f32,
    elapsed: f32,
}

/// One word's visibility.
#[derive(Clone, Copy, Debug)]
pub struct RevealUnit {
    opacity: f32,
    target: bool,
    fade: Option<Fade>,
}

impl RevealUnit {
    fn hidden() -> Self {
        Self {
            opacity: 0.0,
            target: false,
            fade: None,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn state(&self) -> UnitState {
        match (self.target, self.fade.is_some()) {
            (true, true) => UnitState::Revealing,
            (true, false) => UnitState::Revealed,
            (false, true) => UnitState::Hiding,
            (false, false) => UnitState::Hidden,
        }
    }

    fn retarget(&mut self, revealed: bool) {
        if revealed == self.target {
            return;
        }
        self.target = revealed;
        let to = if revealed { 1.0 } else { 0.0 };
        self.fade = Some(Fade {
            from: self.opacity,
            to,
            elapsed: 0.0,
        });
    }

    /// Returns true if the opacity changed.
    fn advance(&mut self, dt: f32, duration: f32) -> bool {
        let Some(fade) = self.fade.as_mut() else {
            return false;
        };
        fade.elapsed += dt;
        let t = if duration > 0.0 {
            (fade.elapsed / duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        // power1.out
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        let next = fade.from + (fade.to - fade.from) * eased;
        if t >= 1.0 {
            self.fade = None;
        }
        let changed = next != self.opacity;
        self.opacity = next;
        changed
    }
}

/// Drives the opacity of an ordered run of words.
#[derive(Clone, Debug)]
pub struct WordRevealController {
    units: Vec<RevealUnit>,
    fade_seconds: f32,
}

impl WordRevealController {
    /// All units start hidden at opacity 0.
    pub fn new(count: usize, fade_seconds: f32) -> Self {
        Self {
            units: vec![RevealUnit::hidden(); count],
            fade_seconds,
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Recompute every unit's target from a new trigger progress.
    pub fn apply_progress(&mut self, progress: f64) -> usize {
        let total = self.units.len();
        let visible = visible_count(progress, total);
        for (i, unit) in self.units.iter_mut().enumerate() {
            unit.retarget(i <= visible);
        }
        visible
    }

    /// Advance fades by `dt` seconds, calling `changed(index, opacity)` for
    /// every unit whose opacity moved.
    pub fn tick(&mut self, dt: f32, mut changed: impl FnMut(usize, f32)) {
        for (i, unit) in self.units.iter_mut().enumerate() {
            if unit.advance(dt, self.fade_seconds) {
                changed(i, unit.opacity);
            }
        }
    }

    pub fn unit(&self, index: usize) -> Option<&RevealUnit> {
        self.units.get(index)
    }

    pub fn states(&self) -> Vec<UnitState> {
        self.units.iter().map(RevealUnit::state).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::UnitState::*;

    const FADE: f32 = 0.12;

    fn targets(progress: f64, total: usize) -> Vec<bool> {
        (0..total).map(|i| is_revealed(i, progress, total)).collect()
    }

    #[test]
    fn splits_on_any_whitespace() {
        assert_eq!(
            split_words("  Корма для\tфермы \n нового  поколения "),
            vec!["Корма", "для", "фермы", "нового", "поколения"]
        );
        assert!(split_words(" \n ").is_empty());
    }

    #[test]
    fn prefix_reveal_at_partial_progress() {
        assert_eq!(visible_count(0.41, 5), 2);
        assert_eq!(targets(0.41, 5), vec![true, true, true, false, false]);
    }

    #[test]
    fn boundaries_include_first_and_all() {
        assert_eq!(visible_count(0.0, 5), 0);
        assert_eq!(targets(0.0, 5), vec![true, false, false, false, false]);
        assert_eq!(visible_count(1.0, 5), 5);
        assert_eq!(targets(1.0, 5), vec![true; 5]);
        assert_eq!(visible_count(7.0, 5), 5);
    }

    #[test]
    fn fades_in_over_the_configured_duration() {
        let mut c = WordRevealController::new(3, FADE);
        assert_eq!(c.states(), vec![Hidden; 3]);

        c.apply_progress(0.0);
        assert_eq!(c.states(), vec![Revealing, Hidden, Hidden]);

        let mut seen = Vec::new();
        c.tick(FADE / 2.0, |i, o| seen.push((i, o)));
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, 0);
        assert!((seen[0].1 - 0.75).abs() < 1e-5);

        c.tick(FADE, |_, _| {});
        assert_eq!(c.unit(0).unwrap().opacity(), 1.0);
        assert_eq!(c.states(), vec![Revealed, Hidden, Hidden]);
    }

    #[test]
    fn reversal_replaces_the_fade_in_flight() {
        let mut c = WordRevealController::new(2, FADE);
        c.apply_progress(1.0);
        c.tick(FADE / 2.0, |_, _| {});
        let mid = c.unit(1).unwrap().opacity();
        assert!(mid > 0.0 && mid < 1.0);

        c.apply_progress(0.0);
        assert_eq!(c.states(), vec![Revealing, Hiding]);
        c.tick(0.0, |_, _| {});
        assert_eq!(c.unit(1).unwrap().opacity(), mid);

        c.tick(FADE, |_, _| {});
        assert_eq!(c.unit(1).unwrap().opacity(), 0.0);
        assert_eq!(c.states(), vec![Revealed, Hidden]);
    }

    #[test]
    fn unchanged_target_keeps_running_fade() {
        let mut c = WordRevealController::new(1, FADE);
        c.apply_progress(0.5);
        c.tick(FADE / 2.0, |_, _| {});
        let before = c.unit(0).unwrap().opacity();
        c.apply_progress(0.6);
        c.tick(0.0, |_, _| {});
        assert_eq!(c.unit(0).unwrap().opacity(), before);
    }

    #[test]
    fn empty_controller_is_inert() {
        let mut c = WordRevealController::new(0, FADE);
        assert!(c.is_empty());
        assert_eq!(c.apply_progress(0.7), 0);
        c.tick(1.0, |_, _| panic!("no units"));
    }
}
