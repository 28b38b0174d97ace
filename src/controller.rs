use egui::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::PuzzleConfig;
use crate::event::{Effect, PuzzleEvent};
use crate::grid::GridSize;
use crate::session::PuzzleSession;
use crate::util::time::clock_seed;

/// Owns the puzzle session and applies events to it one at a time.
///
/// Every event runs to completion before the next one is handled, so a
/// redraw requested by an event always sees the fully updated pieces.
#[derive(Debug, Clone)]
pub struct PuzzleController {
    config: PuzzleConfig,
    rng: StdRng,
    session: Option<PuzzleSession>,
}

impl PuzzleController {
    /// Seeds from `config.seed`, or from the clock when unset.
    pub fn new(config: PuzzleConfig) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        log::debug!("Puzzle RNG seed {}", seed);
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: PuzzleConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            session: None,
        }
    }

    /// The active configuration. Piece-count changes show up here at once.
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Takes effect with the next `ImageLoaded`.
    pub fn set_piece_count(&mut self, count: u32) {
        self.config.piece_count = count;
    }

    pub fn session(&self) -> Option<&PuzzleSession> {
        self.session.as_ref()
    }

    /// Apply one event at time `now` (seconds) and report what changed.
    pub fn handle(&mut self, event: PuzzleEvent, now: f64) -> Vec<Effect> {
        let changed = match event {
            PuzzleEvent::ImageLoaded {
                image_size,
                viewport,
            } => {
                self.load(image_size, viewport, now);
                true
            }
            other => match self.session.as_mut() {
                Some(session) => apply(session, other, &mut self.rng, now),
                None => {
                    log::debug!("Ignoring {:?} before an image is loaded", other);
                    false
                }
            },
        };

        if changed {
            self.redraw(now)
        } else {
            Vec::new()
        }
    }

    /// Build a fresh session. `now` is the puzzle-ready time.
    pub fn load(&mut self, image_size: Vec2, viewport: Vec2, now: f64) {
        let grid = GridSize::for_piece_count(self.config.piece_count);
        self.session = Some(PuzzleSession::generate(
            grid,
            image_size,
            viewport,
            self.config.viewport_fraction,
            self.config.snap_tolerance,
            &mut self.rng,
            now,
        ));
    }

    fn redraw(&mut self, now: f64) -> Vec<Effect> {
        let mut effects = vec![Effect::Redraw];
        if let Some(completion) = self
            .session
            .as_mut()
            .and_then(|session| session.check_completion(now))
        {
            effects.push(Effect::Completed(completion));
        }
        effects
    }
}

impl Default for PuzzleController {
    fn default() -> Self {
        Self::new(PuzzleConfig::default())
    }
}

/// Apply a session event. Returns true if pieces changed.
fn apply(session: &mut PuzzleSession, event: PuzzleEvent, rng: &mut StdRng, now: f64) -> bool {
    match event {
        // Starting a puzzle needs the controller.
        PuzzleEvent::ImageLoaded { .. } => false,
        PuzzleEvent::PointerDown { pos } => session.pointer_down(pos).is_some(),
        PuzzleEvent::PointerMove { pos } => session.pointer_move(pos),
        PuzzleEvent::PointerUp | PuzzleEvent::PointerLeave => session.release().is_some(),
        PuzzleEvent::Resize { viewport } => {
            session.resize(viewport);
            true
        }
        PuzzleEvent::Reshuffle => {
            session.reshuffle(rng, now);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    fn seeded() -> PuzzleController {
        PuzzleController::new(PuzzleConfig {
            seed: Some(1234),
            ..PuzzleConfig::default()
        })
    }

    #[test]
    fn test_events_before_load_are_ignored() {
        let mut controller = seeded();
        assert!(controller.handle(PuzzleEvent::PointerDown { pos: Pos2::new(1.0, 1.0) }, 0.0).is_empty());
        assert!(controller.handle(PuzzleEvent::Reshuffle, 0.0).is_empty());
        assert!(controller.session().is_none());
    }

    #[test]
    fn test_same_seed_same_puzzle() {
        let load = PuzzleEvent::ImageLoaded {
            image_size: Vec2::new(300.0, 200.0),
            viewport: Vec2::new(1000.0, 1000.0),
        };
        let mut a = seeded();
        let mut b = seeded();
        a.handle(load, 0.0);
        b.handle(load, 0.0);
        let a = a.session().unwrap();
        let b = b.session().unwrap();
        assert_eq!(a.pieces(), b.pieces());
        assert_eq!(a.seams(), b.seams());
    }

    #[test]
    fn test_piece_count_applies_on_next_load() {
        let mut controller = seeded();
        controller.set_piece_count(10);
        let effects = controller.handle(
            PuzzleEvent::ImageLoaded {
                image_size: Vec2::new(200.0, 100.0),
                viewport: Vec2::new(1000.0, 1000.0),
            },
            0.0,
        );
        assert_eq!(effects.first(), Some(&Effect::Redraw));
        assert_eq!(controller.session().unwrap().grid(), GridSize::new(2, 5));
    }
}
