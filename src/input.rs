use egui::{Context, PointerButton, Pos2, Rect, Vec2};

use crate::event::PuzzleEvent;

/// Pointer state sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Screen position, if the pointer is over the window.
    pub hover_pos: Option<Pos2>,
    pub pressed: bool,
    pub released: bool,
}

impl PointerSample {
    pub fn from_context(ctx: &Context) -> Self {
        ctx.input(|input| Self {
            hover_pos: input.pointer.hover_pos(),
            pressed: input.pointer.button_pressed(PointerButton::Primary),
            released: input.pointer.button_released(PointerButton::Primary),
        })
    }
}

/// Turns raw egui input into puzzle events in surface coordinates.
#[derive(Debug)]
pub struct InputHandler {
    surface_rect: Rect,
    last_pointer_pos: Option<Pos2>,
    last_viewport: Option<Vec2>,
}

impl InputHandler {
    pub fn new(surface_rect: Rect) -> Self {
        Self {
            surface_rect,
            last_pointer_pos: None,
            last_viewport: None,
        }
    }

    /// Update the surface rectangle, e.g. after a relayout.
    pub fn set_surface_rect(&mut self, rect: Rect) {
        self.surface_rect = rect;
    }

    pub fn surface_rect(&self) -> Rect {
        self.surface_rect
    }

    /// Forget the pointer, e.g. while a modal blocks the puzzle.
    pub fn reset_pointer(&mut self) {
        self.last_pointer_pos = None;
    }

    /// Emit `Resize` when the available space differs from last frame.
    ///
    /// The first call only records the viewport.
    pub fn viewport_changed(&mut self, viewport: Vec2) -> Option<PuzzleEvent> {
        let previous = self.last_viewport.replace(viewport);
        match previous {
            Some(previous) if previous != viewport => Some(PuzzleEvent::Resize { viewport }),
            _ => None,
        }
    }

    pub fn process_input(&mut self, ctx: &Context) -> Vec<PuzzleEvent> {
        self.process_sample(PointerSample::from_context(ctx))
    }

    /// Translate one frame of pointer state.
    ///
    /// Presses count only over the surface. Leaving the surface is reported
    /// once, and releases are reported wherever they happen.
    pub fn process_sample(&mut self, sample: PointerSample) -> Vec<PuzzleEvent> {
        let mut events = Vec::new();
        let inside = sample.hover_pos.filter(|&pos| self.surface_rect.contains(pos));

        match (inside, self.last_pointer_pos) {
            (Some(pos), last) => {
                if last != Some(pos) {
                    events.push(PuzzleEvent::PointerMove {
                        pos: self.to_surface(pos),
                    });
                }
                self.last_pointer_pos = Some(pos);
            }
            (None, Some(_)) => {
                events.push(PuzzleEvent::PointerLeave);
                self.last_pointer_pos = None;
            }
            (None, None) => {}
        }

        if sample.pressed {
            if let Some(pos) = inside {
                events.push(PuzzleEvent::PointerDown {
                    pos: self.to_surface(pos),
                });
            }
        }
        if sample.released {
            events.push(PuzzleEvent::PointerUp);
        }
        events
    }

    fn to_surface(&self, pos: Pos2) -> Pos2 {
        (pos - self.surface_rect.min).to_pos2()
    }
}
