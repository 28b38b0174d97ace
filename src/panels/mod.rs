mod controls_panel;
mod puzzle_panel;

pub use controls_panel::controls_panel;
pub use puzzle_panel::puzzle_panel;
