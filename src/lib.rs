#![warn(clippy::all, rust_2018_idioms)]

pub mod edge;
pub mod seam;
pub mod grid;
pub mod piece;
pub mod assembly;
pub mod outline;
pub mod surface;
pub mod render;
pub mod painter_surface;
pub mod event;
pub mod session;
pub mod controller;
pub mod resize;
pub mod error;
pub mod config;
pub mod util;
pub mod image;
pub mod file_handler;
pub mod input;
pub mod panels;
pub mod app;

pub use app::JigsawApp;
pub use config::PuzzleConfig;
pub use controller::PuzzleController;
pub use edge::{Edge, Orientation};
pub use error::{PuzzleError, PuzzleResult};
pub use event::{Completion, Effect, PuzzleEvent};
pub use grid::{GridSize, SurfaceLayout};
pub use piece::{Piece, PieceEdges, PieceId};
pub use render::Renderer;
pub use seam::{SeamId, SeamMap};
pub use session::PuzzleSession;
pub use surface::{DrawOp, RecordingSurface, StrokeStyle, Surface};
