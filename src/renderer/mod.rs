//! WebGPU rendering module
//!
//! The court is drawn as flat-colored quads: a triangle-list pipeline
//! with one vertex upload per frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::CourtRenderer;
pub use scene::court_scene;
pub use vertex::Vertex;
