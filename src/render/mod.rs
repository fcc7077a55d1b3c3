//! Presentation-side helpers
//!
//! Nothing here owns entities. The draw batch keeps ids registered from
//! spawn/destroy events and looks them up in the world each frame; the
//! viewport maps world coordinates into clip space for the current surface.

pub mod batch;
pub mod vertex;
pub mod viewport;

pub use batch::DrawBatch;
pub use vertex::Vertex;
pub use viewport::Viewport;
