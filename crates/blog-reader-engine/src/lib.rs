pub mod model;
pub mod reader;
pub mod render;
pub mod toc;
pub mod visibility;

// Re-export key types for easier usage
pub use model::*;
pub use reader::*;
pub use render::{ContentGroup, Node, Role};
pub use toc::*;
pub use visibility::*;
