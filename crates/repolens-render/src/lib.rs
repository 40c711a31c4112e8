//! Text renderings of an analyzed repository: Mermaid diagrams and a Markdown digest

pub mod digest;
pub mod limits;
pub mod mermaid;


pub use digest::markdown_digest;
pub use limits::DisplayLimits;
pub use mermaid::{clean_label, directory_tree_diagram, mindmap_diagram, module_dependency_diagram};
