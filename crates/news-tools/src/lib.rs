//! Tool management and execution framework
//!
//! Tools are the functions an agent advertises to a calling orchestrator,
//! together with the JSON schema of their arguments.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::Tool;
