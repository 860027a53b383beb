pub mod dto;
pub mod pipeline;
pub mod registry;
pub mod state;

pub use pipeline::Pipeline;
pub use registry::SessionRegistry;
pub use state::SessionState;
