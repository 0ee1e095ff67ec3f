pub mod membership;
pub mod project;
pub mod task;
pub mod user;

pub use membership::*;
pub use project::*;
pub use task::*;
pub use user::*;
