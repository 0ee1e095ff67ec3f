pub mod assembler;
pub mod auth;

pub use assembler::assemble_projects;
pub use auth::{AuthService, Claims};
