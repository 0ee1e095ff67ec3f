pub mod project;
pub mod task;
pub mod user;
pub mod user_project;

pub mod prelude;

pub use prelude::*;
