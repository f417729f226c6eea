pub mod context;
pub mod enter;
pub mod leave;
