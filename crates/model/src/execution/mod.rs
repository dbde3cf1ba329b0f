pub mod context;
pub mod errors;
pub mod expr;
