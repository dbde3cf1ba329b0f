pub mod scope;
pub mod value;
