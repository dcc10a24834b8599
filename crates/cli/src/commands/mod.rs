pub mod build;
pub mod common;
pub mod print;
