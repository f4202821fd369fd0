pub mod error;
pub mod quiz;
