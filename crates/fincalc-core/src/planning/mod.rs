pub mod inflation;
pub mod retirement;
