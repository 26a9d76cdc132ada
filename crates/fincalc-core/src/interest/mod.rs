pub mod compound;
pub mod simple;
