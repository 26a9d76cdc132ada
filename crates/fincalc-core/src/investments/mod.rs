pub mod deposits;
pub mod lumpsum;
pub mod sip;
