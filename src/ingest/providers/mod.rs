pub mod eonet;
pub mod firms;
