pub mod client;
pub mod sample;

pub use client::*;
pub use sample::*;
