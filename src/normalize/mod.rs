pub mod canonical;
pub mod record;

pub use canonical::*;
pub use record::*;
