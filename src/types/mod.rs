pub mod record;
pub mod track;

pub use record::*;
pub use track::*;
