pub mod entities;

pub use entities::prelude;
pub use entities::*;
