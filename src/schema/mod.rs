pub mod contract;
pub mod entities;
pub mod types;

pub use contract::*;
pub use entities::*;
pub use types::*;
