//! Safe SQL builder: identifiers from entity declarations only, values as parameters.

pub mod builder;
pub mod params;
pub use builder::QueryBuf;
pub use params::*;
