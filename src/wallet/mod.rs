pub mod portfolio;
pub mod tracking;
pub mod types;

pub use portfolio::{Portfolio, PriceChange};
pub use tracking::*;
pub use types::*;
