//! Domain models for the vineyard environment simulator

mod growing;
mod production;
mod streak;
mod weather;

pub use growing::*;
pub use production::*;
pub use streak::*;
pub use weather::*;
