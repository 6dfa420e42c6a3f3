mod asset;
mod exchange;
mod market;
mod quote;

pub use asset::*;
pub use exchange::*;
pub use market::*;
pub use quote::*;
