pub mod client;
pub mod types;
pub mod utils;

pub use client::*;
pub use types::*;
pub use utils::*;
