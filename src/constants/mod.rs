mod relay;
mod swap;

pub use relay::*;
pub use swap::*;
