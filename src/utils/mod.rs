mod amount;
pub use amount::*;
