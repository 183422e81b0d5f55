mod rpc;
pub use rpc::*;

mod swap;
pub use swap::*;

mod token;
pub use token::*;
