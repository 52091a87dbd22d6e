mod connection;
mod dialect;
mod extract;

pub use connection::*;
pub use dialect::*;
