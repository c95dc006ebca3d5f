//! HTTP handlers, one per resource and verb.

pub mod ticket;
pub mod usuario;
pub use ticket::*;
pub use usuario::*;
