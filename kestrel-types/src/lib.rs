pub mod block;
pub mod compact;
pub mod encode;
pub mod error;
pub mod network;
pub mod primitives;
pub mod script;
pub mod transaction;
