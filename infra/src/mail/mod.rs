//! Mail module - HTTP relay dispatcher

mod relay;

pub use relay::HttpMailDispatcher;
