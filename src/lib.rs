pub mod config;
pub mod engine;
pub mod flow;
pub mod flows;
pub mod session;
pub mod shared;
