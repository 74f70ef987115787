pub mod roommate;
pub mod task;
pub mod expense;
pub mod chat;
pub mod feed;
pub mod config;

pub use roommate::*;
pub use task::*;
pub use expense::*;
pub use chat::*;
pub use feed::*;
pub use config::*;
