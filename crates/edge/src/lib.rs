pub mod app;
pub mod cli;
pub mod handlers;
pub mod rewrite;

mod error;

pub use error::Error;
