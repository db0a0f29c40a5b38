pub mod analysis;
pub mod args;
pub mod coach;
pub mod commands;
mod config;
mod error;
pub mod gallery;
pub mod meme;
pub mod model;
pub mod session;
pub mod source;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::Error;
pub use error::Result;
