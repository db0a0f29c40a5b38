//! Command handlers for the roast CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod analyze;
mod chat;
mod init;
mod meme;

use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use analyze::analyze;
pub use chat::{chat, Chat};
pub use init::init;
pub use meme::{meme, MemeOut};

/// What a command produced: a line or report for the user and the data behind it.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    message: String,
    structure: T,
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    pub fn new(message: impl Into<String>, structure: T) -> Self {
        Self {
            message: message.into(),
            structure,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> &T {
        &self.structure
    }

    /// Logs the message at info and the structure as JSON at debug.
    pub fn print(&self) {
        info!("{}", self.message);
        match serde_json::to_string_pretty(&self.structure) {
            Ok(json) => debug!("Command output:\n\n{json}\n\n"),
            Err(e) => debug!("Unable to serialize the command output: {e}"),
        }
    }
}
