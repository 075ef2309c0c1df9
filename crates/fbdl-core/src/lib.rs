pub mod config;
pub mod logging;

pub mod assemble;
pub mod descriptor;
pub mod download;
pub mod error;
pub mod fetch;
pub mod options;
pub mod parse;
pub mod pipeline;
pub mod progress;
pub mod reference;
pub mod resolver;
pub mod retry;
