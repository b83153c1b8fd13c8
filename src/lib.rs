pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod processing;
pub mod transformers;
