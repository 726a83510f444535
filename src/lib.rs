pub mod analyzers;
pub mod config;
pub mod dataset;
pub mod output;
pub mod parser;
pub mod regions;
pub mod stats;
