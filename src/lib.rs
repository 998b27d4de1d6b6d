pub mod cli;
pub mod config;
pub mod engine;
pub mod matching;
pub mod models;
pub mod parser;
pub mod report;
pub mod service;
pub mod storage;
pub mod types;
