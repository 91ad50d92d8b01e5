pub mod build;
pub mod config;
pub mod error;
pub mod generate;
pub mod microflow;
pub mod model;
pub mod render;
pub mod repository;
pub mod wasm;
