pub mod analysis;
pub mod commands;
pub mod config;
pub mod geometry;
pub mod pose;
pub mod record;
pub mod report;
pub mod session;
pub mod source;
