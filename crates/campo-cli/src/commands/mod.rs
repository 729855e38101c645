pub mod circadian;
pub mod common;
pub mod config;
pub mod energy;
pub mod field;
pub mod prayer;
pub mod profile;
pub mod recommend;
pub mod task;
