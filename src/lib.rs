//! Shipit CLI library — exposes modules for integration testing.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod app;
pub mod cli;
pub mod command_runner;
pub mod commands;
pub mod config_store;
pub mod domain;
pub mod output;
pub mod playbook;
