//! Bon Code fonts CLI library.

pub mod cli;
pub mod commands;
