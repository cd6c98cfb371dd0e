//! Choreboard: a household chore kanban board.
//!
//! This crate keeps a shared list of household members ("responsibles") and
//! the chores assigned to them, moves chores between the `Todo`, `Doing` and
//! `Done` columns, and generates the daily chore batch by rotating through
//! the registered responsibles.
//!
//! # Architecture
//!
//! Choreboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: The board store contract
//! - **Adapters**: In-memory, JSON file and remote realtime-database stores
//!
//! # Modules
//!
//! - [`board`]: Board domain, store port, adapters and services
//! - [`config`]: TOML configuration with environment overrides

pub mod board;
pub mod config;
