//! GasSafe stove risk simulator library.
//!
//! Exposes the pure-logic modules for integration testing and for the
//! demo binary. Nothing here touches real hardware; time and noise come
//! in through the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod alerts;
pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod history;
pub mod risk;
pub mod scheduler;
pub mod sensors;

pub mod adapters;
