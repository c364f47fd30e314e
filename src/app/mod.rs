//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the simulator boundary for the GasSafe monitor:
//! burner FSM orchestration, risk evaluation, alerting and history.
//! Time, randomness and event delivery come in through **port traits**
//! defined in [`ports`], keeping this layer fully testable with scripted
//! inputs.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
