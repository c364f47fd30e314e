//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises one part of the
//! simulator against the shared mock environment. Everything runs on a
//! simulated clock; no test sleeps.

mod alert_tests;
mod ignition_tests;
mod mock_env;
