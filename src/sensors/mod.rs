//! Simulated stove sensors.
//!
//! There is no hardware behind these. [`temperature`] models the burner as
//! a bounded random walk and [`presence`] holds the two externally injected
//! booleans (motion near the stove, phone inside the geofence) that a real
//! product would read from a PIR sensor and a location service.

pub mod presence;
pub mod temperature;
