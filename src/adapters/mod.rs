//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                    |
//! |------------|--------------|--------------------------------|
//! | `clock`    | ClockPort    | `std::time` / simulated clock  |
//! | `entropy`  | EntropyPort  | `rand` RNG                     |
//! | `log_sink` | EventSink    | `log` facade                   |

pub mod clock;
pub mod entropy;
pub mod log_sink;
