//! Function-pointer finite state machine engine for the burner.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  StateTable                                 │
//! │  ┌────────┬───────────┬────────────────┐    │
//! │  │ StateId│ on_enter  │ on_update      │    │
//! │  ├────────┼───────────┼────────────────┤    │
//! │  │ Off    │ fn(ctx)   │ fn(ctx)->Opt<> │    │
//! │  │ On     │ fn(ctx)   │ fn(ctx)->Opt<> │    │
//! │  └────────┴───────────┴────────────────┘    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Some(next_id)`, the engine runs `on_enter` for the next
//! state and updates the current pointer. Ignition toggles arrive through
//! [`Fsm::force_transition`]; the `on_enter` handlers perform the on/off
//! resets. Tick counting belongs to the caller.
//!
//! Risk level is not a state here. It is a classification recomputed by
//! the `On` update handler, so the reachable combinations are
//! `{Off, On} x {Low, Medium, High}` with `Off` pinned to `Low`.

pub mod context;
pub mod states;

use context::StoveContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of burner states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Off = 0,
    On = 1,
}

impl StateId {
    /// Total number of states: used to size the table array.
    pub const COUNT: usize = 2;

    /// Convert an index back to `StateId`. Panics on out-of-range in
    /// debug builds; returns `Off` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Off,
            1 => Self::On,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Off
            }
        }
    }

    /// The state an ignition toggle leads to.
    pub fn toggled(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` actions.
pub type StateActionFn = fn(&mut StoveContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut StoveContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
pub struct StateDescriptor {
    pub name: &'static str,
    pub on_enter: StateActionFn,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut StoveContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        (self.table[self.current].on_enter)(ctx);
    }

    /// Advance the FSM by one tick.
    pub fn tick(&mut self, ctx: &mut StoveContext) {
        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// Force an immediate transition (ignition toggles).
    pub fn force_transition(&mut self, next: StateId, ctx: &mut StoveContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut StoveContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        self.current = next_idx;
        (self.table[self.current].on_enter)(ctx);
    }
}
