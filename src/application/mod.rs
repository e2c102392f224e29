//! Application layer: the flow state machine and the state it drives.
//!
//! [`controller::FlowController`] owns the screen state and schedules its own
//! delayed work through [`scheduler::Scheduler`]. The persisted balance and
//! history live in [`wallet::Wallet`], which callers pass in explicitly.

pub mod controller;
pub mod scheduler;
pub mod wallet;
