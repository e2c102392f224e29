//! Domain layer: value types of the wallet and the ports the application
//! layer drives.
//!
//! Nothing in here performs I/O or waits on time.

pub mod amount_entry;
pub mod contact;
pub mod flow;
pub mod ledger;
pub mod notification;
pub mod ports;
pub mod view;
