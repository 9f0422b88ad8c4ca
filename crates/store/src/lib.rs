//! Store aggregate: the catalog and the order workflow.
//!
//! Pure domain logic (no IO). Orders are processed line by line against shared
//! product handles; a failing line stops the order but earlier lines stay
//! debited.

pub mod store;

pub use store::{OrderLine, Store};
