//! In-process event distribution.
//!
//! Stores publish lifecycle events through an injected bus instance so
//! that independent stores (and tests) never cross-talk.

mod bus;

pub use bus::{EventBus, SubscriptionId};
