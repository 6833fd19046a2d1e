//! Crate-level tests exercising [`crate::FixGuard`] across modules.

mod behaviour;
