//! Utility modules for the compile orchestrator.

pub mod plural;
