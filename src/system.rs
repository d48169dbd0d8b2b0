//! racadm invocation: allowed commands, subprocess executor, report source.

pub mod command;
pub mod executor;
pub mod source;
