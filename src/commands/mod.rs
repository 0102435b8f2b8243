//! CLI commands for steptrace

pub mod compare;
pub mod dispatch;
pub mod helpers;
pub mod path;
pub mod run;
pub mod trace;
