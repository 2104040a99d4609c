//! Embassy async tasks

pub mod runtime;
pub mod shake;

pub use runtime::runtime_task;
pub use shake::shake_task;
