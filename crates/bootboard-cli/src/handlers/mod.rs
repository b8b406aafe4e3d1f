mod context;

pub mod boots;
pub mod config;
pub mod failed;

pub use context::HandlerContext;

/// How a command finished after rendering its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Data could not be loaded; the failure has been rendered.
    LoadFailed,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::LoadFailed => 2,
        }
    }
}
