use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a run executes. Assigned once per run and never changed mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    Cpu,
    Accelerator(usize),
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Accelerator(idx) => write!(f, "accelerator:{idx}"),
        }
    }
}
