// Worker configuration loaded from environment variables.

use anyhow::{bail, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Run every task once right away and exit instead of looping
    pub run_once: bool,
}

impl WorkerConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let run_once = match lookup("WORKER_RUN_ONCE").as_deref().map(str::to_lowercase) {
            None => false,
            Some(v) => match v.as_str() {
                "" | "0" | "false" | "no" => false,
                "1" | "true" | "yes" => true,
                _ => bail!("WORKER_RUN_ONCE must be true or false, got {:?}", v),
            },
        };

        Ok(Self { run_once })
    }
}
