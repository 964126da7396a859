use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::info;

/// Notifies the name server that the zone changed.
#[async_trait::async_trait]
pub trait ZoneReloader: Send + Sync {
    async fn reload(&self, origin: &str) -> Result<()>;
}

/// Runs the configured reload command (e.g. `rndc reload`) with the zone
/// origin appended as the final argument.
pub struct CommandReloader {
    command: Vec<String>,
}

impl CommandReloader {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

#[async_trait::async_trait]
impl ZoneReloader for CommandReloader {
    async fn reload(&self, origin: &str) -> Result<()> {
        let (program, args) = self
            .command
            .split_first()
            .context("reload command is empty")?;

        info!("Reloading zone {} via '{}'", origin, program);
        let status = Command::new(program)
            .args(args)
            .arg(origin)
            .status()
            .await
            .with_context(|| format!("Failed to run reload command '{program}'"))?;

        if !status.success() {
            bail!("reload command '{program}' exited with {status}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_command() {
        let reloader = CommandReloader::new(vec!["true".to_string()]);
        assert!(reloader.reload("rpz").await.is_ok());
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_an_error() {
        let reloader = CommandReloader::new(vec!["false".to_string()]);
        assert!(reloader.reload("rpz").await.is_err());
    }

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let reloader = CommandReloader::new(vec!["sinkzone-no-such-program".to_string()]);
        assert!(reloader.reload("rpz").await.is_err());
    }
}
