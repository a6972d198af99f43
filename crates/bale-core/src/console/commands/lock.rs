//! lock 커맨드

use super::command::{Command, CommandHandler};
use crate::console::application::AppState;
use crate::io::Io;
use async_trait::async_trait;
use bale_foundation::{Error, Result};

/// 락 파일 갱신
pub struct LockCommand;

#[async_trait]
impl CommandHandler for LockCommand {
    fn name(&self) -> &str {
        "lock"
    }

    fn description(&self) -> &str {
        "Locks the project dependencies."
    }

    fn needs_env(&self) -> bool {
        true
    }

    fn needs_installer(&self) -> bool {
        true
    }

    async fn handle(&self, command: &Command, io: &Io, _state: &AppState) -> Result<i32> {
        let installer = command
            .installer()
            .ok_or_else(|| Error::Internal("lock command has no installer bound".into()))?;

        io.write_line(format!(
            "Writing lock file to {:?}",
            installer.locker().path
        ));
        Ok(0)
    }
}
