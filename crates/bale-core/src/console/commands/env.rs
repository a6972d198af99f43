//! env 커맨드 - 바인딩된 환경 정보

use super::command::{Command, CommandHandler};
use crate::console::application::AppState;
use crate::io::Io;
use async_trait::async_trait;
use bale_foundation::{Error, Result};

/// 현재 환경 정보 출력
pub struct EnvInfoCommand;

#[async_trait]
impl CommandHandler for EnvInfoCommand {
    fn name(&self) -> &str {
        "env info"
    }

    fn description(&self) -> &str {
        "Shows information about the current environment."
    }

    fn needs_env(&self) -> bool {
        true
    }

    async fn handle(&self, command: &Command, io: &Io, _state: &AppState) -> Result<i32> {
        let env = command
            .env()
            .ok_or_else(|| Error::Internal("env info command has no environment bound".into()))?;

        io.write_line(format!("Path:       {}", env.path().display()));
        io.write_line(format!("Executable: {}", env.bin_dir().display()));
        io.write_line(format!("Virtualenv: {}", env.is_virtual_environment()));
        Ok(0)
    }
}
