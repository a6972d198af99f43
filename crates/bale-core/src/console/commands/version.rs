//! version 커맨드

use super::command::{Command, CommandHandler};
use crate::console::application::AppState;
use crate::io::Io;
use async_trait::async_trait;
use bale_foundation::Result;

/// 버전 출력
pub struct VersionCommand;

#[async_trait]
impl CommandHandler for VersionCommand {
    fn name(&self) -> &str {
        "version"
    }

    fn description(&self) -> &str {
        "Shows the version of Bale."
    }

    async fn handle(&self, _command: &Command, io: &Io, _state: &AppState) -> Result<i32> {
        io.write_line(format!("bale {}", crate::VERSION));
        Ok(0)
    }
}
