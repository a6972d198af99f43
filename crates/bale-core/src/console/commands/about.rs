//! about 커맨드

use super::command::{Command, CommandHandler};
use crate::console::application::AppState;
use crate::io::Io;
use async_trait::async_trait;
use bale_foundation::Result;

/// Bale 소개 출력
pub struct AboutCommand;

#[async_trait]
impl CommandHandler for AboutCommand {
    fn name(&self) -> &str {
        "about"
    }

    fn description(&self) -> &str {
        "Shows information about Bale."
    }

    async fn handle(&self, _command: &Command, io: &Io, _state: &AppState) -> Result<i32> {
        io.write_line(format!("Bale - Package Management for Humans ({})", crate::VERSION));
        io.write_line("");
        io.write_line("Bale is a dependency manager tracking local dependencies of your projects and libraries.");
        io.write_line("See https://bale-pm.dev for more information.");
        Ok(0)
    }
}
