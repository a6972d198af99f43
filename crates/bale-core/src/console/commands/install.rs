//! install 커맨드

use super::command::{Command, CommandHandler};
use crate::console::application::AppState;
use crate::io::Io;
use async_trait::async_trait;
use bale_foundation::{Error, Result};

/// 락 상태에 따라 의존성 설치
pub struct InstallCommand;

#[async_trait]
impl CommandHandler for InstallCommand {
    fn name(&self) -> &str {
        "install"
    }

    fn description(&self) -> &str {
        "Installs the project dependencies."
    }

    fn loggers(&self) -> Vec<String> {
        vec!["bale_core::builders::wheel".to_string()]
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
            .ok_or_else(|| Error::Internal("install command has no installer bound".into()))?;

        io.write_line(format!(
            "Installing dependencies for <{}> from {} source(s)",
            installer.package().name,
            installer.pool().repositories().len()
        ));

        if !installer.locker().fresh {
            io.write_line("No lock file found, resolving from manifest.");
        }
        if installer.disable_cache() {
            io.write_line("Source caches are disabled.");
        }

        // 실제 해석/설치 알고리즘은 이 코어의 범위 밖
        Ok(0)
    }
}
