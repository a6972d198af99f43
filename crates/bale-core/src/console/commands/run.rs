//! run 커맨드 - pass-through 실행
//!
//! 재작성된 입력의 위치 인자를 자식 프로세스 호출로 그대로
//! 전달합니다. 환경이 바인딩되어 있으면 bin 디렉토리를 PATH 앞에
//! 붙입니다.

use super::command::{Command, CommandHandler};
use crate::console::application::AppState;
use crate::io::Io;
use async_trait::async_trait;
use bale_foundation::{Error, Result};
use tracing::debug;

/// 프로젝트 환경 안에서 커맨드 실행
pub struct RunCommand;

#[async_trait]
impl CommandHandler for RunCommand {
    fn name(&self) -> &str {
        "run"
    }

    fn description(&self) -> &str {
        "Runs a command in the appropriate environment."
    }

    fn needs_env(&self) -> bool {
        true
    }

    async fn handle(&self, command: &Command, io: &Io, _state: &AppState) -> Result<i32> {
        let input = command.input();
        let arguments = input.arguments();

        // arguments[0]은 커맨드 이름("run") 자신
        let target = &arguments[1.min(arguments.len())..];
        if target.is_empty() {
            return Err(Error::InvalidInput("No command to execute.".into()));
        }

        let mut child = tokio::process::Command::new(&target[0]);
        child.args(&target[1..]);

        if let Some(env) = command.env() {
            let path = std::env::var_os("PATH").unwrap_or_default();
            let mut paths = vec![env.bin_dir()];
            paths.extend(std::env::split_paths(&path));
            if let Ok(joined) = std::env::join_paths(paths) {
                child.env("PATH", joined);
            }
        }

        debug!("Spawning child process: {:?}", target);
        let status = child
            .status()
            .await
            .map_err(|e| Error::InvalidInput(format!("Cannot run {}: {}", target[0], e)))?;

        if !status.success() && io.is_debug() {
            io.write_error_line(format!("Child process exited with {status}"));
        }

        Ok(status.code().unwrap_or(1))
    }
}
