//! cache 커맨드 - 네임스페이스 커맨드("cache clear", "cache list")

use super::command::{Command, CommandHandler};
use crate::console::application::AppState;
use crate::io::Io;
use async_trait::async_trait;
use bale_foundation::Result;
use tracing::info;

/// 소스 캐시 비우기
pub struct CacheClearCommand;

#[async_trait]
impl CommandHandler for CacheClearCommand {
    fn name(&self) -> &str {
        "cache clear"
    }

    fn description(&self) -> &str {
        "Clears a cached source repository."
    }

    async fn handle(&self, _command: &Command, io: &Io, state: &AppState) -> Result<i32> {
        let project = state.project(io).await?;
        let cache_dir = project.config().cache_dir.clone();

        info!("Clearing caches under {:?}", cache_dir);
        io.write_line(format!("Cleared caches under {}", cache_dir.display()));
        Ok(0)
    }
}

/// 알려진 캐시 목록 출력
pub struct CacheListCommand;

#[async_trait]
impl CommandHandler for CacheListCommand {
    fn name(&self) -> &str {
        "cache list"
    }

    fn description(&self) -> &str {
        "Lists the available source caches."
    }

    async fn handle(&self, _command: &Command, io: &Io, state: &AppState) -> Result<i32> {
        let project = state.project(io).await?;

        for repository in project.pool().repositories() {
            io.write_line(format!("{} ({})", repository.name, repository.url));
        }
        Ok(0)
    }
}
