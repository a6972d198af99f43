//! Listeners - before-run 기본 리스너
//!
//! 애플리케이션이 고정 순서(로거 → 환경 → 인스톨러)로 구독하는
//! 세 리스너입니다. 각 리스너는 커맨드의 요구 플래그를 보고
//! 필요한 협력자만 바인딩합니다.

use crate::console::events::{ConsoleEvent, EventDispatcher, EventKind, EventListener};
use crate::env::{EnvManager, Environment};
use crate::installer::Installer;
use crate::io::Verbosity;
use async_trait::async_trait;
use bale_foundation::Result;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// verbosity와 무관하게 항상 켜지는 내부 로거들
pub const INTERNAL_LOGGERS: &[&str] = &[
    "bale_core::project",
    "bale_core::installer",
    "bale_core::plugin",
];

/// 빌더 로거는 이 접두사를 가지며 info 미만으로 내려가지 않음
pub const BUILDER_LOGGER_PREFIX: &str = "bale_core::builders";

// ============================================================================
// 로그 지시자 계산
// ============================================================================

fn level_for(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Debug => "debug",
        Verbosity::Verbose | Verbosity::VeryVerbose => "info",
        _ => "warn",
    }
}

/// verbosity와 커맨드 로거 목록에서 필터 지시자 생성
pub fn log_directives(verbosity: Verbosity, command_loggers: &[String]) -> Vec<String> {
    let level = level_for(verbosity);

    // -vv 미만에서는 등록된 로거 외의 출력을 모두 끔
    let base = if verbosity >= Verbosity::VeryVerbose {
        level
    } else {
        "off"
    };

    let mut directives = vec![base.to_string()];

    let targets = INTERNAL_LOGGERS
        .iter()
        .map(|s| s.to_string())
        .chain(command_loggers.iter().cloned());

    for target in targets {
        let target_level = if target.starts_with(BUILDER_LOGGER_PREFIX) && level == "warn" {
            "info"
        } else {
            level
        };
        directives.push(format!("{target}={target_level}"));
    }

    directives
}

// ============================================================================
// LoggerListener
// ============================================================================

/// 커맨드 로거를 tracing 구독자로 설치하는 리스너
pub struct LoggerListener;

#[async_trait]
impl EventListener for LoggerListener {
    fn name(&self) -> &str {
        "logger"
    }

    async fn handle(
        &self,
        event: &ConsoleEvent,
        _kind: EventKind,
        _dispatcher: &EventDispatcher,
    ) -> Result<()> {
        let ConsoleEvent::BeforeRun(event) = event;

        let directives = log_directives(event.io.verbosity(), &event.command.loggers());
        let filter = EnvFilter::new(directives.join(","));

        // 프로세스당 한 번만 설치 가능, 이미 설치된 경우는 무시
        let result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
        if result.is_err() {
            debug!("Log subscriber already installed, keeping existing filter");
        }

        Ok(())
    }
}

// ============================================================================
// EnvListener
// ============================================================================

/// 환경이 필요한 커맨드에 가상 환경을 바인딩하는 리스너
pub struct EnvListener;

#[async_trait]
impl EventListener for EnvListener {
    fn name(&self) -> &str {
        "env"
    }

    async fn handle(
        &self,
        event: &ConsoleEvent,
        _kind: EventKind,
        _dispatcher: &EventDispatcher,
    ) -> Result<()> {
        let ConsoleEvent::BeforeRun(event) = event;
        let command = &event.command;

        if !command.needs_env() || command.env().is_some() {
            return Ok(());
        }

        let project = event.state.project(&event.io).await?;
        let env = EnvManager::new(project).create_virtual_environment()?;

        if event.io.is_verbose() {
            event
                .io
                .write_line(format!("Using virtualenv: {}", env.path().display()));
        }
        command.set_env(env);
        Ok(())
    }
}

// ============================================================================
// InstallerListener
// ============================================================================

/// 인스톨러가 필요한 커맨드에 배선된 인스톨러를 바인딩하는 리스너
pub struct InstallerListener;

#[async_trait]
impl EventListener for InstallerListener {
    fn name(&self) -> &str {
        "installer"
    }

    async fn handle(
        &self,
        event: &ConsoleEvent,
        _kind: EventKind,
        _dispatcher: &EventDispatcher,
    ) -> Result<()> {
        let ConsoleEvent::BeforeRun(event) = event;
        let command = &event.command;

        if !command.needs_installer() || command.installer().is_some() {
            return Ok(());
        }

        // 환경 리스너가 먼저 실행되므로 일반적으로 바인딩되어 있음
        let env = command
            .env()
            .unwrap_or_else(|| Arc::new(Environment::system()));
        let project = event.state.project(&event.io).await?;

        let installer = Installer::new(
            Arc::clone(&event.io),
            env,
            project.package().clone(),
            project.locker().clone(),
            project.pool().clone(),
            project.config().clone(),
            project.disable_cache(),
        );
        command.set_installer(Arc::new(installer));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::application::AppState;
    use crate::console::commands::{Command, InstallCommand};
    use crate::console::events::BeforeRunEvent;
    use crate::io::Io;
    use crate::project::MANIFEST_FILE;
    use tempfile::TempDir;

    fn project_event(command: Command) -> (TempDir, ConsoleEvent) {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(MANIFEST_FILE),
            "[package]\nname = \"demo\"\n\n[config]\nvirtualenvs_in_project = true\n",
        )
        .unwrap();

        let state = AppState::new();
        state.set_working_directory(temp.path().to_path_buf());

        let event = ConsoleEvent::BeforeRun(BeforeRunEvent {
            command: Arc::new(command),
            io: Arc::new(Io::buffered(Verbosity::Normal)),
            state: Arc::new(state),
        });
        (temp, event)
    }

    #[test]
    fn test_directive_tiers() {
        assert_eq!(
            log_directives(Verbosity::Normal, &[]),
            vec![
                "off",
                "bale_core::project=warn",
                "bale_core::installer=warn",
                "bale_core::plugin=warn",
            ]
        );

        let directives = log_directives(
            Verbosity::Normal,
            &["bale_core::builders::wheel".to_string()],
        );
        assert!(directives.contains(&"bale_core::builders::wheel=info".to_string()));

        let directives = log_directives(Verbosity::Debug, &[]);
        assert_eq!(directives[0], "debug");
        assert!(directives.contains(&"bale_core::project=debug".to_string()));
    }

    #[tokio::test]
    async fn test_env_listener_binds_once() {
        let (_temp, event) = project_event(Command::new(Arc::new(InstallCommand)));
        let dispatcher = EventDispatcher::new();

        let listener = EnvListener;
        listener
            .handle(&event, EventKind::BeforeRun, &dispatcher)
            .await
            .unwrap();

        let ConsoleEvent::BeforeRun(inner) = &event;
        let bound = inner.command.env().unwrap();
        assert!(bound.is_virtual_environment());

        // 두 번째 실행은 기존 바인딩을 유지
        listener
            .handle(&event, EventKind::BeforeRun, &dispatcher)
            .await
            .unwrap();
        assert_eq!(inner.command.env().unwrap().path(), bound.path());
    }

    #[tokio::test]
    async fn test_installer_listener_wires_project_state() {
        let (_temp, event) = project_event(Command::new(Arc::new(InstallCommand)));
        let dispatcher = EventDispatcher::new();

        EnvListener
            .handle(&event, EventKind::BeforeRun, &dispatcher)
            .await
            .unwrap();
        InstallerListener
            .handle(&event, EventKind::BeforeRun, &dispatcher)
            .await
            .unwrap();

        let ConsoleEvent::BeforeRun(inner) = &event;
        let installer = inner.command.installer().unwrap();
        assert_eq!(installer.package().name, "demo");
        assert!(installer.env().is_virtual_environment());
    }
}
