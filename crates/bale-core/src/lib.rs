//! bale-core: Bale 커맨드 디스패치 코어
//!
//! # 주요 모듈
//!
//! - `console`: 입력 바인딩, 커맨드 해석, 이벤트 디스패치
//! - `io`: 출력 채널 및 verbosity
//! - `project`: 프로젝트 도메인 객체 및 팩토리
//! - `env`: 실행 환경 핸들
//! - `installer`: 설치 협력자 핸들
//! - `plugin`: 플러그인 검색 및 활성화
//!
//! # 사용 예시
//!
//! ```ignore
//! use bale_core::{Application, Io, Verbosity};
//! use std::sync::Arc;
//!
//! let tokens: Vec<String> = std::env::args().skip(1).collect();
//! let io = Arc::new(Io::new(Verbosity::from_tokens(&tokens)));
//!
//! let app = Application::new().await;
//! let code = app.run(tokens, io).await;
//! std::process::exit(code);
//! ```

pub mod console;
pub mod env;
pub mod installer;
pub mod io;
pub mod plugin;
pub mod project;

// Re-exports: Console
pub use console::{
    rewrite_run_input,
    AppState,
    // Orchestrator
    Application,
    ArgvInput,
    BeforeRunEvent,
    // Commands
    Command,
    CommandFactory,
    CommandHandler,
    CommandRegistry,
    ConsoleEvent,
    // Input
    Definition,
    // Events
    EventDispatcher,
    EventKind,
    EventListener,
    OptionSpec,
    OptionValue,
    RunArgvInput,
    APPLICATION_NAME,
};

// Re-exports: IO
pub use io::{Io, Verbosity};

// Re-exports: Project
pub use project::{Project, ProjectFactory, LOCK_FILE, MANIFEST_FILE};

// Re-exports: Environment / Installer
pub use env::{EnvManager, Environment};
pub use installer::Installer;

// Re-exports: Plugin
pub use plugin::{
    ApplicationPlugin, PluginDiscovery, PluginFactory, PluginManager, PluginManagerConfig,
    PluginManifest, PluginVersion, APPLICATION_PLUGIN_GROUP,
};

// Foundation re-exports
pub use bale_foundation::{Error, Result};

/// 코어 버전
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[tokio::test]
    async fn test_builtin_commands_registered() {
        let app = Application::new().await;

        for name in [
            "about",
            "install",
            "lock",
            "run",
            "version",
            "cache clear",
            "cache list",
            "env info",
        ] {
            assert!(app.registry().contains(name).await, "missing {name}");
        }
    }

    #[tokio::test]
    async fn test_default_listeners_subscribed() {
        let app = Application::new().await;
        assert_eq!(
            app.dispatcher().listener_count(EventKind::BeforeRun).await,
            3
        );
    }

    #[tokio::test]
    async fn test_version_command_output() {
        let app = Application::new().await;
        let io = Arc::new(Io::buffered(Verbosity::Normal));

        let code = app
            .run(
                vec!["--no-plugins".to_string(), "version".to_string()],
                Arc::clone(&io),
            )
            .await;

        assert_eq!(code, 0);
        assert_eq!(io.output_lines(), vec![format!("bale {VERSION}")]);
    }
}
