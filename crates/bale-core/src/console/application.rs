//! Application - 최상위 오케스트레이터
//!
//! 토큰 바인딩 → 전역 옵션 반영 → 플러그인 로드 → 커맨드 해석 →
//! before-run 디스패치 → 실행의 전체 라이프사이클을 담당합니다.
//! 전역 가변 상태 대신 명시적인 [`AppState`]를 협력자에 전달합니다.

use crate::console::commands::{
    AboutCommand, CacheClearCommand, CacheListCommand, Command, EnvInfoCommand, InstallCommand,
    LockCommand, RunCommand, VersionCommand,
};
use crate::console::definition::Definition;
use crate::console::events::{BeforeRunEvent, ConsoleEvent, EventDispatcher, EventKind};
use crate::console::input::{ArgvInput, OptionValue};
use crate::console::listeners::{EnvListener, InstallerListener, LoggerListener};
use crate::console::registry::{CommandFactory, CommandRegistry};
use crate::console::rewrite::rewrite_run_input;
use crate::io::Io;
use crate::plugin::PluginManager;
use crate::project::{Project, ProjectFactory};
use bale_foundation::{ensure_path, Error, Result, ScopedDirectory};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// 애플리케이션 이름 (run 재작성 시 선행 토큰으로 사용)
pub const APPLICATION_NAME: &str = "bale";

lazy_static! {
    /// 플러그인으로 이전된 커맨드에 대한 안내 메시지 테이블
    static ref COMMAND_NOT_FOUND_MESSAGES: HashMap<&'static str, &'static str> = {
        let mut messages = HashMap::new();
        messages.insert(
            "shell",
            "Install the bale-plugin-shell plugin to use the shell command.",
        );
        messages.insert(
            "export",
            "Install the bale-plugin-export plugin to export the lock file to other formats.",
        );
        messages
    };
}

static COMMAND_NOT_FOUND_PREFIX: &str = "This command is not bundled with Bale anymore.";

// ============================================================================
// AppState - 공유 애플리케이션 상태
// ============================================================================

struct Flags {
    disable_plugins: bool,
    disable_cache: bool,
    working_directory: PathBuf,
    project_directory: Option<PathBuf>,
}

/// 공유 애플리케이션 상태
///
/// 커맨드와 리스너가 같은 뷰를 보도록 단일 인스턴스를 Arc로
/// 공유합니다. 프로젝트 도메인 객체는 첫 접근 시 생성되어
/// 메모이즈됩니다.
pub struct AppState {
    flags: parking_lot::RwLock<Flags>,
    project: tokio::sync::RwLock<Option<Arc<Project>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            flags: parking_lot::RwLock::new(Flags {
                disable_plugins: false,
                disable_cache: false,
                working_directory: std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from(".")),
                project_directory: None,
            }),
            project: tokio::sync::RwLock::new(None),
        }
    }

    pub fn disable_plugins(&self) -> bool {
        self.flags.read().disable_plugins
    }

    pub fn set_disable_plugins(&self, value: bool) {
        self.flags.write().disable_plugins = value;
    }

    pub fn disable_cache(&self) -> bool {
        self.flags.read().disable_cache
    }

    pub fn set_disable_cache(&self, value: bool) {
        self.flags.write().disable_cache = value;
    }

    pub fn working_directory(&self) -> PathBuf {
        self.flags.read().working_directory.clone()
    }

    pub fn set_working_directory(&self, path: PathBuf) {
        self.flags.write().working_directory = path;
    }

    /// 프로젝트 디렉토리 (-P 미지정 시 작업 디렉토리)
    pub fn project_directory(&self) -> PathBuf {
        let flags = self.flags.read();
        flags
            .project_directory
            .clone()
            .unwrap_or_else(|| flags.working_directory.clone())
    }

    pub fn set_project_directory(&self, path: PathBuf) {
        self.flags.write().project_directory = Some(path);
    }

    /// 프로젝트 도메인 객체 (첫 접근 시 생성, 이후 메모이즈)
    pub async fn project(&self, io: &Io) -> Result<Arc<Project>> {
        {
            let cached = self.project.read().await;
            if let Some(project) = cached.as_ref() {
                return Ok(Arc::clone(project));
            }
        }

        let mut slot = self.project.write().await;
        // write 락 대기 중 다른 태스크가 채웠을 수 있음
        if let Some(project) = slot.as_ref() {
            return Ok(Arc::clone(project));
        }

        let project = Arc::new(ProjectFactory::create(
            &self.project_directory(),
            io,
            self.disable_plugins(),
            self.disable_cache(),
        )?);
        *slot = Some(Arc::clone(&project));
        Ok(project)
    }

    /// 메모이즈된 프로젝트 폐기 (디렉토리 변경 후 재생성용)
    pub async fn reset_project(&self) {
        *self.project.write().await = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Application
// ============================================================================

/// 콘솔 애플리케이션
pub struct Application {
    name: String,
    version: String,
    registry: Arc<CommandRegistry>,
    dispatcher: Arc<EventDispatcher>,
    plugins: Arc<PluginManager>,
    state: Arc<AppState>,
    plugins_loaded: tokio::sync::Mutex<bool>,
}

impl Application {
    /// 내장 커맨드와 기본 리스너가 배선된 애플리케이션 생성
    pub async fn new() -> Self {
        let app = Self {
            name: APPLICATION_NAME.to_string(),
            version: crate::VERSION.to_string(),
            registry: Arc::new(CommandRegistry::new()),
            dispatcher: Arc::new(EventDispatcher::new()),
            plugins: Arc::new(PluginManager::default()),
            state: Arc::new(AppState::new()),
            plugins_loaded: tokio::sync::Mutex::new(false),
        };

        app.register_builtin_commands().await;

        // 고정 순서: 로거 → 환경 → 인스톨러
        app.dispatcher
            .subscribe(EventKind::BeforeRun, Arc::new(LoggerListener))
            .await;
        app.dispatcher
            .subscribe(EventKind::BeforeRun, Arc::new(EnvListener))
            .await;
        app.dispatcher
            .subscribe(EventKind::BeforeRun, Arc::new(InstallerListener))
            .await;

        app
    }

    async fn register_builtin_commands(&self) {
        let factories: Vec<(&str, CommandFactory)> = vec![
            ("about", Arc::new(|| Command::new(Arc::new(AboutCommand)))),
            ("install", Arc::new(|| Command::new(Arc::new(InstallCommand)))),
            ("lock", Arc::new(|| Command::new(Arc::new(LockCommand)))),
            ("run", Arc::new(|| Command::new(Arc::new(RunCommand)))),
            ("version", Arc::new(|| Command::new(Arc::new(VersionCommand)))),
            ("cache clear", Arc::new(|| Command::new(Arc::new(CacheClearCommand)))),
            ("cache list", Arc::new(|| Command::new(Arc::new(CacheListCommand)))),
            ("env info", Arc::new(|| Command::new(Arc::new(EnvInfoCommand)))),
        ];

        for (name, factory) in factories {
            // 기본 모드 레지스트리에 내장 이름 중복은 없음
            if let Err(e) = self.registry.register(name, factory).await {
                debug!("Failed to register builtin {}: {}", name, e);
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    pub fn plugins(&self) -> &PluginManager {
        &self.plugins
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    // ========================================================================
    // 실행
    // ========================================================================

    /// 토큰을 실행하고 종료 코드를 반환 (에러는 렌더링 후 1)
    pub async fn run(&self, tokens: Vec<String>, io: Arc<Io>) -> i32 {
        match self.execute(tokens, Arc::clone(&io)).await {
            Ok(code) => code,
            Err(err) => {
                self.render_error(&err, &io);
                1
            }
        }
    }

    async fn execute(&self, tokens: Vec<String>, io: Arc<Io>) -> Result<i32> {
        let definition = Definition::application_default();
        let mut input = ArgvInput::new(tokens);
        input.bind(&definition);

        self.configure_options(&input)?;

        // 가드가 살아 있는 동안만 작업 디렉토리가 변경됨
        let _directory_guard = ScopedDirectory::enter(&self.state.working_directory())?;

        if !self.state.disable_plugins() {
            self.load_plugins().await?;
        }

        if input.arguments().is_empty() {
            self.list_commands(&io).await?;
            return Ok(0);
        }

        let command = self
            .registry
            .resolve_from_arguments(input.arguments())
            .await?;

        if command.name() == "run" {
            let rewritten = rewrite_run_input(&self.name, &input, &definition);
            command.bind_input(rewritten.into_argv());
        } else {
            command.bind_input(input);
        }

        let event = ConsoleEvent::BeforeRun(BeforeRunEvent {
            command: Arc::clone(&command),
            io: Arc::clone(&io),
            state: Arc::clone(&self.state),
        });
        self.dispatcher.dispatch(&event).await?;

        command.execute(&io, &self.state).await
    }

    /// 1차 바인딩된 전역 옵션을 상태에 반영
    fn configure_options(&self, input: &ArgvInput) -> Result<()> {
        if input.option("no-plugins").is_some_and(OptionValue::is_truthy) {
            self.state.set_disable_plugins(true);
        }
        if input.option("no-cache").is_some_and(OptionValue::is_truthy) {
            self.state.set_disable_cache(true);
        }

        if let Some(directory) = input.option("directory").and_then(OptionValue::as_str) {
            let path = ensure_path(directory, true)?;
            self.state.set_working_directory(path);
        }

        if let Some(project) = input.option("project").and_then(OptionValue::as_str) {
            let path = Path::new(project);
            let path = if path.is_relative() {
                self.state.working_directory().join(path)
            } else {
                path.to_path_buf()
            };
            self.state.set_project_directory(ensure_path(&path, true)?);
        }

        Ok(())
    }

    /// 플러그인 검색/활성화 (프로세스당 최대 한 번)
    async fn load_plugins(&self) -> Result<()> {
        let mut loaded = self.plugins_loaded.lock().await;
        if *loaded {
            return Ok(());
        }

        self.plugins
            .add_project_plugin_path(&self.state.project_directory());
        let manifests = self.plugins.load_plugins().await?;
        self.plugins.activate(&manifests, self).await?;

        *loaded = true;
        Ok(())
    }

    /// 인자 없이 호출된 경우 커맨드 목록 출력
    async fn list_commands(&self, io: &Io) -> Result<()> {
        io.write_line(format!("{} {}", self.name, self.version));
        io.write_line("");
        io.write_line("Available commands:");
        for name in self.registry.names().await {
            let command = self.registry.resolve(&name).await?;
            io.write_line(format!("  {:<14} {}", name, command.description()));
        }
        Ok(())
    }

    fn render_error(&self, err: &Error, io: &Io) {
        if let Error::CommandNotFound { name, suggestions } = err {
            if let Some(message) = COMMAND_NOT_FOUND_MESSAGES.get(name.as_str()) {
                io.write_error_line(COMMAND_NOT_FOUND_PREFIX);
                io.write_error_line(*message);
                return;
            }

            io.write_error_line(err.to_string());
            if !suggestions.is_empty() {
                io.write_error_line("");
                io.write_error_line("Did you mean one of these?");
                for suggestion in suggestions {
                    io.write_error_line(format!("    {suggestion}"));
                }
            }
            return;
        }

        if err.is_user_facing() {
            io.write_error_line(err.to_string());
        } else {
            io.write_error_line(format!("Error: {err}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::commands::CommandHandler;
    use crate::io::Verbosity;
    use crate::project::MANIFEST_FILE;
    use async_trait::async_trait;
    use tempfile::TempDir;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_moved_command_messages() {
        let app = Application::new().await;
        let io = Arc::new(Io::buffered(Verbosity::Normal));

        let code = app
            .run(tokens(&["--no-plugins", "shell"]), Arc::clone(&io))
            .await;

        assert_eq!(code, 1);
        let errors = io.error_lines();
        assert_eq!(errors[0], COMMAND_NOT_FOUND_PREFIX);
        assert!(errors[1].contains("bale-plugin-shell"));
    }

    #[tokio::test]
    async fn test_unknown_command_suggestions() {
        let app = Application::new().await;
        let io = Arc::new(Io::buffered(Verbosity::Normal));

        let code = app
            .run(tokens(&["--no-plugins", "instal"]), Arc::clone(&io))
            .await;

        assert_eq!(code, 1);
        let errors = io.error_lines();
        assert!(errors[0].contains("does not exist"));
        assert!(errors.iter().any(|line| line.contains("install")));
    }

    #[tokio::test]
    async fn test_no_arguments_lists_commands() {
        let app = Application::new().await;
        let io = Arc::new(Io::buffered(Verbosity::Normal));

        let code = app.run(tokens(&["--no-plugins"]), Arc::clone(&io)).await;

        assert_eq!(code, 0);
        let output = io.output_lines().join("\n");
        assert!(output.contains("about"));
        assert!(output.contains("cache clear"));
        assert!(output.contains("env info"));
    }

    #[tokio::test]
    async fn test_no_plugins_keeps_builtin_registry() {
        let app = Application::new().await;
        let io = Arc::new(Io::buffered(Verbosity::Normal));

        let code = app
            .run(tokens(&["--no-plugins", "about"]), Arc::clone(&io))
            .await;

        assert_eq!(code, 0);
        assert_eq!(app.plugins().plugin_count(), 0);
        assert_eq!(
            app.registry().names().await,
            vec![
                "about",
                "cache clear",
                "cache list",
                "env info",
                "install",
                "lock",
                "run",
                "version",
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_directory_is_clean_error() {
        let app = Application::new().await;
        let io = Arc::new(Io::buffered(Verbosity::Normal));

        let code = app
            .run(
                tokens(&["--no-plugins", "-C", "/definitely/not/here", "about"]),
                Arc::clone(&io),
            )
            .await;

        assert_eq!(code, 1);
        let errors = io.error_lines();
        assert!(errors[0].contains("path does not exist"));
        // 내부 에러 포맷이 아닌 사용자용 메시지
        assert!(!errors[0].starts_with("Error:"));
    }

    #[tokio::test]
    async fn test_working_directory_restored_after_failure() {
        struct FailingCommand;

        #[async_trait]
        impl CommandHandler for FailingCommand {
            fn name(&self) -> &str {
                "explode"
            }

            async fn handle(
                &self,
                _command: &Command,
                _io: &Io,
                _state: &AppState,
            ) -> Result<i32> {
                Err(Error::Internal("boom".into()))
            }
        }

        let temp = TempDir::new().unwrap();
        let before = std::env::current_dir().unwrap();

        let app = Application::new().await;
        app.registry
            .register("explode", Arc::new(|| Command::new(Arc::new(FailingCommand))))
            .await
            .unwrap();

        let io = Arc::new(Io::buffered(Verbosity::Normal));
        let code = app
            .run(
                tokens(&[
                    "--no-plugins",
                    "-C",
                    temp.path().to_str().unwrap(),
                    "explode",
                ]),
                Arc::clone(&io),
            )
            .await;

        assert_eq!(code, 1);
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[tokio::test]
    async fn test_project_memoization_and_reset() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(MANIFEST_FILE),
            "[package]\nname = \"demo\"\n",
        )
        .unwrap();

        let state = AppState::new();
        state.set_project_directory(temp.path().to_path_buf());
        let io = Io::buffered(Verbosity::Normal);

        let first = state.project(&io).await.unwrap();
        let second = state.project(&io).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        state.reset_project().await;
        let third = state.project(&io).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(third.package().name, "demo");
    }
}
