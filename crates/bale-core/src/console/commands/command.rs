//! Command - 커맨드 트레이트 및 바인딩 상태
//!
//! 커맨드는 팩토리로 지연 생성되어 옵션 바인딩 → 이벤트 구성 →
//! 실행 → 폐기의 라이프사이클을 가집니다. 환경/인스톨러 핸들은
//! before-run 리스너가 최대 한 번 채웁니다.

use crate::console::application::AppState;
use crate::console::input::ArgvInput;
use crate::env::Environment;
use crate::installer::Installer;
use crate::io::Io;
use async_trait::async_trait;
use bale_foundation::Result;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// CommandHandler - 커맨드 구현 트레이트
// ============================================================================

/// 커맨드 구현 트레이트
///
/// 이름에 공백이 포함되면 2단계 네임스페이스를 나타냅니다
/// (예: "cache clear").
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// 커맨드 이름
    fn name(&self) -> &str;

    /// 설명
    fn description(&self) -> &str {
        ""
    }

    /// 추가로 활성화할 로거 이름들
    fn loggers(&self) -> Vec<String> {
        Vec::new()
    }

    /// 실행 환경이 필요한지 여부
    fn needs_env(&self) -> bool {
        false
    }

    /// 인스톨러가 필요한지 여부
    fn needs_installer(&self) -> bool {
        false
    }

    /// 실행 본문
    async fn handle(&self, command: &Command, io: &Io, state: &AppState) -> Result<i32>;
}

// ============================================================================
// Command - 바인딩 상태를 가진 커맨드 인스턴스
// ============================================================================

/// 커맨드 인스턴스
///
/// 핸들러와 바인딩 상태(입력, 환경, 인스톨러)를 함께 담습니다.
/// 리스너는 바인딩 상태를 변경할 수 있지만 커맨드 정체성은
/// 교체하지 않습니다.
pub struct Command {
    handler: Arc<dyn CommandHandler>,
    input: RwLock<ArgvInput>,
    env: RwLock<Option<Arc<Environment>>>,
    installer: RwLock<Option<Arc<Installer>>>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

impl Command {
    pub fn new(handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            handler,
            input: RwLock::new(ArgvInput::default()),
            env: RwLock::new(None),
            installer: RwLock::new(None),
        }
    }

    pub fn name(&self) -> &str {
        self.handler.name()
    }

    pub fn description(&self) -> &str {
        self.handler.description()
    }

    pub fn loggers(&self) -> Vec<String> {
        self.handler.loggers()
    }

    pub fn needs_env(&self) -> bool {
        self.handler.needs_env()
    }

    pub fn needs_installer(&self) -> bool {
        self.handler.needs_installer()
    }

    // ========================================================================
    // 바인딩 상태
    // ========================================================================

    /// 활성 입력 교체 (pass-through 커맨드는 재작성된 뷰로 교체됨)
    pub fn bind_input(&self, input: ArgvInput) {
        *self.input.write() = input;
    }

    /// 활성 입력 (복제본)
    pub fn input(&self) -> ArgvInput {
        self.input.read().clone()
    }

    /// 바인딩된 환경
    pub fn env(&self) -> Option<Arc<Environment>> {
        self.env.read().clone()
    }

    /// 환경 바인딩 (이미 바인딩되어 있으면 유지)
    pub fn set_env(&self, env: Arc<Environment>) {
        let mut slot = self.env.write();
        if slot.is_some() {
            debug!("Command {} already has an environment bound", self.name());
            return;
        }
        *slot = Some(env);
    }

    /// 바인딩된 인스톨러
    pub fn installer(&self) -> Option<Arc<Installer>> {
        self.installer.read().clone()
    }

    /// 인스톨러 바인딩 (이미 바인딩되어 있으면 유지)
    pub fn set_installer(&self, installer: Arc<Installer>) {
        let mut slot = self.installer.write();
        if slot.is_some() {
            debug!("Command {} already has an installer bound", self.name());
            return;
        }
        *slot = Some(installer);
    }

    // ========================================================================
    // 실행
    // ========================================================================

    /// 커맨드 본문 실행, 종료 코드 반환
    pub async fn execute(&self, io: &Io, state: &AppState) -> Result<i32> {
        let handler = Arc::clone(&self.handler);
        handler.handle(self, io, state).await
    }
}
