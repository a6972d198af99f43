//! Console - 커맨드 디스패치 엔진
//!
//! # 주요 모듈
//!
//! - `application`: 최상위 오케스트레이터 및 공유 상태
//! - `commands`: 커맨드 트레이트와 내장 커맨드
//! - `definition`: 전역 옵션 정의
//! - `input`: 관용적 argv 바인딩
//! - `rewrite`: pass-through 커맨드용 2-pass 재파싱
//! - `registry`: 팩토리 테이블 기반 커맨드 해석
//! - `events`: before-run 이벤트 및 디스패처
//! - `listeners`: 로거/환경/인스톨러 기본 리스너

pub mod application;
pub mod commands;
pub mod definition;
pub mod events;
pub mod input;
pub mod listeners;
pub mod registry;
pub mod rewrite;

pub use application::{AppState, Application, APPLICATION_NAME};
pub use commands::{Command, CommandHandler};
pub use definition::{Definition, OptionSpec};
pub use events::{
    BeforeRunEvent, ConsoleEvent, EventDispatcher, EventKind, EventListener,
};
pub use input::{ArgvInput, OptionValue};
pub use listeners::{EnvListener, InstallerListener, LoggerListener};
pub use registry::{CommandFactory, CommandRegistry};
pub use rewrite::{rewrite_run_input, RunArgvInput};
