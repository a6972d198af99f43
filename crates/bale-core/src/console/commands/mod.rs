//! Commands - 내장 커맨드 모음
//!
//! 각 커맨드는 [`CommandHandler`]를 구현하고, 레지스트리의 팩토리
//! 테이블을 통해 [`Command`] 셀로 감싸져 실행됩니다.

pub mod about;
pub mod cache;
pub mod command;
pub mod env;
pub mod install;
pub mod lock;
pub mod run;
pub mod version;

pub use about::AboutCommand;
pub use cache::{CacheClearCommand, CacheListCommand};
pub use command::{Command, CommandHandler};
pub use env::EnvInfoCommand;
pub use install::InstallCommand;
pub use lock::LockCommand;
pub use run::RunCommand;
pub use version::VersionCommand;
