//! Error types for Bale
//!
//! 모든 에러를 중앙에서 관리

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Bale 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 경로 / 옵션 관련
    // ========================================================================
    #[error("Invalid path: {path} ({reason})")]
    InvalidPath { path: PathBuf, reason: String },

    // ========================================================================
    // 콘솔 관련
    // ========================================================================
    #[error("The command \"{name}\" does not exist")]
    CommandNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("A command named \"{0}\" is already registered")]
    DuplicateCommand(String),

    #[error("Listener failed during {event}: {message}")]
    Listener { event: String, message: String },

    // ========================================================================
    // 플러그인 관련
    // ========================================================================
    #[error("Plugin error: {0}")]
    Plugin(String),

    #[error("Plugin {id} failed to load: {message}")]
    PluginLoad { id: String, message: String },

    // ========================================================================
    // 프로젝트 / 설정 관련
    // ========================================================================
    #[error("Project error: {0}")]
    Project(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 일반
    // ========================================================================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 사용자에게 그대로 보여줄 수 있는 에러인지 확인
    ///
    /// user-facing 에러는 스택 트레이스 없이 짧은 메시지로 렌더링됩니다.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::InvalidPath { .. }
                | Error::CommandNotFound { .. }
                | Error::InvalidInput(_)
                | Error::Config(_)
        )
    }

    /// CommandNotFound 에러 생성 헬퍼
    pub fn command_not_found(name: impl Into<String>, suggestions: Vec<String>) -> Self {
        Error::CommandNotFound {
            name: name.into(),
            suggestions,
        }
    }

    /// InvalidPath 에러 생성 헬퍼
    pub fn invalid_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// From 구현 (추가 변환)
// ============================================================================

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing() {
        let err = Error::invalid_path("/nope", "path does not exist");
        assert!(err.is_user_facing());

        let err = Error::Internal("boom".into());
        assert!(!err.is_user_facing());
    }

    #[test]
    fn test_command_not_found_display() {
        let err = Error::command_not_found("instal", vec!["install".into()]);
        assert_eq!(err.to_string(), "The command \"instal\" does not exist");
    }
}
