//! Environment manager - 실행 환경 핸들
//!
//! 가상 환경 생성 메커니즘 자체는 범위 밖이며, 커맨드에 바인딩되는
//! 환경 핸들과 경로 계산만을 제공합니다.

use crate::project::Project;
use bale_foundation::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// Environment - 실행 환경 핸들
// ============================================================================

/// 환경 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentKind {
    /// 프로젝트별 가상 환경
    Virtual,

    /// 시스템 환경
    System,
}

/// 실행 환경 핸들
#[derive(Debug, Clone)]
pub struct Environment {
    path: PathBuf,
    kind: EnvironmentKind,
}

impl Environment {
    /// 가상 환경 핸들 생성
    pub fn virtual_env(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EnvironmentKind::Virtual,
        }
    }

    /// 시스템 환경 핸들 생성
    pub fn system() -> Self {
        Self {
            path: PathBuf::from("/usr"),
            kind: EnvironmentKind::System,
        }
    }

    /// 환경 루트 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 실행 파일 디렉토리 (자식 프로세스 PATH 앞에 붙임)
    pub fn bin_dir(&self) -> PathBuf {
        self.path.join("bin")
    }

    /// 가상 환경 여부
    pub fn is_virtual_environment(&self) -> bool {
        self.kind == EnvironmentKind::Virtual
    }
}

// ============================================================================
// EnvManager - 환경 생성 협력자
// ============================================================================

/// 환경 매니저
pub struct EnvManager {
    project: Arc<Project>,
}

impl EnvManager {
    pub fn new(project: Arc<Project>) -> Self {
        Self { project }
    }

    /// 프로젝트용 가상 환경 핸들 생성
    ///
    /// `virtualenvs_in_project`가 켜져 있으면 프로젝트 안의 `.venv`,
    /// 아니면 캐시 디렉토리 아래 패키지별 경로를 사용합니다.
    pub fn create_virtual_environment(&self) -> Result<Arc<Environment>> {
        let config = self.project.config();

        let path = if config.virtualenvs_in_project {
            self.project.directory().join(".venv")
        } else {
            config
                .cache_dir
                .join("virtualenvs")
                .join(&self.project.package().name)
        };

        debug!("Virtual environment path: {:?}", path);
        Ok(Arc::new(Environment::virtual_env(path)))
    }
}
