//! Path helpers - 경로 검증 및 작업 디렉토리 스코핑

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 경로가 실제로 존재하는지 검증하고 정규화된 경로를 반환
///
/// `is_directory`가 true이면 디렉토리가 아닌 경로는 거부합니다.
pub fn ensure_path(path: impl AsRef<Path>, is_directory: bool) -> Result<PathBuf> {
    let path = path.as_ref();

    let metadata = std::fs::metadata(path)
        .map_err(|_| Error::invalid_path(path, "path does not exist"))?;

    if is_directory && !metadata.is_dir() {
        return Err(Error::invalid_path(path, "not a directory"));
    }

    // canonicalize 실패 시 원본 경로 유지
    Ok(std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
}

// ============================================================================
// ScopedDirectory - 작업 디렉토리 스코핑 가드
// ============================================================================

/// 프로세스 작업 디렉토리를 스코프 동안만 변경하는 가드
///
/// 드롭 시 이전 디렉토리로 무조건 복원됩니다 (에러 경로 포함).
/// 대상이 현재 디렉토리와 같으면 아무것도 변경하지 않습니다.
pub struct ScopedDirectory {
    previous: Option<PathBuf>,
}

impl ScopedDirectory {
    /// 작업 디렉토리를 `target`으로 변경하고 가드를 반환
    pub fn enter(target: &Path) -> Result<Self> {
        let current = std::env::current_dir()?;

        if current == target {
            return Ok(Self { previous: None });
        }

        std::env::set_current_dir(target)
            .map_err(|_| Error::invalid_path(target, "cannot change working directory"))?;
        debug!("Changed working directory to {:?}", target);

        Ok(Self {
            previous: Some(current),
        })
    }
}

impl Drop for ScopedDirectory {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            if let Err(e) = std::env::set_current_dir(&previous) {
                warn!("Failed to restore working directory {:?}: {}", previous, e);
            }
        }
    }
}
