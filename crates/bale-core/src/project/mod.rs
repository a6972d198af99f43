//! Project - 도메인 객체 및 팩토리
//!
//! 현재 프로젝트의 해석된 상태(패키지, 락, 소스 풀, 설정)를 담는
//! 핸들입니다. 프로세스당 한 번 생성되어 메모이즈되며, 의존성 해석
//! 알고리즘 자체는 이 코어의 범위가 아닙니다.

use crate::io::Io;
use bale_foundation::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 프로젝트 매니페스트 파일 이름
pub const MANIFEST_FILE: &str = "bale.toml";

/// 락 파일 이름
pub const LOCK_FILE: &str = "bale.lock";

/// 기본 소스 저장소 URL
pub const DEFAULT_SOURCE_URL: &str = "https://packages.bale-pm.dev/simple/";

// ============================================================================
// 구성 요소
// ============================================================================

/// 패키지 요약 (이름 + 버전)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSummary {
    pub name: String,
    pub version: String,
}

/// 락 상태
#[derive(Debug, Clone)]
pub struct LockState {
    /// 락 파일 경로
    pub path: PathBuf,

    /// 락 파일이 존재하고 읽을 수 있는지 여부
    pub fresh: bool,
}

/// 소스 저장소
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRepository {
    pub name: String,
    pub url: String,
}

/// 소스 풀
#[derive(Debug, Clone)]
pub struct SourcePool {
    repositories: Vec<SourceRepository>,
}

impl SourcePool {
    /// 기본 저장소만 담은 풀
    pub fn default_pool() -> Self {
        Self {
            repositories: vec![SourceRepository {
                name: "bale-central".to_string(),
                url: DEFAULT_SOURCE_URL.to_string(),
            }],
        }
    }

    /// 추가 저장소를 앞에 둔 풀 (프로젝트 소스가 우선)
    pub fn with_sources(sources: Vec<SourceRepository>) -> Self {
        let mut pool = Self { repositories: sources };
        pool.repositories.push(SourceRepository {
            name: "bale-central".to_string(),
            url: DEFAULT_SOURCE_URL.to_string(),
        });
        pool
    }

    pub fn repositories(&self) -> &[SourceRepository] {
        &self.repositories
    }
}

/// 프로젝트 설정
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// 캐시 디렉토리
    pub cache_dir: PathBuf,

    /// 가상 환경을 프로젝트 디렉토리 안에 둘지 여부
    pub virtualenvs_in_project: bool,
}

// ============================================================================
// Project - 도메인 객체
// ============================================================================

/// 현재 프로젝트의 해석된 상태
pub struct Project {
    directory: PathBuf,
    package: PackageSummary,
    locker: LockState,
    pool: SourcePool,
    config: ProjectConfig,
    disable_plugins: bool,
    disable_cache: bool,
}

impl Project {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn package(&self) -> &PackageSummary {
        &self.package
    }

    pub fn locker(&self) -> &LockState {
        &self.locker
    }

    pub fn pool(&self) -> &SourcePool {
        &self.pool
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn disable_plugins(&self) -> bool {
        self.disable_plugins
    }

    pub fn disable_cache(&self) -> bool {
        self.disable_cache
    }
}

// ============================================================================
// 매니페스트 (bale.toml)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    package: Option<ManifestPackage>,

    #[serde(default)]
    source: Vec<SourceRepository>,

    #[serde(default)]
    config: Option<ManifestConfig>,
}

#[derive(Debug, Deserialize)]
struct ManifestPackage {
    name: String,

    #[serde(default = "default_version")]
    version: String,
}

#[derive(Debug, Default, Deserialize)]
struct ManifestConfig {
    #[serde(default)]
    virtualenvs_in_project: bool,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

// ============================================================================
// ProjectFactory - 도메인 객체 팩토리
// ============================================================================

/// 프로젝트 팩토리
pub struct ProjectFactory;

impl ProjectFactory {
    /// 프로젝트 생성
    ///
    /// `bale.toml`이 없으면 디렉토리 이름에서 유도한 기본값을 사용합니다.
    pub fn create(
        cwd: &Path,
        io: &Io,
        disable_plugins: bool,
        disable_cache: bool,
    ) -> Result<Project> {
        let manifest_path = cwd.join(MANIFEST_FILE);
        let manifest = if manifest_path.exists() {
            let content = std::fs::read_to_string(&manifest_path)?;
            toml::from_str::<ManifestFile>(&content)?
        } else {
            debug!("No {} in {:?}, using defaults", MANIFEST_FILE, cwd);
            ManifestFile::default()
        };

        let package = match manifest.package {
            Some(package) => PackageSummary {
                name: package.name,
                version: package.version,
            },
            None => PackageSummary {
                name: cwd
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "untitled".to_string()),
                version: default_version(),
            },
        };

        let lock_path = cwd.join(LOCK_FILE);
        let locker = LockState {
            fresh: lock_path.exists(),
            path: lock_path,
        };

        let pool = if manifest.source.is_empty() {
            SourcePool::default_pool()
        } else {
            SourcePool::with_sources(manifest.source)
        };

        let manifest_config = manifest.config.unwrap_or_default();
        let config = ProjectConfig {
            cache_dir: dirs::cache_dir()
                .unwrap_or_else(|| cwd.join(".bale"))
                .join("bale"),
            virtualenvs_in_project: manifest_config.virtualenvs_in_project,
        };

        if io.is_debug() {
            io.write_line(format!(
                "Loaded project <{}> ({}) from {:?}",
                package.name, package.version, cwd
            ));
        }

        Ok(Project {
            directory: cwd.to_path_buf(),
            package,
            locker,
            pool,
            config,
            disable_plugins,
            disable_cache,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Verbosity;
    use tempfile::TempDir;

    #[test]
    fn test_create_with_manifest() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(MANIFEST_FILE),
            r#"
[package]
name = "demo"
version = "1.2.3"

[[source]]
name = "internal"
url = "https://pkgs.example.com/simple/"

[config]
virtualenvs_in_project = true
"#,
        )
        .unwrap();

        let io = Io::buffered(Verbosity::Normal);
        let project = ProjectFactory::create(temp.path(), &io, false, false).unwrap();

        assert_eq!(project.package().name, "demo");
        assert_eq!(project.package().version, "1.2.3");
        assert!(project.config().virtualenvs_in_project);

        // 프로젝트 소스가 앞, 기본 소스가 뒤
        let repos = project.pool().repositories();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "internal");
        assert_eq!(repos[1].name, "bale-central");
    }

    #[test]
    fn test_create_defaults_without_manifest() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("my-app");
        std::fs::create_dir(&dir).unwrap();

        let io = Io::buffered(Verbosity::Normal);
        let project = ProjectFactory::create(&dir, &io, false, true).unwrap();

        assert_eq!(project.package().name, "my-app");
        assert_eq!(project.package().version, "0.1.0");
        assert!(!project.locker().fresh);
        assert!(project.disable_cache());
        assert_eq!(project.pool().repositories().len(), 1);
    }

    #[test]
    fn test_lock_state_fresh() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(LOCK_FILE), "").unwrap();

        let io = Io::buffered(Verbosity::Normal);
        let project = ProjectFactory::create(temp.path(), &io, false, false).unwrap();

        assert!(project.locker().fresh);
    }
}
