//! Plugin discovery - 검색 경로 스캔
//!
//! 각 검색 경로 아래의 하위 디렉토리에서 `plugin.json`을 찾습니다.
//! 디렉토리 항목은 이름순으로 정렬해 결정적으로 순회하며, 같은 id는
//! 먼저 발견된 것이 이깁니다.

use super::manifest::PluginManifest;
use bale_foundation::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 매니페스트 파일 이름
pub const MANIFEST_FILE_NAME: &str = "plugin.json";

/// 플러그인 검색기
pub struct PluginDiscovery {
    search_paths: Vec<PathBuf>,
    group: String,
    strict: bool,
}

impl PluginDiscovery {
    pub fn new(search_paths: Vec<PathBuf>, group: impl Into<String>) -> Self {
        Self {
            search_paths,
            group: group.into(),
            strict: false,
        }
    }

    /// 빌더 패턴: strict 모드 설정
    ///
    /// strict에서는 I/O 실패가 전파되고, 기본 모드에서는 해당
    /// 플러그인/경로만 건너뜁니다.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// 검색 경로를 순서대로 스캔해 매니페스트 목록 반환
    pub async fn discover(&self) -> Result<Vec<PluginManifest>> {
        let mut manifests = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for path in &self.search_paths {
            if !path.is_dir() {
                debug!("Plugin path {:?} does not exist, skipping", path);
                continue;
            }
            if let Err(e) = self.scan_directory(path, &mut manifests, &mut seen).await {
                if self.strict {
                    return Err(e);
                }
                warn!("Failed to scan plugin path {:?}, skipping: {}", path, e);
            }
        }

        debug!("Discovered {} plugin(s)", manifests.len());
        Ok(manifests)
    }

    async fn scan_directory(
        &self,
        path: &Path,
        manifests: &mut Vec<PluginManifest>,
        seen: &mut HashSet<String>,
    ) -> Result<()> {
        let mut entries = Vec::new();
        let mut reader = tokio::fs::read_dir(path).await?;
        while let Some(entry) = reader.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                entries.push(entry.path());
            }
        }
        entries.sort();

        for entry in entries {
            let manifest_path = entry.join(MANIFEST_FILE_NAME);
            if !manifest_path.is_file() {
                continue;
            }

            let content = match tokio::fs::read_to_string(&manifest_path).await {
                Ok(content) => content,
                Err(e) => {
                    if self.strict {
                        return Err(e.into());
                    }
                    warn!("Cannot read manifest {:?}, skipping: {}", manifest_path, e);
                    continue;
                }
            };
            let manifest: PluginManifest = match serde_json::from_str(&content) {
                Ok(manifest) => manifest,
                Err(e) => {
                    warn!("Skipping malformed manifest {:?}: {}", manifest_path, e);
                    continue;
                }
            };

            if manifest.group != self.group {
                debug!(
                    "Skipping {} (group {} is not {})",
                    manifest.id, manifest.group, self.group
                );
                continue;
            }

            // 같은 id는 먼저 발견된 쪽 우선
            if !seen.insert(manifest.id.clone()) {
                debug!("Plugin {} already discovered, skipping", manifest.id);
                continue;
            }

            manifests.push(manifest);
        }
        Ok(())
    }
}
