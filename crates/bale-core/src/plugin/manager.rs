//! Plugin manager - 팩토리 테이블 기반 플러그인 로딩
//!
//! 런타임 리플렉션 대신 초기화 시점에 등록된 id → 생성자 테이블로
//! 플러그인을 인스턴스화합니다. 기본 동작은 실패한 플러그인을
//! 건너뛰는 것이며, strict 모드에서는 첫 실패가 전체 로드를
//! 중단시킵니다.

use super::discovery::PluginDiscovery;
use super::manifest::PluginManifest;
use super::traits::ApplicationPlugin;
use crate::console::application::Application;
use bale_foundation::{Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// 애플리케이션 플러그인 확장 지점 그룹
pub const APPLICATION_PLUGIN_GROUP: &str = "bale.application.plugin";

/// 플러그인 인스턴스 생성자
pub type PluginFactory = Arc<dyn Fn() -> Arc<dyn ApplicationPlugin> + Send + Sync>;

/// 플러그인 매니저 설정
#[derive(Debug, Clone, Default)]
pub struct PluginManagerConfig {
    /// true면 플러그인 하나의 실패가 전체 로드를 중단
    pub strict: bool,
}

/// 플러그인 매니저
pub struct PluginManager {
    config: PluginManagerConfig,
    search_paths: RwLock<Vec<PathBuf>>,
    factories: RwLock<HashMap<String, PluginFactory>>,
    activated: RwLock<usize>,
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new(PluginManagerConfig::default())
    }
}

impl PluginManager {
    pub fn new(config: PluginManagerConfig) -> Self {
        let mut search_paths = Vec::new();
        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(".bale").join("plugins"));
        }

        Self {
            config,
            search_paths: RwLock::new(search_paths),
            factories: RwLock::new(HashMap::new()),
            activated: RwLock::new(0),
        }
    }

    /// 생성자 등록 (같은 id는 마지막 등록이 이김)
    pub fn register_factory(&self, id: impl Into<String>, factory: PluginFactory) {
        self.factories.write().insert(id.into(), factory);
    }

    /// 프로젝트 로컬 플러그인 경로 추가
    pub fn add_project_plugin_path(&self, project_dir: &Path) {
        let path = project_dir.join(".bale").join("plugins");
        let mut paths = self.search_paths.write();
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    /// 검색 경로에서 매니페스트 수집
    ///
    /// 기본 모드에서는 읽을 수 없는 플러그인/경로를 경고 후
    /// 건너뛰고, strict 모드에서만 I/O 실패가 전파됩니다.
    pub async fn load_plugins(&self) -> Result<Vec<PluginManifest>> {
        let paths = self.search_paths.read().clone();
        PluginDiscovery::new(paths, APPLICATION_PLUGIN_GROUP)
            .with_strict(self.config.strict)
            .discover()
            .await
    }

    /// 수집된 매니페스트를 인스턴스화하고 활성화
    pub async fn activate(&self, manifests: &[PluginManifest], app: &Application) -> Result<()> {
        for manifest in manifests {
            let factory = self.factories.read().get(&manifest.id).cloned();
            let Some(factory) = factory else {
                if self.config.strict {
                    return Err(Error::PluginLoad {
                        id: manifest.id.clone(),
                        message: "no registered factory for this plugin".into(),
                    });
                }
                warn!("No factory registered for plugin {}, skipping", manifest.id);
                continue;
            };

            let plugin = factory();
            match plugin.activate(app).await {
                Ok(()) => {
                    info!("Activated plugin {} ({})", manifest.id, manifest.version);
                    *self.activated.write() += 1;
                }
                Err(e) => {
                    if self.config.strict {
                        return Err(Error::PluginLoad {
                            id: manifest.id.clone(),
                            message: e.to_string(),
                        });
                    }
                    warn!("Plugin {} failed to activate, skipping: {}", manifest.id, e);
                }
            }
        }
        Ok(())
    }

    /// 등록된 생성자로 플러그인 하나를 직접 활성화
    pub async fn load_plugin(&self, id: &str, app: &Application) -> Result<()> {
        let factory = self
            .factories
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::PluginLoad {
                id: id.to_string(),
                message: "no registered factory for this plugin".into(),
            })?;

        factory().activate(app).await.map_err(|e| Error::PluginLoad {
            id: id.to_string(),
            message: e.to_string(),
        })?;
        *self.activated.write() += 1;
        Ok(())
    }

    /// 활성화된 플러그인 수
    pub fn plugin_count(&self) -> usize {
        *self.activated.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::commands::{AboutCommand, Command};
    use async_trait::async_trait;

    struct GreetPlugin;

    #[async_trait]
    impl ApplicationPlugin for GreetPlugin {
        fn id(&self) -> &str {
            "bale-plugin-greet"
        }

        async fn activate(&self, app: &Application) -> Result<()> {
            app.registry()
                .register("greet", Arc::new(|| Command::new(Arc::new(AboutCommand))))
                .await
        }
    }

    struct BrokenPlugin;

    #[async_trait]
    impl ApplicationPlugin for BrokenPlugin {
        fn id(&self) -> &str {
            "bale-plugin-broken"
        }

        async fn activate(&self, _app: &Application) -> Result<()> {
            Err(Error::Plugin("activation failed".into()))
        }
    }

    fn greet_factory() -> PluginFactory {
        Arc::new(|| Arc::new(GreetPlugin) as Arc<dyn ApplicationPlugin>)
    }

    fn broken_factory() -> PluginFactory {
        Arc::new(|| Arc::new(BrokenPlugin) as Arc<dyn ApplicationPlugin>)
    }

    fn manifest(id: &str) -> PluginManifest {
        serde_json::from_str(&format!(
            r#"{{"id": "{id}", "name": "{id}", "version": "0.1.0", "group": "{APPLICATION_PLUGIN_GROUP}"}}"#
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_activation_registers_command() {
        let app = Application::new().await;
        let manager = PluginManager::default();
        manager.register_factory("bale-plugin-greet", greet_factory());

        manager
            .activate(&[manifest("bale-plugin-greet")], &app)
            .await
            .unwrap();

        assert_eq!(manager.plugin_count(), 1);
        assert!(app.registry().contains("greet").await);
    }

    #[tokio::test]
    async fn test_failed_plugin_is_skipped_by_default() {
        let app = Application::new().await;
        let manager = PluginManager::default();
        manager.register_factory("bale-plugin-broken", broken_factory());
        manager.register_factory("bale-plugin-greet", greet_factory());

        manager
            .activate(
                &[manifest("bale-plugin-broken"), manifest("bale-plugin-greet")],
                &app,
            )
            .await
            .unwrap();

        assert_eq!(manager.plugin_count(), 1);
    }

    #[tokio::test]
    async fn test_strict_mode_aborts_on_failure() {
        let app = Application::new().await;
        let manager = PluginManager::new(PluginManagerConfig { strict: true });
        manager.register_factory("bale-plugin-broken", broken_factory());

        let err = manager
            .activate(&[manifest("bale-plugin-broken")], &app)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::PluginLoad { .. }));

        // 미등록 id도 strict에서는 에러
        let err = manager
            .activate(&[manifest("bale-plugin-unknown")], &app)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::PluginLoad { .. }));
    }
}
