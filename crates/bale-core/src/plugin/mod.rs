//! Plugin system - 검색, 매니페스트, 활성화
//!
//! 플러그인은 검색 경로의 `plugin.json` 매니페스트로 선언되고,
//! 초기화 시점에 등록된 생성자 테이블로 인스턴스화됩니다.

pub mod discovery;
pub mod manager;
pub mod manifest;
pub mod traits;

pub use discovery::PluginDiscovery;
pub use manager::{PluginFactory, PluginManager, PluginManagerConfig, APPLICATION_PLUGIN_GROUP};
pub use manifest::{PluginManifest, PluginVersion};
pub use traits::ApplicationPlugin;
