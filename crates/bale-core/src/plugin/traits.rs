//! Plugin traits - 애플리케이션 플러그인 계약

use crate::console::application::Application;
use async_trait::async_trait;
use bale_foundation::Result;

/// 애플리케이션 플러그인
///
/// 활성화 시점에 커맨드를 등록하거나 리스너를 구독할 수 있습니다.
/// 커맨드 해석이 시작되기 전에 호출됩니다.
#[async_trait]
pub trait ApplicationPlugin: Send + Sync {
    /// 매니페스트 id와 일치해야 하는 식별자
    fn id(&self) -> &str;

    /// 애플리케이션에 기능 부착
    async fn activate(&self, app: &Application) -> Result<()>;
}
