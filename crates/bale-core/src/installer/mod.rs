//! Installer - 설치 협력자 핸들
//!
//! 설치 알고리즘 자체는 범위 밖입니다. before-run 리스너가 커맨드에
//! 바인딩하는, 완전히 배선된 핸들만을 정의합니다.

use crate::env::Environment;
use crate::io::Io;
use crate::project::{LockState, PackageSummary, ProjectConfig, SourcePool};
use std::sync::Arc;

/// 설치 협력자
///
/// (io, 환경, 패키지, 락 상태, 소스 풀, 설정, disable_cache)로
/// 구성되며, 커맨드에 바인딩 가능하다는 것 외의 계약은 없습니다.
pub struct Installer {
    io: Arc<Io>,
    env: Arc<Environment>,
    package: PackageSummary,
    locker: LockState,
    pool: SourcePool,
    config: ProjectConfig,
    disable_cache: bool,
}

impl Installer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        io: Arc<Io>,
        env: Arc<Environment>,
        package: PackageSummary,
        locker: LockState,
        pool: SourcePool,
        config: ProjectConfig,
        disable_cache: bool,
    ) -> Self {
        Self {
            io,
            env,
            package,
            locker,
            pool,
            config,
            disable_cache,
        }
    }

    pub fn io(&self) -> &Io {
        &self.io
    }

    pub fn env(&self) -> &Environment {
        &self.env
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

    pub fn disable_cache(&self) -> bool {
        self.disable_cache
    }
}
