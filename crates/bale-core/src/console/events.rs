//! Events - 콘솔 이벤트 및 디스패처
//!
//! 커맨드 실행 직전에 발생하는 이벤트와, 구독 순서대로 리스너를
//! 순차 실행하는 디스패처를 정의합니다. 리스너 하나가 실패하면
//! 디스패치는 즉시 중단되고 커맨드는 실행되지 않습니다.

use crate::console::application::AppState;
use crate::console::commands::Command;
use crate::io::Io;
use async_trait::async_trait;
use bale_foundation::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

// ============================================================================
// 이벤트 타입
// ============================================================================

/// 이벤트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// 커맨드 실행 직전
    BeforeRun,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::BeforeRun => write!(f, "console.before_run"),
        }
    }
}

/// 커맨드 실행 직전 이벤트 페이로드
pub struct BeforeRunEvent {
    pub command: Arc<Command>,
    pub io: Arc<Io>,
    pub state: Arc<AppState>,
}

/// 콘솔 이벤트
pub enum ConsoleEvent {
    BeforeRun(BeforeRunEvent),
}

impl ConsoleEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ConsoleEvent::BeforeRun(_) => EventKind::BeforeRun,
        }
    }
}

// ============================================================================
// EventListener - 리스너 트레이트
// ============================================================================

/// 이벤트 리스너
#[async_trait]
pub trait EventListener: Send + Sync {
    /// 로그용 리스너 이름
    fn name(&self) -> &str;

    /// 이벤트 처리
    async fn handle(
        &self,
        event: &ConsoleEvent,
        kind: EventKind,
        dispatcher: &EventDispatcher,
    ) -> Result<()>;
}

// ============================================================================
// EventDispatcher
// ============================================================================

/// 이벤트 디스패처
///
/// 이벤트 종류별 리스너 목록을 유지하며, 구독 순서 그대로 순차
/// 실행합니다.
pub struct EventDispatcher {
    listeners: RwLock<HashMap<EventKind, Vec<Arc<dyn EventListener>>>>,
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
        }
    }

    /// 리스너 구독
    pub async fn subscribe(&self, kind: EventKind, listener: Arc<dyn EventListener>) {
        debug!("Subscribing listener {} to {}", listener.name(), kind);
        self.listeners
            .write()
            .await
            .entry(kind)
            .or_default()
            .push(listener);
    }

    /// 이벤트 디스패치
    ///
    /// 리스너 실패는 [`Error::Listener`]로 감싸 전파합니다.
    pub async fn dispatch(&self, event: &ConsoleEvent) -> Result<()> {
        let kind = event.kind();
        let listeners = {
            let map = self.listeners.read().await;
            map.get(&kind).cloned().unwrap_or_default()
        };

        debug!("Dispatching {} to {} listener(s)", kind, listeners.len());
        for listener in listeners {
            listener
                .handle(event, kind, self)
                .await
                .map_err(|e| Error::Listener {
                    event: kind.to_string(),
                    message: format!("{}: {}", listener.name(), e),
                })?;
        }
        Ok(())
    }

    /// 특정 이벤트에 등록된 리스너 수
    pub async fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .read()
            .await
            .get(&kind)
            .map(|l| l.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::commands::{CommandHandler, RunCommand};
    use crate::io::Verbosity;
    use parking_lot::Mutex;

    struct RecordingListener {
        label: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
    }

    #[async_trait]
    impl EventListener for RecordingListener {
        fn name(&self) -> &str {
            self.label
        }

        async fn handle(
            &self,
            _event: &ConsoleEvent,
            _kind: EventKind,
            _dispatcher: &EventDispatcher,
        ) -> Result<()> {
            self.log.lock().push(self.label);
            if self.fail {
                return Err(Error::Internal("listener boom".into()));
            }
            Ok(())
        }
    }

    fn before_run_event() -> ConsoleEvent {
        let handler: Arc<dyn CommandHandler> = Arc::new(RunCommand);
        ConsoleEvent::BeforeRun(BeforeRunEvent {
            command: Arc::new(Command::new(handler)),
            io: Arc::new(Io::buffered(Verbosity::Normal)),
            state: Arc::new(AppState::new()),
        })
    }

    #[tokio::test]
    async fn test_listeners_run_in_subscription_order() {
        let dispatcher = EventDispatcher::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for label in ["a", "b", "c"] {
            dispatcher
                .subscribe(
                    EventKind::BeforeRun,
                    Arc::new(RecordingListener {
                        label,
                        log: Arc::clone(&log),
                        fail: false,
                    }),
                )
                .await;
        }

        dispatcher.dispatch(&before_run_event()).await.unwrap();

        assert_eq!(*log.lock(), vec!["a", "b", "c"]);
        assert_eq!(dispatcher.listener_count(EventKind::BeforeRun).await, 3);
    }

    #[tokio::test]
    async fn test_failing_listener_aborts_dispatch() {
        let dispatcher = EventDispatcher::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        dispatcher
            .subscribe(
                EventKind::BeforeRun,
                Arc::new(RecordingListener {
                    label: "first",
                    log: Arc::clone(&log),
                    fail: true,
                }),
            )
            .await;
        dispatcher
            .subscribe(
                EventKind::BeforeRun,
                Arc::new(RecordingListener {
                    label: "second",
                    log: Arc::clone(&log),
                    fail: false,
                }),
            )
            .await;

        let err = dispatcher.dispatch(&before_run_event()).await.unwrap_err();

        assert!(matches!(err, Error::Listener { .. }));
        assert_eq!(*log.lock(), vec!["first"]);
    }
}
