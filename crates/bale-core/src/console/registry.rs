//! Registry - 커맨드 팩토리 테이블 및 해석
//!
//! 이름 → 팩토리 매핑을 유지하고, 첫 해석 시 커맨드를 생성해
//! 메모이즈합니다. 두 단어 네임스페이스 이름("cache clear")을
//! 우선 해석하고, 실패 시 오타 제안을 붙여 에러를 만듭니다.

use crate::console::commands::Command;
use bale_foundation::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// 커맨드 팩토리
pub type CommandFactory = Arc<dyn Fn() -> Command + Send + Sync>;

struct RegistryEntry {
    factory: CommandFactory,
    resolved: Option<Arc<Command>>,
}

/// 커맨드 레지스트리
pub struct CommandRegistry {
    entries: RwLock<HashMap<String, RegistryEntry>>,
    strict: bool,
}

impl CommandRegistry {
    /// 중복 등록을 덮어쓰기로 처리하는 레지스트리
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            strict: false,
        }
    }

    /// 중복 등록을 에러로 처리하는 레지스트리
    pub fn strict() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            strict: true,
        }
    }

    // ========================================================================
    // 등록
    // ========================================================================

    /// 팩토리 등록
    ///
    /// 같은 이름이 이미 있으면 기본 모드에서는 경고 후 덮어쓰고
    /// 메모이즈된 인스턴스를 폐기합니다. strict 모드에서는
    /// [`Error::DuplicateCommand`]를 반환합니다.
    pub async fn register(&self, name: impl Into<String>, factory: CommandFactory) -> Result<()> {
        let name = name.into();
        let mut entries = self.entries.write().await;

        if entries.contains_key(&name) {
            if self.strict {
                return Err(Error::DuplicateCommand(name));
            }
            warn!("Command {} is already registered, replacing", name);
        }

        entries.insert(
            name,
            RegistryEntry {
                factory,
                resolved: None,
            },
        );
        Ok(())
    }

    /// 등록 여부
    pub async fn contains(&self, name: &str) -> bool {
        self.entries.read().await.contains_key(name)
    }

    /// 등록된 이름 목록 (정렬)
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    // ========================================================================
    // 해석
    // ========================================================================

    /// 이름으로 커맨드 해석 (첫 호출에서 생성, 이후 메모이즈)
    pub async fn resolve(&self, name: &str) -> Result<Arc<Command>> {
        let mut entries = self.entries.write().await;
        let entry = match entries.get_mut(name) {
            Some(entry) => entry,
            None => {
                let suggestions = suggest(name, entries.keys());
                return Err(Error::command_not_found(name, suggestions));
            }
        };

        if let Some(command) = &entry.resolved {
            return Ok(Arc::clone(command));
        }

        debug!("Instantiating command {}", name);
        let command = Arc::new((entry.factory)());
        entry.resolved = Some(Arc::clone(&command));
        Ok(command)
    }

    /// 위치 인자에서 커맨드 해석
    ///
    /// 두 단어 조합을 먼저 시도하고, 실패하면 첫 인자 단독으로
    /// 시도합니다. 둘 다 실패하면 네임스페이스 접두사가 있는 경우
    /// 두 단어 이름을 기준으로 not-found 에러를 만듭니다.
    pub async fn resolve_from_arguments(&self, arguments: &[String]) -> Result<Arc<Command>> {
        let first = match arguments.first() {
            Some(first) => first.clone(),
            None => {
                return Err(Error::InvalidInput("no command name given".into()));
            }
        };

        if let Some(second) = arguments.get(1) {
            let compound = format!("{first} {second}");
            if self.contains(&compound).await {
                return self.resolve(&compound).await;
            }
        }

        if self.contains(&first).await {
            return self.resolve(&first).await;
        }

        // "cache clar"처럼 네임스페이스는 맞고 하위 이름만 틀린 경우,
        // 두 단어 이름으로 제안을 생성
        let entries = self.entries.read().await;
        let namespace_prefix = format!("{first} ");
        let lookup = match arguments.get(1) {
            Some(second) if entries.keys().any(|k| k.starts_with(&namespace_prefix)) => {
                format!("{first} {second}")
            }
            _ => first,
        };

        let suggestions = suggest(&lookup, entries.keys());
        Err(Error::command_not_found(lookup, suggestions))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// 오타 제안
// ============================================================================

fn suggest<'a>(name: &str, candidates: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut suggestions: Vec<String> = candidates
        .filter(|candidate| {
            candidate.starts_with(name) || levenshtein(name, candidate) <= 2
        })
        .cloned()
        .collect();
    suggestions.sort();
    suggestions
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::commands::{AboutCommand, CacheClearCommand, CacheListCommand, Command};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn about_factory(counter: Arc<AtomicUsize>) -> CommandFactory {
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Command::new(Arc::new(AboutCommand))
        })
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_resolve_is_memoized() {
        let registry = CommandRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        registry
            .register("about", about_factory(Arc::clone(&counter)))
            .await
            .unwrap();

        let first = registry.resolve("about").await.unwrap();
        let second = registry.resolve("about").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_not_found_with_suggestions() {
        let registry = CommandRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        registry
            .register("about", about_factory(counter))
            .await
            .unwrap();

        let err = registry.resolve("abuot").await.unwrap_err();
        match err {
            Error::CommandNotFound { name, suggestions } => {
                assert_eq!(name, "abuot");
                assert_eq!(suggestions, vec!["about"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_strict_rejects_duplicates() {
        let registry = CommandRegistry::strict();
        let counter = Arc::new(AtomicUsize::new(0));
        registry
            .register("about", about_factory(Arc::clone(&counter)))
            .await
            .unwrap();

        let err = registry
            .register("about", about_factory(counter))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateCommand(_)));
    }

    #[tokio::test]
    async fn test_overwrite_discards_memoized_instance() {
        let registry = CommandRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        registry
            .register("about", about_factory(Arc::clone(&counter)))
            .await
            .unwrap();
        let first = registry.resolve("about").await.unwrap();

        registry
            .register("about", about_factory(Arc::clone(&counter)))
            .await
            .unwrap();
        let second = registry.resolve("about").await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_namespace_resolution() {
        let registry = CommandRegistry::new();
        registry
            .register("cache clear", Arc::new(|| Command::new(Arc::new(CacheClearCommand))))
            .await
            .unwrap();
        registry
            .register("cache list", Arc::new(|| Command::new(Arc::new(CacheListCommand))))
            .await
            .unwrap();

        let command = registry
            .resolve_from_arguments(&args(&["cache", "clear", "extra"]))
            .await
            .unwrap();
        assert_eq!(command.name(), "cache clear");

        // 네임스페이스는 맞고 하위 이름만 틀리면 두 단어 이름으로 보고
        let err = registry
            .resolve_from_arguments(&args(&["cache", "clar"]))
            .await
            .unwrap_err();
        match err {
            Error::CommandNotFound { name, suggestions } => {
                assert_eq!(name, "cache clar");
                assert!(suggestions.contains(&"cache clear".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
