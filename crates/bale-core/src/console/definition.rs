//! Option Definition - 애플리케이션 레벨 옵션 문법
//!
//! 외부 파서 문법 전체를 다루지 않고, 디스패치에 필요한 전역
//! 옵션만을 기술합니다.

// ============================================================================
// OptionSpec - 옵션 정의
// ============================================================================

/// 전역 옵션 하나의 정의
#[derive(Debug, Clone)]
pub struct OptionSpec {
    /// 롱 이름 (대시 없이, 예: "no-cache")
    pub name: String,

    /// 숏컷 문자열 (예: "P", "v|vv|vvv"). 구분자 '|'로 복수 선언 가능
    pub shortcut: Option<String>,

    /// 값을 받는 옵션인지 여부
    pub takes_value: bool,

    /// 설명
    pub description: String,
}

impl OptionSpec {
    /// 플래그 옵션 생성
    pub fn flag(name: impl Into<String>, shortcut: Option<&str>) -> Self {
        Self {
            name: name.into(),
            shortcut: shortcut.map(|s| s.to_string()),
            takes_value: false,
            description: String::new(),
        }
    }

    /// 값을 받는 옵션 생성
    pub fn value(name: impl Into<String>, shortcut: Option<&str>) -> Self {
        Self {
            name: name.into(),
            shortcut: shortcut.map(|s| s.to_string()),
            takes_value: true,
            description: String::new(),
        }
    }

    /// 빌더 패턴: 설명 설정
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 숏컷 문자열을 개별 숏컷으로 분리
    ///
    /// 내장 구분자가 섞인 문자열("x|-y")도 독립 숏컷으로 분리됩니다.
    pub fn shortcuts(&self) -> Vec<String> {
        let Some(shortcut) = &self.shortcut else {
            return Vec::new();
        };

        shortcut
            .trim_start_matches('-')
            .split('|')
            .map(|s| s.trim_start_matches('-'))
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect()
    }

    /// 주어진 숏컷과 일치하는지 확인
    pub fn has_shortcut(&self, candidate: &str) -> bool {
        self.shortcuts().iter().any(|s| s == candidate)
    }
}

// ============================================================================
// Definition - 옵션 정의 모음
// ============================================================================

/// 애플리케이션 레벨 옵션 정의 모음
#[derive(Debug, Clone, Default)]
pub struct Definition {
    options: Vec<OptionSpec>,
}

impl Definition {
    /// 빈 정의 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 옵션 추가 (같은 이름은 교체)
    pub fn add_option(&mut self, option: OptionSpec) {
        self.options.retain(|o| o.name != option.name);
        self.options.push(option);
    }

    /// 롱 이름으로 옵션 조회
    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    /// 숏컷으로 옵션 조회
    pub fn option_by_shortcut(&self, shortcut: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.has_shortcut(shortcut))
    }

    /// 모든 옵션
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// 애플리케이션 기본 정의
    pub fn application_default() -> Self {
        let mut definition = Self::new();

        definition.add_option(
            OptionSpec::flag("no-plugins", None).with_description("Disables plugins."),
        );
        definition.add_option(
            OptionSpec::flag("no-cache", None).with_description("Disables Bale source caches."),
        );
        definition.add_option(
            OptionSpec::value("project", Some("P")).with_description(
                "Specify another path as the project root. \
                 Resolved relative to the current working directory.",
            ),
        );
        definition.add_option(
            OptionSpec::value("directory", Some("C")).with_description(
                "The working directory for the Bale command \
                 (defaults to the current working directory).",
            ),
        );
        definition.add_option(
            OptionSpec::flag("quiet", Some("q")).with_description("Do not output any message."),
        );
        definition.add_option(
            OptionSpec::flag("verbose", Some("v|vv|vvv"))
                .with_description("Increase the verbosity of messages."),
        );

        definition
    }
}
