//! Run input rewrite - pass-through 커맨드용 2-pass 재파싱
//!
//! `run` 커맨드 뒤의 토큰은 자식 프로세스로 그대로 전달되어야
//! 합니다. 1차 바인딩에서 실제로 주어진 전역 옵션만 인식 파라미터로
//! 주입한 새 입력 뷰를 만들고, 커맨드 이름 이후의 토큰은 옵션처럼
//! 보여도 파싱하지 않습니다.

use super::definition::Definition;
use super::input::{ArgvInput, OptionValue};
use std::collections::{HashMap, HashSet};
use tracing::debug;

// ============================================================================
// RunArgvInput - pass-through 입력 뷰
// ============================================================================

/// pass-through 커맨드용 재작성 입력 뷰
///
/// 인식 파라미터 allowlist에 있는 옵션 토큰만 파싱하고, 첫 위치
/// 인자(커맨드 이름) 이후는 전부 원시 인자로 유지합니다.
#[derive(Debug, Clone)]
pub struct RunArgvInput {
    /// 선행 애플리케이션 이름 + 원본 토큰
    tokens: Vec<String>,

    /// 인식 파라미터 allowlist ("--no-cache", "-C" 형태)
    parameter_options: HashSet<String>,

    /// 바인딩된 옵션
    options: HashMap<String, OptionValue>,

    /// 위치 인자 (첫 항목이 커맨드 이름, 나머지가 pass-through)
    arguments: Vec<String>,
}

impl RunArgvInput {
    /// 새 입력 뷰 생성. `tokens`의 첫 항목은 애플리케이션 이름입니다.
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            parameter_options: HashSet::new(),
            options: HashMap::new(),
            arguments: Vec::new(),
        }
    }

    /// 인식 파라미터 추가 (소비하지 않고 allowlist에만 등록)
    pub fn add_parameter_option(&mut self, token: impl Into<String>) {
        self.parameter_options.insert(token.into());
    }

    /// 인식 파라미터 여부
    pub fn has_parameter_option(&self, token: &str) -> bool {
        self.parameter_options.contains(token)
    }

    /// 관용적 바인딩: allowlist의 옵션만 파싱
    pub fn bind(&mut self, definition: &Definition) {
        self.options.clear();
        self.arguments.clear();

        // 첫 토큰(애플리케이션 이름)은 건너뜀
        let tokens: Vec<String> = self.tokens.iter().skip(1).cloned().collect();
        let mut iter = tokens.into_iter().peekable();
        let mut parse_options = true;

        while let Some(token) = iter.next() {
            if parse_options && token.starts_with('-') && token.len() > 1 {
                if self.parameter_options.contains(token.as_str()) {
                    self.parse_recognized(&token, definition, &mut iter);
                    continue;
                }
                self.arguments.push(token);
                continue;
            }

            // 첫 위치 인자(커맨드 이름) 이후는 전부 원시 인자
            self.arguments.push(token);
            if parse_options {
                parse_options = false;
            }
        }
    }

    fn parse_recognized(
        &mut self,
        token: &str,
        definition: &Definition,
        iter: &mut std::iter::Peekable<std::vec::IntoIter<String>>,
    ) {
        let spec = if let Some(body) = token.strip_prefix("--") {
            definition.option(body)
        } else {
            definition.option_by_shortcut(&token[1..])
        };

        let Some(spec) = spec else {
            // allowlist에는 있으나 정의에 없는 토큰은 원시 인자로 유지
            self.arguments.push(token.to_string());
            return;
        };

        if spec.takes_value {
            let value = iter.next().unwrap_or_default();
            self.options.insert(spec.name.clone(), OptionValue::Value(value));
        } else {
            self.options.insert(spec.name.clone(), OptionValue::Flag(true));
        }
    }

    // ========================================================================
    // 조회 / 변환
    // ========================================================================

    /// 옵션 값 명시적 설정 (바인딩만으로는 1차 값이 이전되지 않음)
    pub fn set_option(&mut self, name: impl Into<String>, value: OptionValue) {
        self.options.insert(name.into(), value);
    }

    /// 바인딩된 옵션 조회
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// 첫 번째 위치 인자 (커맨드 이름)
    pub fn first_argument(&self) -> Option<&str> {
        self.arguments.first().map(|s| s.as_str())
    }

    /// 위치 인자 목록
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// 커맨드에 바인딩할 수 있는 일반 입력으로 변환
    pub fn into_argv(self) -> ArgvInput {
        ArgvInput::from_parts(self.tokens, self.options, self.arguments)
    }
}

// ============================================================================
// rewrite_run_input - 재작성 알고리즘
// ============================================================================

/// 1차 바인딩된 원본 입력으로부터 pass-through 입력 뷰를 구성
///
/// 1차에서 truthy로 주어진 전역 옵션의 롱 폼과 모든 개별 숏컷을
/// allowlist에 주입한 뒤 재바인딩하고, 추출된 값을 명시적으로
/// 다시 설정합니다.
pub fn rewrite_run_input(
    application_name: &str,
    input: &ArgvInput,
    definition: &Definition,
) -> RunArgvInput {
    let mut tokens = Vec::with_capacity(input.tokens().len() + 1);
    tokens.push(application_name.to_string());
    tokens.extend(input.tokens().iter().cloned());

    let mut run_input = RunArgvInput::new(tokens);

    for (name, value) in input.options() {
        if !value.is_truthy() {
            continue;
        }
        let Some(spec) = definition.option(name) else {
            continue;
        };

        run_input.add_parameter_option(format!("--{}", spec.name));
        for shortcut in spec.shortcuts() {
            run_input.add_parameter_option(format!("-{shortcut}"));
        }
    }

    run_input.bind(definition);

    for (name, value) in input.options() {
        if value.is_truthy() {
            run_input.set_option(name.clone(), value.clone());
        }
    }

    debug!(
        "Rewrote run input: {} pass-through token(s)",
        run_input.arguments().len().saturating_sub(1)
    );

    run_input
}
