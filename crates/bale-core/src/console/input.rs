//! ArgvInput - 관용적(permissive) 인자 바인딩
//!
//! 알 수 없는 토큰은 실패 대신 위치 인자로 유지합니다. 커맨드별
//! 옵션의 문법 오류가 전역 옵션 추출을 막지 않도록 하기 위함입니다.

use super::definition::Definition;
use std::collections::HashMap;

// ============================================================================
// OptionValue - 바인딩된 옵션 값
// ============================================================================

/// 바인딩된 옵션 값
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// 플래그 (존재 여부)
    Flag(bool),

    /// 값을 받는 옵션
    Value(String),
}

impl OptionValue {
    /// truthy 판정 (run 재작성 시 전달 대상 선별에 사용)
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Flag(set) => *set,
            OptionValue::Value(value) => !value.is_empty(),
        }
    }

    /// 값 문자열 (플래그는 None)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Value(value) => Some(value),
            OptionValue::Flag(_) => None,
        }
    }
}

// ============================================================================
// ArgvInput - 원시 토큰 뷰
// ============================================================================

/// 원시 argv 토큰과 바인딩 결과
#[derive(Debug, Clone, Default)]
pub struct ArgvInput {
    /// 원시 토큰 (바이너리 이름 제외)
    tokens: Vec<String>,

    /// 바인딩된 옵션 (롱 이름 기준)
    options: HashMap<String, OptionValue>,

    /// 위치 인자 + 인식되지 않은 토큰
    arguments: Vec<String>,
}

impl ArgvInput {
    /// 새 입력 생성 (아직 바인딩 전)
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            options: HashMap::new(),
            arguments: Vec::new(),
        }
    }

    /// 바인딩 결과로부터 직접 구성 (재작성된 입력 뷰 변환용)
    pub fn from_parts(
        tokens: Vec<String>,
        options: HashMap<String, OptionValue>,
        arguments: Vec<String>,
    ) -> Self {
        Self {
            tokens,
            options,
            arguments,
        }
    }

    /// 원시 토큰
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// 정의에 대해 관용적으로 바인딩
    ///
    /// 알 수 없는 옵션 토큰은 에러가 아니라 위치 인자로 남습니다.
    pub fn bind(&mut self, definition: &Definition) {
        self.options.clear();
        self.arguments.clear();

        let tokens = self.tokens.clone();
        let mut iter = tokens.into_iter().peekable();
        let mut parse_options = true;

        while let Some(token) = iter.next() {
            if parse_options && token == "--" {
                parse_options = false;
                continue;
            }

            if parse_options && token.starts_with("--") && token.len() > 2 {
                self.parse_long_option(&token, definition, &mut iter);
            } else if parse_options && token.starts_with('-') && token.len() > 1 {
                self.parse_short_option(&token, definition, &mut iter);
            } else {
                self.arguments.push(token);
            }
        }
    }

    fn parse_long_option(
        &mut self,
        token: &str,
        definition: &Definition,
        iter: &mut std::iter::Peekable<std::vec::IntoIter<String>>,
    ) {
        let body = &token[2..];
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (body, None),
        };

        let Some(spec) = definition.option(name) else {
            self.arguments.push(token.to_string());
            return;
        };

        if spec.takes_value {
            let value = inline
                .or_else(|| iter.next())
                .unwrap_or_default();
            self.options.insert(spec.name.clone(), OptionValue::Value(value));
        } else {
            self.options.insert(spec.name.clone(), OptionValue::Flag(true));
        }
    }

    fn parse_short_option(
        &mut self,
        token: &str,
        definition: &Definition,
        iter: &mut std::iter::Peekable<std::vec::IntoIter<String>>,
    ) {
        let body = &token[1..];

        // 전체 바디가 하나의 숏컷과 일치 ("-vv" 같은 다중 문자 숏컷 포함)
        if let Some(spec) = definition.option_by_shortcut(body) {
            if spec.takes_value {
                let value = iter.next().unwrap_or_default();
                self.options.insert(spec.name.clone(), OptionValue::Value(value));
            } else {
                self.options.insert(spec.name.clone(), OptionValue::Flag(true));
            }
            return;
        }

        // 값을 받는 숏컷 뒤에 값이 붙은 형태 ("-C/tmp")
        if body.len() > 1 {
            let head = &body[..1];
            if let Some(spec) = definition.option_by_shortcut(head) {
                if spec.takes_value {
                    self.options
                        .insert(spec.name.clone(), OptionValue::Value(body[1..].to_string()));
                    return;
                }
            }
        }

        // 플래그 숏컷 묶음 ("-qv")
        let chars: Vec<String> = body.chars().map(|c| c.to_string()).collect();
        let all_flags = chars.iter().all(|c| {
            definition
                .option_by_shortcut(c)
                .map_or(false, |spec| !spec.takes_value)
        });
        if all_flags {
            for c in &chars {
                if let Some(spec) = definition.option_by_shortcut(c) {
                    self.options.insert(spec.name.clone(), OptionValue::Flag(true));
                }
            }
            return;
        }

        // 알 수 없는 숏컷은 위치 인자로 유지
        self.arguments.push(token.to_string());
    }

    // ========================================================================
    // 조회 / 변경
    // ========================================================================

    /// 첫 번째 위치 인자 (커맨드 이름 후보)
    pub fn first_argument(&self) -> Option<&str> {
        self.arguments.first().map(|s| s.as_str())
    }

    /// 바인딩된 옵션 조회
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// 바인딩된 모든 옵션
    pub fn options(&self) -> &HashMap<String, OptionValue> {
        &self.options
    }

    /// 옵션 값 설정 (재작성 시 값 이전에 사용)
    pub fn set_option(&mut self, name: impl Into<String>, value: OptionValue) {
        self.options.insert(name.into(), value);
    }

    /// 위치 인자 목록
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}
