//! IO channel - 출력 채널 및 verbosity
//!
//! 커맨드와 리스너가 공유하는 입출력 핸들입니다. 테스트에서는
//! 메모리 버퍼로 출력을 캡처할 수 있습니다.

use parking_lot::Mutex;

// ============================================================================
// Verbosity - 출력 상세 단계
// ============================================================================

/// 출력 verbosity 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// 출력 억제 (-q)
    Quiet,

    /// 기본
    Normal,

    /// 상세 (-v)
    Verbose,

    /// 매우 상세 (-vv)
    VeryVerbose,

    /// 디버그 (-vvv)
    Debug,
}

impl Verbosity {
    /// 원시 토큰에서 verbosity 결정 (옵션 바인딩 이전에 사용)
    pub fn from_tokens(tokens: &[String]) -> Self {
        let mut verbosity = Verbosity::Normal;

        for token in tokens {
            // "--" 이후는 pass-through 토큰이므로 무시
            if token == "--" {
                break;
            }

            let candidate = match token.as_str() {
                "-q" | "--quiet" => Verbosity::Quiet,
                "-v" | "--verbose" => Verbosity::Verbose,
                "-vv" => Verbosity::VeryVerbose,
                "-vvv" => Verbosity::Debug,
                _ => continue,
            };

            if candidate == Verbosity::Quiet {
                return Verbosity::Quiet;
            }
            if candidate > verbosity {
                verbosity = candidate;
            }
        }

        verbosity
    }
}

// ============================================================================
// Output - 출력 싱크
// ============================================================================

enum Output {
    Stdout,
    Stderr,
    Memory(Mutex<Vec<String>>),
}

impl Output {
    fn write_line(&self, line: &str) {
        match self {
            Output::Stdout => println!("{line}"),
            Output::Stderr => eprintln!("{line}"),
            Output::Memory(lines) => lines.lock().push(line.to_string()),
        }
    }

    fn lines(&self) -> Vec<String> {
        match self {
            Output::Memory(lines) => lines.lock().clone(),
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// Io - 입출력 채널
// ============================================================================

/// 입출력 채널
pub struct Io {
    verbosity: Verbosity,
    output: Output,
    error_output: Output,
}

impl Io {
    /// 표준 출력/에러에 쓰는 채널 생성
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            output: Output::Stdout,
            error_output: Output::Stderr,
        }
    }

    /// 메모리 버퍼에 캡처하는 채널 생성 (테스트용)
    pub fn buffered(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            output: Output::Memory(Mutex::new(Vec::new())),
            error_output: Output::Memory(Mutex::new(Vec::new())),
        }
    }

    /// verbosity 단계
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }

    pub fn is_very_verbose(&self) -> bool {
        self.verbosity >= Verbosity::VeryVerbose
    }

    pub fn is_debug(&self) -> bool {
        self.verbosity >= Verbosity::Debug
    }

    /// 출력 채널에 한 줄 쓰기
    pub fn write_line(&self, line: impl AsRef<str>) {
        if !self.is_quiet() {
            self.output.write_line(line.as_ref());
        }
    }

    /// 에러 채널에 한 줄 쓰기 (quiet에서도 출력)
    pub fn write_error_line(&self, line: impl AsRef<str>) {
        self.error_output.write_line(line.as_ref());
    }

    /// 캡처된 출력 라인 (버퍼 모드에서만 유효)
    pub fn output_lines(&self) -> Vec<String> {
        self.output.lines()
    }

    /// 캡처된 에러 라인 (버퍼 모드에서만 유효)
    pub fn error_lines(&self) -> Vec<String> {
        self.error_output.lines()
    }
}
