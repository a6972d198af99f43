//! # bale-foundation
//!
//! Foundation layer for Bale:
//! - Error: 중앙 에러 타입 (`Error`, `Result`)
//! - Paths: 경로 검증 (`ensure_path`) 및 작업 디렉토리 스코핑 (`ScopedDirectory`)

pub mod error;
pub mod paths;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Paths
// ============================================================================
pub use paths::{ensure_path, ScopedDirectory};
