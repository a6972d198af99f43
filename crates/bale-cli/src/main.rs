//! Bale CLI - Main entry point

use bale_core::{Application, Io, Verbosity};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let tokens: Vec<String> = std::env::args().skip(1).collect();

    // verbosity는 옵션 바인딩 이전에 원시 토큰에서 결정
    let io = Arc::new(Io::new(Verbosity::from_tokens(&tokens)));

    let app = Application::new().await;
    let code = app.run(tokens, io).await;

    std::process::exit(code);
}
