use clap::Parser;
use heart_screen::adapters::http;
use heart_screen::utils::error::{ErrorSeverity, ScreenError};
use heart_screen::utils::{logger, validation::Validate};
use heart_screen::{load_engine, CliConfig};

fn exit_code(e: &ScreenError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: ScreenError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(exit_code(&e));
        }
    };

    // 初始化日誌
    logger::init_logger(&config.logging.format, cli.verbose, &config.logging.level);
    tracing::info!("🚀 Starting {}", config.service.name);
    if cli.verbose {
        tracing::debug!("Service config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(e);
    }
    let addr = config.bind_address().unwrap_or_else(|e| fail(e));

    // 模型必須在接受請求前全部載入完成
    let engine = load_engine(&config).await.unwrap_or_else(|e| fail(e));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| fail(e.into()));
    tracing::info!("🩺 Listening on http://{}", listener.local_addr()?);

    if let Err(e) = http::serve(listener, engine).await {
        fail(e);
    }
    Ok(())
}
