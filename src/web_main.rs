//! Web 服务器主程序入口

use confluence_translator::confluence::ConfluenceConfig;
use confluence_translator::translation::TranslationConfig;
use confluence_translator::web::{AppState, WebConfig, WebServer};
use tracing::warn;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 读取 .env（存在时）再初始化日志
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // 解析命令行参数
    let args: Vec<String> = std::env::args().collect();

    let mut web_config = WebConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    web_config.bind_addr = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --bind requires an address");
                    std::process::exit(1);
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    web_config.port = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: Invalid port number");
                        std::process::exit(1);
                    });
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a port number");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Error: Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 两份配置都允许缺失：接口层负责降级
    let confluence = match ConfluenceConfig::from_env() {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Confluence 配置不完整，页面接口将不可用: {}", e);
            None
        }
    };
    let translation = match TranslationConfig::from_env() {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("翻译后端配置不完整，接口将返回原文: {}", e);
            None
        }
    };

    let state = AppState {
        confluence,
        translation,
    };
    let server = WebServer::new(web_config, state);
    server.start().await
}

fn print_help() {
    println!("Confluence Translator Web Server");
    println!();
    println!("USAGE:");
    println!("    confluence-translator-web [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -b, --bind <ADDRESS>     Bind address [default: 127.0.0.1]");
    println!("    -p, --port <PORT>        Port number [default: 7080]");
    println!("    -h, --help               Print help information");
    println!();
    println!("ENVIRONMENT:");
    println!("    CONFLUENCE_BASE_URL, CONFLUENCE_USERNAME, CONFLUENCE_API_TOKEN");
    println!("    TRANSLATOR_API_BASE, TRANSLATOR_API_KEY, TRANSLATOR_DEPLOYMENT,");
    println!("    TRANSLATOR_API_VERSION");
}
