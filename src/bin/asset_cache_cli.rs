//! asset-cache-cli — 配置校验、URL 分类与缓存预热的命令行工具
//!
//! Usage:
//!   asset-cache-cli validate <config.yaml>            Validate a runtime config
//!   asset-cache-cli classify <config.yaml> <url>...   Print the class of each URL
//!   asset-cache-cli warm <config.yaml>                Run install + activate against the network
//!   asset-cache-cli version                           Show version information

use asset_cache_rust::{CacheRuntimeBuilder, Classifier, RuntimeConfig};
use url::Url;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "validate" => cmd_validate(&args[2..]),
        "classify" => cmd_classify(&args[2..]),
        "warm" => cmd_warm(&args[2..]).await,
        "version" | "--version" | "-V" => cmd_version(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"asset-cache-cli — offline-first asset cache tool

USAGE:
    asset-cache-cli <COMMAND> [ARGS]

COMMANDS:
    validate <config.yaml>            Parse and validate a runtime config
    classify <config.yaml> <url>...   Print the request class of each URL
    warm <config.yaml>                Install the precache manifest, then activate
    version                           Show version information
    help                              Show this help message

ENVIRONMENT:
    ASSET_HTTP_TIMEOUT_SECS           Per-request network timeout (default 30)
    ASSET_PROXY_URL                   Route all fetches through a proxy
    RUST_LOG                          Log filter, e.g. RUST_LOG=asset_cache_rust=debug
"#
    );
}

fn load_config(path: &str) -> RuntimeConfig {
    match RuntimeConfig::from_yaml_file(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_validate(args: &[String]) {
    let Some(path) = args.first() else {
        eprintln!("validate: missing <config.yaml>");
        std::process::exit(1);
    };
    let config = load_config(path);
    println!("OK: version {}", config.version);
    println!("  static container: {}", config.static_container());
    println!("  model container:  {}", config.model_container);
    println!("  manifest entries: {}", config.precache_manifest.len());
}

fn cmd_classify(args: &[String]) {
    let Some(path) = args.first() else {
        eprintln!("classify: missing <config.yaml>");
        std::process::exit(1);
    };
    let config = load_config(path);
    let classifier = match Classifier::from_rules(&config.classifier) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid classifier rules: {e}");
            std::process::exit(1);
        }
    };
    for raw in &args[1..] {
        match Url::parse(raw) {
            Ok(url) => println!("{raw} => {:?}", classifier.classify(&url)),
            Err(e) => println!("{raw} => invalid URL ({e})"),
        }
    }
}

async fn cmd_warm(args: &[String]) {
    let Some(path) = args.first() else {
        eprintln!("warm: missing <config.yaml>");
        std::process::exit(1);
    };
    let config = load_config(path);
    let runtime = match CacheRuntimeBuilder::new().with_config(config).build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to build runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.install().await {
        eprintln!("Install failed: {e}");
        std::process::exit(1);
    }
    if let Err(e) = runtime.activate().await {
        eprintln!("Activate failed: {e}");
        std::process::exit(1);
    }
    println!(
        "Warmed {} static assets into {}",
        runtime.config().precache_manifest.len(),
        runtime.config().static_container()
    );
}

fn cmd_version() {
    println!("asset-cache-cli {}", env!("CARGO_PKG_VERSION"));
}
