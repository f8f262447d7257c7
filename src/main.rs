use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use ujamaa_gateway::application::sms::SmsService;
use ujamaa_gateway::application::ussd::{UssdRequest, UssdService};
use ujamaa_gateway::domain::entities::InboundMessage;
use ujamaa_gateway::domain::traits::{Gateway, Store};
use ujamaa_gateway::infrastructure::config::Config;
use ujamaa_gateway::infrastructure::database::SqliteStore;
use ujamaa_gateway::infrastructure::gateway::{AfricasTalkingGateway, ConsoleGateway};
use ujamaa_gateway::infrastructure::http::{self, AppState};
use ujamaa_gateway::infrastructure::llm::build_llm;
use ujamaa_gateway::infrastructure::session::SessionStore;

const CONSOLE_PHONE: &str = "+254700000000";

#[derive(Parser)]
#[command(name = "ujamaa-gateway")]
#[command(about = "USSD, SMS and voice gateway for Ujamaa Health", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Interactive SMS/USSD session on stdin
    Console,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => run(serve(load_config(&cli.config))),
        Commands::Console => run(console(load_config(&cli.config))),
        Commands::Version => {
            println!("ujamaa-gateway v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => init_config(),
    }
}

fn run<F>(task: F)
where
    F: std::future::Future<Output = Result<(), Box<dyn std::error::Error>>>,
{
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(task) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(path: &str) -> Config {
    match Config::resolve(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    }
}

fn open_store(config: &Config) -> Result<Arc<dyn Store>, Box<dyn std::error::Error>> {
    if config.database.is_memory() {
        return Ok(Arc::new(SqliteStore::in_memory()?));
    }
    if let Some(parent) = config.database.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let store = SqliteStore::open(&config.database.path)?;
    tracing::info!("Database initialized at {}", config.database.path.display());
    Ok(Arc::new(store))
}

fn build_gateway(config: &Config) -> Arc<dyn Gateway> {
    if config.gateway.api_key.is_empty() {
        tracing::warn!("AT_API_KEY not set, outbound SMS will be printed to the log");
        Arc::new(ConsoleGateway::new())
    } else {
        Arc::new(AfricasTalkingGateway::new(config.gateway.clone()))
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(&config)?;
    let gateway = build_gateway(&config);
    let llm = build_llm(&config.llm);
    let state = AppState::new(&config, store, gateway.clone(), llm);

    let cleanup = state.clone();
    let interval = config.session.cleanup_interval();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let removed = cleanup.cleanup();
            if removed > 0 {
                tracing::debug!("Expired {} session(s)", removed);
            }
        }
    });

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "ujamaa-gateway v{} listening on {} (sms via {})",
        state.version,
        addr,
        gateway.name()
    );

    axum::serve(listener, http::router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;
    Ok(())
}

async fn console(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(&config)?;
    let gateway: Arc<dyn Gateway> = Arc::new(ConsoleGateway::new());
    let sms = SmsService::new(store.clone(), gateway.clone());
    let ussd = UssdService::new(SessionStore::new(config.session.ttl()), store, gateway);

    println!("Ujamaa console. Type an SMS command, `/ussd <trail>` to dial the menu, `/quit` to exit.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = uuid::Uuid::new_v4().to_string();

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/quit" {
            break;
        }

        if let Some(trail) = input.strip_prefix("/ussd") {
            let request = UssdRequest {
                session_id: session.clone(),
                service_code: "*384#".to_string(),
                phone_number: CONSOLE_PHONE.to_string(),
                text: trail.trim().to_string(),
            };
            match ussd.respond(&request).await {
                Ok(reply) => {
                    println!("{}", reply.screen);
                    if let Some(follow_up) = reply.follow_up {
                        let _ = follow_up.await;
                    }
                    if reply.screen.is_end() {
                        session = uuid::Uuid::new_v4().to_string();
                    }
                }
                Err(e) => println!("Error: {}", e),
            }
            continue;
        }

        match sms.handle(&InboundMessage::sms(CONSOLE_PHONE, input)).await {
            Ok(reply) => println!("{}", reply),
            Err(e) => println!("Error: {}", e),
        }
    }
    Ok(())
}

fn init_config() {
    match Config::default().to_yaml() {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => tracing::error!("Failed to render config: {}", e),
    }
}
