use clap::{Parser, Subcommand};

mod commands;
mod render;

#[derive(Parser)]
#[command(
    name = "fhttp",
    about = "fhttp — build and inspect immutable HTTP message values",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a request from the config template and print it as JSON
    Request {
        /// Request method
        #[arg(short, long, default_value = "GET")]
        method: String,
        /// Request target
        #[arg(short, long)]
        uri: String,
        /// Path to an fhttp.toml template
        #[arg(short, long)]
        config: Option<String>,
        /// Payload text
        #[arg(short, long)]
        body: Option<String>,
        /// Referer URI
        #[arg(long)]
        referer: Option<String>,
        /// Reset a field to absent or empty (repeatable)
        #[arg(long = "clear", value_name = "FIELD")]
        clear: Vec<String>,
    },
    /// Build a response from the config template and print it as JSON
    Response {
        /// Status code
        #[arg(short, long, default_value_t = 200)]
        status: u16,
        /// Path to an fhttp.toml template
        #[arg(short, long)]
        config: Option<String>,
        /// Payload text
        #[arg(short, long)]
        body: Option<String>,
        /// Location URI
        #[arg(short, long)]
        location: Option<String>,
        /// Reset a field to absent or empty (repeatable)
        #[arg(long = "clear", value_name = "FIELD")]
        clear: Vec<String>,
    },
    /// Write a scaffold fhttp.toml
    Init {
        #[arg(short, long, default_value = "fhttp.toml")]
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fhttp=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Request { method, uri, config, body, referer, clear } => {
            commands::message::request(commands::message::RequestArgs {
                method: &method,
                uri: &uri,
                config: config.as_deref(),
                body,
                referer: referer.as_deref(),
                clear: &clear,
            })
        }
        Commands::Response { status, config, body, location, clear } => {
            commands::message::response(commands::message::ResponseArgs {
                status,
                config: config.as_deref(),
                body,
                location: location.as_deref(),
                clear: &clear,
            })
        }
        Commands::Init { path } => commands::init::init(&path),
    }
}
