//! Blog CLI
//!
//! # Commands
//!
//! - `list` - print the signed-in user's posts
//! - `new` - create a post and print the refreshed list

use blog_client::{BlogApp, ClientConfig, CreateOutcome, DraftField, PostsClient};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Command-line client for the blog service.
#[derive(Parser)]
#[command(name = "blog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Service root URL
    #[arg(global = true, long, env = "BLOG_BASE_URL", default_value = blog_client::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Signed session token
    #[arg(global = true, long, env = "BLOG_SESSION", hide_env_values = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List your posts
    List,

    /// Create a post
    New {
        #[arg(short, long, default_value = "")]
        title: String,

        #[arg(short, long, default_value = "")]
        content: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> blog_client::Result<ExitCode> {
    let config = ClientConfig::new(cli.base_url, cli.session)?;
    let client = PostsClient::connect(config).await?;
    let mut app = BlogApp::new(client);

    match cli.command {
        Commands::List => {
            app.refresh().await?;
            print_list(&app);
            Ok(ExitCode::SUCCESS)
        }
        Commands::New { title, content } => {
            app.open_new_post();
            app.edit(DraftField::Title, title);
            app.edit(DraftField::Content, content);

            match app.submit().await? {
                CreateOutcome::Created(post) => {
                    println!("Created post {}", post.id);
                    print_list(&app);
                    Ok(ExitCode::SUCCESS)
                }
                CreateOutcome::Invalid(errors) => {
                    for (field, messages) in &errors {
                        for message in messages {
                            eprintln!("{field} {message}");
                        }
                    }
                    Ok(ExitCode::FAILURE)
                }
                CreateOutcome::Unauthorized => {
                    eprintln!("Not signed in; set BLOG_SESSION or pass --session");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn print_list(app: &BlogApp) {
    for line in app.list().lines() {
        println!("{line}");
    }
}
