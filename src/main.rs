use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use posttracker::app::App;
use posttracker::config::{Config, ConfigError, parse_feed_limit};
use posttracker::reddit::{ApiError, RedditClient};
use posttracker::render::{render_favorites, render_feed};
use posttracker::services::FeedRefresh;
use posttracker::store::FileStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("client setup failed: {0}")]
    Api(#[from] ApiError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "posttracker", about = "Browse top posts by topic and keep favorites")]
struct Cli {
    #[arg(long, env = "POSTTRACKER_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "POSTTRACKER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[arg(long, env = "POSTTRACKER_FEED_LIMIT", value_parser = parse_limit)]
    limit: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show top posts for a topic.
    Search { topic: String },
    /// Show saved favorites with current details.
    Favorites,
    /// Save a post id as a favorite.
    Add { id: String },
    /// Remove a post id from favorites.
    Remove { id: String },
    /// Interactive session.
    Shell,
}

fn parse_limit(raw: &str) -> Result<usize, String> {
    parse_feed_limit(Some(raw)).map_err(|e| e.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let api = Arc::new(RedditClient::new(&config.base_url, &config.user_agent)?);
    let store = Arc::new(FileStore::new(config.data_dir.clone()));
    tracing::info!(base_url = %config.base_url, data_dir = %config.data_dir.display(), "posttracker starting");

    let mut app = App::open(&config, api, store).await;
    let result = run(&mut app, cli.command).await;
    app.shutdown().await;
    result
}

fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = Config::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir.clone_from(data_dir);
    }
    if let Some(limit) = cli.limit {
        config.feed_limit = limit;
    }
    Ok(config)
}

async fn run(app: &mut App, command: Command) -> Result<(), CliError> {
    match command {
        Command::Search { topic } => {
            search(app, &topic).await;
            Ok(())
        }
        Command::Favorites => {
            print!("{}", render_favorites(app.favorites().items()));
            Ok(())
        }
        Command::Add { id } => {
            if !app.add_favorite(&id).await {
                eprintln!("{id} is already a favorite");
            }
            print!("{}", render_favorites(app.favorites().items()));
            Ok(())
        }
        Command::Remove { id } => {
            if !app.remove_favorite(&id).await {
                eprintln!("{id} is not a favorite");
            }
            print!("{}", render_favorites(app.favorites().items()));
            Ok(())
        }
        Command::Shell => run_shell(app).await,
    }
}

async fn search(app: &mut App, topic: &str) {
    match app.search(topic).await {
        FeedRefresh::Skipped => eprintln!("enter a topic to search"),
        FeedRefresh::Applied { items, .. } => {
            if !items {
                eprintln!("could not load r/{}; showing previous results", topic.trim());
            }
            let favorites = app.favorites();
            print!("{}", render_feed(app.feed(), |id| favorites.contains(id)));
        }
    }
}

// =============================================================================
// SHELL
// =============================================================================

const SHELL_HELP: &str = "\
commands:
  search <topic>   show top posts for a topic
  fav <rank>       favorite the post at that rank
  unfav <id>       remove a favorite by id
  favs             show favorites
  help             show this help
  quit             exit";

async fn run_shell(app: &mut App) -> Result<(), CliError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{SHELL_HELP}");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let (command, arg) = match line.trim().split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line.trim(), ""),
        };

        match command {
            "" => {}
            "search" => search(app, arg).await,
            "fav" => match arg.parse::<usize>() {
                Ok(rank) => match app.favorite_rank(rank).await {
                    Ok((item, true)) => println!("added {}", item.id),
                    Ok((item, false)) => println!("{} is already a favorite", item.id),
                    Err(e) => eprintln!("{e}"),
                },
                Err(_) => eprintln!("usage: fav <rank>"),
            },
            "unfav" if !arg.is_empty() => {
                if app.remove_favorite(arg).await {
                    println!("removed {arg}");
                } else {
                    println!("{arg} is not a favorite");
                }
            }
            "unfav" => eprintln!("usage: unfav <id>"),
            "favs" => print!("{}", render_favorites(app.favorites().items())),
            "help" => println!("{SHELL_HELP}"),
            "quit" | "exit" => break,
            other => eprintln!("unknown command '{other}'; try 'help'"),
        }
    }
    Ok(())
}
