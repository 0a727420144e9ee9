//! Skyvane: current weather by city name, from the terminal.

use std::io::Stdout;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use skyvane_core::Config;
use skyvane_ui::{JsonFileStore, TerminalRenderer, WeatherApp};
use skyvane_weather::WeatherClient;

type TerminalApp = WeatherApp<TerminalRenderer<Stdout>, JsonFileStore>;

/// Current weather lookups with a short-lived cache and saved favorites
#[derive(Parser)]
#[command(name = "skyvane", version, about)]
struct Cli {
    /// Path to config.toml (default: platform config dir)
    #[arg(long, global = true, env = "SKYVANE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show current weather for a city
    Search {
        /// City name; multiple words are joined with spaces
        #[arg(required = true)]
        city: Vec<String>,

        /// Also show temperatures converted to the other unit
        #[arg(long)]
        convert: bool,
    },
    /// Manage favorite cities
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },
    /// Interactive session (default)
    Shell,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites
    List,
    /// Add a city
    Add {
        #[arg(required = true)]
        city: Vec<String>,
    },
    /// Remove a city
    Remove {
        #[arg(required = true)]
        city: Vec<String>,
    },
    /// Show weather for a city and keep it in favorites
    View {
        #[arg(required = true)]
        city: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("skyvane: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    skyvane_core::init_with_default_filter("warn")?;

    let (config, _warnings) = Config::load_validated(cli.config.as_deref())?;
    let client = WeatherClient::new(config.weather.clone())
        .context("Failed to create weather client")?;
    let store = JsonFileStore::new(config.favorites_path());

    let one_shot = !matches!(cli.command, None | Some(Command::Shell));
    let mut renderer = TerminalRenderer::new(std::io::stdout());
    if one_shot {
        renderer = renderer.quiet();
    }

    let mut app = WeatherApp::new(client, renderer, store);

    let ok = match cli.command.unwrap_or(Command::Shell) {
        Command::Search { city, convert } => {
            let ok = app.search(&city.join(" ")).await.is_ok();
            if ok && convert {
                app.toggle_unit().await.is_ok()
            } else {
                ok
            }
        }
        Command::Favorites { action } => match action.unwrap_or(FavoritesAction::List) {
            // Favorites were already rendered on startup
            FavoritesAction::List => true,
            FavoritesAction::Add { city } => report(app.add_favorite(&city.join(" "))),
            FavoritesAction::Remove { city } => report(app.remove_favorite(&city.join(" "))),
            FavoritesAction::View { city } => app.view_favorite(&city.join(" ")).await.is_ok(),
        },
        Command::Shell => {
            shell(&mut app).await?;
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn report(result: Result<bool, skyvane_core::AppError>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            eprintln!("{}", e.user_message());
            false
        }
    }
}

const HELP: &str = "\
Commands:
  <city>                 look up a city
  search <city>          same as above
  toggle                 switch between °C and °F
  fav                    list favorites
  fav add <city>         add a favorite
  fav remove <city>      remove a favorite
  fav view <city>        look up a favorite and keep it saved
  clear-cache            forget cached lookups
  help                   show this message
  quit                   leave";

async fn shell(app: &mut TerminalApp) -> Result<()> {
    println!("Skyvane - type a city name, or 'help'.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        // Errors are already rendered; keep the session going
        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "toggle" => {
                let _ = app.toggle_unit().await;
            }
            "clear-cache" => {
                app.clear_cache();
                println!("Cache cleared.");
            }
            "search" => {
                let _ = app.search(rest).await;
            }
            "fav" | "favorites" => {
                let (action, city) = match rest.split_once(char::is_whitespace) {
                    Some((a, c)) => (a, c.trim()),
                    None => (rest, ""),
                };
                match action {
                    "" | "list" => app.display_favorites(),
                    "add" if !city.is_empty() => {
                        report(app.add_favorite(city));
                    }
                    "remove" if !city.is_empty() => {
                        report(app.remove_favorite(city));
                    }
                    "view" if !city.is_empty() => {
                        let _ = app.view_favorite(city).await;
                    }
                    _ => println!("Usage: fav [list | add <city> | remove <city> | view <city>]"),
                }
            }
            _ => {
                let _ = app.search(line).await;
            }
        }
    }

    tracing::debug!("Shell session ended");
    Ok(())
}
