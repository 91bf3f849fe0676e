use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use daily365::calendar::{countries, CalendarClient};
use daily365::config::AppConfig;
use daily365::providers::GoogleGenAiProvider;
use daily365::render;
use daily365::types::WishStyle;
use daily365::views::{CalendarMode, GlobalCalendarView, LoadState};

/// Holidays, name days and name day wishes from around the world
#[derive(Parser, Debug)]
#[command(name = "daily365")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Holidays, name days and observances for one day
    Daily {
        /// Country (see `countries`); defaults to calendar.default_country
        #[arg(short = 'C', long)]
        country: Option<String>,
        /// Date as YYYY-MM-DD; defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Every name day of the year, grouped by month
    Browse {
        #[arg(short = 'C', long)]
        country: Option<String>,
    },
    /// Generate a name day wish
    Wish {
        /// Name being celebrated
        #[arg(short, long)]
        name: String,
        /// Country whose language and customs the wish follows
        #[arg(short = 'C', long)]
        country: Option<String>,
        /// heartfelt, funny, formal or poetic
        #[arg(short, long, default_value = "heartfelt")]
        style: WishStyle,
    },
    /// List supported countries
    Countries,
}

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays parseable with --json.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = AppConfig::load_or_default(&args.config)?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(config, args))
}

fn calendar_view(config: &AppConfig) -> anyhow::Result<GlobalCalendarView> {
    let api_key = config.provider.resolve_api_key()?;
    let provider = GoogleGenAiProvider::new(
        &api_key,
        Some(config.provider.base_url.as_str()),
        config.provider.timeout(),
    )?;
    let client = CalendarClient::new(
        Arc::new(provider),
        config.provider.model.clone(),
        config.provider.timeout(),
    );
    let today = Local::now().date_naive();
    GlobalCalendarView::new(client, &config.calendar.default_country, today)
}

async fn run(config: AppConfig, args: Args) -> anyhow::Result<()> {
    match args.command {
        Command::Daily { country, date } => {
            let mut view = calendar_view(&config)?;
            if let Some(country) = country {
                view.select_country(&country)?;
            }
            if let Some(date) = date {
                view.select_date(date);
            }
            if let Some(pending) = view.mount() {
                let finished = pending.resolve().await;
                view.apply_daily(finished);
            }
            let data = settled(view.daily_state())?;
            if args.json {
                print_json(data)?;
            } else {
                print!("{}", render::daily_events(view.country(), view.date(), data));
            }
        }
        Command::Browse { country } => {
            let mut view = calendar_view(&config)?;
            if let Some(country) = country {
                view.select_browse_country(&country)?;
            }
            view.set_mode(CalendarMode::Browse);
            view.load_all_name_days().await;
            settled(view.browse_state())?;
            let groups = view.grouped_name_days();
            if args.json {
                print_json(&groups)?;
            } else {
                print!("{}", render::name_day_browser(view.browse_country(), &groups));
            }
        }
        Command::Wish {
            name,
            country,
            style,
        } => {
            let mut view = calendar_view(&config)?;
            if let Some(country) = country {
                view.select_country(&country)?;
            }
            view.open_wish(&name);
            view.wish_modal_mut().set_style(style);
            view.generate_wish().await;
            let wish = settled(view.wish_modal().state())?;
            if args.json {
                print_json(&serde_json::json!({ "name": name, "style": style, "wish": wish }))?;
            } else {
                print!("{}", render::wish(view.wish_modal().name(), style, wish));
            }
        }
        Command::Countries => {
            if args.json {
                print_json(&countries::SUPPORTED[..])?;
            } else {
                print!("{}", render::countries(&countries::SUPPORTED));
            }
        }
    }

    Ok(())
}

/// The CLI awaits each request to completion, so only success or error remain.
fn settled<T>(state: &LoadState<T>) -> anyhow::Result<&T> {
    match state {
        LoadState::Success(data) => Ok(data),
        LoadState::Error(message) => anyhow::bail!("{}", message),
        LoadState::Idle | LoadState::Loading => anyhow::bail!("request did not complete"),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
