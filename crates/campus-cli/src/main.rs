//! `campus` command-line client.
//!
//! Signs in against the school-management API, keeps the session in the
//! encrypted local store and prints what the mobile screens would show.

#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::path::PathBuf;

use anyhow::{bail, Context};
use campus_client::api::fees::FeePostFilter;
use campus_client::api::students::StudentFilter;
use campus_client::external::HttpFileDownloader;
use campus_client::{ApiClient, ApiError, AppSession, ClientConfig, PageRequest, SessionError};
use campus_shared::constants::{DEFAULT_CURRENCY, DEFAULT_PAGE_LIMIT};
use campus_shared::format::format_currency;
use campus_shared::models::{sort_newest_first, AttendanceSummary, Credentials};
use campus_store::SessionStore;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "campus", about = "School-management API client", version)]
struct Cli {
    /// API base URL. Overrides `CAMPUS_API_URL`.
    #[arg(long, global = true, value_name = "url")]
    api_url: Option<String>,

    /// Directory for the session database. Overrides `CAMPUS_DATA_DIR`.
    #[arg(long, global = true, value_name = "path")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CAMPUS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in profile.
    Whoami {
        /// Re-fetch the profile from the server first.
        #[arg(long)]
        refresh: bool,
    },
    Students {
        #[arg(long)]
        classroom: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u32,
    },
    /// Fee receipts of one student, newest first.
    Receipts {
        student: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Classrooms with their sections.
    Classrooms {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u32,
    },
    /// Fee demands, with overdue ones flagged.
    FeePosts {
        #[arg(long)]
        classroom: Option<String>,
        #[arg(long)]
        student: Option<String>,
    },
    Diary {
        classroom: String,
        /// `YYYY-MM-DD`
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    Notifications {
        /// Notification type, e.g. `fee` or `event`.
        #[arg(conflicts_with = "recipient")]
        kind: Option<String>,
        #[arg(long)]
        recipient: Option<String>,
    },
    Events,
    /// Monthly attendance of one student with a summary line.
    Attendance {
        student: String,
        /// `YYYY-MM`
        #[arg(long, value_parser = parse_month)]
        month: Option<NaiveDate>,
    },
    Gallery {
        #[arg(long)]
        classroom: Option<String>,
    },
    /// Save an attachment URL to disk.
    Download {
        url: String,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("campus_client=debug,campus_store=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    debug!(?config, "Loaded configuration");

    let api = ApiClient::new(&config)?;
    let store = match config.data_dir {
        Some(ref dir) => SessionStore::open_in(dir).await,
        None => SessionStore::open_default().await,
    }
    .context("opening session store")?;
    let session = AppSession::init(store).await?;

    run(cli.command, &api, &session).await.map_err(|err| {
        if needs_login(&err) {
            err.context("not signed in or session expired, run `campus login`")
        } else {
            err
        }
    })
}

fn needs_login(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<SessionError>() {
        Some(SessionError::Api(e)) => e.is_unauthorized(),
        Some(_) => false,
        None => err
            .downcast_ref::<ApiError>()
            .is_some_and(ApiError::is_unauthorized),
    }
}

async fn run(command: Command, api: &ApiClient, session: &AppSession) -> anyhow::Result<()> {
    let token = session.token().await;
    let token = token.as_deref();

    match command {
        Command::Login { email, password } => {
            let snapshot = session.login(api, &Credentials::new(email, password)).await?;
            match snapshot.user_info {
                Some(profile) => info!(name = %profile.name, role = %profile.role, "Signed in"),
                None => info!("Signed in"),
            }
        }
        Command::Logout => session.logout().await?,
        Command::Whoami { refresh } => {
            let profile = if refresh {
                Some(session.refresh_profile(api).await?)
            } else {
                session.profile().await
            };
            match profile {
                Some(profile) => print_json(&profile)?,
                None if session.is_logged_in().await => println!("Signed in, profile not cached"),
                None => bail!("Not signed in"),
            }
        }
        Command::Students {
            classroom,
            search,
            page,
            limit,
        } => {
            let filter = StudentFilter {
                classroom_id: classroom,
                search,
            };
            let students = api
                .list_students(token, PageRequest::new(page, limit), &filter)
                .await?;
            print_json(&students)?;
        }
        Command::Classrooms { page, limit } => {
            let classrooms = api
                .list_classrooms(token, PageRequest::new(page, limit))
                .await?;
            for classroom in &classrooms.items {
                let students = classroom
                    .student_count
                    .map(|n| format!("{n} students"))
                    .unwrap_or_default();
                println!("{:>6}  {:<24}  {students}", classroom.id, classroom.display_name());
            }
        }
        Command::Receipts { student, page } => {
            let mut receipts = api
                .list_fee_receipts(token, &student, PageRequest::new(page, DEFAULT_PAGE_LIMIT))
                .await?
                .items;
            sort_newest_first(&mut receipts);
            for receipt in &receipts {
                let when = receipt
                    .paid_at
                    .or(receipt.created_at)
                    .map(|t| t.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{when}  {:>14}  {}",
                    format_currency(receipt.amount, DEFAULT_CURRENCY),
                    receipt.payment_method.as_deref().unwrap_or("-")
                );
            }
        }
        Command::FeePosts { classroom, student } => {
            let filter = FeePostFilter {
                classroom_id: classroom,
                student_id: student,
            };
            let today = chrono::Local::now().date_naive();
            for post in api.list_fee_posts(token, &filter).await?.items {
                let due = post
                    .due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string());
                let flag = if post.is_overdue(today) { "OVERDUE" } else { "" };
                println!(
                    "{due:<10}  {:>14}  {:<7}  {}  {flag}",
                    format_currency(post.amount, DEFAULT_CURRENCY),
                    format!("{:?}", post.status).to_lowercase(),
                    post.title
                );
            }
        }
        Command::Diary { classroom, date } => {
            let mut entries = api.list_diary_entries(token, &classroom, date).await?.items;
            sort_newest_first(&mut entries);
            print_json(&entries)?;
        }
        Command::Notifications { kind, recipient } => {
            let page = match (kind, recipient) {
                (_, Some(recipient)) => {
                    api.list_notifications_for_recipient(token, &recipient)
                        .await?
                }
                (Some(kind), None) => api.list_notifications_by_type(token, &kind).await?,
                (None, None) => bail!("pass a notification type or --recipient"),
            };
            let mut notifications = page.items;
            sort_newest_first(&mut notifications);
            print_json(&notifications)?;
        }
        Command::Events => {
            let mut events = api.list_events(token).await?.items;
            sort_newest_first(&mut events);
            print_json(&events)?;
        }
        Command::Attendance { student, month } => {
            let records = api.list_attendance_records(token, &student, month).await?;
            let summary = AttendanceSummary::from_records(&records.items);
            print_json(&records.items)?;
            match summary.percentage() {
                Some(pct) => println!(
                    "present {} / absent {} / late {} / leave {}  ({pct:.1}%)",
                    summary.present, summary.absent, summary.late, summary.leave
                ),
                None => println!("no attendance recorded"),
            }
        }
        Command::Gallery { classroom } => {
            print_json(&api.list_gallery_items(token, classroom.as_deref()).await?)?;
        }
        Command::Download { url, dir } => {
            let downloader = HttpFileDownloader::new(api, dir);
            let path = downloader.download(&url).await?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn parse_month(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM: {e}"))
}
