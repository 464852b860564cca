use std::path::PathBuf;

use chrono::NaiveDate;
use cinema_api::BASE_URL_ENV_VAR;
use cinema_api::DEFAULT_BASE_URL;
use cinema_api::endpoint::DEFAULT_RECOMMENDATION_LIMIT;
use cinema_api::endpoint::DEFAULT_SALES_LIMIT;
use cinema_api::models::DEFAULT_CHECKOUT_PROVIDER;
use clap::Args;
use clap::Parser;
use clap::Subcommand;

use crate::home::HOME_ENV_VAR;

pub const STAFF_TOKEN_ENV_VAR: &str = "CINEMA_STAFF_TOKEN";
pub const PASSWORD_ENV_VAR: &str = "CINEMA_PASSWORD";

/// Command-line client for the cinema ticketing backend.
#[derive(Debug, Parser)]
#[command(name = "cinema", version)]
pub struct Cli {
    /// Backend API root, including the `/api` prefix.
    #[arg(long, global = true, env = BASE_URL_ENV_VAR, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory holding the persisted session (defaults to ~/.cinema).
    #[arg(long, global = true, env = HOME_ENV_VAR, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Log requests and session transitions to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account and sign in.
    Register(CredentialsArgs),
    /// Sign in and persist the session.
    Login(CredentialsArgs),
    /// Revoke the session and forget local tokens.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Browse the movie catalog.
    Movies(MoviesArgs),
    /// Show one movie.
    Movie {
        #[arg(value_name = "MOVIE_ID")]
        movie_id: i64,
    },
    /// List theaters.
    Theaters(TheatersArgs),
    /// List showtimes.
    Showtimes(ShowtimesArgs),
    /// Show seat availability for a showtime.
    Seats {
        #[arg(value_name = "SHOWTIME_ID")]
        showtime_id: i64,
    },
    /// Hold seats for a showtime.
    Hold(HoldArgs),
    /// Inspect a hold by id, or the active hold for a showtime.
    HoldStatus(HoldStatusArgs),
    /// Release a hold.
    Release {
        #[arg(value_name = "RESERVATION_ID")]
        reservation_id: i64,
    },
    /// Start checkout for a hold.
    Checkout(CheckoutArgs),
    /// Confirm a demo-provider payment and issue tickets.
    Confirm {
        #[arg(value_name = "ORDER_ID")]
        order_id: i64,
    },
    /// Poll an order's payment status.
    Order {
        #[arg(value_name = "ORDER_ID")]
        order_id: i64,
    },
    /// List your tickets.
    Tickets,
    /// List your orders.
    Orders,
    /// Personalized movie suggestions.
    Recommendations {
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_LIMIT, value_parser = parse_limit)]
        limit: u32,
    },
    /// Validate a ticket QR token at the door.
    Scan(ScanArgs),
    /// Admin sales report.
    Sales {
        #[arg(long, default_value_t = DEFAULT_SALES_LIMIT, value_parser = parse_limit)]
        limit: u32,
    },
}

impl Command {
    /// Catalog browsing and staff scans never use the user session.
    pub fn uses_session(&self) -> bool {
        !matches!(
            self,
            Command::Movies(_)
                | Command::Movie { .. }
                | Command::Theaters(_)
                | Command::Showtimes(_)
                | Command::Seats { .. }
                | Command::Scan(_)
        )
    }
}

#[derive(Debug, Args)]
pub struct CredentialsArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = PASSWORD_ENV_VAR, hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct MoviesArgs {
    /// Title search.
    #[arg(short, long)]
    pub query: Option<String>,

    #[arg(long, default_value_t = 12, value_parser = parse_limit)]
    pub limit: u32,

    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}

#[derive(Debug, Args)]
pub struct TheatersArgs {
    #[arg(long)]
    pub city: Option<String>,

    #[arg(long, default_value_t = 20, value_parser = parse_limit)]
    pub limit: u32,

    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}

#[derive(Debug, Args)]
pub struct ShowtimesArgs {
    #[arg(long)]
    pub movie_id: Option<i64>,

    #[arg(long)]
    pub theater_id: Option<i64>,

    /// Day to list, as YYYY-MM-DD.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Include showtimes that already started.
    #[arg(long, default_value_t = false)]
    pub include_past: bool,

    #[arg(long, default_value_t = 20, value_parser = parse_limit)]
    pub limit: u32,

    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}

#[derive(Debug, Args)]
pub struct HoldArgs {
    #[arg(value_name = "SHOWTIME_ID")]
    pub showtime_id: i64,

    /// Seat id to hold; repeat for several seats.
    #[arg(long = "seat", value_name = "SEAT_ID", required = true)]
    pub seat_ids: Vec<i64>,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct HoldStatusArgs {
    #[arg(value_name = "RESERVATION_ID")]
    pub reservation_id: Option<i64>,

    /// Look up your active hold for this showtime instead.
    #[arg(long, value_name = "SHOWTIME_ID")]
    pub showtime: Option<i64>,
}

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    #[arg(value_name = "RESERVATION_ID")]
    pub reservation_id: i64,

    #[arg(long, default_value = DEFAULT_CHECKOUT_PROVIDER)]
    pub provider: String,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    #[arg(value_name = "QR_TOKEN")]
    pub qr_token: String,

    #[arg(long, env = STAFF_TOKEN_ENV_VAR, hide_env_values = true)]
    pub staff_token: String,
}

fn parse_limit(input: &str) -> Result<u32, String> {
    let value: u32 = input
        .parse()
        .map_err(|_| "limit must be a positive integer".to_string())?;
    if value >= 1 {
        Ok(value)
    } else {
        Err("limit must be at least 1".to_string())
    }
}
