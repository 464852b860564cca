use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use cinema_api::ApiClient;
use cinema_api::ClientConfig;
use cinema_api::ReqwestTransport;
use cinema_api::Session;
use cinema_api::endpoint::MovieQuery;
use cinema_api::endpoint::ShowtimeQuery;
use cinema_api::endpoint::TheaterQuery;
use cinema_api::models::CheckoutSessionCreate;
use cinema_api::models::Credentials;
use cinema_api::models::ReservationCreate;
use cinema_session::FileTokenStore;
use cinema_session::SessionManager;
use serde::Serialize;
use tracing::debug;

use crate::cli::Cli;
use crate::cli::Command;
use crate::home::resolve_home;

pub async fn run(cli: Cli) -> Result<()> {
    let Cli {
        base_url,
        home,
        verbose: _,
        command,
    } = cli;

    let home = resolve_home(home)?;
    let store = FileTokenStore::in_home(&home);
    debug!(base_url = %base_url, store = %store.path().display(), "starting");

    let client = ApiClient::with_default_transport(
        ClientConfig::new(base_url),
        Arc::new(Session::new()),
    )?;
    let sessions = SessionManager::new(client, Arc::new(store));
    if command.uses_session() {
        sessions.restore().await?;
    }

    dispatch(&sessions, command).await
}

async fn dispatch(sessions: &SessionManager<ReqwestTransport>, command: Command) -> Result<()> {
    let client = sessions.client();
    match command {
        Command::Register(args) => {
            let user = sessions
                .register(&Credentials {
                    email: args.email,
                    password: args.password,
                })
                .await?;
            print_json(&user)
        }
        Command::Login(args) => {
            let user = sessions
                .login(&Credentials {
                    email: args.email,
                    password: args.password,
                })
                .await?;
            print_json(&user)
        }
        Command::Logout => {
            sessions.logout().await?;
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami => match sessions.current_user() {
            Some(user) => print_json(&user),
            None => {
                println!("Not signed in.");
                Ok(())
            }
        },
        Command::Movies(args) => {
            let query = MovieQuery {
                q: args.query,
                limit: args.limit,
                offset: args.offset,
            };
            print_json(&client.list_movies(&query).await?)
        }
        Command::Movie { movie_id } => print_json(&client.get_movie(movie_id).await?),
        Command::Theaters(args) => {
            let query = TheaterQuery {
                city: args.city,
                limit: args.limit,
                offset: args.offset,
            };
            print_json(&client.list_theaters(&query).await?)
        }
        Command::Showtimes(args) => {
            let query = ShowtimeQuery {
                movie_id: args.movie_id,
                theater_id: args.theater_id,
                date: args.date,
                include_past: args.include_past.then_some(true),
                limit: args.limit,
                offset: args.offset,
            };
            print_json(&client.list_showtimes(&query).await?)
        }
        Command::Seats { showtime_id } => print_json(&client.showtime_seats(showtime_id).await?),
        Command::Hold(args) => {
            let hold = ReservationCreate {
                showtime_id: args.showtime_id,
                seat_ids: args.seat_ids,
            };
            print_json(&client.create_reservation(&hold).await?)
        }
        Command::HoldStatus(args) => match args.reservation_id {
            Some(reservation_id) => print_json(&client.get_reservation(reservation_id).await?),
            None => {
                let showtime_id = args.showtime.context("pass a reservation id or --showtime")?;
                print_json(&client.active_reservation(showtime_id).await?)
            }
        },
        Command::Release { reservation_id } => {
            client.cancel_reservation(reservation_id).await?;
            println!("Released reservation {reservation_id}.");
            Ok(())
        }
        Command::Checkout(args) => {
            let checkout = CheckoutSessionCreate {
                reservation_id: args.reservation_id,
                provider: args.provider,
            };
            print_json(&client.create_checkout_session(&checkout).await?)
        }
        Command::Confirm { order_id } => print_json(&client.confirm_demo_checkout(order_id).await?),
        Command::Order { order_id } => print_json(&client.get_order(order_id).await?),
        Command::Tickets => print_json(&client.my_tickets().await?),
        Command::Orders => print_json(&client.my_orders().await?),
        Command::Recommendations { limit } => {
            print_json(&client.my_recommendations(limit).await?)
        }
        Command::Scan(args) => {
            print_json(&client.scan_ticket(&args.qr_token, &args.staff_token).await?)
        }
        Command::Sales { limit } => print_json(&client.sales_report(limit).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
