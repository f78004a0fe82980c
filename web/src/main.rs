#![deny(clippy::all)]
#![deny(clippy::dbg_macro)]

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Error;
use env_logger::{Builder, Env};
use log::{error, info};
use structopt::StructOpt;
use wallet_inspector::Config;

mod api;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "Wallet inspector",
    about = "Looks up balances and guardians of an Ethereum account."
)]
struct Opt {
    /// Set logging level
    #[structopt(short, long, default_value = "warn")]
    log: String,

    /// Set IP address
    #[structopt(long, short, default_value = "127.0.0.1")]
    ip: String,

    /// Set port number
    #[structopt(long, short, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> ! {
    dotenv::dotenv().ok();

    let opt = Opt::from_args();

    Builder::from_env(Env::default().default_filter_or(&opt.log)).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    loop {
        if let Err(e) = try_main(&opt.ip, opt.port, config.clone()).await {
            error!("{e}");
        } else {
            info!("Exiting gracefully");
            std::process::exit(0);
        }
    }
}

async fn try_main(ip: &str, port: u16, config: Config) -> Result<(), Error> {
    info!("Listening on http://{}:{}", ip, port);
    info!("Token registry stored in {}", config.token_store.display());

    use api::router::*;

    let state = web::Data::new(api::service::AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .service(index)
            .service(account_info)
            .service(view_state)
            .service(tokens)
            .service(replace_tokens)
    })
    .bind((ip, port))
    .map_err(Error::msg)?
    .run()
    .await
    .map_err(Error::msg)
}
