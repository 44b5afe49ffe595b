mod cli;
mod config;
mod effects;
mod logging;
mod render;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use catalog_core::{encode_query, parse_query_str, Msg};
use catalog_engine::{CatalogClient, EngineHandle, FavoritesStore, ReqwestFetcher, ResultPipeline};
use clap::Parser;
use engine_logging::engine_info;

use cli::Cli;
use config::AppConfig;
use effects::Session;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = AppConfig::load(cli.config.as_deref()).merge_cli(cli);
    let settings = config.fetch_settings();
    let fetcher = ReqwestFetcher::new(settings.clone()).context("building http client")?;
    let client = Arc::new(CatalogClient::new(Arc::new(fetcher), &settings.base_url));
    let favorites = Arc::new(FavoritesStore::in_dir(config.favorites_dir()));

    if let Some(id) = cli.toggle_favorite {
        let now = favorites
            .toggle(id)
            .with_context(|| format!("updating favorites in {:?}", favorites.dir()))?;
        println!(
            "#{id} {} favorites",
            if now { "added to" } else { "removed from" }
        );
    }

    let mut session = Session::new(EngineHandle::new(ResultPipeline::new(client, favorites)));

    if cli.categories {
        let categories = session.load_categories().context("loading categories")?;
        print!("{}", render::render_categories(&categories));
        return Ok(ExitCode::SUCCESS);
    }

    let snapshot = parse_query_str(&cli.query);
    engine_info!("Listing with query {:?}", encode_query(&snapshot));
    session.dispatch(Msg::QueryChanged(snapshot));
    session.run_until_idle();

    for _ in 0..cli.more {
        if !session.state().has_more() || session.state().error().is_some() {
            break;
        }
        session.dispatch(Msg::LoadMoreClicked);
        session.run_until_idle();
    }

    let view = session.view();
    print!("{}", render::render_list(&view));
    Ok(if view.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
