use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
};

use tracing_subscriber::{EnvFilter, fmt};
use tracing_subscriber::util::SubscriberInitExt;

mod cache;
mod districts;
mod fetch;
mod mock;
mod render;

use fetch::{PriceSource, api_base_url, load_prices};
use render::render_prices;

const DEFAULT_ROOT: &str = ".agrimate";

fn main() {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish()
        .try_init();

    match run(std::env::args().collect()) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(err) => {
            eprintln!("price-viewer error: {err}");
            std::process::exit(2);
        }
    }
}

fn run(args: Vec<String>) -> Result<String, String> {
    let mut args: VecDeque<String> = args.into_iter().skip(1).collect();
    if args.is_empty() {
        return Ok(usage());
    }

    if matches!(
        args.front().map(String::as_str),
        Some("help" | "--help" | "-h")
    ) {
        return Ok(usage());
    }

    let root = parse_root(&mut args)?;
    let root_path = PathBuf::from(root);

    let cmd = pop_required(&mut args, "command")?;
    match cmd.as_str() {
        "states" => cmd_states(&mut args),
        "districts" => cmd_districts(&mut args),
        "prices" => cmd_prices(&root_path, &mut args),
        "cached" => cmd_cached(&root_path, &mut args),
        _ => Err(format!("unknown command '{cmd}'\n\n{}", usage())),
    }
}

fn usage() -> String {
    [
        "Usage: price-viewer [--root PATH] <command>",
        "",
        "Commands:",
        "  states",
        "  districts --state <state>",
        "  prices [--state <state>] [--district <district>] [--offline]",
        "  cached",
    ]
    .join("\n")
}

fn parse_root(args: &mut VecDeque<String>) -> Result<String, String> {
    if matches!(args.front().map(String::as_str), Some("--root")) {
        args.pop_front();
        return pop_required(args, "--root value");
    }
    Ok(DEFAULT_ROOT.to_string())
}

fn cmd_states(args: &mut VecDeque<String>) -> Result<String, String> {
    if let Some(flag) = args.pop_front() {
        return Err(format!("unknown states option '{flag}'"));
    }
    Ok(districts::STATES.join("\n"))
}

/// The dependent second control: selecting a state determines this list.
fn cmd_districts(args: &mut VecDeque<String>) -> Result<String, String> {
    let mut state = None;
    while let Some(flag) = args.pop_front() {
        match flag.as_str() {
            "--state" => state = Some(pop_required(args, "--state value")?),
            _ => return Err(format!("unknown districts option '{flag}'")),
        }
    }
    let state = state.ok_or_else(|| "--state is required".to_string())?;

    let list = districts::districts_for(&state);
    if list.is_empty() {
        return Ok(format!("no districts known for state '{state}'"));
    }
    Ok(list.join("\n"))
}

fn cmd_prices(root: &Path, args: &mut VecDeque<String>) -> Result<String, String> {
    let mut state = String::new();
    let mut district = String::new();
    let mut offline = false;
    while let Some(flag) = args.pop_front() {
        match flag.as_str() {
            "--state" => state = pop_required(args, "--state value")?,
            "--district" => district = pop_required(args, "--district value")?,
            "--offline" => offline = true,
            _ => return Err(format!("unknown prices option '{flag}'")),
        }
    }

    let load = load_prices(&api_base_url(), &state, &district, offline);
    let rendered = render_prices(&load.prices);
    cache::store_prices(root, &state, &district, &load.prices);

    let source = match load.source {
        PriceSource::Remote => "live",
        PriceSource::Mock => "sample",
    };
    Ok(format!("{rendered}\n\n({} prices, {source} data)", load.prices.len()))
}

fn cmd_cached(root: &Path, args: &mut VecDeque<String>) -> Result<String, String> {
    if let Some(flag) = args.pop_front() {
        return Err(format!("unknown cached option '{flag}'"));
    }
    let prices = cache::load_cached_prices(root);
    if prices.is_empty() {
        return Ok("no fresh cached prices".to_string());
    }
    Ok(render_prices(&prices))
}

fn pop_required(args: &mut VecDeque<String>, what: &str) -> Result<String, String> {
    args.pop_front()
        .ok_or_else(|| format!("missing {what}"))
}
