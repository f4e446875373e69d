//! # CLI Layer
//!
//! One possible UI client for carz. This is the only place that knows about
//! stdout/stderr, prompts and exit codes.
//!
//! - `run()`: parses arguments, sets up logging, dispatches
//! - `handle_*()`: per-command handlers that call the API and print
//! - rendering lives in `render.rs`

use super::render::{
    print_messages, render_car_list, render_details, render_showcase, render_stats,
};
use super::setup::{CarFields, Cli, Commands, ListArgs};
use carz::api::{parse_positions, ConfigAction, CarzApi};
use carz::error::{CarzError, Result};
use carz::init::initialize;
use carz::model::CarForm;
use carz::store::fs::FileStore;
use carz::view::{SortKey, ViewFilter};
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

const DELETE_PROMPT: &str = "Are you sure you want to delete this car? This action cannot be undone.";

struct AppContext {
    api: CarzApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = initialize()?;
    let mut ctx = AppContext { api: ctx.api };

    match cli.command {
        Some(Commands::List(args)) => handle_list(&ctx, args),
        Some(Commands::Add(fields)) => handle_add(&mut ctx, fields),
        Some(Commands::Edit { position, fields }) => handle_edit(&mut ctx, position, fields),
        Some(Commands::Delete { positions, yes }) => handle_delete(&mut ctx, positions, yes),
        Some(Commands::Fav { positions }) => handle_fav(&mut ctx, positions),
        Some(Commands::Show { position }) => handle_show(&ctx, position),
        Some(Commands::Showcase) => handle_showcase(&ctx),
        Some(Commands::Stats) => handle_stats(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Doctor) => handle_doctor(&mut ctx),
        None => handle_list(&ctx, ListArgs::default()),
    }
}

/// Logs go to stderr. `RUST_LOG` wins; otherwise warnings only, or debug with `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "carz=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn handle_list(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let filter = ViewFilter::new(args.pack, args.category);
    let sort = args.sort.as_deref().map(SortKey::from);
    let result = ctx.api.list_cars(&filter, sort);

    if let Some(showcase) = &result.showcase {
        let section = render_showcase(showcase);
        if !section.is_empty() {
            println!("{}", section);
        }
    }
    print!("{}", render_car_list(&result.listed_cars));
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, fields: CarFields) -> Result<()> {
    // A fresh add never continues an edit.
    ctx.api.cancel_edit();
    let form = apply_fields(CarForm::default(), fields);
    let result = ctx.api.save_car(&form)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, position: String, fields: CarFields) -> Result<()> {
    let index = single_position(&position)?;
    let Some(form) = ctx.api.start_edit(index) else {
        return Err(CarzError::Api(format!("No car at position {}", position)));
    };

    let form = apply_fields(form, fields);
    let result = match ctx.api.save_car(&form) {
        Ok(result) => result,
        Err(e) => {
            ctx.api.cancel_edit();
            return Err(e);
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, positions: Vec<String>, yes: bool) -> Result<()> {
    // Validate the syntax before asking anything.
    parse_positions(&positions)?;

    if !yes && !confirm(DELETE_PROMPT)? {
        println!("Nothing deleted.");
        return Ok(());
    }

    let result = ctx.api.delete_cars(&positions)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_fav(ctx: &mut AppContext, positions: Vec<String>) -> Result<()> {
    let result = ctx.api.toggle_favorites(&positions)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, position: String) -> Result<()> {
    let index = single_position(&position)?;
    let result = ctx.api.show_car(index);
    for dc in &result.listed_cars {
        print!("{}", render_details(dc));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_showcase(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.showcase();
    match &result.showcase {
        Some(showcase) if !showcase.is_empty() => print!("{}", render_showcase(showcase)),
        _ => println!("No favorites yet. Use `carz fav <position>` to add some."),
    }
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stats();
    if let Some(chart) = &result.chart {
        print!("{}", render_stats(&result.averages, chart));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.configure(action)?;
    if let Some(config) = result.config.as_ref().filter(|_| show_all) {
        for key in carz::config::CarzConfig::KEYS {
            if let Some(value) = config.get(key) {
                println!("{} = {}", key, value);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}

fn single_position(input: &str) -> Result<usize> {
    match parse_positions(&[input])?.as_slice() {
        [index] => Ok(*index),
        _ => Err(CarzError::Api(format!(
            "Expected a single position, got {}",
            input
        ))),
    }
}

/// Overlays the given fields on a form; absent fields keep their value.
fn apply_fields(mut form: CarForm, fields: CarFields) -> CarForm {
    let CarFields {
        name,
        value,
        image,
        kind,
        pack,
        category,
        rating,
        wiki,
        marketplace,
    } = fields;

    let targets = [
        (&mut form.name, name),
        (&mut form.value, value),
        (&mut form.image, image),
        (&mut form.kind, kind),
        (&mut form.pack_status, pack),
        (&mut form.category, category),
        (&mut form.rating, rating),
        (&mut form.wiki, wiki),
        (&mut form.marketplace, marketplace),
    ];
    for (slot, given) in targets {
        if let Some(given) = given {
            *slot = given;
        }
    }
    form
}

fn confirm(message: &str) -> Result<bool> {
    print!("{} [y/N] ", message);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
