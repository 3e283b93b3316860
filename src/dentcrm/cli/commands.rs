//! # CLI Layer
//!
//! This module is **one possible view** over the record store, not the application itself.
//! It is the only place that parses arguments, prints, and decides exit codes.
//!
//! Every invocation follows the store lifecycle end to end: resolve the data directory,
//! open the store (Uninitialized), run one command (first access makes it Ready), then
//! close it, which writes the final snapshot and surfaces any persistence failure.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with the API over an `FsBackend`
//! - `handle_*()`: Per-command handlers that call the API and render

use super::render::{
    print_messages, print_patient_detail, print_patients, print_product_detail, print_products,
    print_session, print_status,
};
use super::setup::{Cli, Commands, PatientArgs, PatientCommands, ProductArgs, ProductCommands};
use clap::Parser;
use dentcrm::api::{CrmApi, Credentials, PatientDraft, ProductDraft};
use dentcrm::config::{resolve_data_dir, CrmConfig};
use dentcrm::error::Result;
use dentcrm::logging::{default_level, init_tracing};
use dentcrm::store::fs_backend::FsBackend;
use dentcrm::store::RecordStore;
use tracing::debug;

struct AppContext {
    api: CrmApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(default_level(cli.verbose));

    let mut ctx = init_context(&cli)?;

    let outcome = match cli.command {
        Some(Commands::Login {
            user_id,
            email,
            role,
            token,
        }) => handle_login(
            &mut ctx,
            Credentials {
                user_id,
                email,
                role,
                token,
            },
        ),
        Some(Commands::Logout) => handle_logout(&mut ctx),
        Some(Commands::Whoami) => handle_whoami(&ctx),
        Some(Commands::Patient(cmd)) => match cmd {
            PatientCommands::Add(args) => handle_add_patient(&mut ctx, args),
            PatientCommands::List { search } => handle_list_patients(&ctx, search),
            PatientCommands::Show { id } => handle_show_patient(&ctx, id),
        },
        Some(Commands::Product(cmd)) => match cmd {
            ProductCommands::Add(args) => handle_add_product(&mut ctx, args),
            ProductCommands::List { search } => handle_list_products(&ctx, search),
            ProductCommands::Show { id } => handle_show_product(&ctx, id),
        },
        Some(Commands::Status) | None => handle_status(&ctx),
        Some(Commands::Reset { yes }) => handle_reset(&mut ctx, yes),
    };

    // Close even when the command failed so a Ready store still gets written.
    let closed = ctx.api.close();
    outcome?;
    closed.map(|_| ())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.home.clone())?;
    let config = CrmConfig::load(&data_dir)?;
    debug!(
        data_dir = %data_dir.display(),
        store_file = %config.store_file,
        "opening record store"
    );

    let backend = FsBackend::new(data_dir).with_file_name(&config.store_file);
    let mut store = RecordStore::open(backend).with_pretty(config.pretty);
    if cli.verbose {
        store.subscribe(|snapshot| {
            debug!(
                patients = snapshot.patients.len(),
                products = snapshot.inventory.len(),
                authenticated = snapshot.session.is_authenticated(),
                "store updated"
            )
        });
    }

    Ok(AppContext {
        api: CrmApi::new(store),
    })
}

fn handle_login(ctx: &mut AppContext, credentials: Credentials) -> Result<()> {
    let result = ctx.api.login(credentials)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_logout(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.logout()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_whoami(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.whoami()?;
    if let Some(session) = &result.session {
        print_session(session);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_add_patient(ctx: &mut AppContext, args: PatientArgs) -> Result<()> {
    let draft = PatientDraft {
        id: args.id,
        name: args.name,
        email: args.email,
        phone: args.phone,
        birth_date: args.birth_date,
        fiscal_code: args.fiscal_code,
        notes: args.notes,
    };
    let result = ctx.api.add_patient(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list_patients(ctx: &AppContext, search: Option<String>) -> Result<()> {
    let result = ctx.api.list_patients(search.as_deref())?;
    print_patients(&result.patients);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show_patient(ctx: &AppContext, id: i64) -> Result<()> {
    let result = ctx.api.show_patient(id)?;
    result.patients.iter().for_each(print_patient_detail);
    Ok(())
}

fn handle_add_product(ctx: &mut AppContext, args: ProductArgs) -> Result<()> {
    let draft = ProductDraft {
        id: args.id,
        name: args.name,
        sku: args.sku,
        category: args.category,
        quantity: args.quantity,
        unit: args.unit,
        udi: args.udi,
    };
    let result = ctx.api.add_product(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list_products(ctx: &AppContext, search: Option<String>) -> Result<()> {
    let result = ctx.api.list_products(search.as_deref())?;
    print_products(&result.products);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show_product(ctx: &AppContext, id: i64) -> Result<()> {
    let result = ctx.api.show_product(id)?;
    result.products.iter().for_each(print_product_detail);
    Ok(())
}

fn handle_status(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.status()?;
    if let Some(status) = &result.status {
        print_status(status);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_reset(ctx: &mut AppContext, yes: bool) -> Result<()> {
    let result = ctx.api.reset(yes)?;
    print_messages(&result.messages);
    Ok(())
}
