//! Dispatch of CLI subcommands onto board operations

use crate::activity::ActivityFile;
use crate::cli::{Cli, Commands};
use crate::render;
use anyhow::{bail, Result};
use laneboard::{
    board::GetBoard,
    card::{AddCard, DeleteCard, ListCards, MoveCard, UpdateCard},
    column::{AddColumn, DeleteColumn, ListColumns, MoveColumn, UpdateColumn},
    BoardConfig, BoardContext, BoardError, BoardOperationProcessor, Operation, OperationProcessor,
    PersistenceGateway,
};
use serde_json::{json, Value};
use tracing::debug;

/// Run one subcommand against the configured board
pub fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    debug!(storage_dir = %config.storage_dir.display(), key = %config.storage_key, "using board");

    match &cli.command {
        Commands::Check => return check(cli, &config),
        Commands::Ops => return ops(cli),
        Commands::Activity { limit } => {
            let entries = ActivityFile::in_dir(&config.storage_dir).read(*limit)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for line in render::activity_lines(&entries) {
                    println!("{line}");
                }
            }
            return Ok(());
        }
        _ => {}
    }

    let mut ctx = BoardContext::open(PersistenceGateway::from_config(&config))
        .with_max_activity_entries(config.max_activity_entries);
    let processor = match &config.actor {
        Some(actor) => BoardOperationProcessor::with_actor(actor.clone()),
        None => BoardOperationProcessor::new(),
    };

    let outcome = dispatch(&cli.command, &processor, &mut ctx);

    // Failures are recorded too, so write the session's entries before reporting.
    ActivityFile::in_dir(&config.storage_dir)
        .with_max_entries(config.max_activity_entries)
        .append(&ctx.read_activity(None))?;

    let (verb, value) = outcome?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else if verb == "show" {
        println!("{}", render::board_table(ctx.store()));
    } else {
        println!("{}", render::summary(verb, &value));
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<BoardConfig> {
    let mut config = BoardConfig::load_from(cli.config.as_deref())?;
    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = dir.clone();
    }
    if let Some(actor) = &cli.actor {
        config.actor = Some(actor.clone());
    }
    Ok(config)
}

fn dispatch(
    command: &Commands,
    processor: &BoardOperationProcessor,
    ctx: &mut BoardContext,
) -> laneboard::Result<(&'static str, Value)> {
    let value = match command {
        Commands::Show => ("show", processor.process(&GetBoard, ctx)?),
        Commands::AddColumn { title } => ("added", processor.process(&AddColumn::new(title), ctx)?),
        Commands::RenameColumn { column, title } => {
            let id = column_id(ctx, column)?;
            let op = UpdateColumn::new(id).with_title(title);
            ("renamed", processor.process(&op, ctx)?)
        }
        Commands::DeleteColumn { column } => {
            let id = column_id(ctx, column)?;
            ("deleted", processor.process(&DeleteColumn::new(id), ctx)?)
        }
        Commands::MoveColumn { column, position } => {
            let id = column_id(ctx, column)?;
            ("moved", processor.process(&MoveColumn::new(id, *position), ctx)?)
        }
        Commands::AddCard {
            column,
            title,
            description,
        } => {
            let id = column_id(ctx, column)?;
            let mut op = AddCard::new(id, title);
            if let Some(description) = description {
                op = op.with_description(description);
            }
            ("added", processor.process(&op, ctx)?)
        }
        Commands::EditCard {
            card,
            title,
            description,
        } => {
            let mut op = UpdateCard::new(card_id(ctx, card)?);
            if let Some(title) = title {
                op = op.with_title(title);
            }
            if let Some(description) = description {
                op = op.with_description(description);
            }
            ("updated", processor.process(&op, ctx)?)
        }
        Commands::DeleteCard { card } => {
            let id = card_id(ctx, card)?;
            ("deleted", processor.process(&DeleteCard::new(id), ctx)?)
        }
        Commands::MoveCard {
            card,
            column,
            position,
        } => {
            let id = card_id(ctx, card)?;
            let column = column_id(ctx, column)?;
            let op = MoveCard::new(id, column, position.unwrap_or(usize::MAX));
            ("moved", processor.process(&op, ctx)?)
        }
        // answered by `run` without opening the board
        Commands::Activity { .. } | Commands::Check | Commands::Ops => {
            ("show", processor.process(&GetBoard, ctx)?)
        }
    };
    Ok(value)
}

fn column_id(ctx: &BoardContext, key: &str) -> laneboard::Result<String> {
    ctx.store()
        .resolve_column(key)
        .map(|c| c.id.to_string())
        .ok_or_else(|| BoardError::ColumnNotFound { id: key.to_string() })
}

fn card_id(ctx: &BoardContext, key: &str) -> laneboard::Result<String> {
    ctx.store()
        .resolve_card(key)
        .map(|c| c.id.to_string())
        .ok_or_else(|| BoardError::CardNotFound { id: key.to_string() })
}

/// Strict load of the stored board; reports problems instead of reseeding
fn check(cli: &Cli, config: &BoardConfig) -> Result<()> {
    let gateway = PersistenceGateway::from_config(config);
    let report = match gateway.try_load() {
        Ok(Some(store)) => json!({
            "status": "ok",
            "columns": store.column_count(),
            "cards": store.total_cards(),
        }),
        Ok(None) => json!({ "status": "empty" }),
        Err(error) => {
            if cli.json {
                println!("{}", json!({ "status": "invalid", "error": error.to_string() }));
            }
            bail!("stored board is unusable and would be replaced by the default columns: {error}");
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report["status"] == "empty" {
        println!("no stored board under key {}", gateway.key());
    } else {
        println!(
            "ok: {} columns, {} cards",
            report["columns"], report["cards"]
        );
    }
    Ok(())
}

/// Operation metadata for every board command
fn ops(cli: &Cli) -> Result<()> {
    let operations: Vec<Box<dyn Operation>> = vec![
        Box::new(GetBoard),
        Box::new(ListColumns),
        Box::new(AddColumn::new("")),
        Box::new(UpdateColumn::new("")),
        Box::new(DeleteColumn::new("")),
        Box::new(MoveColumn::new("", 0)),
        Box::new(ListCards::new("")),
        Box::new(AddCard::new("", "")),
        Box::new(UpdateCard::new("")),
        Box::new(DeleteCard::new("")),
        Box::new(MoveCard::new("", "", 0)),
    ];

    if cli.json {
        let listing: Vec<Value> = operations
            .iter()
            .map(|op| {
                json!({
                    "op": op.op_string(),
                    "description": op.description(),
                    "parameters": op
                        .parameters()
                        .iter()
                        .map(|p| json!({
                            "name": p.name,
                            "type": p.param_type.as_str(),
                            "required": p.required,
                            "description": p.description,
                        }))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for op in &operations {
        let usage: Vec<String> = op.parameters().iter().map(|p| p.usage()).collect();
        println!("{:<14} {:<48} {}", op.op_string(), usage.join(" "), op.description());
    }
    Ok(())
}
