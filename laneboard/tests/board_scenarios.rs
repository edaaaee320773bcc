//! End-to-end board behaviour through the processor and a memory backend

use laneboard::{
    card::{AddCard, DeleteCard, MoveCard, UpdateCard},
    column::{AddColumn, DeleteColumn, MoveColumn, UpdateColumn},
    test_support::card_order,
    BoardContext, BoardOperationProcessor, MemoryStore, OperationProcessor, PersistenceGateway,
    DEFAULT_STORAGE_KEY,
};
use serde_json::Value;

fn open(backend: &MemoryStore) -> BoardContext {
    BoardContext::open(PersistenceGateway::new(backend.clone()))
}

fn column_id(ctx: &BoardContext, title: &str) -> String {
    ctx.store().resolve_column(title).unwrap().id.to_string()
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

#[test]
fn test_reorder_within_then_across_columns() {
    let backend = MemoryStore::new();
    let mut ctx = open(&backend);
    let processor = BoardOperationProcessor::new();
    let todo = column_id(&ctx, "Todo");
    let done = column_id(&ctx, "Done");

    let a = id_of(&processor.process(&AddCard::new(todo.as_str(), "A"), &mut ctx).unwrap());
    processor
        .process(&AddCard::new(todo.as_str(), "B"), &mut ctx)
        .unwrap();
    assert_eq!(card_order(ctx.store(), &todo), vec!["A", "B"]);

    processor
        .process(&MoveCard::new(a.as_str(), todo.as_str(), 1), &mut ctx)
        .unwrap();
    assert_eq!(card_order(ctx.store(), &todo), vec!["B", "A"]);

    processor
        .process(&MoveCard::new(a.as_str(), done.as_str(), 0), &mut ctx)
        .unwrap();
    assert_eq!(card_order(ctx.store(), &todo), vec!["B"]);
    assert_eq!(card_order(ctx.store(), &done), vec!["A"]);

    let b = ctx.store().cards_of(&todo.as_str().into())[0].clone();
    assert_eq!(b.position, 0);
    ctx.store().check_invariants().unwrap();

    // every mutation was written through
    assert_eq!(backend.write_attempts(), 4);
}

#[test]
fn test_delete_last_card_leaves_column_empty() {
    let backend = MemoryStore::new();
    let mut ctx = open(&backend);
    let processor = BoardOperationProcessor::new();
    let todo = column_id(&ctx, "Todo");

    let b = id_of(&processor.process(&AddCard::new(todo.as_str(), "B"), &mut ctx).unwrap());
    let others = ctx.store().snapshot().columns;

    let result = processor
        .process(&DeleteCard::new(b.as_str()), &mut ctx)
        .unwrap();
    assert_eq!(result["deleted"], true);
    assert!(card_order(ctx.store(), &todo).is_empty());
    assert_eq!(ctx.store().snapshot().columns, others);
}

#[test]
fn test_noop_move_neither_logs_nor_persists() {
    let backend = MemoryStore::new();
    let mut ctx = open(&backend);
    let processor = BoardOperationProcessor::new();
    let todo = column_id(&ctx, "Todo");

    let a = id_of(&processor.process(&AddCard::new(todo.as_str(), "A"), &mut ctx).unwrap());
    let before = ctx.store().snapshot();
    let writes = backend.write_attempts();
    let entries = ctx.read_activity(None).len();

    processor
        .process(&MoveCard::new(a.as_str(), todo.as_str(), 0), &mut ctx)
        .unwrap();

    assert_eq!(ctx.store().snapshot(), before);
    assert_eq!(backend.write_attempts(), writes);
    assert_eq!(ctx.read_activity(None).len(), entries);
}

#[test]
fn test_rejected_commands_do_not_persist() {
    let backend = MemoryStore::new();
    let mut ctx = open(&backend);
    let processor = BoardOperationProcessor::new();
    let todo = column_id(&ctx, "Todo");

    assert!(processor
        .process(&AddColumn::new(""), &mut ctx)
        .unwrap_err()
        .is_validation());
    assert!(processor
        .process(&UpdateColumn::new(todo.as_str()).with_title("  "), &mut ctx)
        .unwrap_err()
        .is_validation());
    assert!(processor
        .process(&MoveCard::new("ghost", todo.as_str(), 0), &mut ctx)
        .unwrap_err()
        .is_benign());

    assert_eq!(backend.write_attempts(), 0);
    assert_eq!(ctx.store().column_count(), 3);
}

#[test]
fn test_delete_column_cascades_and_survives_reload() {
    let backend = MemoryStore::new();
    let processor = BoardOperationProcessor::new();
    {
        let mut ctx = open(&backend);
        let doing = column_id(&ctx, "In Progress");
        for title in ["A", "B", "C"] {
            processor
                .process(&AddCard::new(doing.as_str(), title), &mut ctx)
                .unwrap();
        }
        processor
            .process(&DeleteColumn::new(doing.as_str()), &mut ctx)
            .unwrap();
    }

    let ctx = open(&backend);
    let titles: Vec<&str> = ctx
        .store()
        .columns_sorted()
        .iter()
        .map(|c| c.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Todo", "Done"]);
    assert_eq!(ctx.store().total_cards(), 0);
    ctx.store().check_invariants().unwrap();
}

#[test]
fn test_column_lifecycle() {
    let backend = MemoryStore::new();
    let mut ctx = open(&backend);
    let processor = BoardOperationProcessor::new();

    let blocked = id_of(&processor.process(&AddColumn::new("Blocked"), &mut ctx).unwrap());
    processor
        .process(&MoveColumn::new(blocked.as_str(), 1), &mut ctx)
        .unwrap();
    processor
        .process(&UpdateColumn::new(blocked.as_str()).with_title("Waiting"), &mut ctx)
        .unwrap();

    let titles: Vec<String> = ctx
        .store()
        .columns_sorted()
        .iter()
        .map(|c| c.title.clone())
        .collect();
    assert_eq!(titles, vec!["Todo", "Waiting", "In Progress", "Done"]);

    let stored: Value = serde_json::from_str(&backend.raw(DEFAULT_STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(stored["columns"][1]["title"], "Waiting");
    assert_eq!(stored["columns"][1]["position"], 1);
}

#[test]
fn test_update_card_persists_description() {
    let backend = MemoryStore::new();
    let mut ctx = open(&backend);
    let processor = BoardOperationProcessor::new();
    let todo = column_id(&ctx, "Todo");

    let a = id_of(&processor.process(&AddCard::new(todo.as_str(), "A"), &mut ctx).unwrap());
    processor
        .process(&UpdateCard::new(a.as_str()).with_description("Steps to reproduce"), &mut ctx)
        .unwrap();

    let stored: Value = serde_json::from_str(&backend.raw(DEFAULT_STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(stored["cards"][0]["description"], "Steps to reproduce");
    assert_eq!(stored["cards"][0]["columnId"], todo.as_str());
}
