//! Drag gestures driven against a persisted board

use laneboard::types::{CardId, ColumnId};
use laneboard::{
    card::{AddCard, DeleteCard}, test_support::card_order, BoardContext, BoardOperationProcessor, DragItem,
    GestureOutcome, HoverTarget, MemoryStore, OperationProcessor, PersistenceGateway,
    ReorderEngine,
};

struct Board {
    backend: MemoryStore,
    ctx: BoardContext,
    engine: ReorderEngine,
    todo: ColumnId,
    doing: ColumnId,
    done: ColumnId,
}

fn board() -> Board {
    let backend = MemoryStore::new();
    let ctx = BoardContext::open(PersistenceGateway::new(backend.clone()));
    let ids: Vec<ColumnId> = ctx
        .store()
        .columns_sorted()
        .iter()
        .map(|c| c.id.clone())
        .collect();
    Board {
        backend,
        ctx,
        engine: ReorderEngine::new(BoardOperationProcessor::with_actor("pointer")),
        todo: ids[0].clone(),
        doing: ids[1].clone(),
        done: ids[2].clone(),
    }
}

fn add(board: &mut Board, column: &ColumnId, title: &str) -> CardId {
    let v = BoardOperationProcessor::new()
        .process(&AddCard::new(column.clone(), title), &mut board.ctx)
        .unwrap();
    CardId::from_string(v["id"].as_str().unwrap())
}

fn move_entries(ctx: &BoardContext) -> usize {
    ctx.read_activity(None)
        .iter()
        .filter(|e| e.op == "move card")
        .count()
}

#[test]
fn test_repeated_hover_resolution_moves_once() {
    let mut b = board();
    let todo = b.todo.clone();
    let a = add(&mut b, &todo, "A");
    let writes = b.backend.write_attempts();

    b.engine
        .gesture_start(&b.ctx, DragItem::Card(a))
        .unwrap();
    let target = HoverTarget::Column(b.doing.clone());
    let first = b.engine.gesture_hover(&mut b.ctx, &target).unwrap();
    let second = b.engine.gesture_hover(&mut b.ctx, &target).unwrap();

    assert!(matches!(first, GestureOutcome::Moved(_)));
    assert_eq!(second, GestureOutcome::Skipped);
    assert_eq!(move_entries(&b.ctx), 1);
    assert_eq!(b.backend.write_attempts(), writes + 1);

    assert_eq!(
        b.engine.gesture_end(&mut b.ctx, Some(&target)).unwrap(),
        GestureOutcome::Ended
    );
    assert_eq!(b.backend.write_attempts(), writes + 1);
    assert_eq!(b.ctx.read_activity(Some(1))[0].actor.as_deref(), Some("pointer"));
}

#[test]
fn test_hovering_cards_in_sequence_walks_the_card() {
    let mut b = board();
    let todo = b.todo.clone();
    let done = b.done.clone();
    let a = add(&mut b, &todo, "A");
    add(&mut b, &done, "X");
    let y = add(&mut b, &done, "Y");
    let z = add(&mut b, &done, "Z");

    b.engine
        .gesture_start(&b.ctx, DragItem::Card(a))
        .unwrap();

    // over Y: A takes Y's slot, Y shifts down
    b.engine
        .gesture_hover(&mut b.ctx, &HoverTarget::Card(y.clone()))
        .unwrap();
    assert_eq!(card_order(b.ctx.store(), done.as_str()), vec!["X", "A", "Y", "Z"]);

    // over Z, now at 3
    b.engine
        .gesture_hover(&mut b.ctx, &HoverTarget::Card(z))
        .unwrap();
    assert_eq!(card_order(b.ctx.store(), done.as_str()), vec!["X", "Y", "Z", "A"]);

    // back over Y, now at 1
    b.engine
        .gesture_hover(&mut b.ctx, &HoverTarget::Card(y))
        .unwrap();
    assert_eq!(card_order(b.ctx.store(), done.as_str()), vec!["X", "A", "Y", "Z"]);

    b.engine.gesture_end(&mut b.ctx, None).unwrap();
    assert!(card_order(b.ctx.store(), todo.as_str()).is_empty());
    assert_eq!(move_entries(&b.ctx), 3);
    b.ctx.store().check_invariants().unwrap();
}

#[test]
fn test_hover_resolves_against_store_after_sibling_deleted() {
    let mut b = board();
    let todo = b.todo.clone();
    let a = add(&mut b, &todo, "A");
    let bee = add(&mut b, &todo, "B");
    let c = add(&mut b, &todo, "C");

    b.engine
        .gesture_start(&b.ctx, DragItem::Card(a))
        .unwrap();
    let over_b = b
        .engine
        .gesture_hover(&mut b.ctx, &HoverTarget::Card(bee.clone()))
        .unwrap();
    assert!(matches!(over_b, GestureOutcome::Moved(_)));
    assert_eq!(card_order(b.ctx.store(), todo.as_str()), vec!["B", "A", "C"]);

    // a sibling disappears mid-drag; A slides up to position 0
    BoardOperationProcessor::new()
        .process(&DeleteCard::new(bee), &mut b.ctx)
        .unwrap();
    assert_eq!(card_order(b.ctx.store(), todo.as_str()), vec!["A", "C"]);

    // C now sits at 1, the slot A last moved to, but A itself is at 0
    let over_c = b
        .engine
        .gesture_hover(&mut b.ctx, &HoverTarget::Card(c))
        .unwrap();
    let GestureOutcome::Moved(card) = &over_c else {
        panic!("expected a live move, got {over_c:?}");
    };
    assert_eq!(card["position"], 1);
    assert_eq!(card_order(b.ctx.store(), todo.as_str()), vec!["C", "A"]);
    assert_eq!(move_entries(&b.ctx), 2);
    b.ctx.store().check_invariants().unwrap();
}

#[test]
fn test_interrupted_card_drag_keeps_preview() {
    let mut b = board();
    let todo = b.todo.clone();
    let a = add(&mut b, &todo, "A");
    add(&mut b, &todo, "B");

    b.engine
        .gesture_start(&b.ctx, DragItem::Card(a))
        .unwrap();
    b.engine
        .gesture_hover(&mut b.ctx, &HoverTarget::Column(b.doing.clone()))
        .unwrap();
    b.engine.cancel();

    // reload from storage: the live move was persisted
    let reloaded = BoardContext::open(PersistenceGateway::new(b.backend.clone()));
    assert_eq!(card_order(reloaded.store(), todo.as_str()), vec!["B"]);
    assert_eq!(card_order(reloaded.store(), b.doing.as_str()), vec!["A"]);
}

#[test]
fn test_column_drag_commits_on_drop_only() {
    let mut b = board();
    let writes = b.backend.write_attempts();

    b.engine
        .gesture_start(&b.ctx, DragItem::Column(b.done.clone()))
        .unwrap();
    for target in [b.doing.clone(), b.todo.clone()] {
        assert_eq!(
            b.engine
                .gesture_hover(&mut b.ctx, &HoverTarget::Column(target))
                .unwrap(),
            GestureOutcome::Recorded
        );
    }
    assert_eq!(b.backend.write_attempts(), writes);

    let outcome = b
        .engine
        .gesture_end(&mut b.ctx, Some(&HoverTarget::Column(b.todo.clone())))
        .unwrap();
    let GestureOutcome::Moved(column) = &outcome else {
        panic!("expected a column move, got {outcome:?}");
    };
    assert_eq!(column["position"], 0);
    assert_eq!(b.backend.write_attempts(), writes + 1);

    let titles: Vec<&str> = b
        .ctx
        .store()
        .columns_sorted()
        .iter()
        .map(|c| c.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Done", "Todo", "In Progress"]);
}

#[test]
fn test_column_drop_on_own_position_writes_nothing() {
    let mut b = board();

    b.engine
        .gesture_start(&b.ctx, DragItem::Column(b.doing.clone()))
        .unwrap();
    let outcome = b
        .engine
        .gesture_end(&mut b.ctx, Some(&HoverTarget::Column(b.doing.clone())))
        .unwrap();

    assert_eq!(outcome, GestureOutcome::Ended);
    assert_eq!(b.backend.write_attempts(), 0);
    assert!(b.ctx.read_activity(None).is_empty());
}
