//! End-to-end tests for the suggestion engine against an in-memory host.

use horizon_suggest::prelude::*;
use horizon_suggest::{ManualClock, NormalizedQuery, PrefixMatch, Revision, TextSelection};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fruits() -> ListHost<&'static str> {
    ListHost::new(vec!["Apple", "Banana", "Apricot"])
}

fn immediate(max: usize) -> SuggestionEngine<&'static str> {
    SuggestionEngine::new(
        display_projector::<&'static str>(),
        SuggestSettings::new()
            .with_delay(Duration::ZERO)
            .with_max_suggestion_count(max),
    )
}

#[test]
fn dropdown_opens_for_few_matches() {
    let mut engine = immediate(5);
    let mut host = fruits();

    host.type_text("Ap");
    let transition = engine.on_text_changed(&mut host);

    assert_eq!(transition, Some(Transition::Filtering { count: 2 }));
    assert!(host.is_dropdown_open());
    assert_eq!(host.visible_items(), vec![&"Apple", &"Apricot"]);
}

#[test]
fn dropdown_stays_closed_for_many_matches() {
    let mut engine = immediate(1);
    let mut host = fruits();

    host.type_text("a");
    let transition = engine.on_text_changed(&mut host);

    assert!(matches!(transition, Some(Transition::Suppressed { count }) if count > 1));
    assert!(!host.is_dropdown_open());
    assert!(host.applied_filter().is_none());
}

#[test]
fn typing_session() {
    init_tracing();
    let mut engine = immediate(10);
    let mut host = fruits();

    for (text, expected) in [
        ("B", Transition::Filtering { count: 1 }),
        ("Ba", Transition::Filtering { count: 1 }),
        ("", Transition::Cleared),
        ("p", Transition::Filtering { count: 2 }),
        ("pr", Transition::Filtering { count: 1 }),
    ] {
        host.type_text(text);
        assert_eq!(engine.on_text_changed(&mut host), Some(expected), "typing {text:?}");
    }

    // Pick the single suggestion: the combo box shows its text.
    host.set_selected_index(Some(2));
    host.type_text("Apricot");
    assert_eq!(
        engine.on_text_changed(&mut host),
        Some(Transition::Selected { filter_reset: true })
    );
    assert_eq!(engine.state(), SuggestState::Selected);
    assert_eq!(host.visible_items().len(), 3);

    // Editing after the selection drops it and filters again.
    host.type_text("Apric");
    assert_eq!(
        engine.on_text_changed(&mut host),
        Some(Transition::Filtering { count: 1 })
    );
    assert!(host.selected_item().is_none());
    assert_eq!(host.text(), "Apric");
}

#[test]
fn items_source_changes_between_recomputations() {
    let mut engine = immediate(10);
    let mut host = fruits();

    host.type_text("an");
    assert_eq!(
        engine.on_text_changed(&mut host),
        Some(Transition::Filtering { count: 1 })
    );

    host.items_mut().push("Mango");
    host.type_text("a");
    assert_eq!(
        engine.on_text_changed(&mut host),
        Some(Transition::Filtering { count: 4 })
    );
}

#[test]
fn base_filter_is_reread_every_time() {
    let mut engine = immediate(10);
    let mut host = fruits();

    host.type_text("Ap");
    engine.on_text_changed(&mut host);
    assert_eq!(host.visible_items().len(), 2);

    host.set_base_filter(Some(Arc::new(|item: &&'static str| item.len() == 5)));
    host.type_text("A");
    assert_eq!(
        engine.on_text_changed(&mut host),
        Some(Transition::Filtering { count: 1 })
    );
    assert_eq!(host.visible_items(), vec![&"Apple"]);
}

#[test]
fn percent_is_literal_without_escaping() {
    let mut engine = immediate(10);
    let mut host = ListHost::new(vec!["100% cotton", "100 pages", "1000 items"]);

    host.type_text("100%");
    assert_eq!(
        engine.on_text_changed(&mut host),
        Some(Transition::Filtering { count: 1 })
    );
    assert_eq!(host.visible_items(), vec![&"100% cotton"]);
}

#[test]
fn enabling_escape_turns_percent_into_wildcard() {
    let mut engine = immediate(10);
    let mut host = ListHost::new(vec!["100% cotton", "100 pages", "1000 items"]);

    host.type_text("100%");
    engine.on_text_changed(&mut host);
    assert_eq!(host.visible_items().len(), 1);

    engine.set_settings(
        SuggestSettings::new()
            .with_delay(Duration::ZERO)
            .with_escape_as_like(true),
    );
    host.type_text("100%");
    assert_eq!(
        engine.on_text_changed(&mut host),
        Some(Transition::Filtering { count: 3 })
    );
}

#[test]
fn prefix_strategy_honors_escaped_spaces() {
    let mut engine = SuggestionEngine::new(
        display_projector::<&'static str>(),
        SuggestSettings::new()
            .with_delay(Duration::ZERO)
            .with_escape_as_like(true)
            .with_strategy(PrefixMatch::default()),
    );
    let mut host = ListHost::new(vec!["Granny Smith", "Smith Granny", "Golden Delicious"]);

    host.type_text("gr sm");
    assert_eq!(
        engine.on_text_changed(&mut host),
        Some(Transition::Filtering { count: 1 })
    );
    assert_eq!(host.visible_items(), vec![&"Granny Smith"]);
}

#[test]
fn selection_caret_collapses_to_end() {
    let mut engine = immediate(10);
    let mut host = fruits();

    host.type_text("Apr");
    host.select(TextSelection::new(1, 2));
    assert_eq!(
        engine.on_text_changed(&mut host),
        Some(Transition::Filtering { count: 1 })
    );
    assert_eq!(host.caret(), TextSelection::caret(3));
}

#[test]
fn custom_strategy_plugs_in() {
    #[derive(Debug)]
    struct Initials;

    impl MatchStrategy for Initials {
        fn name(&self) -> &'static str {
            "initials"
        }

        fn matches(&self, query: &NormalizedQuery, item_text: &str) -> bool {
            let initials: String = item_text
                .split_whitespace()
                .filter_map(|word| word.chars().next())
                .collect();
            initials
                .to_lowercase()
                .starts_with(&query.as_str().to_lowercase())
        }
    }

    let mut engine = SuggestionEngine::new(
        display_projector::<&'static str>(),
        SuggestSettings::new()
            .with_delay(Duration::ZERO)
            .with_strategy(Initials),
    );
    let mut host = ListHost::new(vec!["Granny Smith", "Golden Delicious", "Red Delicious"]);

    host.type_text("gd");
    assert_eq!(
        engine.on_text_changed(&mut host),
        Some(Transition::Filtering { count: 1 })
    );
    assert_eq!(host.visible_items(), vec![&"Golden Delicious"]);
}

#[test]
fn polled_debounce_keeps_last_text() {
    let clock = ManualClock::new();
    let mut engine = SuggestionEngine::with_scheduler(
        display_projector::<&'static str>(),
        SuggestSettings::new().with_delay(Duration::from_millis(250)),
        Debouncer::with_clock(clock.clone()),
    );
    let mut host = fruits();

    let queries = Arc::new(Mutex::new(Vec::new()));
    {
        let queries = Arc::clone(&queries);
        engine
            .suggestions_shown
            .connect(move |count| queries.lock().push(*count));
    }

    for text in ["B", "Ba", "Ban", "Bana"] {
        host.type_text(text);
        assert_eq!(engine.on_text_changed(&mut host), None);
        clock.advance(Duration::from_millis(100));
        assert_eq!(engine.poll(&mut host), None);
    }

    assert_eq!(engine.scheduler().time_until_due(), Some(Duration::from_millis(150)));
    clock.advance(Duration::from_millis(150));
    assert_eq!(
        engine.poll(&mut host),
        Some(Transition::Filtering { count: 1 })
    );
    assert_eq!(engine.previous_query().map(NormalizedQuery::as_str), Some("Bana"));
    assert_eq!(*queries.lock(), vec![1]);
}

#[test]
fn threaded_debounce_end_to_end() {
    init_tracing();
    let scheduler: ThreadedDebouncer<Revision> = ThreadedDebouncer::new().unwrap();
    let mut engine = SuggestionEngine::with_scheduler(
        display_projector::<&'static str>(),
        SuggestSettings::new().with_delay(Duration::from_millis(30)),
        scheduler,
    );
    let mut host = fruits();

    for text in ["A", "Ap", "Apr"] {
        host.type_text(text);
        assert_eq!(engine.on_text_changed(&mut host), None);
    }

    let fired = engine.scheduler_mut().wait_fired(Duration::from_secs(5));
    let revision = fired.expect("debounced recomputation should fire");
    assert_eq!(revision, engine.revision());

    assert_eq!(
        engine.run_fired(revision, &mut host),
        Some(Transition::Filtering { count: 1 })
    );
    assert_eq!(engine.poll(&mut host), None);
    assert!(!engine.is_pending());
}

#[test]
fn threaded_cancel_never_fires() {
    let mut engine = SuggestionEngine::with_scheduler(
        display_projector::<&'static str>(),
        SuggestSettings::new().with_delay(Duration::from_millis(20)),
        ThreadedDebouncer::<Revision>::new().unwrap(),
    );
    let mut host = fruits();

    host.type_text("Ap");
    engine.on_text_changed(&mut host);
    assert!(engine.cancel_pending());

    std::thread::sleep(Duration::from_millis(80));
    assert_eq!(engine.poll(&mut host), None);
    assert!(!host.is_dropdown_open());
}
