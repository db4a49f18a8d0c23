//! Simulated typing session against a list of apple varieties.
//!
//! Keystrokes arrive faster than the debounce delay, so only the pauses in
//! typing trigger a recomputation. A timer thread measures the delay and
//! wakes the "UI" loop, which then runs the recomputation itself.
//!
//! Run with:
//!
//! ```sh
//! RUST_LOG=horizon_suggest=debug cargo run -p horizon-suggest --example typing
//! ```

use std::thread;
use std::time::Duration;

use horizon_suggest::prelude::*;
use horizon_suggest::Revision;
use tracing_subscriber::EnvFilter;

const VARIETIES: &[&str] = &[
    "Ambrosia",
    "Braeburn",
    "Cortland",
    "Cox's Orange Pippin",
    "Empire",
    "Fuji",
    "Gala",
    "Golden Delicious",
    "Granny Smith",
    "Honeycrisp",
    "Jazz",
    "Jonagold",
    "McIntosh",
    "Pink Lady",
    "Red Delicious",
];

const SETTINGS: &str = r#"
delay_ms = 120
max_suggestion_count = 4
escape_as_like = true
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("horizon_suggest=debug")),
        )
        .init();

    let settings = SuggestSettings::from_toml_str(SETTINGS)?;
    println!("settings: {settings:?}");

    let ui_thread = thread::current();
    let scheduler = ThreadedDebouncer::<Revision>::with_waker(move || ui_thread.unpark())?;
    let mut engine =
        SuggestionEngine::with_scheduler(display_projector::<&'static str>(), settings, scheduler);
    let mut host = ListHost::new(VARIETIES.to_vec());

    engine.suggestions_shown.connect(|count| println!("  -> showing {count} suggestion(s)"));
    engine
        .suggestions_suppressed
        .connect(|count| println!("  -> more than {} matches, dropdown suppressed", count - 1));

    // (text, pause after the keystroke)
    let keystrokes = [
        ("d", 30),
        ("de", 200),
        ("g", 30),
        ("go", 30),
        ("gol", 200),
        ("", 200),
        ("r d", 200),
    ];

    for (text, pause_ms) in keystrokes {
        println!("typed {text:?}");
        host.type_text(text);
        if let Some(transition) = engine.on_text_changed(&mut host) {
            println!("  {transition:?}");
        }

        let pause = Duration::from_millis(pause_ms);
        let started = std::time::Instant::now();
        while let Some(remaining) = pause.checked_sub(started.elapsed()) {
            thread::park_timeout(remaining);
            if let Some(transition) = engine.poll(&mut host) {
                println!("  {transition:?} (state {:?})", engine.state());
                if host.is_dropdown_open() {
                    println!("  dropdown: {:?}", host.visible_items());
                }
            }
        }
    }

    // Ctrl+Space: show everything matching the current text.
    host.type_text("a");
    engine.cancel_pending();
    println!("ctrl+space on {:?}: {:?}", host.text(), engine.open_dropdown(&mut host));
    println!("  dropdown: {:?}", host.visible_items());

    Ok(())
}
