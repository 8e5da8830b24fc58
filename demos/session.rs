//! Walks through a viewing session: load saved progress, mark summits, share
//! the link, and open it on a second "device".
//!
//! Run with `RUST_LOG=debug cargo run --example session` to see the log
//! events emitted along the way.

use summit_stamp::session::{MemoryStore, SaveOutcome, Session, SessionConfig, Store};

const PAGE: &str = "https://example.org/hannou100/";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("=== Visited summits session ===\n");

    let mut store = MemoryStore::new();
    let mut mine = Session::open(SessionConfig::default(), PAGE, &store);
    println!("Opened {:?} session: {}", mine.origin(), mine.visited_label());

    for id in [1, 50, 112] {
        mine.toggle(id, true);
    }
    println!("Marked summits 1, 50 and 112: {}", mine.visited_label());
    println!("Share link: {}", mine.share_link());

    match mine.save(&mut store) {
        Ok(SaveOutcome::Saved) => println!("Saved progress locally\n"),
        Ok(SaveOutcome::NeedsConfirmation) => println!("Save needs confirmation\n"),
        Err(never) => match never {},
    }

    // A friend opens the link with their own, different progress saved
    let mut friend_store = MemoryStore::new();
    let _ = friend_store.save("hannou100", "7");
    let mut friend = Session::open(SessionConfig::default(), &mine.share_link(), &friend_store);
    println!(
        "Friend opened {:?} session: {}",
        friend.origin(),
        friend.visited_label()
    );
    if let Some(back) = friend.back_to_local_link() {
        println!("Back to own progress: {back}");
    }

    if friend.save(&mut friend_store) == Ok(SaveOutcome::NeedsConfirmation) {
        println!("Saving would overwrite the friend's own progress; confirming");
        let _ = friend.confirm_save(&mut friend_store);
    }
    println!(
        "Friend's store now holds {:?} ({:?} session)",
        friend_store.load("hannou100"),
        friend.origin()
    );

    // A mangled link never blocks the map, it just shows no marks
    let mangled = format!("{PAGE}?stamp=!!!garbage!!!");
    let broken = Session::open(SessionConfig::default(), &mangled, &MemoryStore::new());
    println!(
        "\nMangled link opened as {:?} session: {}",
        broken.origin(),
        broken.visited_label()
    );
}
