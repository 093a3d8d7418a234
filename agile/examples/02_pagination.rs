mod common;
use agile::{Agile, LoadOutcome, RatesState};
use agile::display::{DISPLAY_TZ, format_date_time};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=agile=debug shows every attempt, merge and skip.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .try_init();

    let (source, _mock) = common::get_source().await?;
    let agile = Agile::builder().with_source(source).build()?;

    // 1. Start a session and watch its state from another task.
    let session = agile.session();
    let mut rx = session.subscribe();
    let watcher = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            match &*rx.borrow_and_update() {
                RatesState::Loading => println!("state: loading"),
                RatesState::Success(rates) => println!("state: {} slots", rates.len()),
                RatesState::Error(msg) => println!("state: error: {msg}"),
            }
        }
    });

    // 2. Initial page, then walk back until the older cursor runs out.
    println!("initial: {:?}", session.initial_load().await);
    for _ in 0..3 {
        match session.load_older().await {
            LoadOutcome::Skipped(reason) => {
                println!("older: skipped ({reason:?})");
                break;
            }
            outcome => println!("older: {outcome:?}"),
        }
    }

    // 3. Show the covered range.
    let rates = session.snapshot().await;
    if let (Some(first), Some(last)) = (rates.first(), rates.last()) {
        println!(
            "{} slots from {} to {}",
            rates.len(),
            format_date_time(first.valid_from(), DISPLAY_TZ),
            format_date_time(last.valid_to(), DISPLAY_TZ)
        );
    }

    drop(session);
    watcher.await?;
    Ok(())
}
