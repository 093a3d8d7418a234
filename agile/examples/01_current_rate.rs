mod common;
use agile::Agile;
use agile::display::{DISPLAY_TZ, format_date_time, format_time};
use chrono::Utc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Pick the source (mock in CI when AGILE_EXAMPLES_USE_MOCK is set).
    let (source, _mock) = common::get_source().await?;

    // 2. Build the orchestrator with the default retry policy.
    let agile = Agile::builder().with_source(source).build()?;

    // 3. One-shot refresh, as a home-screen widget would do it.
    let now = Utc::now();
    let rates = agile.widget_rates(now).await;

    if let Some(err) = &rates.error {
        println!("{err}");
        return Ok(());
    }

    // 4. Print in UK local time.
    match &rates.current {
        Some(r) => println!(
            "Now:    {:>6}p  until {}",
            r.value_inc_vat().round_dp(2),
            format_time(r.valid_to(), DISPLAY_TZ)
        ),
        None => println!("Now:    no rate published for {}", format_time(now, DISPLAY_TZ)),
    }
    if let Some(r) = &rates.next {
        println!(
            "Next:   {:>6}p  from  {}",
            r.value_inc_vat().round_dp(2),
            format_time(r.valid_from(), DISPLAY_TZ)
        );
    }
    if let Some(r) = &rates.lowest_next_24h {
        println!(
            "Lowest: {:>6}p  at    {}",
            r.value_inc_vat().round_dp(2),
            format_date_time(r.valid_from(), DISPLAY_TZ)
        );
    }

    Ok(())
}
