use std::sync::Arc;

use chrono::NaiveDate;
use tarifa::Tarifa;
use tarifa_mock::MockStore;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,tarifa=debug,tarifa_core=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    // 1. Build the orchestrator over the fixture store, with Madrid events only.
    let tarifa = Tarifa::builder()
        .with_store(Arc::new(MockStore::new()))
        .event_location("Madrid")
        .build()?;

    // 2. Canonical daily series.
    let series = tarifa.daily_series("Grand Hotel").await?;
    for entry in &series.entries {
        println!("{}  {:>10}  {:?}", entry.date, entry.price, entry.kind);
    }
    for warning in &series.warnings {
        println!("skipped: {warning}");
    }

    // 3. Recommendations for an event day.
    let date = NaiveDate::from_ymd_opt(2024, 5, 10).ok_or("invalid date")?;
    let report = tarifa.recommendations_for_date("Grand Hotel", date).await?;
    for rec in &report.recommendations {
        println!(
            "{} ({}): {} -> {} [{} +{}%]",
            rec.observation_id,
            rec.room_type.as_deref().unwrap_or("-"),
            rec.base_price,
            rec.adjusted_price,
            rec.classification,
            rec.percent_increase,
        );
    }

    // 4. Accept them and show the effect on the series.
    let applied = tarifa.accept_recommendations(&report.recommendations).await?;
    println!(
        "applied {}, skipped {}, failed {}",
        applied.applied,
        applied.skipped,
        applied.failures.len()
    );
    let summary = tarifa.property_summary("Grand Hotel").await?;
    println!("{summary:#?}");

    Ok(())
}
