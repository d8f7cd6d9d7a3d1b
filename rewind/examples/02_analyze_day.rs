mod common;
use chrono_tz::Asia::Taipei;
use rewind::{GapStatus, MarketCalendar, Replay, Timeframe};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let store = common::load_fixture_store().await?;
    let replay = Replay::builder().with_store(store).build()?;

    let Some(date) = replay.random_date(&mut rand::rng()) else {
        println!("no usable date in store");
        return Ok(());
    };

    let calendar = MarketCalendar;
    let hours = calendar.market_hours(date, Taipei)?;
    let info = calendar.holiday_info(date);
    println!(
        "{date}: {:?}, session {} - {} Taipei (dst: {}), next trading day {}",
        info.status,
        hours.open.format("%H:%M"),
        hours.close.format("%H:%M"),
        hours.is_dst,
        calendar.next_trading_day(date)
    );

    for tf in [Timeframe::M1, Timeframe::M5, Timeframe::M15, Timeframe::H1] {
        let report = replay.analyze(tf, date)?;
        let valid = report
            .fair_value_gaps
            .iter()
            .filter(|g| g.status == GapStatus::Valid)
            .count();
        println!(
            "{tf}: {} candles, {} gaps ({valid} valid), continuous: {}, integrity ok: {}",
            report.candle_count,
            report.fair_value_gaps.len(),
            report.continuity.is_continuous,
            report.integrity.valid
        );
    }
    Ok(())
}
