mod common;
use std::time::Duration;

use rewind::{Replay, ReplayEvent, sse_frame};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let store = common::load_fixture_store().await?;
    let replay = Replay::builder()
        .with_store(store)
        .heartbeat_interval(Duration::from_millis(500))
        .build()?;

    let ready = replay.start_random(Some(0.5)).await?;
    println!(
        "replaying {} ({} {} candles, timeframes {:?})",
        ready.date, ready.total_candles, ready.primary, ready.loaded_timeframes
    );

    let (handle, mut rx) = replay.stream().await?;
    replay.seek(ready.total_candles.saturating_sub(8)).await?;
    replay.play().await?;

    let printer = tokio::spawn(async move {
        let mut ticks = 0usize;
        while let Some(ev) = rx.recv().await {
            if let ReplayEvent::MultiTimeframeCandle { .. } = ev {
                ticks += 1;
            }
            match sse_frame(&ev) {
                Ok(frame) => print!("{frame}"),
                Err(e) => eprintln!("frame error: {e}"),
            }
            if ev.is_terminal() {
                break;
            }
        }
        ticks
    });

    let ticks = printer.await?;
    handle.stop().await;
    let status = replay.status().await;
    println!("{ticks} ticks, final index {}/{}", status.current_index, status.total_candles);
    replay.stop().await;
    Ok(())
}
