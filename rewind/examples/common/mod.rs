use rewind::{LoadProgress, SeriesStore, load_store};
use rewind_mock::MockLoader;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Load the fixture days through the mock loader, printing progress as it goes.
pub async fn load_fixture_store() -> Result<SeriesStore, Box<dyn std::error::Error>> {
    let loader = MockLoader::default();
    let (tx, mut rx) = watch::channel(LoadProgress::default());

    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let p = rx.borrow_and_update().clone();
            println!("[{:>5.1}%] {}", p.percentage, p.message);
            if p.ready {
                break;
            }
        }
    });

    let store = load_store(&loader, &tx).await?;
    drop(tx);
    let _ = printer.await;
    Ok(store)
}
