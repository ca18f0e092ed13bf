use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use web_time::Instant;

use super::messages::{FetchRequest, FetchResult};
use crate::data::MarketDataProvider;

#[cfg(debug_assertions)]
use crate::config::DF;

/// Spawns a background thread that runs fetches one at a time on its own runtime.
/// The thread exits when the engine drops its request sender.
pub fn spawn_worker_thread(
    provider: Arc<dyn MarketDataProvider>,
    rx: Receiver<FetchRequest>,
    tx: Sender<FetchResult>,
) {
    let spawned = thread::Builder::new()
        .name("fetch-worker".into())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Fetch worker could not start its runtime: {}", e);
                    return;
                }
            };

            while let Ok(mut req) = rx.recv() {
                // Anything queued behind this request supersedes it; only the newest matters.
                while let Ok(newer) = rx.try_recv() {
                    #[cfg(debug_assertions)]
                    if DF.log_stale {
                        log::debug!(
                            "Worker: skipping superseded request #{} ({})",
                            req.generation,
                            req.params
                        );
                    }
                    req = newer;
                }

                let response = process_request(provider.as_ref(), &rt, req);
                if tx.send(response).is_err() {
                    break;
                }
            }
        });

    if let Err(e) = spawned {
        log::error!("Failed to spawn fetch worker: {}", e);
    }
}

fn process_request(
    provider: &dyn MarketDataProvider,
    rt: &tokio::runtime::Runtime,
    req: FetchRequest,
) -> FetchResult {
    #[cfg(debug_assertions)]
    if DF.log_fetch {
        log::info!(
            "FETCH #{} [{}] via {}",
            req.generation,
            req.params,
            provider.name()
        );
    }

    let start = Instant::now();
    let result = rt.block_on(provider.fetch(&req.params));
    let duration_ms = start.elapsed().as_millis();

    #[cfg(debug_assertions)]
    if DF.log_fetch {
        match &result {
            Ok(series) => log::info!(
                "FETCH #{} done: {} samples in {}ms",
                req.generation,
                series.len(),
                duration_ms
            ),
            Err(e) => log::info!("FETCH #{} failed in {}ms: {}", req.generation, duration_ms, e),
        }
    }

    FetchResult {
        generation: req.generation,
        params: req.params,
        provider: provider.name(),
        duration_ms,
        result,
    }
}
