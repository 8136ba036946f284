use async_trait::async_trait;
use futures::future::join_all;
use futures::{FutureExt, StreamExt, stream};
use log::debug;

use crate::config::Strategy;
use crate::core::FetchOutcome;
use crate::fetching::FetchPage;

/// Called once per URL with its row index, the URL and its outcome
pub type OnFetched<'a> = dyn FnMut(usize, &str, &FetchOutcome) + Send + 'a;

/// Schedules the fetches for a whole URL list.
///
/// Implementations must fetch every URL exactly once and return one outcome
/// per input URL, in input order, whatever order the fetches finish in.
#[async_trait]
pub trait DriveFetches: Send + Sync {
    async fn drive(
        &self,
        fetcher: &dyn FetchPage,
        urls: &[String],
        on_fetched: &mut OnFetched<'_>,
    ) -> Vec<FetchOutcome>;
}

/// At most `workers` fetches in flight at any time.
///
/// `on_fetched` fires as each fetch completes, in completion order.
#[derive(Debug, Clone, Copy)]
pub struct BoundedPool {
    workers: usize,
}

impl BoundedPool {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
}

#[async_trait]
impl DriveFetches for BoundedPool {
    async fn drive(
        &self,
        fetcher: &dyn FetchPage,
        urls: &[String],
        on_fetched: &mut OnFetched<'_>,
    ) -> Vec<FetchOutcome> {
        debug!(
            "Fetching {} URL(s) with a pool of {} worker(s)",
            urls.len(),
            self.workers
        );

        let fetches: Vec<_> = urls
            .iter()
            .enumerate()
            .map(|(index, url)| fetcher.fetch(url).map(move |outcome| (index, outcome)))
            .collect();
        let mut completed = stream::iter(fetches).buffer_unordered(self.workers);

        // One slot per row, each written exactly once
        let mut slots: Vec<Option<FetchOutcome>> = vec![None; urls.len()];
        while let Some((index, outcome)) = completed.next().await {
            on_fetched(index, &urls[index], &outcome);
            slots[index] = Some(outcome);
        }

        slots.into_iter().flatten().collect()
    }
}

/// Every fetch started at once on the calling task, then joined.
///
/// There is no cap on simultaneous requests, so a long URL list opens as many
/// sockets as it has URLs. `on_fetched` fires after the join, in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnboundedJoin;

#[async_trait]
impl DriveFetches for UnboundedJoin {
    async fn drive(
        &self,
        fetcher: &dyn FetchPage,
        urls: &[String],
        on_fetched: &mut OnFetched<'_>,
    ) -> Vec<FetchOutcome> {
        debug!("Fetching {} URL(s) all at once", urls.len());

        let outcomes = join_all(urls.iter().map(|url| fetcher.fetch(url))).await;

        for (index, (url, outcome)) in urls.iter().zip(&outcomes).enumerate() {
            on_fetched(index, url, outcome);
        }

        outcomes
    }
}

impl Strategy {
    /// Build the driver for this strategy
    pub fn driver(self) -> Box<dyn DriveFetches> {
        match self {
            Strategy::Pool { workers } => Box::new(BoundedPool::new(workers)),
            Strategy::Unbounded => Box::new(UnboundedJoin),
        }
    }
}
