// Poller - Runs dashboard cycles on a fixed interval
use crate::application::dashboard_service::{CycleReport, DashboardService};
use crate::application::dashboard_view::DashboardView;
use serde::Deserialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

/// What to do when the timer fires while an earlier cycle is still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Start the new cycle anyway; whichever response lands last wins.
    #[default]
    Allow,
    /// Drop the tick.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Fetching,
}

pub struct DashboardPoller<V> {
    service: Arc<DashboardService<V>>,
    interval: Duration,
    overlap: OverlapPolicy,
    in_flight: AtomicUsize,
    started: AtomicU64,
    skipped: AtomicU64,
}

impl<V: DashboardView + 'static> DashboardPoller<V> {
    pub fn new(service: DashboardService<V>, interval: Duration, overlap: OverlapPolicy) -> Self {
        Self {
            service: Arc::new(service),
            interval,
            overlap,
            in_flight: AtomicUsize::new(0),
            started: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
        }
    }

    #[cfg(test)]
    pub fn service(&self) -> &DashboardService<V> {
        &self.service
    }

    pub fn state(&self) -> CycleState {
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            CycleState::Fetching
        } else {
            CycleState::Idle
        }
    }

    pub fn cycles_started(&self) -> u64 {
        self.started.load(Ordering::SeqCst)
    }

    pub fn cycles_skipped(&self) -> u64 {
        self.skipped.load(Ordering::SeqCst)
    }

    /// First cycle immediately, then one per interval until `shutdown`
    /// resolves. Cycles still in flight at shutdown are left to finish.
    pub async fn run<F>(self: Arc<Self>, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tracing::info!(
            "Polling every {:?} (overlap: {:?})",
            self.interval,
            self.overlap
        );

        let mut ticks = IntervalStream::new(tokio::time::interval(self.interval));
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!(
                        "Poller stopping after {} cycles ({} skipped)",
                        self.cycles_started(),
                        self.cycles_skipped()
                    );
                    break;
                }
                tick = ticks.next() => {
                    if tick.is_none() {
                        break;
                    }
                    tracing::debug!("Tick while {:?}", self.state());
                    self.spawn_cycle();
                }
            }
        }
    }

    /// Start one cycle in the background. `None` when the overlap policy
    /// dropped it.
    pub fn spawn_cycle(self: &Arc<Self>) -> Option<JoinHandle<CycleReport>> {
        match self.overlap {
            OverlapPolicy::Allow => {
                self.in_flight.fetch_add(1, Ordering::SeqCst);
            }
            OverlapPolicy::Skip => {
                if self
                    .in_flight
                    .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
                    .is_err()
                {
                    self.skipped.fetch_add(1, Ordering::SeqCst);
                    tracing::warn!("Previous cycle still running, skipping this tick");
                    return None;
                }
            }
        }

        let cycle = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        let poller = Arc::clone(self);
        Some(tokio::spawn(async move {
            tracing::debug!("Cycle {} started", cycle);
            let report = poller.service.run_cycle().await;
            poller.in_flight.fetch_sub(1, Ordering::SeqCst);
            report
        }))
    }
}
