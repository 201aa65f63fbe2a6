//! Fetch-lifecycle state container shared by every resource family.
//!
//! A container owns one snapshot and publishes it through a `watch`
//! channel together with an in-flight flag and an error slot. Every async
//! operation goes through [`Container::run`], which applies the same rules:
//!
//! - starting an operation sets `pending` and clears `error`;
//! - success merges the result into the snapshot;
//! - failure records the message and leaves the snapshot untouched;
//! - `pending` stays set while any operation on the container is in flight.
//!
//! Operations are not cancelled or sequenced. A future that is dropped
//! before completion never settles, so its in-flight count is never
//! released.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;
use tokio::sync::watch;
use tracing::{Instrument, debug, info_span};

use crate::domain::Error;

/// Observable state of one container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerState<S> {
    /// Last successfully merged data.
    pub snapshot: S,
    /// Whether an operation is in flight.
    pub pending: bool,
    /// Message from the most recent rejected operation.
    pub error: Option<String>,
}

/// A snapshot plus lifecycle bookkeeping, shared behind an `Arc`.
#[derive(Debug)]
pub struct Container<S> {
    name: &'static str,
    state: watch::Sender<ContainerState<S>>,
    in_flight: AtomicUsize,
}

impl<S> Container<S>
where
    S: Clone + Default + Send + Sync,
{
    /// Empty container labelled `name` in logs.
    pub fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(ContainerState::default());
        Self {
            name,
            state,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Container label.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Copy of the current state.
    pub fn state(&self) -> ContainerState<S> {
        self.state.borrow().clone()
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> S {
        self.state.borrow().snapshot.clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ContainerState<S>> {
        self.state.subscribe()
    }

    /// Run `work` through the lifecycle and merge its output on success.
    ///
    /// `merge` runs under the state lock and its return value is handed back
    /// to the caller.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, after recording its message in
    /// the error slot.
    pub async fn run<T, R, W, M>(&self, operation: &'static str, work: W, merge: M) -> Result<R, Error>
    where
        W: Future<Output = Result<T, Error>>,
        M: FnOnce(&mut S, T) -> R,
    {
        let span = info_span!("store.operation", container = self.name, operation);
        async {
            self.begin();
            let outcome = work.await;
            self.settle(operation, outcome, merge)
        }
        .instrument(span)
        .await
    }

    /// Apply a synchronous change to the snapshot.
    pub fn update(&self, change: impl FnOnce(&mut S)) {
        self.state.send_modify(|state| change(&mut state.snapshot));
    }

    /// Apply `change` to the snapshot and clear the error slot.
    ///
    /// `pending` keeps tracking operations still in flight, which settle
    /// into the reset snapshot.
    pub fn reset(&self, change: impl FnOnce(&mut S)) {
        self.state.send_modify(|state| {
            change(&mut state.snapshot);
            state.pending = self.in_flight.load(Ordering::SeqCst) > 0;
            state.error = None;
        });
    }

    fn begin(&self) {
        self.state.send_modify(|state| {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            state.pending = true;
            state.error = None;
        });
    }

    fn release(&self, state: &mut ContainerState<S>) {
        let previous = self
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                Some(count.saturating_sub(1))
            })
            .unwrap_or_default();
        state.pending = previous > 1;
    }

    fn settle<T, R>(
        &self,
        operation: &'static str,
        outcome: Result<T, Error>,
        merge: impl FnOnce(&mut S, T) -> R,
    ) -> Result<R, Error> {
        match outcome {
            Ok(value) => {
                let mut output = None;
                self.state.send_modify(|state| {
                    output = Some(merge(&mut state.snapshot, value));
                    self.release(state);
                });
                debug!(container = self.name, operation, "operation fulfilled");
                output.ok_or_else(|| Error::internal("state merge did not run"))
            }
            Err(err) => {
                self.state.send_modify(|state| {
                    state.error = Some(err.message().to_owned());
                    self.release(state);
                });
                debug!(container = self.name, operation, error = %err, "operation rejected");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Lifecycle coverage: flags, error slot and merge rules.
    use std::sync::Arc;

    use super::*;
    use rstest::{fixture, rstest};
    use tokio::sync::oneshot;

    type Numbers = Container<Vec<u32>>;

    #[fixture]
    fn container() -> Arc<Numbers> {
        Arc::new(Container::new("numbers"))
    }

    fn replace(snapshot: &mut Vec<u32>, value: Vec<u32>) -> usize {
        *snapshot = value;
        snapshot.len()
    }

    #[rstest]
    #[tokio::test]
    async fn starts_empty_and_idle(container: Arc<Numbers>) {
        assert_eq!(container.state(), ContainerState::default());
    }

    #[rstest]
    #[tokio::test]
    async fn fulfilled_operations_merge_and_clear_flags(container: Arc<Numbers>) {
        let len = container
            .run("fetch", async { Ok(vec![1, 2, 3]) }, replace)
            .await
            .expect("operation succeeds");
        assert_eq!(len, 3);
        assert_eq!(
            container.state(),
            ContainerState {
                snapshot: vec![1, 2, 3],
                pending: false,
                error: None,
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn rejected_operations_keep_the_snapshot(container: Arc<Numbers>) {
        container.update(|numbers| numbers.push(7));
        let err = container
            .run(
                "fetch",
                async { Err::<Vec<u32>, _>(Error::service_unavailable("Failed to fetch")) },
                replace,
            )
            .await
            .expect_err("operation fails");
        assert_eq!(err.message(), "Failed to fetch");
        let state = container.state();
        assert_eq!(state.snapshot, vec![7]);
        assert!(!state.pending);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch"));
    }

    #[rstest]
    #[tokio::test]
    async fn starting_an_operation_clears_the_previous_error(container: Arc<Numbers>) {
        let _ = container
            .run("fetch", async { Err::<Vec<u32>, _>(Error::internal("boom")) }, replace)
            .await;
        let mut watcher = container.subscribe();
        let (release, gate) = oneshot::channel::<Vec<u32>>();
        let running = Arc::clone(&container);
        let task = tokio::spawn(async move {
            running
                .run(
                    "fetch",
                    async move { gate.await.map_err(|_| Error::internal("gate dropped")) },
                    replace,
                )
                .await
        });

        let mid_flight = watcher
            .wait_for(|state| state.pending)
            .await
            .expect("container alive")
            .clone();
        assert!(mid_flight.error.is_none());

        release.send(vec![4]).expect("task waiting");
        task.await.expect("task joins").expect("operation succeeds");
        assert!(!container.state().pending);
    }

    #[rstest]
    #[tokio::test]
    async fn pending_stays_set_while_any_operation_is_in_flight(container: Arc<Numbers>) {
        let mut watcher = container.subscribe();
        let (first_tx, first_rx) = oneshot::channel::<Vec<u32>>();
        let (second_tx, second_rx) = oneshot::channel::<Vec<u32>>();

        let spawn = |gate: oneshot::Receiver<Vec<u32>>| {
            let running = Arc::clone(&container);
            tokio::spawn(async move {
                running
                    .run(
                        "fetch",
                        async move { gate.await.map_err(|_| Error::internal("gate dropped")) },
                        replace,
                    )
                    .await
            })
        };
        let first = spawn(first_rx);
        let second = spawn(second_rx);
        watcher.wait_for(|state| state.pending).await.expect("alive");
        while container.in_flight.load(Ordering::SeqCst) < 2 {
            tokio::task::yield_now().await;
        }

        first_tx.send(vec![1]).expect("first waiting");
        first.await.expect("join").expect("first succeeds");
        assert!(container.state().pending, "second call still in flight");

        second_tx.send(vec![2]).expect("second waiting");
        second.await.expect("join").expect("second succeeds");
        let state = container.state();
        assert!(!state.pending);
        assert_eq!(state.snapshot, vec![2], "last settlement wins");
    }

    #[rstest]
    #[tokio::test]
    async fn reset_clears_error_and_pending(container: Arc<Numbers>) {
        let _ = container
            .run("fetch", async { Err::<Vec<u32>, _>(Error::internal("boom")) }, replace)
            .await;
        container.update(|numbers| numbers.push(1));
        container.reset(Vec::clear);
        assert_eq!(container.state(), ContainerState::default());
    }

    #[rstest]
    #[tokio::test]
    async fn reset_keeps_pending_while_an_operation_is_outstanding(container: Arc<Numbers>) {
        let mut watcher = container.subscribe();
        let (release, gate) = oneshot::channel::<Vec<u32>>();
        let running = Arc::clone(&container);
        let task = tokio::spawn(async move {
            running
                .run(
                    "fetch",
                    async move { gate.await.map_err(|_| Error::internal("gate dropped")) },
                    replace,
                )
                .await
        });
        watcher.wait_for(|state| state.pending).await.expect("alive");

        container.reset(Vec::clear);
        let state = container.state();
        assert!(state.pending, "outstanding fetch still counts");
        assert!(state.snapshot.is_empty());

        release.send(vec![3]).expect("task waiting");
        task.await.expect("join").expect("fetch succeeds");
        let settled = container.state();
        assert!(!settled.pending);
        assert_eq!(settled.snapshot, vec![3]);
    }
}
