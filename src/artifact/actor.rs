//! Artifact Actor: Dedicated thread that owns an artifact.
//!
//! Stream parts, interactions and version changes from any thread are
//! serialized through one bounded inbox. The actor handles each event to
//! completion before taking the next, so all mutation of the artifact
//! happens on a single thread.

use super::artifact::Artifact;
use super::kind::ArtifactKind;
use super::messages::{ArtifactEvent, EventResult};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use serde::Deserialize;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, trace};

/// Actor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    /// Capacity of the event inbox.
    pub inbox_capacity: usize,
    /// Capacity of the update channel.
    pub updates_capacity: usize,
    /// How often the loop checks the shutdown flag while idle.
    pub poll_interval: Duration,
    /// Name of the actor thread.
    pub thread_name: String,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: 256,
            updates_capacity: 256,
            poll_interval: Duration::from_millis(10),
            thread_name: "quizflow-artifact".to_string(),
        }
    }
}

/// Published after every handled event.
#[derive(Debug, Clone)]
pub struct ArtifactUpdate<O> {
    /// Event number, starting at 0.
    pub sequence: u64,
    /// What the event did.
    pub result: EventResult<O>,
    /// Whether the artifact is visible.
    pub visible: bool,
    /// Index of the viewed version.
    pub version_index: usize,
    /// Number of committed versions.
    pub version_count: usize,
}

/// Actor that owns an artifact on its own thread.
pub struct ArtifactActor<K: ArtifactKind> {
    /// Handle to the actor thread; yields the artifact on exit.
    handle: Option<JoinHandle<Artifact<K>>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Sender for events.
    inbox: Option<Sender<ArtifactEvent<K::Action>>>,
    /// Receiver for updates.
    updates: Receiver<ArtifactUpdate<K::Outcome>>,
}

impl<K: ArtifactKind> ArtifactActor<K> {
    /// Spawn an actor that takes ownership of `artifact`.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(artifact: Artifact<K>, config: &ActorConfig) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let (inbox_tx, inbox_rx) = bounded(config.inbox_capacity);
        let (update_tx, update_rx) = bounded(config.updates_capacity);
        let poll_interval = config.poll_interval;

        let handle = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || {
                Self::run_loop(artifact, &inbox_rx, &update_tx, &shutdown_clone, poll_interval)
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            inbox: Some(inbox_tx),
            updates: update_rx,
        })
    }

    /// Queue an event, waiting for inbox space.
    ///
    /// Stream parts must use this so no fragment is lost. Returns `false`
    /// if the actor has stopped.
    pub fn send(&self, event: ArtifactEvent<K::Action>) -> bool {
        self.inbox
            .as_ref()
            .is_some_and(|inbox| inbox.send(event).is_ok())
    }

    /// Queue an event without blocking. Returns `false` if the inbox is
    /// full or the actor has stopped.
    pub fn try_send(&self, event: ArtifactEvent<K::Action>) -> bool {
        let Some(inbox) = &self.inbox else {
            return false;
        };
        match inbox.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!("artifact inbox full");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Get a reference to the update receiver.
    #[inline]
    pub const fn updates(&self) -> &Receiver<ArtifactUpdate<K::Outcome>> {
        &self.updates
    }

    /// Signal the actor to stop after the current event.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Stop accepting events, drain the inbox and return the artifact.
    ///
    /// Returns `None` if the actor thread panicked.
    pub fn join(mut self) -> Option<Artifact<K>> {
        // Closing the inbox ends the loop once queued events are handled
        self.inbox = None;
        self.handle.take().and_then(|handle| handle.join().ok())
    }

    /// Main actor loop.
    fn run_loop(
        mut artifact: Artifact<K>,
        inbox: &Receiver<ArtifactEvent<K::Action>>,
        updates: &Sender<ArtifactUpdate<K::Outcome>>,
        shutdown: &Arc<AtomicBool>,
        poll_interval: Duration,
    ) -> Artifact<K> {
        let mut sequence = 0u64;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let event = match inbox.recv_timeout(poll_interval) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            };

            let result = artifact.handle(event);
            let update = ArtifactUpdate {
                sequence,
                result,
                visible: artifact.is_visible(),
                version_index: artifact.history().current_index(),
                version_count: artifact.history().len(),
            };
            sequence += 1;

            // Updates are notifications; a slow observer misses some
            if updates.try_send(update).is_err() {
                trace!(sequence, "update dropped");
            }
        }

        debug!(events = sequence, "artifact actor stopped");
        artifact
    }
}

impl<K: ArtifactKind> Drop for ArtifactActor<K> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
