//! Background refresh.
//!
//! Runs on a dedicated thread: checks connectivity, fetches every source,
//! and reports back over one [`mpsc`] channel.  That channel is the only
//! way results reach the UI, so every callback is handled in order on the
//! UI thread.
//!
//! The worker waits between cycles on a command channel, so a manual
//! refresh or shutdown takes effect immediately instead of after the sleep.

use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::connectivity::Connectivity;
use crate::error::FetchError;
use crate::source::{sort_newest_first, Article, ArticleSource};

/// How often to re-check the network while offline.
const OFFLINE_RECHECK: Duration = Duration::from_secs(5);

/// Messages sent from the worker to the UI thread.
#[derive(Debug)]
pub enum PollMsg {
    /// Network reachability; sent on the first check and on every change.
    Connectivity(bool),
    /// A fetch cycle is starting.
    Started,
    /// Articles from every source that succeeded this cycle, de-duplicated
    /// by id and sorted newest first.
    Articles(Vec<Article>),
    /// One source failed this cycle.
    Failed { source: String, error: FetchError },
    /// The network is down; no fetch was attempted.
    Offline,
    /// The fetch cycle is over.
    Finished,
}

/// Commands from the UI thread to the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollCommand {
    Refresh,
    Shutdown,
}

/// The UI thread's end of the worker.
pub struct PollHandle {
    pub messages: Receiver<PollMsg>,
    commands: Sender<PollCommand>,
}

impl PollHandle {
    /// Ask for a fetch now.  Ignored if the worker is gone.
    pub fn refresh(&self) {
        let _ = self.commands.send(PollCommand::Refresh);
    }

    /// Tell the worker to stop.  Does not wait: a fetch in flight is
    /// abandoned with the process.
    pub fn shutdown(self) {
        let _ = self.commands.send(PollCommand::Shutdown);
    }
}

/// Spawn the refresh worker.
///
/// The first cycle runs immediately.  The thread exits on
/// [`PollCommand::Shutdown`] or once the handle is dropped.
pub fn spawn(
    sources: Vec<Box<dyn ArticleSource>>,
    connectivity: Box<dyn Connectivity>,
    interval: Duration,
) -> PollHandle {
    spawn_with(sources, connectivity, interval, OFFLINE_RECHECK)
}

/// [`spawn`] with an explicit wait between connectivity checks while
/// offline.
pub fn spawn_with(
    sources: Vec<Box<dyn ArticleSource>>,
    connectivity: Box<dyn Connectivity>,
    interval: Duration,
    offline_recheck: Duration,
) -> PollHandle {
    let (msg_tx, msg_rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();

    let spawned = thread::Builder::new()
        .name("refresh".into())
        .spawn(move || {
            Worker {
                sources,
                connectivity,
                interval,
                offline_recheck,
                messages: msg_tx,
                commands: cmd_rx,
                online: None,
            }
            .run()
        });
    if let Err(e) = spawned {
        tracing::error!(error = %e, "could not spawn refresh thread; headlines will not update");
    }

    PollHandle {
        messages: msg_rx,
        commands: cmd_tx,
    }
}

struct Worker {
    sources: Vec<Box<dyn ArticleSource>>,
    connectivity: Box<dyn Connectivity>,
    interval: Duration,
    offline_recheck: Duration,
    messages: Sender<PollMsg>,
    commands: Receiver<PollCommand>,
    /// Last reported reachability.
    online: Option<bool>,
}

impl Worker {
    fn run(mut self) {
        tracing::info!(sources = self.sources.len(), interval = ?self.interval, "refresh worker started");
        loop {
            let wait = match self.cycle() {
                Some(wait) => wait,
                // Receiver dropped: the UI has exited.
                None => return,
            };
            match self.commands.recv_timeout(wait) {
                Ok(PollCommand::Refresh) => tracing::debug!("manual refresh"),
                Err(RecvTimeoutError::Timeout) => {}
                Ok(PollCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => {
                    tracing::info!("refresh worker stopping");
                    return;
                }
            }
        }
    }

    /// One connectivity check plus, when online, one fetch of every
    /// source.  Returns how long to wait before the next cycle, or `None`
    /// when the UI is gone.
    fn cycle(&mut self) -> Option<Duration> {
        let online = self.connectivity.is_connected();
        if self.online != Some(online) {
            tracing::info!(online, "network status changed");
            self.online = Some(online);
            self.send(PollMsg::Connectivity(online))?;
        }

        if !online {
            self.send(PollMsg::Offline)?;
            return Some(self.offline_recheck);
        }

        self.send(PollMsg::Started)?;
        let mut merged = Vec::new();
        let mut any_ok = false;
        for source in &self.sources {
            match source.fetch() {
                Ok(items) => {
                    tracing::info!(source = source.name(), count = items.len(), "fetched");
                    any_ok = true;
                    merged.extend(items);
                }
                Err(error) => {
                    tracing::warn!(source = source.name(), %error, "fetch failed");
                    let msg = PollMsg::Failed {
                        source: source.name().to_string(),
                        error,
                    };
                    self.messages.send(msg).ok()?;
                }
            }
        }
        if any_ok {
            self.send(PollMsg::Articles(merge(merged)))?;
        }
        self.send(PollMsg::Finished)?;
        Some(self.interval)
    }

    fn send(&self, msg: PollMsg) -> Option<()> {
        self.messages.send(msg).ok()
    }
}

/// De-duplicate by id (first occurrence wins) and sort newest first.
/// Articles without an id are kept as they cannot collide.
fn merge(items: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    let mut out: Vec<Article> = items
        .into_iter()
        .filter(|a| match a.id() {
            Some(id) => seen.insert(id.to_string()),
            None => true,
        })
        .collect();
    sort_newest_first(&mut out);
    out
}
