// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Running slow image preparation off the drawing thread.

An [`Acquisition`] runs a job on its own named thread and hands the result
back over a channel. The caller polls (or waits with a timeout) and redraws on
its own thread once the result is in. Cancellation is cooperative: the job
sees a [`CancelToken`] and should give up early when it is set; any result
that arrives after cancelling is discarded.
 */

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, TryRecvError};
use crossbeam_utils::atomic::AtomicCell;
use log::{debug, trace};
use scopeguard::defer_on_unwind;

/// Lets a running job know whether anyone still wants its result.
#[derive(Clone, Debug)]
pub struct CancelToken(Arc<AtomicCell<bool>>);

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        self.0.load()
    }
}

/// The state of an [`Acquisition`].
#[derive(Debug)]
pub enum Poll<T, E> {
    /// Still running.
    Pending,

    /// Finished; here is what the job returned.
    Ready(Result<T, E>),

    /// Cancelled before a result was collected.
    Cancelled,

    /// The worker went away without sending anything (it panicked), or the
    /// result was already collected.
    Lost,
}

/// A job running on a background thread.
#[derive(Debug)]
pub struct Acquisition<T, E> {
    name: String,
    rx: Receiver<Result<T, E>>,
    cancelled: Arc<AtomicCell<bool>>,
    handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static, E: Send + 'static> Acquisition<T, E> {
    /// Start `job` on a new thread called `name`.
    pub fn spawn<F>(name: &str, job: F) -> std::io::Result<Acquisition<T, E>>
    where
        F: FnOnce(&CancelToken) -> Result<T, E> + Send + 'static,
    {
        // Only one message is ever sent; the worker never blocks on it.
        let (tx, rx) = bounded(1);
        let cancelled = Arc::new(AtomicCell::new(false));
        let token = CancelToken(Arc::clone(&cancelled));
        let thread_name = name.to_string();
        let handle = thread::Builder::new().name(name.to_string()).spawn(move || {
            // A panicking job counts as a cancelled one.
            defer_on_unwind! { token.0.store(true); }
            debug!("Started background job '{thread_name}'");
            let result = job(&token);
            // If the receiver has gone, nobody wants the result.
            if tx.send(result).is_err() {
                trace!("Background job '{thread_name}' finished after its handle was dropped");
            }
        })?;

        Ok(Acquisition {
            name: name.to_string(),
            rx,
            cancelled,
            handle: Some(handle),
        })
    }

    /// Ask the job to stop, and discard any result it produces.
    pub fn cancel(&self) {
        debug!("Cancelling background job '{}'", self.name);
        self.cancelled.store(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load()
    }

    /// Check on the job without blocking.
    pub fn poll(&mut self) -> Poll<T, E> {
        match self.rx.try_recv() {
            Ok(result) => self.finish(result),
            Err(TryRecvError::Empty) if self.is_cancelled() => Poll::Cancelled,
            Err(TryRecvError::Empty) => Poll::Pending,
            Err(TryRecvError::Disconnected) => self.lost(),
        }
    }

    /// Block for up to `timeout` waiting for the job.
    pub fn wait(&mut self, timeout: Duration) -> Poll<T, E> {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => self.finish(result),
            Err(RecvTimeoutError::Timeout) if self.is_cancelled() => Poll::Cancelled,
            Err(RecvTimeoutError::Timeout) => Poll::Pending,
            Err(RecvTimeoutError::Disconnected) => self.lost(),
        }
    }

    fn finish(&mut self, result: Result<T, E>) -> Poll<T, E> {
        self.join();
        if self.is_cancelled() {
            Poll::Cancelled
        } else {
            debug!("Background job '{}' is done", self.name);
            Poll::Ready(result)
        }
    }

    fn lost(&mut self) -> Poll<T, E> {
        self.join();
        if self.is_cancelled() {
            Poll::Cancelled
        } else {
            Poll::Lost
        }
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                self.cancelled.store(true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_job_result_arrives() {
        let mut job = Acquisition::<u32, String>::spawn("adder", |_| Ok(2 + 2)).unwrap();
        let result = loop {
            match job.wait(Duration::from_millis(100)) {
                Poll::Pending => continue,
                Poll::Ready(r) => break r,
                p => panic!("unexpected {p:?}"),
            }
        };
        assert_eq!(result, Ok(4));
        // There is only one result.
        assert!(matches!(job.poll(), Poll::Lost));
    }

    #[test]
    fn test_job_error_arrives() {
        let mut job =
            Acquisition::<(), String>::spawn("failer", |_| Err("no image".to_string())).unwrap();
        match job.wait(Duration::from_secs(10)) {
            Poll::Ready(Err(e)) => assert_eq!(e, "no image"),
            p => panic!("unexpected {p:?}"),
        }
    }

    #[test]
    fn test_cancel() {
        let (started_tx, started_rx) = bounded(1);
        let mut job = Acquisition::<u32, String>::spawn("slow", move |token| {
            started_tx.send(()).unwrap();
            let start = Instant::now();
            while !token.is_cancelled() {
                if start.elapsed() > Duration::from_secs(10) {
                    return Ok(0);
                }
                thread::sleep(Duration::from_millis(1));
            }
            Err("cancelled".to_string())
        })
        .unwrap();
        started_rx.recv().unwrap();
        assert!(matches!(job.poll(), Poll::Pending));

        job.cancel();
        assert!(job.is_cancelled());
        // Whatever the job does now, its result is thrown away.
        for _ in 0..100 {
            match job.wait(Duration::from_millis(100)) {
                Poll::Cancelled => continue,
                p => panic!("unexpected {p:?}"),
            }
        }
    }

    #[test]
    fn test_panicking_job_is_lost() {
        let mut job = Acquisition::<u32, String>::spawn("panicker", |_| panic!("oops")).unwrap();
        loop {
            match job.wait(Duration::from_millis(100)) {
                Poll::Pending => continue,
                Poll::Cancelled | Poll::Lost => break,
                p => panic!("unexpected {p:?}"),
            }
        }
    }
}
