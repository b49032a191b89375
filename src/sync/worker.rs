//! Background sheet writer.
//!
//! A fixed number of worker threads share one job queue. `submit` returns
//! immediately with a `WriteHandle`; the handle is the only way to learn
//! whether the row reached the sheet. Writes still queued when the process
//! dies are lost, and nothing orders them against later local changes.

use super::outcome::{SyncError, SyncOutcome};
use crate::models::sheet_row::SheetRow;
use crate::store::StoreTarget;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

type Reply = Result<(), SyncError>;

struct Job {
    row: SheetRow,
    reply: Sender<Reply>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Pending,
    Delivered,
    Failed,
}

/// Ticket for one submitted row.
pub struct WriteHandle {
    pub id: String,
    rx: Receiver<Reply>,
    result: Option<Reply>,
}

impl WriteHandle {
    /// Non-blocking check.
    pub fn poll(&mut self) -> WriteStatus {
        if self.result.is_none() {
            match self.rx.try_recv() {
                Ok(r) => self.result = Some(r),
                Err(TryRecvError::Empty) => return WriteStatus::Pending,
                Err(TryRecvError::Disconnected) => self.result = Some(Err(SyncError::WorkerGone)),
            }
        }
        match &self.result {
            Some(Ok(())) => WriteStatus::Delivered,
            Some(Err(_)) => WriteStatus::Failed,
            None => WriteStatus::Pending,
        }
    }

    /// Block until the worker answers.
    pub fn wait(mut self) -> SyncOutcome<bool> {
        let r = match self.result.take() {
            Some(r) => r,
            None => self.rx.recv().unwrap_or(Err(SyncError::WorkerGone)),
        };
        match r {
            Ok(()) => SyncOutcome::done(true),
            Err(e) => SyncOutcome::failed(e),
        }
    }
}

pub struct BackgroundWriter {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl BackgroundWriter {
    pub fn spawn(target: StoreTarget, size: usize) -> Self {
        let (tx, rx) = mpsc::channel::<Job>();
        let rx = Arc::new(Mutex::new(rx));

        let workers = (0..size.max(1))
            .map(|_| {
                let rx = Arc::clone(&rx);
                let target = target.clone();
                thread::spawn(move || worker_loop(rx, target))
            })
            .collect();

        Self {
            sender: Some(tx),
            workers,
        }
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    pub fn submit(&self, row: SheetRow) -> WriteHandle {
        let (reply, rx) = mpsc::channel();
        let id = row.id.clone();

        let queued = match &self.sender {
            Some(tx) => tx.send(Job { row, reply }).is_ok(),
            None => false,
        };

        let result = if queued {
            None
        } else {
            Some(Err(SyncError::WorkerGone))
        };

        WriteHandle { id, rx, result }
    }

    /// Stop accepting jobs, let the queue drain, join the workers.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.sender.take();
        for w in self.workers.drain(..) {
            let _ = w.join();
        }
    }
}

impl Drop for BackgroundWriter {
    fn drop(&mut self) {
        self.stop();
    }
}

fn worker_loop(rx: Arc<Mutex<Receiver<Job>>>, target: StoreTarget) {
    loop {
        let job = {
            let guard = match rx.lock() {
                Ok(g) => g,
                Err(_) => break,
            };
            guard.recv()
        };

        let Ok(job) = job else {
            break;
        };

        let result = if target.is_off() {
            Err(SyncError::Offline)
        } else {
            target
                .open()
                .and_then(|mut s| s.append_row(&job.row))
                .map_err(SyncError::from)
        };

        // Receiver may already be gone: nobody is waiting for this write.
        let _ = job.reply.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{RowStore, SqliteRowStore};

    fn row(id: &str) -> SheetRow {
        SheetRow {
            id: id.into(),
            name: format!("guest {id}"),
            ..Default::default()
        }
    }

    #[test]
    fn pool_delivers_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.sqlite");
        // create the schema up front so workers do not race on it
        SqliteRowStore::open(&path).unwrap();

        let writer = BackgroundWriter::spawn(StoreTarget::Sqlite(path.clone()), 3);
        assert_eq!(writer.size(), 3);

        let handles: Vec<_> = (0..10).map(|i| writer.submit(row(&i.to_string()))).collect();
        for h in handles {
            let out = h.wait();
            assert!(out.value, "write failed: {:?}", out.issue);
        }
        writer.shutdown();

        let mut store = SqliteRowStore::open(&path).unwrap();
        assert_eq!(store.all_rows().unwrap().len(), 10);
    }

    #[test]
    fn offline_target_fails_softly() {
        let writer = BackgroundWriter::spawn(StoreTarget::Off, 1);
        let mut h = writer.submit(row("1"));
        let out = loop {
            if h.poll() != WriteStatus::Pending {
                break h.wait();
            }
            thread::yield_now();
        };
        assert!(!out.value);
        assert!(out.is_offline());
    }
}
