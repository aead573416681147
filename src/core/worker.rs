//! Worker thread for the dirscope listing operations.
//!
//! Directory and updated-files listings run on a dedicated background thread so the
//! session owner never blocks on device I/O.
//!
//! Requests [WorkerTask] come in from the session via a channel, and results
//! [WorkerResponse] go back the same way. Every request carries a `request_id`; the worker
//! echoes it so the session can drop responses that a newer request has superseded.
//!
//! # Caution:
//! This module is the protocol boundary between the session and the lister. Adding or
//! editing variants requires matching changes in the session's response handling.

use crate::core::FileItem;
use crate::core::error::ListError;
use crate::core::lister::DirectoryLister;

use crossbeam_channel::{Receiver, Sender, unbounded};

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

/// What a listing request enumerates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingSource {
    Directory(PathBuf),
    Updated,
}

/// Tasks sent to the worker thread via channel.
#[derive(Debug)]
pub enum WorkerTask {
    List {
        source: ListingSource,
        request_id: u64,
    },
}

/// Responses sent from the worker thread back to the session.
#[derive(Debug)]
pub enum WorkerResponse {
    Listed {
        source: ListingSource,
        items: Vec<FileItem>,
        request_id: u64,
    },
    PermissionDenied {
        path: PathBuf,
        request_id: u64,
    },
}

impl WorkerResponse {
    #[inline]
    pub fn request_id(&self) -> u64 {
        match self {
            WorkerResponse::Listed { request_id, .. } => *request_id,
            WorkerResponse::PermissionDenied { request_id, .. } => *request_id,
        }
    }
}

/// Owns the channels of the listing worker.
///
/// Dropping it closes the task channel, which ends the worker thread.
pub struct Workers {
    io_tx: Sender<WorkerTask>,
    response_rx: Receiver<WorkerResponse>,
}

impl Workers {
    /// Spawns the listing thread around `lister`.
    pub fn spawn(lister: Arc<dyn DirectoryLister>) -> Self {
        let (io_tx, io_rx) = unbounded::<WorkerTask>();
        let (res_tx, response_rx) = unbounded::<WorkerResponse>();

        start_io_worker(lister, io_rx, res_tx);

        Self { io_tx, response_rx }
    }

    /// Accessor for the listing task sender.
    pub fn io_tx(&self) -> &Sender<WorkerTask> {
        &self.io_tx
    }

    /// Accessor for the worker response receiver.
    pub fn response_rx(&self) -> &Receiver<WorkerResponse> {
        &self.response_rx
    }
}

/// Starts the io worker thread, which listens to [WorkerTask] and sends back [WorkerResponse]
///
/// Queued tasks are coalesced: only the newest one waiting in the channel is processed,
/// the session would discard the older results anyway.
///
/// # Arguments
/// * `lister` - Source of the listings
/// * `task_rx` - Receiver channel for incoming tasks
/// * `res_tx` - Sender channel for outgoing responses
fn start_io_worker(
    lister: Arc<dyn DirectoryLister>,
    task_rx: Receiver<WorkerTask>,
    res_tx: Sender<WorkerResponse>,
) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let WorkerTask::List {
                mut source,
                mut request_id,
            } = task;

            while let Ok(WorkerTask::List {
                source: s,
                request_id: id,
            }) = task_rx.try_recv()
            {
                log::debug!("Listing request {} superseded by {}", request_id, id);
                source = s;
                request_id = id;
            }

            let result = match &source {
                ListingSource::Directory(path) => lister.list_directory(path),
                ListingSource::Updated => lister.list_updated_files(),
            };

            let response = match result {
                Ok(items) => WorkerResponse::Listed {
                    source,
                    items,
                    request_id,
                },
                Err(ListError::PermissionDenied(path)) => {
                    WorkerResponse::PermissionDenied { path, request_id }
                }
            };

            if res_tx.send(response).is_err() {
                break;
            }
        }
    });
}
