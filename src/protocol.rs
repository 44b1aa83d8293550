use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::error::SortError;
use crate::field::Field;
use crate::order::Order;
use crate::partition::{Partition, SortedPartition};

/// Sort parameters broadcast to every worker before any data moves. The key
/// field is resolved against the schema by the coordinator, so workers
/// never look up field names themselves.
#[derive(Clone, Debug)]
pub(crate) struct SortParams {
    field: Field,
    key_index: usize,
    order: Order,
}

impl SortParams {
    pub(crate) fn new(field: Field, key_index: usize, order: Order) -> SortParams {
        SortParams {
            field,
            key_index,
            order,
        }
    }

    pub(crate) fn field(&self) -> &Field {
        &self.field
    }

    pub(crate) fn key_index(&self) -> usize {
        self.key_index
    }

    pub(crate) fn order(&self) -> &Order {
        &self.order
    }
}

/// Control messages sent from the coordinator to one worker.
#[derive(Debug)]
pub(crate) enum ToWorker {
    /// The sort parameters. The worker acknowledges receipt before the run
    /// proceeds to partitioning.
    Params(SortParams),
    /// The worker's partition.
    Partition(Partition),
    /// Stop immediately without producing a result.
    Abort,
}

/// Messages sent from a worker back to the coordinator.
#[derive(Debug)]
pub(crate) enum FromWorker {
    /// Barrier acknowledgement for the params broadcast.
    ParamsReceived {
        rank: usize,
    },
    /// The worker's sorted partition, or the failure that stopped it.
    Sorted(Result<SortedPartition, SortError>),
}

/// Coordinator side endpoints for one worker rank.
pub(crate) struct WorkerLink {
    rank: usize,
    control: Sender<ToWorker>,
    results: Receiver<FromWorker>,
}

/// Worker side endpoints.
pub(crate) struct WorkerPort {
    control: Receiver<ToWorker>,
    results: Sender<FromWorker>,
}

/// Create the channel pair connecting the coordinator with worker `rank`.
pub(crate) fn link(rank: usize) -> (WorkerLink, WorkerPort) {
    let (control_sender, control_receiver) = unbounded();
    let (results_sender, results_receiver) = unbounded();
    (
        WorkerLink {
            rank,
            control: control_sender,
            results: results_receiver,
        },
        WorkerPort {
            control: control_receiver,
            results: results_sender,
        },
    )
}

impl WorkerLink {
    pub(crate) fn rank(&self) -> usize {
        self.rank
    }

    pub(crate) fn send(&self, message: ToWorker) -> Result<(), SortError> {
        self.control
            .send(message)
            .map_err(|_| SortError::WorkerLost { rank: self.rank })
    }

    /// Receive the next message from this worker, blocking indefinitely
    /// when no timeout is configured.
    pub(crate) fn recv(&self, timeout: Option<Duration>) -> Result<FromWorker, SortError> {
        let received = match timeout {
            None => self.results.recv().ok(),
            Some(timeout) => self.results.recv_timeout(timeout).ok(),
        };
        received.ok_or(SortError::WorkerLost { rank: self.rank })
    }
}

impl WorkerPort {
    /// Receive the next control message. Returns None when the coordinator
    /// is gone, which a worker treats like an abort.
    pub(crate) fn recv_control(&self) -> Option<ToWorker> {
        self.control.recv().ok()
    }

    pub(crate) fn send(&self, message: FromWorker) -> bool {
        self.results.send(message).is_ok()
    }
}
