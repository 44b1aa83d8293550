use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::context::{Phase, RunContext};
use crate::dataset::{Dataset, Row};
use crate::error::SortError;
use crate::field::Field;
use crate::merge;
use crate::order::Order;
use crate::partition;
use crate::partition::Partition;
use crate::protocol;
use crate::protocol::{FromWorker, SortParams, ToWorker, WorkerLink};
use crate::worker;

/// Drives one sort run over a fixed set of worker threads: broadcast the
/// sort parameters, partition, scatter, wait for the parallel local sorts,
/// gather in rank order, merge globally.
///
/// The coordinator owns the full dataset before the scatter and the merged
/// result after the gather; in between every partition is owned by exactly
/// one worker. Configuration errors detected before the scatter abort every
/// worker, so no local sorting work is wasted.
///
/// # Examples
/// ```
/// use dataset_sort::coordinator::Coordinator;
/// use dataset_sort::dataset::Dataset;
/// use dataset_sort::field::Field;
/// use dataset_sort::field_type::FieldType;
/// use dataset_sort::order::Order;
///
/// fn sort_in_memory(dataset: Dataset) -> Result<Dataset, dataset_sort::error::SortError> {
///     let coordinator = Coordinator::new(4);
///     let field = Field::new("age", FieldType::Integer);
///     coordinator.run(dataset, &field, &Order::Asc)
/// }
/// ```
pub struct Coordinator {
    workers: usize,
    timeout: Option<Duration>,
}

impl Coordinator {
    /// Create a coordinator with `workers` worker units, fixed for every
    /// run. Zero selects one worker per available CPU core.
    pub fn new(workers: usize) -> Coordinator {
        let workers = if workers == 0 {
            num_cpus::get()
        } else {
            workers
        };
        Coordinator {
            workers,
            timeout: None,
        }
    }

    /// Set a gather deadline per worker. The default is to block
    /// indefinitely; with a timeout set, a rank that fails to report in
    /// time aborts the run and every live worker is signalled to stop.
    pub fn with_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Get the number of worker units.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Sort `dataset` by `field` in `order`. Returns the globally ordered
    /// dataset, or the error that aborted the run. Worker threads are
    /// always terminated and joined before this returns.
    pub fn run(
        &self,
        dataset: Dataset,
        field: &Field,
        order: &Order,
    ) -> Result<Dataset, SortError> {
        let mut ctx = RunContext::coordinator(self.workers);
        let mut links: Vec<WorkerLink> = Vec::with_capacity(self.workers);
        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(self.workers);
        for rank in 0..self.workers {
            let (link, port) = protocol::link(rank);
            let worker_ctx = RunContext::worker(rank, self.workers);
            let spawned = thread::Builder::new()
                .name(format!("sort-worker-{}", rank))
                .spawn(move || worker::run(worker_ctx, port));
            match spawned {
                Ok(handle) => {
                    links.push(link);
                    handles.push(handle);
                }
                Err(e) => {
                    log::error!("Failed to spawn worker {}: {}", rank, e);
                    Self::abort(&mut ctx, &links);
                    drop(links);
                    Self::join(handles);
                    return Err(SortError::WorkerLost { rank });
                }
            }
        }

        let result = self.drive(&mut ctx, &links, dataset, field, order);
        if result.is_err() {
            Self::abort(&mut ctx, &links);
        }
        drop(links);
        Self::join(handles);
        result
    }

    fn drive(
        &self,
        ctx: &mut RunContext,
        links: &[WorkerLink],
        dataset: Dataset,
        field: &Field,
        order: &Order,
    ) -> Result<Dataset, SortError> {
        let started = Instant::now();

        let key_index = dataset
            .field_index(field.name())
            .ok_or_else(|| SortError::InvalidSortKey {
                field: field.name().clone(),
                schema: dataset.schema().clone(),
            })?;
        let params = SortParams::new(field.clone(), key_index, order.clone());

        ctx.enter(Phase::ParamsBroadcast);
        for link in links {
            link.send(ToWorker::Params(params.clone()))?;
        }
        // barrier: every worker confirms the params before any data moves
        for link in links {
            match link.recv(self.timeout)? {
                FromWorker::ParamsReceived { rank } if rank == link.rank() => {}
                other => {
                    log::error!(
                        "Unexpected broadcast acknowledgement from worker {}: {:?}",
                        link.rank(),
                        other
                    );
                    return Err(SortError::WorkerLost { rank: link.rank() });
                }
            }
        }

        ctx.enter(Phase::Partitioning);
        let (schema, rows) = dataset.into_parts();
        let bounds = partition::partition(rows.len(), ctx.workers());
        log::debug!("Partition bounds: {:?}", bounds);

        ctx.enter(Phase::Scattered);
        let mut remaining = rows.into_iter();
        for (rank, (_, length)) in bounds.iter().enumerate() {
            let block: Vec<Row> = remaining.by_ref().take(*length).collect();
            links[rank].send(ToWorker::Partition(Partition::new(
                rank,
                schema.clone(),
                block,
            )))?;
        }

        // local sorting runs fully in parallel, the coordinator next blocks
        // on the gather
        ctx.enter(Phase::LocalSorting);
        let mut sorted = Vec::with_capacity(links.len());
        for link in links {
            match link.recv(self.timeout)? {
                FromWorker::Sorted(Ok(partition)) => sorted.push(partition),
                FromWorker::Sorted(Err(error)) => return Err(error),
                other => {
                    log::error!(
                        "Unexpected gather message from worker {}: {:?}",
                        link.rank(),
                        other
                    );
                    return Err(SortError::WorkerLost { rank: link.rank() });
                }
            }
        }
        ctx.enter(Phase::Gathered);

        ctx.enter(Phase::GlobalMerge);
        let rows = merge::merge(sorted, &schema)?;
        let result = Dataset::assemble(schema, rows);

        ctx.enter(Phase::Done);
        log::info!(
            "Sorted {} rows by '{}' with {} workers in {:?}",
            result.len(),
            field.name(),
            ctx.workers(),
            started.elapsed()
        );
        Ok(result)
    }

    fn abort(ctx: &mut RunContext, links: &[WorkerLink]) {
        ctx.enter(Phase::Aborted);
        for link in links {
            if link.send(ToWorker::Abort).is_err() {
                log::debug!("Worker {} already terminated at abort", link.rank());
            }
        }
    }

    fn join(handles: Vec<JoinHandle<()>>) {
        for handle in handles {
            if handle.join().is_err() {
                log::error!("A worker thread panicked");
            }
        }
    }
}
