use std::time::Instant;

use crate::context::{Phase, RunContext, Unit};
use crate::local_sort;
use crate::protocol::{FromWorker, ToWorker, WorkerPort};

/// Run one worker rank to completion.
///
/// The worker blocks for the params broadcast, acknowledges it, blocks for
/// its scattered partition, sorts it locally and reports the result. It
/// terminates on an abort message or when the coordinator goes away, so it
/// never blocks forever on parameters that will not arrive.
pub(crate) fn run(mut ctx: RunContext, port: WorkerPort) {
    let rank = match ctx.unit() {
        Unit::Worker(rank) => rank,
        Unit::Coordinator => {
            log::error!("worker loop started with a coordinator context");
            abort(&mut ctx);
            return;
        }
    };

    ctx.enter(Phase::ParamsBroadcast);
    let params = match port.recv_control() {
        Some(ToWorker::Params(params)) => params,
        Some(ToWorker::Abort) | None => {
            abort(&mut ctx);
            return;
        }
        Some(other) => {
            log::error!("{}: unexpected message before params: {:?}", ctx.unit(), other);
            abort(&mut ctx);
            return;
        }
    };
    if !port.send(FromWorker::ParamsReceived { rank }) {
        abort(&mut ctx);
        return;
    }

    ctx.enter(Phase::Scattered);
    let partition = match port.recv_control() {
        Some(ToWorker::Partition(partition)) => partition,
        Some(ToWorker::Abort) | None => {
            abort(&mut ctx);
            return;
        }
        Some(other) => {
            log::error!("{}: unexpected message before partition: {:?}", ctx.unit(), other);
            abort(&mut ctx);
            return;
        }
    };

    ctx.enter(Phase::LocalSorting);
    let rows = partition.len();
    let start = Instant::now();
    let result = local_sort::sort_partition(partition, &params);
    log::info!(
        "{}: local sort of {} rows finished in {:?}",
        ctx.unit(),
        rows,
        start.elapsed()
    );

    port.send(FromWorker::Sorted(result));
    ctx.enter(Phase::Done);
}

fn abort(ctx: &mut RunContext) {
    ctx.enter(Phase::Aborted);
    log::info!("{}: aborted", ctx.unit());
}
