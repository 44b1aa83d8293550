use std::fmt::{Display, Formatter};

/// Phases of a single sort run, in protocol order. `Aborted` is terminal
/// and reachable from any phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    Idle,
    ParamsBroadcast,
    Partitioning,
    Scattered,
    LocalSorting,
    Gathered,
    GlobalMerge,
    Done,
    Aborted,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::ParamsBroadcast => "params-broadcast",
            Phase::Partitioning => "partitioning",
            Phase::Scattered => "scattered",
            Phase::LocalSorting => "local-sorting",
            Phase::Gathered => "gathered",
            Phase::GlobalMerge => "global-merge",
            Phase::Done => "done",
            Phase::Aborted => "aborted",
        };
        write!(f, "{}", name)
    }
}

/// The unit a run context belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Unit {
    Coordinator,
    Worker(usize),
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Coordinator => write!(f, "coordinator"),
            Unit::Worker(rank) => write!(f, "worker-{}", rank),
        }
    }
}

/// Explicit coordination state passed to every component of a run: which
/// unit is executing, how many workers participate, and the phase the unit
/// is currently in. There is no ambient or global run state anywhere.
#[derive(Clone, Debug)]
pub(crate) struct RunContext {
    unit: Unit,
    workers: usize,
    phase: Phase,
}

impl RunContext {
    pub(crate) fn coordinator(workers: usize) -> RunContext {
        RunContext {
            unit: Unit::Coordinator,
            workers,
            phase: Phase::Idle,
        }
    }

    pub(crate) fn worker(rank: usize, workers: usize) -> RunContext {
        RunContext {
            unit: Unit::Worker(rank),
            workers,
            phase: Phase::Idle,
        }
    }

    pub(crate) fn unit(&self) -> Unit {
        self.unit
    }

    pub(crate) fn workers(&self) -> usize {
        self.workers
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn enter(&mut self, phase: Phase) {
        log::debug!("{}: phase {} -> {}", self.unit, self.phase, phase);
        self.phase = phase;
    }
}
