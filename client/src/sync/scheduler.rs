use std::{
    any::Any,
    fmt::Write,
    panic::{self, AssertUnwindSafe},
    time::{Duration, Instant},
};

use log::error;

use crate::{
    sync::{context::SyncContext, error::RoutineError, routine::Routine},
    world::Host,
};

/// Run statistics for one routine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoutineProfile {
    pub runs: u64,
    pub faults: u64,
    pub last_duration: Duration,
    pub max_duration: Duration,
}

struct ScheduledRoutine {
    routine: Box<dyn Routine>,
    interval: Duration,
    last_run: Option<Instant>,
    profile: RoutineProfile,
}

impl ScheduledRoutine {
    fn is_due(&self, now: Instant) -> bool {
        match self.last_run {
            Some(last_run) => now.saturating_duration_since(last_run) >= self.interval,
            None => true,
        }
    }
}

/// Runs each registered routine at its own interval. Driven by the host,
/// which calls [`Scheduler::tick`] once per frame.
#[derive(Default)]
pub struct Scheduler {
    routines: Vec<ScheduledRoutine>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, routine: Box<dyn Routine>, interval: Duration) {
        self.routines.push(ScheduledRoutine {
            routine,
            interval,
            last_run: None,
            profile: RoutineProfile::default(),
        });
    }

    /// Runs every routine whose interval has elapsed. A routine that fails
    /// or panics is logged and the remaining routines still run. Returns the
    /// number of routines invoked.
    pub fn tick(&mut self, context: &SyncContext, host: &mut Host<'_>, now: Instant) -> usize {
        let mut invoked = 0;

        for scheduled in self.routines.iter_mut() {
            if !scheduled.is_due(now) {
                continue;
            }
            scheduled.last_run = Some(now);
            invoked += 1;

            let name = scheduled.routine.name();
            let routine = &mut scheduled.routine;
            let started = Instant::now();
            let result = panic::catch_unwind(AssertUnwindSafe(|| routine.run(context, host, now)))
                .unwrap_or_else(|payload| {
                    Err(RoutineError::Panicked {
                        routine: name,
                        message: panic_message(payload.as_ref()),
                    })
                });
            let elapsed = started.elapsed();

            let profile = &mut scheduled.profile;
            profile.runs += 1;
            profile.last_duration = elapsed;
            profile.max_duration = profile.max_duration.max(elapsed);

            if let Err(err) = result {
                profile.faults += 1;
                error!("{}", err);
            }
        }

        invoked
    }

    pub fn profile(&self, name: &str) -> Option<RoutineProfile> {
        self.routines
            .iter()
            .find(|scheduled| scheduled.routine.name() == name)
            .map(|scheduled| scheduled.profile)
    }

    /// One line per routine: `<name>: runs=<n> last=<ms>ms max=<ms>ms`
    pub fn profiler_report(&self) -> String {
        let mut report = String::new();
        for scheduled in &self.routines {
            let profile = &scheduled.profile;
            let _ = writeln!(
                report,
                "{}: runs={} last={:.3}ms max={:.3}ms",
                scheduled.routine.name(),
                profile.runs,
                profile.last_duration.as_secs_f64() * 1000.0,
                profile.max_duration.as_secs_f64() * 1000.0,
            );
        }
        report
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        String::from(*message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("unknown panic payload")
    }
}
