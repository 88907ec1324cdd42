use std::time::{Duration, Instant};

use flotilla_client::{
    dispatch_queue, Host, Routine, RoutineError, Scheduler, SyncConfig, SyncContext,
};
use flotilla_test::{init_logger, TestHost};

struct Counting {
    name: &'static str,
    runs: usize,
}

impl Routine for Counting {
    fn name(&self) -> &'static str {
        self.name
    }

    fn run(&mut self, _: &SyncContext, _: &mut Host<'_>, _: Instant) -> Result<(), RoutineError> {
        self.runs += 1;
        Ok(())
    }
}

struct Panicking;

impl Routine for Panicking {
    fn name(&self) -> &'static str {
        "Panicking"
    }

    fn run(&mut self, _: &SyncContext, _: &mut Host<'_>, _: Instant) -> Result<(), RoutineError> {
        panic!("scripted fault");
    }
}

struct Failing;

impl Routine for Failing {
    fn name(&self) -> &'static str {
        "Failing"
    }

    fn run(&mut self, _: &SyncContext, _: &mut Host<'_>, _: Instant) -> Result<(), RoutineError> {
        Err(RoutineError::Failed {
            routine: "Failing",
            reason: String::from("scripted"),
        })
    }
}

fn context() -> SyncContext {
    let (queue, _receiver) = dispatch_queue();
    SyncContext::new(SyncConfig::default(), queue)
}

#[test]
fn faulty_routines_do_not_stop_the_others() {
    init_logger();
    let context = context();
    let mut host = TestHost::new();
    let mut scheduler = Scheduler::new();
    scheduler.add(Box::new(Panicking), Duration::from_millis(100));
    scheduler.add(Box::new(Failing), Duration::from_millis(100));
    scheduler.add(
        Box::new(Counting {
            name: "Counting",
            runs: 0,
        }),
        Duration::from_millis(100),
    );

    let start = Instant::now();
    for step in 0..3 {
        let invoked = scheduler.tick(&context, &mut host.host(), start + Duration::from_millis(100 * step));
        assert_eq!(invoked, 3);
    }

    let panicking = scheduler.profile("Panicking").unwrap();
    assert_eq!(panicking.runs, 3);
    assert_eq!(panicking.faults, 3);
    assert_eq!(scheduler.profile("Failing").unwrap().faults, 3);
    let counting = scheduler.profile("Counting").unwrap();
    assert_eq!(counting.runs, 3);
    assert_eq!(counting.faults, 0);
}

#[test]
fn routines_are_rate_limited_independently() {
    let context = context();
    let mut host = TestHost::new();
    let mut scheduler = Scheduler::new();
    scheduler.add(Box::new(Counting { name: "Fast", runs: 0 }), Duration::from_millis(10));
    scheduler.add(Box::new(Counting { name: "Slow", runs: 0 }), Duration::from_millis(100));

    let start = Instant::now();
    for step in 0..=10 {
        scheduler.tick(&context, &mut host.host(), start + Duration::from_millis(10 * step));
    }

    assert_eq!(scheduler.profile("Fast").unwrap().runs, 11);
    assert_eq!(scheduler.profile("Slow").unwrap().runs, 2);
}

#[test]
fn profiler_report_has_one_line_per_routine() {
    let context = context();
    let mut host = TestHost::new();
    let mut scheduler = Scheduler::new();
    scheduler.add(Box::new(Counting { name: "First", runs: 0 }), Duration::from_millis(10));
    scheduler.add(Box::new(Counting { name: "Second", runs: 0 }), Duration::from_millis(10));
    scheduler.tick(&context, &mut host.host(), Instant::now());

    let report = scheduler.profiler_report();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("First: runs=1 last="));
    assert!(lines[1].starts_with("Second: runs=1 last="));
    assert!(lines.iter().all(|line| line.contains("ms max=") && line.ends_with("ms")));
}
