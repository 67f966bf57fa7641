//! Actor schedulers
//!
//! `ActorPool` drives actors against the wall clock on a bounded set of
//! worker threads. `run_stepped` drives them round-robin on the calling
//! thread against a virtual clock, which makes seeded runs reproducible.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, trace};

use crate::clock::ShutdownToken;
use crate::error::SimError;
use crate::systems::{Actor, Step};
use crate::world::Habitat;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Actor steps executed
    pub steps: u64,
    /// Newborn actors scheduled
    pub births: u64,
    /// Most actors alive at once
    pub peak_actors: usize,
    /// Virtual clock ticks (stepped runs only)
    pub rounds: u64,
}

// ============================================================================
// Stepped
// ============================================================================

/// Step every live actor once per round, advancing `token` between rounds,
/// until no actor is left.
pub fn run_stepped<R: Rng + ?Sized>(
    habitat: &Habitat,
    token: &ShutdownToken,
    actors: Vec<Actor>,
    rng: &mut R,
) -> RunStats {
    let mut queue: VecDeque<Actor> = actors.into();
    let mut stats = RunStats {
        peak_actors: queue.len(),
        ..RunStats::default()
    };

    while !queue.is_empty() {
        for _ in 0..queue.len() {
            let Some(mut actor) = queue.pop_front() else {
                break;
            };
            stats.steps += 1;
            match actor.step(habitat, rng) {
                Step::Continue => queue.push_back(actor),
                Step::Spawned(child) => {
                    stats.births += 1;
                    queue.push_back(actor);
                    queue.push_back(child);
                }
                Step::Finished => {}
            }
        }
        stats.peak_actors = stats.peak_actors.max(queue.len());

        if !queue.is_empty() {
            token.advance();
        }
    }

    stats.rounds = token.elapsed();
    debug!(?stats, "stepped run complete");
    stats
}

// ============================================================================
// Worker pool
// ============================================================================

struct Job {
    actor: Actor,
    rng: ChaCha8Rng,
    due: Instant,
}

#[derive(Default)]
struct QueueState {
    jobs: VecDeque<Job>,
    live: usize,
    stats: RunStats,
}

/// FIFO of runnable actors shared by the workers. Every job is re-queued
/// one tick after it ran, so the front is always the job due soonest.
#[derive(Default)]
struct RunQueue {
    state: Mutex<QueueState>,
    ready: Condvar,
}

impl RunQueue {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until a job is available; None once no actor is left.
    fn next_job(&self) -> Option<Job> {
        let mut state = self.lock();
        loop {
            if let Some(job) = state.jobs.pop_front() {
                return Some(job);
            }
            if state.live == 0 {
                return None;
            }
            state = self.ready.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn work(&self, habitat: &Habitat, tick: Duration) {
        while let Some(Job { mut actor, mut rng, due }) = self.next_job() {
            let now = Instant::now();
            if due > now {
                thread::sleep(due - now);
            }

            let step = actor.step(habitat, &mut rng);
            let due = Instant::now() + tick;

            let mut state = self.lock();
            state.stats.steps += 1;
            match step {
                Step::Continue => state.jobs.push_back(Job { actor, rng, due }),
                Step::Spawned(child) => {
                    let child_rng = ChaCha8Rng::seed_from_u64(rng.gen());
                    state.live += 1;
                    state.stats.births += 1;
                    state.stats.peak_actors = state.stats.peak_actors.max(state.live);
                    state.jobs.push_back(Job { actor, rng, due });
                    state.jobs.push_back(Job {
                        actor: child,
                        rng: child_rng,
                        due,
                    });
                }
                Step::Finished => {
                    state.live -= 1;
                    trace!(live = state.live, "actor finished");
                }
            }
            drop(state);
            self.ready.notify_all();
        }
    }

    fn into_stats(self) -> RunStats {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .stats
    }
}

/// Runs actors on a fixed number of worker threads.
pub struct ActorPool {
    workers: usize,
    tick: Duration,
}

impl ActorPool {
    pub fn new(workers: usize, tick: Duration) -> Self {
        Self {
            workers: workers.max(1),
            tick,
        }
    }

    /// Run until every actor, including those born along the way, has
    /// finished. Each actor owns its rng; newborns are seeded from their
    /// parent's.
    pub fn run(
        &self,
        habitat: &Habitat,
        actors: Vec<(Actor, ChaCha8Rng)>,
    ) -> Result<RunStats, SimError> {
        let queue = RunQueue::default();
        {
            let now = Instant::now();
            let mut state = queue.lock();
            state.live = actors.len();
            state.stats.peak_actors = actors.len();
            state.jobs.extend(
                actors
                    .into_iter()
                    .map(|(actor, rng)| Job { actor, rng, due: now }),
            );
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("actor-worker-{}", i))
            .build()?;

        debug!(workers = self.workers, tick = ?self.tick, "actor pool starting");
        let queue_ref = &queue;
        let tick = self.tick;
        // Each job is a blocking worker loop that only returns once the queue
        // drains, so there must be exactly one job per pool thread.
        pool.scope(|scope| {
            for _ in 0..self.workers {
                scope.spawn(move |_| queue_ref.work(habitat, tick));
            }
        });

        Ok(queue.into_stats())
    }
}
