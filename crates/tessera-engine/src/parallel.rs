//! Worker pool for independent scan points.
//!
//! Points are dispatched over a bounded crossbeam channel to scoped
//! worker threads. Each worker sends `(index, result)` back on a reply
//! channel; results are reassembled in index order, so the output does
//! not depend on scheduling. Each point seeds its own random stream,
//! which makes a parallel scan identical to a sequential one.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread;

/// Evaluate `job(0..points)` on up to `workers` threads and return the
/// results in index order.
///
/// `workers <= 1`, or a single point, runs inline on the caller's
/// thread. A panicking job propagates to the caller once the scope
/// joins.
pub fn run_points<T, F>(points: usize, workers: usize, job: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    let workers = workers.min(points);
    if workers <= 1 {
        return (0..points).map(&job).collect();
    }

    let (task_tx, task_rx) = bounded::<usize>(workers * 4);
    let (reply_tx, reply_rx) = bounded::<(usize, T)>(workers * 4);
    let job = &job;

    let mut slots: Vec<Option<T>> = thread::scope(|scope| {
        for _ in 0..workers {
            let task_rx = task_rx.clone();
            let reply_tx = reply_tx.clone();
            scope.spawn(move || worker_loop(task_rx, reply_tx, job));
        }
        // Workers hold the only remaining clones; the reply channel
        // closes once they have all exited.
        drop(task_rx);
        drop(reply_tx);

        let mut slots: Vec<Option<T>> = (0..points).map(|_| None).collect();
        let mut next = 0;
        let mut received = 0;
        while received < points {
            // Keep the task queue topped up without blocking on it while
            // replies are pending.
            while next < points && task_tx.try_send(next).is_ok() {
                next += 1;
            }
            if next == points {
                break;
            }
            match reply_rx.recv() {
                Ok((i, value)) => {
                    slots[i] = Some(value);
                    received += 1;
                }
                Err(_) => break,
            }
        }
        drop(task_tx);
        for (i, value) in reply_rx.iter() {
            slots[i] = Some(value);
        }
        slots
    });

    // Every index was dispatched exactly once; a missing slot means its
    // worker panicked, and the scope has already re-raised that panic.
    slots.iter_mut().filter_map(Option::take).collect()
}

fn worker_loop<T, F>(task_rx: Receiver<usize>, reply_tx: Sender<(usize, T)>, job: &F)
where
    F: Fn(usize) -> T,
{
    while let Ok(i) = task_rx.recv() {
        if reply_tx.send((i, job(i))).is_err() {
            break;
        }
    }
}
