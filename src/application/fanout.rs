//! Host fan-out
//!
//! Runs one closure per host with at most `parallel` hosts in flight.
//! Results come back in input order whatever the completion order was.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::channel;
use std::thread;

use crate::domain::entities::HostTarget;

/// A requested host alias, resolved against configuration or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRef {
    Resolved(HostTarget),
    Unknown { alias: String, reason: String },
}

impl HostRef {
    pub fn unknown(alias: impl Into<String>, reason: impl Into<String>) -> Self {
        HostRef::Unknown {
            alias: alias.into(),
            reason: reason.into(),
        }
    }

    pub fn alias(&self) -> &str {
        match self {
            HostRef::Resolved(host) => host.alias(),
            HostRef::Unknown { alias, .. } => alias,
        }
    }
}

/// Map `work` over `items` on up to `parallel` worker threads
///
/// `parallel <= 1` runs on the calling thread, strictly in order.
pub fn for_each_host<T, R, F>(items: &[T], parallel: usize, work: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let workers = parallel.min(items.len());
    if workers <= 1 {
        return items.iter().map(work).collect();
    }

    let next = AtomicUsize::new(0);
    let (tx, rx) = channel();
    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            let work = &work;
            scope.spawn(move || loop {
                let index = next.fetch_add(1, Ordering::SeqCst);
                let Some(item) = items.get(index) else {
                    break;
                };
                if tx.send((index, work(item))).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    let mut results: Vec<(usize, R)> = rx.into_iter().collect();
    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, r)| r).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn sequential_keeps_order() {
        let out = for_each_host(&[1, 2, 3], 1, |n| n * 10);
        assert_eq!(out, vec![10, 20, 30]);
    }

    #[test]
    fn parallel_keeps_input_order() {
        let items: Vec<u64> = (0..8).collect();
        let out = for_each_host(&items, 4, |n| {
            thread::sleep(Duration::from_millis(8 - n));
            *n
        });
        assert_eq!(out, items);
    }

    #[test]
    fn parallel_runs_on_several_threads() {
        let items: Vec<u32> = (0..4).collect();
        let ids = for_each_host(&items, 4, |_| {
            thread::sleep(Duration::from_millis(20));
            thread::current().id()
        });
        let first = ids[0];
        assert!(ids.iter().any(|id| *id != first));
    }

    #[test]
    fn empty_input() {
        let out: Vec<u32> = for_each_host(&[] as &[u32], 8, |n| *n);
        assert!(out.is_empty());
    }
}
