use std::iter::zip;
use std::sync::mpsc;
use std::thread;

pub trait Split: Sized {
    fn split_to_vec(self, n: usize) -> Vec<Self>;
}

pub trait Join: Sized {
    fn join_vec(parts: Vec<Self>) -> Self;
}

impl<T> Split for Vec<T>
where
    T: Clone,
{
    fn split_to_vec(self, n: usize) -> Vec<Self> {
        RangeSplitter::split(0, self.len(), n)
            .map(|(start, end)| self[start..end].to_vec())
            .collect()
    }
}

impl<T> Join for Vec<T> {
    fn join_vec(parts: Vec<Self>) -> Self {
        let mut joined = vec![];
        for mut part in parts {
            joined.append(&mut part);
        }
        joined
    }
}

/// Yields n contiguous (start, end) chunks covering [start, end), longer
/// chunks first.
pub struct RangeSplitter {
    pos: usize,
    end: usize,
    remaining: usize,
}

impl RangeSplitter {
    pub fn split(start: usize, end: usize, n: usize) -> Self {
        assert!(n > 0, "cannot split into zero parts");
        assert!(start <= end);
        Self {
            pos: start,
            end,
            remaining: n,
        }
    }
}

impl Iterator for RangeSplitter {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        if self.remaining == 0 {
            return None;
        }
        let len = self.end - self.pos;
        let size = (len + self.remaining - 1) / self.remaining;
        let start = self.pos;
        self.pos += size;
        self.remaining -= 1;
        Some((start, start + size))
    }
}

pub trait Call<A, B> {
    fn call(&self, arg: A) -> B;
}

struct Worker<A> {
    tx: mpsc::Sender<(usize, A)>,
}

pub struct WorkerPool<A, B> {
    workers: Vec<Worker<A>>,
    rx: mpsc::Receiver<(usize, B)>,
}

impl<A, B> WorkerPool<A, B>
where
    A: Send + 'static,
    B: Send + 'static,
{
    pub fn with<F, W>(n: usize, factory: F) -> Self
    where
        F: Fn() -> W,
        W: FnMut(A) -> B + Send + 'static,
    {
        assert!(n > 0, "no workers");
        let (tx, rx) = mpsc::channel::<(usize, B)>();
        let workers = (0..n)
            .map(|_| {
                let mut work = factory();
                let results = tx.clone();
                let (worker_tx, worker_rx) = mpsc::channel::<(usize, A)>();
                thread::spawn(move || {
                    while let Ok((part, arg)) = worker_rx.recv() {
                        if results.send((part, work(arg))).is_err() {
                            return;
                        }
                    }
                });
                Worker { tx: worker_tx }
            })
            .collect();
        Self { workers, rx }
    }

    pub fn workers(&self) -> usize {
        self.workers.len()
    }
}

impl<A, B> Call<A, B> for WorkerPool<A, B>
where
    A: Split + Send + 'static,
    B: Join + Send + 'static,
{
    fn call(&self, arg: A) -> B {
        let n = self.workers.len();
        for (worker, (part, piece)) in zip(&self.workers, arg.split_to_vec(n).into_iter().enumerate())
        {
            worker.tx.send((part, piece)).unwrap();
        }
        let mut parts: Vec<Option<B>> = (0..n).map(|_| None).collect();
        for _ in 0..n {
            let (part, piece) = self.rx.recv().unwrap();
            parts[part] = Some(piece);
        }
        // every part index was sent exactly once
        B::join_vec(parts.into_iter().map(|p| p.unwrap()).collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn roundtrip(length: usize, n: usize) {
        let v: Vec<usize> = (0..length).collect();
        let parts = v.clone().split_to_vec(n);
        assert_eq!(parts.len(), n);
        assert_eq!(Vec::join_vec(parts), v);
    }

    #[test]
    fn test_vec_split_join() {
        roundtrip(1, 1);
        roundtrip(0, 2);
        roundtrip(5, 8);
        roundtrip(8, 5);
        roundtrip(100, 1);
        roundtrip(55, 47);
    }

    #[test]
    fn test_range_splitter_covers_range() {
        for (len, n) in [(10, 3), (3, 10), (0, 4), (16, 4), (17, 4)] {
            let mut pos = 0;
            let mut parts = 0;
            for (start, end) in RangeSplitter::split(0, len, n) {
                assert_eq!(start, pos);
                assert!(end >= start);
                pos = end;
                parts += 1;
            }
            assert_eq!(pos, len);
            assert_eq!(parts, n);
        }
    }

    #[test]
    fn test_pool_preserves_order() {
        let pool: WorkerPool<Vec<i64>, Vec<i64>> =
            WorkerPool::with(4, || |v: Vec<i64>| v.into_iter().map(|x| x * x).collect());
        assert_eq!(pool.workers(), 4);
        let squared = pool.call((0..100).collect());
        let expected: Vec<i64> = (0..100).map(|x| x * x).collect();
        assert_eq!(squared, expected);
    }

    #[test]
    fn test_pool_survives_repeated_calls() {
        let pool: WorkerPool<Vec<i64>, Vec<i64>> =
            WorkerPool::with(2, || |v: Vec<i64>| v.into_iter().map(|x| x + 1).collect());
        for _ in 0..10 {
            assert_eq!(pool.call(vec![1, 2, 3]), vec![2, 3, 4]);
        }
    }
}
