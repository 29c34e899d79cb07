//! Order-restoring bounded-concurrency stage

use super::ParallelStats;
use crate::error::{BoxError, Result, SeqError};
use futures::stream::{FusedStream, FuturesUnordered, Stream, StreamExt};
use pin_project_lite::pin_project;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tracing::{debug, trace, warn};

/// What a parallel stage keeps from each element and emits once its
/// computation resolves.
///
/// `split` divides an upstream element into the argument handed to the user
/// computation and a carry kept alongside it; `payload` combines the carry
/// with the resolved value into zero or more outputs.
pub trait Emit<T> {
    type Carry;
    type Resolved;
    type Output;
    type Payload: IntoIterator<Item = Self::Output>;

    /// Operation name used in errors and logs
    const OPERATION: &'static str;

    fn split(item: T) -> (T, Self::Carry);

    fn payload(carry: Self::Carry, resolved: Self::Resolved) -> Self::Payload;
}

/// One output per element: the resolved value
pub struct MapMode<U>(PhantomData<fn() -> U>);

impl<T, U> Emit<T> for MapMode<U> {
    type Carry = ();
    type Resolved = U;
    type Output = U;
    type Payload = Option<U>;

    const OPERATION: &'static str = "map_parallel";

    fn split(item: T) -> (T, ()) {
        (item, ())
    }

    fn payload(_: (), resolved: U) -> Option<U> {
        Some(resolved)
    }
}

/// The element itself when its predicate resolves to `true`
pub struct FilterMode;

impl<T: Clone> Emit<T> for FilterMode {
    type Carry = T;
    type Resolved = bool;
    type Output = T;
    type Payload = Option<T>;

    const OPERATION: &'static str = "filter_parallel";

    fn split(item: T) -> (T, T) {
        (item.clone(), item)
    }

    fn payload(item: T, keep: bool) -> Option<T> {
        keep.then_some(item)
    }
}

/// Every element of the resolved collection, spliced in order
pub struct FlatMapMode<R>(PhantomData<fn() -> R>);

impl<T, R: IntoIterator> Emit<T> for FlatMapMode<R> {
    type Carry = ();
    type Resolved = R;
    type Output = R::Item;
    type Payload = R;

    const OPERATION: &'static str = "flat_map_parallel";

    fn split(item: T) -> (T, ()) {
        (item, ())
    }

    fn payload(_: (), resolved: R) -> R {
        resolved
    }
}

pin_project! {
    /// A user computation tagged with its submission index
    pub(crate) struct Indexed<Fut, C> {
        #[pin]
        future: Fut,
        index: usize,
        carry: Option<C>,
    }
}

impl<Fut: Future, C> Future for Indexed<Fut, C> {
    type Output = (usize, C, Fut::Output);

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let output = ready!(this.future.poll(cx));
        match this.carry.take() {
            Some(carry) => Poll::Ready((*this.index, carry, output)),
            None => panic!("`Indexed` polled after completion"),
        }
    }
}

pin_project! {
    /// Runs a computation per upstream element with at most `limit` held at
    /// once, yielding results in submission order.
    ///
    /// A slot is held from submission until the result has been handed
    /// downstream, so computations in flight plus results waiting for an
    /// earlier index never exceed `limit`. Computations are polled by the
    /// task consuming this stream; nothing is spawned. Dropping the stage
    /// drops every computation still in flight.
    ///
    /// The first failed computation is yielded as `Err(SeqError::Operation)`
    /// carrying its submission index, and the stage ends.
    #[must_use = "streams do nothing unless polled"]
    pub struct ParallelStage<S, F, Fut, M>
    where
        S: Stream,
        Fut: Future,
        M: Emit<S::Item>,
    {
        #[pin]
        upstream: S,
        func: F,
        in_flight: FuturesUnordered<Indexed<Fut, M::Carry>>,
        pending: BTreeMap<usize, M::Payload>,
        ready: VecDeque<M::Output>,
        next_submission: usize,
        next_to_emit: usize,
        limit: usize,
        upstream_done: bool,
        terminated: bool,
        stats: ParallelStats,
        mode: PhantomData<fn() -> M>,
    }
}

impl<S, F, Fut, M> ParallelStage<S, F, Fut, M>
where
    S: Stream,
    Fut: Future,
    M: Emit<S::Item>,
{
    /// `limit` must already be validated as non-zero
    pub(crate) fn new(upstream: S, func: F, limit: usize) -> Self {
        Self {
            upstream,
            func,
            in_flight: FuturesUnordered::new(),
            pending: BTreeMap::new(),
            ready: VecDeque::new(),
            next_submission: 0,
            next_to_emit: 0,
            limit,
            upstream_done: false,
            terminated: false,
            stats: ParallelStats::new(),
            mode: PhantomData,
        }
    }

    /// Snapshot of the stage counters
    pub fn stats(&self) -> ParallelStats {
        self.stats
    }

    /// Computations currently in flight
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Completed results waiting for an earlier index
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn concurrency(&self) -> usize {
        self.limit
    }
}

impl<S, F, Fut, M> fmt::Debug for ParallelStage<S, F, Fut, M>
where
    S: Stream,
    Fut: Future,
    M: Emit<S::Item>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelStage")
            .field("operation", &M::OPERATION)
            .field("limit", &self.limit)
            .field("in_flight", &self.in_flight.len())
            .field("pending", &self.pending.len())
            .field("next_submission", &self.next_submission)
            .field("next_to_emit", &self.next_to_emit)
            .field("terminated", &self.terminated)
            .finish()
    }
}

impl<S, F, Fut, M, E> Stream for ParallelStage<S, F, Fut, M>
where
    S: Stream,
    F: FnMut(S::Item) -> Fut,
    Fut: Future<Output = std::result::Result<M::Resolved, E>>,
    M: Emit<S::Item>,
    E: Into<BoxError>,
{
    type Item = Result<M::Output>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(item) = this.ready.pop_front() {
                this.stats.inc_emitted();
                return Poll::Ready(Some(Ok(item)));
            }
            if *this.terminated {
                return Poll::Ready(None);
            }

            // Drain: the next index in submission order may already be done
            if let Some(payload) = this.pending.remove(&*this.next_to_emit) {
                *this.next_to_emit += 1;
                let before = this.ready.len();
                this.ready.extend(payload);
                if this.ready.len() == before {
                    this.stats.inc_discarded();
                }
                continue;
            }

            // Fill: submit while a slot is free
            while !*this.upstream_done && this.in_flight.len() + this.pending.len() < *this.limit {
                match this.upstream.as_mut().poll_next(cx) {
                    Poll::Ready(Some(item)) => {
                        let index = *this.next_submission;
                        *this.next_submission += 1;

                        let (arg, carry) = M::split(item);
                        this.in_flight.push(Indexed {
                            future: (this.func)(arg),
                            index,
                            carry: Some(carry),
                        });
                        this.stats.record_submission(this.in_flight.len());
                        trace!(
                            operation = M::OPERATION,
                            index,
                            in_flight = this.in_flight.len(),
                            "computation submitted"
                        );
                    }
                    Poll::Ready(None) => *this.upstream_done = true,
                    Poll::Pending => break,
                }
            }

            if this.in_flight.is_empty() {
                if *this.upstream_done {
                    *this.terminated = true;
                    debug!(operation = M::OPERATION, stats = ?this.stats, "parallel stage exhausted");
                    return Poll::Ready(None);
                }
                // Upstream has registered the waker
                return Poll::Pending;
            }

            match this.in_flight.poll_next_unpin(cx) {
                Poll::Ready(Some((index, carry, Ok(resolved)))) => {
                    this.pending.insert(index, M::payload(carry, resolved));
                    this.stats.record_completion(this.pending.len());
                    trace!(
                        operation = M::OPERATION,
                        index,
                        pending = this.pending.len(),
                        "computation completed"
                    );
                }
                Poll::Ready(Some((index, _, Err(e)))) => {
                    let error = SeqError::operation(M::OPERATION, index, e);
                    warn!(
                        operation = M::OPERATION,
                        index,
                        abandoned = this.in_flight.len(),
                        error = %error,
                        "computation failed, aborting stage"
                    );
                    *this.terminated = true;
                    *this.in_flight = FuturesUnordered::new();
                    this.pending.clear();
                    return Poll::Ready(Some(Err(error)));
                }
                Poll::Ready(None) => continue,
                Poll::Pending => return Poll::Pending,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.terminated {
            return (self.ready.len(), Some(self.ready.len()));
        }
        (self.ready.len(), None)
    }
}

impl<S, F, Fut, M, E> FusedStream for ParallelStage<S, F, Fut, M>
where
    S: Stream,
    F: FnMut(S::Item) -> Fut,
    Fut: Future<Output = std::result::Result<M::Resolved, E>>,
    M: Emit<S::Item>,
    E: Into<BoxError>,
{
    fn is_terminated(&self) -> bool {
        self.terminated && self.ready.is_empty()
    }
}
