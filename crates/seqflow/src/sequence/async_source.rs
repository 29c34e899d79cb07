//! Asynchronous sources
//!
//! Asynchronous pull sources implement [`AsyncSource`]; push sources hand
//! values to a tokio channel. Both are adapted to `futures::Stream`, which
//! is the pull contract the parallel stages consume.

use crate::error::Result;
use async_trait::async_trait;
use futures::stream::{self, Stream};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// A source that produces values on demand, asynchronously
#[async_trait]
pub trait AsyncSource: Send {
    type Item: Send;

    /// Produce the next value, or `None` once exhausted
    async fn pull(&mut self) -> Result<Option<Self::Item>>;
}

#[async_trait]
impl<T: Send> AsyncSource for mpsc::Receiver<T> {
    type Item = T;

    async fn pull(&mut self) -> Result<Option<T>> {
        Ok(self.recv().await)
    }
}

/// Adapt an [`AsyncSource`] into a stream.
///
/// A failed pull is yielded once as `Err` and ends the stream.
pub fn from_async_source<S>(source: S) -> impl Stream<Item = Result<S::Item>> + Send
where
    S: AsyncSource + 'static,
{
    stream::unfold(Some(source), |state| async move {
        let mut source = state?;
        match source.pull().await {
            Ok(Some(item)) => Some((Ok(item), Some(source))),
            Ok(None) => None,
            Err(e) => Some((Err(e), None)),
        }
    })
}

/// Adapt the receiving half of a channel fed by a push-style producer
pub fn from_receiver<T>(receiver: mpsc::Receiver<T>) -> ReceiverStream<T> {
    ReceiverStream::new(receiver)
}
