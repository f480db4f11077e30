use futures::future;
use futures::stream::{self, Stream, StreamExt};
use tonic::{Code, Status};
use yellowstone_grpc_proto::prelude::SubscribeUpdate;

/// One thing that can happen on the inbound half of the channel.
#[derive(Debug)]
pub enum ChannelEvent {
    Update(Box<SubscribeUpdate>),
    Error(Status),
    /// The server finished the stream.
    End,
    /// The transport went away underneath the stream.
    Closed,
}

impl ChannelEvent {
    pub fn update(update: SubscribeUpdate) -> Self {
        Self::Update(Box::new(update))
    }

    /// `Cancelled` is how tonic reports a stream torn down at the transport
    /// level; every other status is a real error.
    pub fn from_item(item: Result<SubscribeUpdate, Status>) -> Self {
        match item {
            Ok(update) => Self::update(update),
            Err(status) if status.code() == Code::Cancelled => Self::Closed,
            Err(status) => Self::Error(status),
        }
    }
}

/// Adapts a gRPC update stream into channel events, terminated by `End`.
pub fn channel_events<S>(updates: S) -> impl Stream<Item = ChannelEvent> + Unpin
where
    S: Stream<Item = Result<SubscribeUpdate, Status>> + Unpin,
{
    updates
        .map(ChannelEvent::from_item)
        .chain(stream::once(future::ready(ChannelEvent::End)))
}
