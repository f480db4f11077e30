use std::fmt::Display;

use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::oneshot;
use yellowstone_grpc_proto::prelude::SubscribeRequest;

use crate::config::{FilterConfig, StreamConfig};
use crate::core::error::SessionError;
use crate::core::pipeline::FilterPipeline;
use crate::stream::client;
use crate::stream::event::{channel_events, ChannelEvent};
use crate::stream::request::subscribe_request;
use crate::stream::sink::ProjectionSink;
use crate::stream::state::{SessionEvent, SessionState};

/// How a successfully completed session went.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub state: SessionState,
    pub transitions: Vec<SessionState>,
    pub updates: u64,
    pub projections: u64,
}

/// Requests an orderly stop of a running session.
///
/// Dropping the handle without calling [`ShutdownHandle::shutdown`] leaves
/// the session running.
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: oneshot::Sender<()>,
}

impl ShutdownHandle {
    pub fn shutdown(self) {
        if self.tx.send(()).is_err() {
            tracing::debug!("shutdown requested after session finished");
        }
    }
}

enum Step {
    Shutdown,
    HandleDropped,
    Event(ChannelEvent),
}

/// One subscription, from opening the channel to its single completion.
///
/// Updates are handled one at a time in arrival order; the pipeline runs
/// inline and never suspends.
pub struct StreamSession {
    request: SubscribeRequest,
    pipeline: FilterPipeline,
    state: SessionState,
    transitions: Vec<SessionState>,
    shutdown: Option<oneshot::Receiver<()>>,
    updates: u64,
    projections: u64,
}

impl StreamSession {
    pub fn new(request: SubscribeRequest, pipeline: FilterPipeline) -> (Self, ShutdownHandle) {
        let (tx, rx) = oneshot::channel();
        let session = Self {
            request,
            pipeline,
            state: SessionState::Idle,
            transitions: vec![SessionState::Idle],
            shutdown: Some(rx),
            updates: 0,
            projections: 0,
        };
        (session, ShutdownHandle { tx })
    }

    /// Session for `filter`, subscribed under `config.filter_name`.
    pub fn from_config(config: &StreamConfig, filter: &FilterConfig) -> (Self, ShutdownHandle) {
        let request = subscribe_request(&config.filter_name, filter, config.commitment);
        let pipeline = FilterPipeline::new(config.filter_name.clone(), filter);
        Self::new(request, pipeline)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Connects to `config.endpoint` and drives the subscription to
    /// completion.
    pub async fn run<K>(
        mut self,
        config: &StreamConfig,
        sink: &mut K,
    ) -> Result<SessionSummary, SessionError>
    where
        K: ProjectionSink,
    {
        self.apply(SessionEvent::Start);
        let (writer, updates) = match client::connect(config).await {
            Ok(channel) => channel,
            Err(err) => {
                self.apply(SessionEvent::Fault);
                tracing::warn!("{err}");
                return Err(err);
            }
        };
        self.drive(writer, channel_events(updates), sink).await
    }

    /// Drives an already open channel. `writer` receives the subscription
    /// request, `events` is the inbound side.
    pub async fn run_on<W, E, K>(
        mut self,
        writer: W,
        events: E,
        sink: &mut K,
    ) -> Result<SessionSummary, SessionError>
    where
        W: Sink<SubscribeRequest> + Unpin,
        W::Error: Display,
        E: Stream<Item = ChannelEvent> + Unpin,
        K: ProjectionSink,
    {
        self.apply(SessionEvent::Start);
        self.drive(writer, events, sink).await
    }

    async fn drive<W, E, K>(
        mut self,
        mut writer: W,
        mut events: E,
        sink: &mut K,
    ) -> Result<SessionSummary, SessionError>
    where
        W: Sink<SubscribeRequest> + Unpin,
        W::Error: Display,
        E: Stream<Item = ChannelEvent> + Unpin,
        K: ProjectionSink,
    {
        let request = std::mem::take(&mut self.request);
        if let Err(err) = writer.send(request).await {
            let err = SessionError::subscribe_write(err);
            self.apply(SessionEvent::Fault);
            close_writer(&mut writer).await;
            tracing::warn!("{err}");
            return Err(err);
        }
        self.apply(SessionEvent::SubscribeAcked);
        tracing::info!(filter = self.pipeline.filter_name(), "subscription accepted");

        let (mut shutdown, mut armed) = match self.shutdown.take() {
            Some(rx) => (rx, true),
            None => (oneshot::channel().1, false),
        };

        loop {
            let step = tokio::select! {
                biased;
                signal = &mut shutdown, if armed => match signal {
                    Ok(()) => Step::Shutdown,
                    Err(_) => Step::HandleDropped,
                },
                event = events.next() => Step::Event(event.unwrap_or(ChannelEvent::End)),
            };

            match step {
                Step::HandleDropped => armed = false,
                Step::Event(ChannelEvent::Update(update)) => {
                    self.updates += 1;
                    if let Some(projection) = self.pipeline.process(&update) {
                        self.projections += 1;
                        sink.emit(projection);
                    }
                }
                Step::Event(ChannelEvent::Error(status)) => {
                    self.apply(SessionEvent::Fault);
                    drop(events);
                    close_writer(&mut writer).await;
                    tracing::warn!("stream error: {status}");
                    return Err(SessionError::Stream(status));
                }
                Step::Event(ChannelEvent::End) => {
                    self.apply(SessionEvent::EndOfInput);
                    close_writer(&mut writer).await;
                    self.apply(SessionEvent::Drained);
                    break;
                }
                Step::Event(ChannelEvent::Closed) => {
                    self.apply(SessionEvent::TransportClosed);
                    break;
                }
                Step::Shutdown => {
                    self.apply(SessionEvent::ShutdownRequested);
                    drop(events);
                    close_writer(&mut writer).await;
                    self.apply(SessionEvent::Drained);
                    break;
                }
            }
        }

        tracing::info!(
            updates = self.updates,
            projections = self.projections,
            "session closed"
        );
        Ok(self.summary())
    }

    fn apply(&mut self, event: SessionEvent) {
        match self.state.on(event) {
            Some(next) => {
                tracing::debug!(from = %self.state, to = %next, ?event, "session transition");
                self.state = next;
                self.transitions.push(next);
            }
            None => tracing::trace!(state = %self.state, ?event, "event ignored"),
        }
    }

    fn summary(self) -> SessionSummary {
        SessionSummary {
            state: self.state,
            transitions: self.transitions,
            updates: self.updates,
            projections: self.projections,
        }
    }
}

async fn close_writer<W>(writer: &mut W)
where
    W: Sink<SubscribeRequest> + Unpin,
    W::Error: Display,
{
    if let Err(err) = writer.close().await {
        tracing::debug!("closing request writer: {err}");
    }
}
