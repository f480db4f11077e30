use std::pin::Pin;

use futures::{Sink, SinkExt, Stream};
use tonic::transport::ClientTlsConfig;
use tonic::Status;
use yellowstone_grpc_client::GeyserGrpcClient;
use yellowstone_grpc_proto::prelude::{SubscribeRequest, SubscribeUpdate};

use crate::config::StreamConfig;
use crate::core::error::SessionError;

/// Outbound half of a subscription: accepts request updates.
pub type RequestWriter = Pin<Box<dyn Sink<SubscribeRequest, Error = String> + Send>>;

/// Inbound half of a subscription.
pub type UpdateStream = Pin<Box<dyn Stream<Item = Result<SubscribeUpdate, Status>> + Send>>;

/// Opens a duplex Geyser subscribe channel. Nothing is written yet.
pub async fn connect(config: &StreamConfig) -> Result<(RequestWriter, UpdateStream), SessionError> {
    let mut builder = GeyserGrpcClient::build_from_shared(config.endpoint.clone())
        .map_err(SessionError::connect)?
        .x_token(config.x_token.clone())
        .map_err(SessionError::connect)?;
    if config.endpoint.starts_with("https://") {
        builder = builder
            .tls_config(ClientTlsConfig::new())
            .map_err(SessionError::connect)?;
    }

    let mut client = builder.connect().await.map_err(SessionError::connect)?;
    let (writer, updates) = client.subscribe().await.map_err(SessionError::connect)?;
    tracing::debug!(endpoint = %config.endpoint, "geyser channel open");

    Ok((
        Box::pin(writer.sink_map_err(|err| err.to_string())),
        Box::pin(updates),
    ))
}
