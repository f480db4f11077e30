use yellowstone_grpc_proto::prelude::{
    subscribe_update::UpdateOneof, CompiledInstruction, Message, SubscribeUpdate,
    SubscribeUpdateTransaction,
};

use crate::config::FilterConfig;
use crate::core::decoder::{AccountKeys, RecordContext, RecordDecoder};
use crate::core::matcher::DiscriminatorSet;
use crate::core::utils::encode_signature;
use crate::types::DecodedProjection;

/// Kind of a streamed update, as far as the pipeline cares.
#[derive(Clone, Copy, Debug)]
pub enum UpdateKind<'a> {
    Transaction(&'a SubscribeUpdateTransaction),
    TransactionStatus,
    Account,
    Slot,
    Block,
    Entry,
    /// Keepalive traffic, ping or pong.
    Ping,
    /// Update without a payload.
    Other,
}

impl<'a> UpdateKind<'a> {
    pub fn of(update: &'a SubscribeUpdate) -> Self {
        match &update.update_oneof {
            Some(UpdateOneof::Transaction(tx)) => Self::Transaction(tx),
            Some(UpdateOneof::TransactionStatus(_)) => Self::TransactionStatus,
            Some(UpdateOneof::Account(_)) => Self::Account,
            Some(UpdateOneof::Slot(_)) => Self::Slot,
            Some(UpdateOneof::Block(_) | UpdateOneof::BlockMeta(_)) => Self::Block,
            Some(UpdateOneof::Entry(_)) => Self::Entry,
            Some(UpdateOneof::Ping(_) | UpdateOneof::Pong(_)) => Self::Ping,
            None => Self::Other,
        }
    }
}

/// Filter-and-decode chain applied to every streamed update.
///
/// Pure and synchronous: no I/O, no state carried between updates.
#[derive(Clone, Debug)]
pub struct FilterPipeline {
    filter_name: String,
    matcher: DiscriminatorSet,
    decoder: RecordDecoder,
}

impl FilterPipeline {
    pub fn new(filter_name: impl Into<String>, filter: &FilterConfig) -> Self {
        let matcher = DiscriminatorSet::new(filter.discriminators.iter().copied());
        Self {
            filter_name: filter_name.into(),
            decoder: RecordDecoder::new(matcher.clone(), filter.fields.clone()),
            matcher,
        }
    }

    pub fn filter_name(&self) -> &str {
        &self.filter_name
    }

    /// Runs one update through the pipeline. `None` means the update
    /// produced no output, which is never an error.
    pub fn process(&self, update: &SubscribeUpdate) -> Option<DecodedProjection> {
        let tx = match UpdateKind::of(update) {
            UpdateKind::Transaction(tx) => tx,
            UpdateKind::Ping => {
                tracing::trace!("ping");
                return None;
            }
            UpdateKind::TransactionStatus
            | UpdateKind::Account
            | UpdateKind::Slot
            | UpdateKind::Block
            | UpdateKind::Entry
            | UpdateKind::Other => {
                return None;
            }
        };

        if !update.filters.iter().any(|name| name == &self.filter_name) {
            tracing::trace!(filters = ?update.filters, "update not tagged with our filter");
            return None;
        }

        self.process_transaction(tx)
    }

    pub fn process_transaction(
        &self,
        update: &SubscribeUpdateTransaction,
    ) -> Option<DecodedProjection> {
        let info = update.transaction.as_ref()?;
        let message = info.transaction.as_ref()?.message.as_ref()?;

        let (index, instruction) = self.first_match(message)?;
        let context = RecordContext {
            signature: encode_signature(&info.signature),
            slot: update.slot,
        };
        tracing::debug!(
            signature = %context.signature,
            slot = context.slot,
            instruction = index,
            "matched instruction"
        );

        let keys = AccountKeys::new(message, info.meta.as_ref());
        self.decoder.decode(&context, keys, instruction)
    }

    /// First instruction, in message order, whose data carries one of the
    /// configured discriminators.
    pub fn first_match<'m>(
        &self,
        message: &'m Message,
    ) -> Option<(usize, &'m CompiledInstruction)> {
        message
            .instructions
            .iter()
            .enumerate()
            .find(|(_, ix)| self.matcher.matches(&ix.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yellowstone_grpc_proto::prelude::{
        SubscribeUpdateBlockMeta, SubscribeUpdateEntry, SubscribeUpdatePong,
        SubscribeUpdateTransactionStatus,
    };

    fn update(oneof: Option<UpdateOneof>) -> SubscribeUpdate {
        SubscribeUpdate {
            filters: vec!["pumpfun".to_string()],
            update_oneof: oneof,
            ..Default::default()
        }
    }

    #[test]
    fn every_variant_is_classified() {
        let status = update(Some(UpdateOneof::TransactionStatus(
            SubscribeUpdateTransactionStatus::default(),
        )));
        assert!(matches!(UpdateKind::of(&status), UpdateKind::TransactionStatus));

        let entry = update(Some(UpdateOneof::Entry(SubscribeUpdateEntry::default())));
        assert!(matches!(UpdateKind::of(&entry), UpdateKind::Entry));

        let pong = update(Some(UpdateOneof::Pong(SubscribeUpdatePong::default())));
        assert!(matches!(UpdateKind::of(&pong), UpdateKind::Ping));

        let meta = update(Some(UpdateOneof::BlockMeta(SubscribeUpdateBlockMeta::default())));
        assert!(matches!(UpdateKind::of(&meta), UpdateKind::Block));

        assert!(matches!(UpdateKind::of(&update(None)), UpdateKind::Other));
    }

    #[test]
    fn non_transaction_variants_produce_nothing() {
        let pipeline = FilterPipeline::new("pumpfun", &crate::protocols::pumpfun::create());
        for oneof in [
            UpdateOneof::TransactionStatus(SubscribeUpdateTransactionStatus::default()),
            UpdateOneof::Entry(SubscribeUpdateEntry::default()),
            UpdateOneof::Pong(SubscribeUpdatePong::default()),
        ] {
            assert_eq!(pipeline.process(&update(Some(oneof))), None);
        }
        assert_eq!(pipeline.process(&update(None)), None);
    }
}
