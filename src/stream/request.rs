use std::collections::HashMap;

use yellowstone_grpc_proto::prelude::{
    CommitmentLevel, SubscribeRequest, SubscribeRequestFilterTransactions,
};

use crate::config::{Commitment, FilterConfig};

/// Builds the initial subscription: a single named transaction filter
/// including `filter.program_ids`, every other category left empty.
pub fn subscribe_request(
    filter_name: &str,
    filter: &FilterConfig,
    commitment: Commitment,
) -> SubscribeRequest {
    let mut transactions = HashMap::with_capacity(1);
    transactions.insert(
        filter_name.to_string(),
        SubscribeRequestFilterTransactions {
            account_include: filter.program_ids.clone(),
            account_exclude: Vec::new(),
            account_required: Vec::new(),
            ..Default::default()
        },
    );

    SubscribeRequest {
        accounts: HashMap::new(),
        slots: HashMap::new(),
        transactions,
        transactions_status: HashMap::new(),
        entry: HashMap::new(),
        blocks: HashMap::new(),
        blocks_meta: HashMap::new(),
        commitment: Some(CommitmentLevel::from(commitment) as i32),
        accounts_data_slice: Vec::new(),
        ping: None,
        ..Default::default()
    }
}
