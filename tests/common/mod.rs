#![allow(dead_code)]

use yellowstone_grpc_proto::prelude::{
    subscribe_update::UpdateOneof, CompiledInstruction, Message, SubscribeUpdate,
    SubscribeUpdatePing, SubscribeUpdateSlot, SubscribeUpdateTransaction,
    SubscribeUpdateTransactionInfo, Transaction,
};

pub const PUMP_FUN_PROGRAM: &str = "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P";
pub const CREATE_DISCRIMINATOR: [u8; 8] = [24, 30, 200, 40, 5, 28, 7, 119];
pub const FILTER_NAME: &str = "pumpfun";

/// Instruction with `discriminator` followed by a few payload bytes.
pub fn instruction(discriminator: &[u8], accounts: Vec<u8>) -> CompiledInstruction {
    let mut data = discriminator.to_vec();
    data.extend_from_slice(&[0xAA; 12]);
    CompiledInstruction {
        program_id_index: 0,
        accounts,
        data,
    }
}

pub fn message(account_keys: Vec<Vec<u8>>, instructions: Vec<CompiledInstruction>) -> Message {
    Message {
        account_keys,
        instructions,
        ..Default::default()
    }
}

pub fn transaction_update(
    filters: &[&str],
    signature: &[u8],
    slot: u64,
    message: Message,
) -> SubscribeUpdate {
    let info = SubscribeUpdateTransactionInfo {
        signature: signature.to_vec(),
        transaction: Some(Transaction {
            signatures: vec![signature.to_vec()],
            message: Some(message),
        }),
        ..Default::default()
    };
    SubscribeUpdate {
        filters: filters.iter().map(|f| f.to_string()).collect(),
        update_oneof: Some(UpdateOneof::Transaction(SubscribeUpdateTransaction {
            transaction: Some(info),
            slot,
        })),
        ..Default::default()
    }
}

pub fn slot_update(slot: u64) -> SubscribeUpdate {
    SubscribeUpdate {
        filters: vec![FILTER_NAME.to_string()],
        update_oneof: Some(UpdateOneof::Slot(SubscribeUpdateSlot {
            slot,
            ..Default::default()
        })),
        ..Default::default()
    }
}

pub fn ping_update() -> SubscribeUpdate {
    SubscribeUpdate {
        filters: Vec::new(),
        update_oneof: Some(UpdateOneof::Ping(SubscribeUpdatePing::default())),
        ..Default::default()
    }
}

/// A create transaction whose instruction 0 points at key 1 for the mint.
pub fn create_update(mint: &[u8; 32], signature: &[u8; 64], slot: u64) -> SubscribeUpdate {
    let program = bs58::decode(PUMP_FUN_PROGRAM).into_vec().unwrap_or_default();
    let keys = vec![program, mint.to_vec()];
    let ix = instruction(&CREATE_DISCRIMINATOR, vec![1]);
    transaction_update(&[FILTER_NAME], signature, slot, message(keys, vec![ix]))
}
