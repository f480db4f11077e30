use std::collections::BTreeMap;

use yellowstone_grpc_proto::prelude::{CompiledInstruction, Message, TransactionStatusMeta};

use crate::core::matcher::DiscriminatorSet;
use crate::core::utils::encode_address;
use crate::types::{AccountField, DecodedProjection};

/// Full account key list of a message: static keys first, then addresses
/// loaded through lookup tables (writable, then readonly).
#[derive(Clone, Copy, Debug)]
pub struct AccountKeys<'a> {
    static_keys: &'a [Vec<u8>],
    loaded_writable: &'a [Vec<u8>],
    loaded_readonly: &'a [Vec<u8>],
}

impl<'a> AccountKeys<'a> {
    pub fn new(message: &'a Message, meta: Option<&'a TransactionStatusMeta>) -> Self {
        let (loaded_writable, loaded_readonly) = match meta {
            Some(meta) => (
                meta.loaded_writable_addresses.as_slice(),
                meta.loaded_readonly_addresses.as_slice(),
            ),
            None => (&[][..], &[][..]),
        };
        Self {
            static_keys: &message.account_keys,
            loaded_writable,
            loaded_readonly,
        }
    }

    pub fn get(&self, index: usize) -> Option<&'a [u8]> {
        let mut index = index;
        for segment in [self.static_keys, self.loaded_writable, self.loaded_readonly] {
            if index < segment.len() {
                return Some(segment[index].as_slice());
            }
            index -= segment.len();
        }
        None
    }

    pub fn len(&self) -> usize {
        self.static_keys.len() + self.loaded_writable.len() + self.loaded_readonly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Identity of the transaction a decoded instruction belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordContext {
    pub signature: String,
    pub slot: u64,
}

/// Resolves configured instruction account positions into addresses.
#[derive(Clone, Debug)]
pub struct RecordDecoder {
    discriminators: DiscriminatorSet,
    fields: Vec<AccountField>,
}

impl RecordDecoder {
    pub fn new(discriminators: DiscriminatorSet, fields: Vec<AccountField>) -> Self {
        Self {
            discriminators,
            fields,
        }
    }

    /// Builds the projection for `instruction`.
    ///
    /// Returns `None` when the instruction does not carry a configured
    /// discriminator. Fields whose account cannot be resolved are left out;
    /// the rest of the projection is still returned.
    pub fn decode(
        &self,
        context: &RecordContext,
        keys: AccountKeys<'_>,
        instruction: &CompiledInstruction,
    ) -> Option<DecodedProjection> {
        if !self.discriminators.matches(&instruction.data) {
            return None;
        }

        let mut fields = BTreeMap::new();
        for field in &self.fields {
            match resolve_account(keys, instruction, field.position) {
                Some(address) => {
                    fields.insert(field.name.clone(), address);
                }
                None => tracing::trace!(
                    field = %field.name,
                    position = field.position,
                    signature = %context.signature,
                    "account not resolvable, field omitted"
                ),
            }
        }

        Some(DecodedProjection {
            signature: context.signature.clone(),
            slot: context.slot.to_string(),
            fields,
        })
    }

    /// Convenience over [`RecordDecoder::decode`] for a message without
    /// transaction meta.
    pub fn decode_message(
        &self,
        context: &RecordContext,
        message: &Message,
        instruction: &CompiledInstruction,
    ) -> Option<DecodedProjection> {
        self.decode(context, AccountKeys::new(message, None), instruction)
    }
}

fn resolve_account(
    keys: AccountKeys<'_>,
    instruction: &CompiledInstruction,
    position: usize,
) -> Option<String> {
    let key_index = *instruction.accounts.get(position)?;
    keys.get(usize::from(key_index)).and_then(encode_address)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATE: [u8; 8] = [24, 30, 200, 40, 5, 28, 7, 119];

    fn key(last: u8) -> Vec<u8> {
        let mut key = vec![0u8; 32];
        key[31] = last;
        key
    }

    /// Base-58 of `key(last)`: 31 leading zero bytes then one digit.
    fn address(last: u8) -> String {
        const ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
        let digit = ALPHABET[usize::from(last)] as char;
        format!("{}{digit}", "1".repeat(31))
    }

    fn message(keys: Vec<Vec<u8>>) -> Message {
        Message {
            account_keys: keys,
            ..Default::default()
        }
    }

    fn instruction(accounts: Vec<u8>, data: &[u8]) -> CompiledInstruction {
        CompiledInstruction {
            program_id_index: 0,
            accounts,
            data: data.to_vec(),
        }
    }

    fn decoder(fields: Vec<AccountField>) -> RecordDecoder {
        RecordDecoder::new(DiscriminatorSet::new([CREATE]), fields)
    }

    fn context() -> RecordContext {
        RecordContext {
            signature: "sig".to_string(),
            slot: 42,
        }
    }

    #[test]
    fn resolves_positions_through_account_keys() {
        let msg = message(vec![key(1), key(2), key(3)]);
        let ix = instruction(vec![2, 0], &CREATE);
        let decoder = decoder(vec![AccountField::new("mint", 0), AccountField::new("user", 1)]);

        let projection = decoder.decode_message(&context(), &msg, &ix).unwrap();
        assert_eq!(projection.signature, "sig");
        assert_eq!(projection.slot, "42");
        assert_eq!(projection.field("mint"), Some(address(3).as_str()));
        assert_eq!(projection.field("user"), Some(address(1).as_str()));
    }

    #[test]
    fn missing_positions_are_omitted() {
        let msg = message(vec![key(1)]);
        // position 1 is past the instruction's accounts, position 0 points past the keys
        let ix = instruction(vec![5], &CREATE);
        let decoder = decoder(vec![AccountField::new("mint", 0), AccountField::new("user", 1)]);

        let projection = decoder.decode_message(&context(), &msg, &ix).unwrap();
        assert!(projection.fields.is_empty());
        assert_eq!(projection.slot, "42");
    }

    #[test]
    fn malformed_keys_are_omitted() {
        let msg = message(vec![vec![1, 2, 3], key(4)]);
        let ix = instruction(vec![0, 1], &CREATE);
        let decoder = decoder(vec![AccountField::new("bad", 0), AccountField::new("good", 1)]);

        let projection = decoder.decode_message(&context(), &msg, &ix).unwrap();
        assert_eq!(projection.field("bad"), None);
        assert_eq!(projection.field("good"), Some(address(4).as_str()));
    }

    #[test]
    fn non_matching_instruction_yields_nothing() {
        let msg = message(vec![key(1)]);
        let ix = instruction(vec![0], &[1, 2, 3, 4, 5, 6, 7, 8]);
        let decoder = decoder(vec![AccountField::new("mint", 0)]);
        assert_eq!(decoder.decode_message(&context(), &msg, &ix), None);
    }

    #[test]
    fn loaded_addresses_extend_static_keys() {
        let msg = message(vec![key(1)]);
        let meta = TransactionStatusMeta {
            loaded_writable_addresses: vec![key(2)],
            loaded_readonly_addresses: vec![key(3)],
            ..Default::default()
        };
        let keys = AccountKeys::new(&msg, Some(&meta));
        assert_eq!(keys.len(), 3);
        assert!(!keys.is_empty());
        assert!(AccountKeys::new(&message(Vec::new()), None).is_empty());
        assert_eq!(keys.get(1), Some(key(2).as_slice()));
        assert_eq!(keys.get(2), Some(key(3).as_slice()));
        assert_eq!(keys.get(3), None);

        let ix = instruction(vec![2], &CREATE);
        let projection = decoder(vec![AccountField::new("mint", 0)])
            .decode(&context(), keys, &ix)
            .unwrap();
        assert_eq!(projection.field("mint"), Some(address(3).as_str()));
    }
}
