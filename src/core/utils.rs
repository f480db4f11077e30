/// Length of an ed25519 public key as carried in `Message::account_keys`.
pub const PUBKEY_LEN: usize = 32;

/// Base-58 form of a public key. Returns `None` when the bytes are not a
/// 32-byte key.
#[inline]
pub fn encode_address(key: &[u8]) -> Option<String> {
    if key.len() != PUBKEY_LEN {
        return None;
    }
    Some(bs58::encode(key).into_string())
}

/// Base-58 form of a transaction signature. Signatures are encoded as-is,
/// whatever their length.
#[inline]
pub fn encode_signature(signature: &[u8]) -> String {
    bs58::encode(signature).into_string()
}
