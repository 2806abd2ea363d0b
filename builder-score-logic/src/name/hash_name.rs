use alloy::primitives::{keccak256, B256};

/// Implementation of
/// https://docs.ens.domains/contract-api-reference/name-processing#algorithm
pub fn namehash(name: &str) -> B256 {
    if name.is_empty() {
        B256::ZERO
    } else {
        let (label, remainder) = name.split_once('.').unwrap_or((name, ""));
        let remainder_hash = namehash(remainder);
        let label_hash = keccak256(label.as_bytes());
        keccak256([remainder_hash.as_slice(), label_hash.as_slice()].concat())
    }
}

pub fn hex<T>(data: T) -> String
where
    T: AsRef<[u8]>,
{
    format!("0x{}", alloy::hex::encode(data))
}
