pub use crate::{resolver::MockAddressResolver, score::MockScoreSource};

use crate::{
    name::{hex, namehash},
    resolver::IAddrResolver,
};
use alloy::{
    primitives::{Address, B256},
    sol_types::SolCall,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use wiremock::{matchers::method, Mock, MockServer, Request, Respond, ResponseTemplate};

pub const BASE_CHAIN_ID: u64 = 8453;

/// JSON-RPC node that knows a fixed set of names. `eth_call` with
/// `addr(bytes32)` returns the registered address, reverts for names marked
/// as reverting and returns the zero address for everything else.
#[derive(Debug, Clone, Default)]
pub struct MockedRpcNode {
    addresses: HashMap<B256, Address>,
    reverting: HashSet<B256>,
}

impl MockedRpcNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: &str, address: Address) -> Self {
        self.addresses.insert(namehash(name), address);
        self
    }

    pub fn with_reverting_name(mut self, name: &str) -> Self {
        self.reverting.insert(namehash(name));
        self
    }

    pub async fn start(self) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(self)
            .mount(&server)
            .await;
        server
    }

    fn answer(&self, method: &str, params: &Value) -> Result<Value, Value> {
        match method {
            "eth_chainId" => Ok(json!(format!("{BASE_CHAIN_ID:#x}"))),
            "eth_blockNumber" => Ok(json!("0x1")),
            "eth_call" => self.eth_call(params),
            _ => Err(json!({"code": -32601, "message": "method not found"})),
        }
    }

    fn eth_call(&self, params: &Value) -> Result<Value, Value> {
        let call = &params[0];
        let input = call["input"]
            .as_str()
            .or_else(|| call["data"].as_str())
            .and_then(|input| alloy::hex::decode(input).ok())
            .unwrap_or_default();
        if input.len() < 36 || input[..4] != IAddrResolver::addrCall::SELECTOR {
            return Err(json!({"code": 3, "message": "execution reverted"}));
        }
        let node = B256::from_slice(&input[4..36]);
        if self.reverting.contains(&node) {
            return Err(json!({"code": 3, "message": "execution reverted"}));
        }
        let address = self.addresses.get(&node).copied().unwrap_or(Address::ZERO);
        Ok(json!(hex(address.into_word())))
    }
}

impl Respond for MockedRpcNode {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let request: Value = request.body_json().unwrap_or_default();
        let method = request["method"].as_str().unwrap_or_default();
        let body = match self.answer(method, &request["params"]) {
            Ok(result) => json!({"jsonrpc": "2.0", "id": request["id"], "result": result}),
            Err(error) => json!({"jsonrpc": "2.0", "id": request["id"], "error": error}),
        };
        ResponseTemplate::new(200).set_body_json(body)
    }
}
