//! mockito servers speaking the node's JSON-RPC and NodeReal's `nr_getAssetTransfers`.

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};

fn rpc_result(result: &Value) -> String {
    json!({ "jsonrpc": "2.0", "id": 1, "result": result }).to_string()
}

fn method_call(method: &str, params: &Value) -> Matcher {
    Matcher::PartialJson(json!({ "method": method, "params": params }))
}

/// EVM node double. Each `mock_*` call answers one exact method/params pair.
pub struct NodeMock {
    server: ServerGuard,
    mocks: Vec<Mock>,
}

impl NodeMock {
    pub async fn new() -> Self {
        Self { server: Server::new_async().await, mocks: Vec::new() }
    }

    #[must_use]
    pub fn url(&self) -> String {
        self.server.url()
    }

    fn respond(&mut self, matcher: Matcher, result: &Value) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/")
            .match_body(matcher)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(rpc_result(result))
            .create();
        self.mocks.push(mock);
        self
    }

    pub fn mock_block_number(&mut self, height: u64) -> &mut Self {
        let matcher = Matcher::PartialJson(json!({ "method": "eth_blockNumber" }));
        self.respond(matcher, &json!(format!("0x{height:x}")))
    }

    /// Serves `block` by number and by hash, without full transactions.
    pub fn mock_block(&mut self, block: &Value) -> &mut Self {
        let number = block["number"].clone();
        let hash = block["hash"].clone();
        self.respond(method_call("eth_getBlockByNumber", &json!([number, false])), block);
        self.respond(method_call("eth_getBlockByHash", &json!([hash, false])), block)
    }

    /// Serves `block` with full transaction objects.
    pub fn mock_full_block(&mut self, block: &Value) -> &mut Self {
        let number = block["number"].clone();
        self.respond(method_call("eth_getBlockByNumber", &json!([number, true])), block)
    }

    /// `null` for a block the node does not know.
    pub fn mock_missing_block(&mut self, height: u64) -> &mut Self {
        let params = json!([format!("0x{height:x}"), false]);
        self.respond(method_call("eth_getBlockByNumber", &params), &Value::Null)
    }

    /// Serves the transaction under its own `hash` field.
    pub fn mock_transaction(&mut self, tx: &Value) -> &mut Self {
        let params = json!([tx["hash"].clone()]);
        self.respond(method_call("eth_getTransactionByHash", &params), tx)
    }

    pub fn mock_receipt(&mut self, tx_hash: &str, receipt: &Value) -> &mut Self {
        self.respond(method_call("eth_getTransactionReceipt", &json!([tx_hash])), receipt)
    }

    pub fn mock_balance(&mut self, address: &str, wei: u128) -> &mut Self {
        let params = json!([address, "latest"]);
        self.respond(method_call("eth_getBalance", &params), &json!(format!("0x{wei:x}")))
    }

    pub fn mock_code(&mut self, address: &str, code: &str) -> &mut Self {
        self.respond(method_call("eth_getCode", &json!([address, "latest"])), &json!(code))
    }

    pub fn mock_rpc_error(&mut self, method: &str, code: i32, message: &str) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({ "method": method })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "error": { "code": code, "message": message }
                })
                .to_string(),
            )
            .create();
        self.mocks.push(mock);
        self
    }
}

/// NodeReal indexer double serving a chain of transfer pages.
///
/// Page `i > 0` is requested with `pageKey = "p{i}"`.
pub struct IndexerMock {
    server: ServerGuard,
    mocks: Vec<Mock>,
}

impl IndexerMock {
    pub async fn new() -> Self {
        Self { server: Server::new_async().await, mocks: Vec::new() }
    }

    #[must_use]
    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Registers every page; each must be requested exactly `hits_per_page` times.
    pub fn mock_pages(&mut self, pages: &[Vec<Value>], hits_per_page: usize) -> &mut Self {
        for (index, transfers) in pages.iter().enumerate() {
            let page_key = (index + 1 < pages.len()).then(|| format!("p{}", index + 1));
            self.mock_page(index, transfers, page_key.as_deref(), hits_per_page);
        }
        self
    }

    /// Registers page `index` and expects `hits` requests for it.
    pub fn mock_page(
        &mut self,
        index: usize,
        transfers: &[Value],
        next_page_key: Option<&str>,
        hits: usize,
    ) -> &mut Self {
        // Params serialize as one object ending in `"order":"desc"` plus an
        // optional trailing `pageKey`.
        let cursor = if index == 0 {
            Matcher::Regex(r#""order":"desc"\}"#.to_string())
        } else {
            Matcher::Regex(format!(r#""pageKey":"p{index}""#))
        };
        let mut result = json!({ "transfers": transfers });
        if let Some(key) = next_page_key {
            result["pageKey"] = json!(key);
        }

        let mock = self
            .server
            .mock("POST", "/")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(json!({ "method": "nr_getAssetTransfers" })),
                cursor,
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(rpc_result(&result))
            .expect(hits)
            .create();
        self.mocks.push(mock);
        self
    }

    pub fn mock_unavailable(&mut self) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/")
            .with_status(400)
            .with_body("bad request")
            .create();
        self.mocks.push(mock);
        self
    }

    /// Panics if any registered page was requested a different number of times.
    pub async fn assert_all(&self) {
        for mock in &self.mocks {
            mock.assert_async().await;
        }
    }
}
