use serde::Deserialize;

/// JSON-RPC envelope returned by `getTokenAccountsByOwner`.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<RpcResult>,
}

#[derive(Debug, Deserialize)]
pub struct RpcResult {
    pub value: Vec<TokenAccount>,
}

#[derive(Debug, Deserialize)]
pub struct TokenAccount {
    pub account: AccountInfo,
}

#[derive(Debug, Deserialize)]
pub struct AccountInfo {
    pub data: AccountData,
}

/// `data` carries a parsed layout only when the node honored the
/// `jsonParsed` encoding for this account.
#[derive(Debug, Deserialize)]
pub struct AccountData {
    #[serde(default)]
    pub parsed: Option<ParsedData>,
}

#[derive(Debug, Deserialize)]
pub struct ParsedData {
    #[serde(default)]
    pub info: Option<TokenAccountInfo>,
}

#[derive(Debug, Deserialize)]
pub struct TokenAccountInfo {
    #[serde(default)]
    pub mint: Option<String>,

    #[serde(rename = "tokenAmount", default)]
    pub token_amount: Option<TokenAmount>,
}

#[derive(Debug, Deserialize)]
pub struct TokenAmount {
    /// Balance scaled by the mint's decimals. Null for frozen edge cases.
    #[serde(rename = "uiAmount", default)]
    pub ui_amount: Option<f64>,
}
