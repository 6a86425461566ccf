//! # Core Request and Transaction Entities
//!
//! Types every write/read handler on the node agrees on.
//!
//! ## Clusters
//!
//! - **Ledgers**: `LedgerId` and the well-known ledger ids
//! - **Transaction types**: `TxnType` codes
//! - **Client side**: `Request`, `Operation`
//! - **Committed side**: `Txn`, `TxnBody`, `TxnMetadata`
//! - **Identity**: `Role`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// CLUSTER A: LEDGERS
// =============================================================================

/// Numeric ledger identifier.
pub type LedgerId = u32;

/// Ledger of validator nodes.
pub const POOL_LEDGER_ID: LedgerId = 0;
/// Ledger of ordinary domain transactions.
pub const DOMAIN_LEDGER_ID: LedgerId = 1;
/// Ledger holding network-wide configuration.
pub const CONFIG_LEDGER_ID: LedgerId = 2;
/// Ledger recording every ordered batch.
pub const AUDIT_LEDGER_ID: LedgerId = 3;

// =============================================================================
// CLUSTER B: TRANSACTION TYPES
// =============================================================================

/// Transaction type code as carried on the wire (`"type"` field).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxnType(Cow<'static, str>);

/// Identity (NYM) write.
pub const NYM: TxnType = TxnType::from_static("1");
/// Freeze a set of ledgers.
pub const LEDGERS_FREEZE: TxnType = TxnType::from_static("9");
/// Read the frozen-ledgers record.
pub const GET_FROZEN_LEDGERS: TxnType = TxnType::from_static("10");

impl TxnType {
    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// CLUSTER C: CLIENT REQUESTS
// =============================================================================

/// Decentralized identifier of a submitter.
pub type Did = String;

/// The operation carried by a request: a type code plus type-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Operation {
    pub fn new(txn_type: TxnType) -> Self {
        Self {
            txn_type,
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }
}

/// A client request as received by the node, already signature-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Submitting identity.
    pub identifier: Did,
    /// Client-chosen request id, unique per identifier.
    pub req_id: u64,
    pub operation: Operation,
    /// Multi-signatures keyed by signer DID. Empty for single-signed requests.
    #[serde(default)]
    pub signatures: BTreeMap<Did, String>,
    #[serde(default)]
    pub protocol_version: Option<u32>,
}

impl Request {
    pub fn new(identifier: impl Into<Did>, req_id: u64, operation: Operation) -> Self {
        Self {
            identifier: identifier.into(),
            req_id,
            operation,
            signatures: BTreeMap::new(),
            protocol_version: Some(2),
        }
    }

    pub fn with_signature(mut self, signer: impl Into<Did>, signature: impl Into<String>) -> Self {
        self.signatures.insert(signer.into(), signature.into());
        self
    }

    pub fn txn_type(&self) -> &TxnType {
        &self.operation.txn_type
    }

    /// DIDs that signed this request.
    ///
    /// A request without multi-signatures is signed by its identifier alone.
    pub fn signers(&self) -> Vec<&str> {
        if self.signatures.is_empty() {
            vec![self.identifier.as_str()]
        } else {
            self.signatures.keys().map(String::as_str).collect()
        }
    }

    /// Hex SHA-256 over the canonical JSON of identifier, req id and operation.
    ///
    /// Signatures are excluded so that every co-signer computes the same digest.
    pub fn digest(&self) -> String {
        let canonical = serde_json::json!({
            "identifier": self.identifier,
            "reqId": self.req_id,
            "operation": self.operation,
        });
        // serde_json::Map is a BTreeMap without `preserve_order`, so keys are sorted.
        let bytes = canonical.to_string();
        hex::encode(Sha256::digest(bytes.as_bytes()))
    }
}

// =============================================================================
// CLUSTER D: COMMITTED TRANSACTIONS
// =============================================================================

/// Author metadata copied from the originating request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxnAuthorMetadata {
    pub from: Did,
    pub req_id: u64,
    pub digest: String,
}

/// The ledger-independent part of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxnBody {
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    pub data: Map<String, Value>,
    pub metadata: TxnAuthorMetadata,
}

/// Ordering metadata. Assigned by the commit pipeline, absent before ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxnMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq_no: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txn_time: Option<u64>,
}

/// A transaction as written to a ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Txn {
    pub txn: TxnBody,
    pub txn_metadata: TxnMetadata,
}

impl Txn {
    /// Build an unsequenced transaction from a request.
    pub fn from_request(request: &Request) -> Self {
        Self {
            txn: TxnBody {
                txn_type: request.operation.txn_type.clone(),
                data: request.operation.fields.clone(),
                metadata: TxnAuthorMetadata {
                    from: request.identifier.clone(),
                    req_id: request.req_id,
                    digest: request.digest(),
                },
            },
            txn_metadata: TxnMetadata::default(),
        }
    }

    /// Stamp the ordering metadata assigned at commit.
    pub fn with_seq_no_and_time(mut self, seq_no: u64, txn_time: u64) -> Self {
        self.txn_metadata.seq_no = Some(seq_no);
        self.txn_metadata.txn_time = Some(txn_time);
        self
    }

    pub fn txn_type(&self) -> &TxnType {
        &self.txn.txn_type
    }

    pub fn payload_data(&self) -> &Map<String, Value> {
        &self.txn.data
    }

    pub fn seq_no(&self) -> Option<u64> {
        self.txn_metadata.seq_no
    }

    pub fn txn_time(&self) -> Option<u64> {
        self.txn_metadata.txn_time
    }
}

// =============================================================================
// CLUSTER E: IDENTITY
// =============================================================================

/// Role held by an identity on the domain ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "0")]
    Trustee,
    #[serde(rename = "2")]
    Steward,
    #[serde(rename = "101")]
    Endorser,
    #[serde(rename = "201")]
    NetworkMonitor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Trustee => "TRUSTEE",
            Role::Steward => "STEWARD",
            Role::Endorser => "ENDORSER",
            Role::NetworkMonitor => "NETWORK_MONITOR",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freeze_request() -> Request {
        Request::new(
            "trustee1",
            7,
            Operation::new(LEDGERS_FREEZE).with_field("ledgers_ids", vec![5u32, 6]),
        )
    }

    #[test]
    fn test_txn_type_wire_format() {
        let json = serde_json::to_string(&LEDGERS_FREEZE).unwrap();
        assert_eq!(json, "\"9\"");

        let parsed: TxnType = serde_json::from_str("\"9\"").unwrap();
        assert_eq!(parsed, LEDGERS_FREEZE);
    }

    #[test]
    fn test_operation_flattens_fields() {
        let value = serde_json::to_value(&freeze_request().operation).unwrap();
        assert_eq!(value["type"], "9");
        assert_eq!(value["ledgers_ids"], serde_json::json!([5, 6]));
    }

    #[test]
    fn test_signers_fall_back_to_identifier() {
        let request = freeze_request();
        assert_eq!(request.signers(), vec!["trustee1"]);

        let multi = request
            .with_signature("trustee2", "sig2")
            .with_signature("trustee3", "sig3");
        assert_eq!(multi.signers(), vec!["trustee2", "trustee3"]);
    }

    #[test]
    fn test_digest_ignores_signatures() {
        let plain = freeze_request();
        let signed = freeze_request().with_signature("trustee2", "sig2");

        assert_eq!(plain.digest(), signed.digest());
        assert_eq!(plain.digest().len(), 64);
    }

    #[test]
    fn test_digest_depends_on_operation() {
        let other = Request::new(
            "trustee1",
            7,
            Operation::new(LEDGERS_FREEZE).with_field("ledgers_ids", vec![5u32]),
        );
        assert_ne!(freeze_request().digest(), other.digest());
    }

    #[test]
    fn test_txn_from_request() {
        let request = freeze_request();
        let txn = Txn::from_request(&request);

        assert_eq!(txn.txn_type(), &LEDGERS_FREEZE);
        assert_eq!(txn.txn.metadata.from, "trustee1");
        assert_eq!(txn.txn.metadata.req_id, 7);
        assert!(txn.seq_no().is_none());
        assert!(txn.txn_time().is_none());

        let txn = txn.with_seq_no_and_time(10, 1_700_000_000);
        assert_eq!(txn.seq_no(), Some(10));
        assert_eq!(txn.txn_time(), Some(1_700_000_000));
    }

    #[test]
    fn test_role_wire_codes() {
        assert_eq!(serde_json::to_string(&Role::Trustee).unwrap(), "\"0\"");
        assert_eq!(serde_json::to_string(&Role::Endorser).unwrap(), "\"101\"");
        assert_eq!(Role::Steward.to_string(), "STEWARD");
    }
}
