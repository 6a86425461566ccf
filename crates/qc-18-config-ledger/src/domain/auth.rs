//! # Authorization Actions and Constraints
//!
//! An `AuthAction` describes the kind of change a request attempts. Handlers
//! build actions; the policy evaluator owns the rules that decide them.

use serde::{Deserialize, Serialize};
use shared_types::{Role, TxnType};
use std::fmt;
use thiserror::Error;

/// Wildcard token for field and value positions.
pub const WILDCARD: &str = "*";

/// The change a request attempts, as submitted to the policy evaluator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthAction {
    /// Creation of a value that does not exist yet.
    Add {
        txn_type: TxnType,
        field: String,
        value: String,
    },
    /// Modification of an existing value.
    Edit {
        txn_type: TxnType,
        field: String,
        old_value: String,
        new_value: String,
    },
}

impl AuthAction {
    /// Add of any field to any value.
    pub fn add_any(txn_type: TxnType) -> Self {
        AuthAction::Add {
            txn_type,
            field: WILDCARD.to_string(),
            value: WILDCARD.to_string(),
        }
    }

    /// Edit of any field from any value to any value.
    pub fn edit_any(txn_type: TxnType) -> Self {
        AuthAction::Edit {
            txn_type,
            field: WILDCARD.to_string(),
            old_value: WILDCARD.to_string(),
            new_value: WILDCARD.to_string(),
        }
    }

    pub fn txn_type(&self) -> &TxnType {
        match self {
            AuthAction::Add { txn_type, .. } | AuthAction::Edit { txn_type, .. } => txn_type,
        }
    }

    pub fn is_add(&self) -> bool {
        matches!(self, AuthAction::Add { .. })
    }

    /// Key under which the rule for this action is stored.
    ///
    /// `ADD--<type>--<field>--*--<value>` or `EDIT--<type>--<field>--<old>--<new>`.
    pub fn rule_key(&self) -> String {
        match self {
            AuthAction::Add {
                txn_type,
                field,
                value,
            } => format!("ADD--{txn_type}--{field}--{WILDCARD}--{value}"),
            AuthAction::Edit {
                txn_type,
                field,
                old_value,
                new_value,
            } => format!("EDIT--{txn_type}--{field}--{old_value}--{new_value}"),
        }
    }
}

impl fmt::Display for AuthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthAction::Add {
                txn_type,
                field,
                value,
            } => write!(f, "ADD txn_type {txn_type} field {field} value {value}"),
            AuthAction::Edit {
                txn_type,
                field,
                old_value,
                new_value,
            } => write!(
                f,
                "EDIT txn_type {txn_type} field {field} from {old_value} to {new_value}"
            ),
        }
    }
}

/// A rule deciding whether a set of signers may perform an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthConstraint {
    /// At least `sig_count` signers holding `role`. `None` means any identity.
    Role { role: Option<Role>, sig_count: usize },
    /// Satisfied if any inner constraint is.
    AnyOf(Vec<AuthConstraint>),
    /// Never satisfied.
    Forbidden,
}

impl AuthConstraint {
    pub fn role(role: Role, sig_count: usize) -> Self {
        AuthConstraint::Role {
            role: Some(role),
            sig_count,
        }
    }
}

impl fmt::Display for AuthConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthConstraint::Role {
                role: Some(role),
                sig_count,
            } => write!(f, "{sig_count} {role} signature(s)"),
            AuthConstraint::Role {
                role: None,
                sig_count,
            } => write!(f, "{sig_count} signature(s) of any role"),
            AuthConstraint::AnyOf(inner) => {
                let parts: Vec<String> = inner.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(" OR "))
            }
            AuthConstraint::Forbidden => f.write_str("forbidden"),
        }
    }
}

/// Rejection returned by the policy evaluator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Rule for this action is: {constraint}. Failed checks: {reason}")]
pub struct AuthError {
    pub action: AuthAction,
    pub constraint: String,
    pub reason: String,
}
