//! # Rule-Based Authorization
//!
//! Evaluates `AuthAction`s against a rule map keyed by `AuthAction::rule_key`.
//! Signer roles come from a roster of registered identities.

use crate::config::ConfigLedgerConfig;
use crate::domain::auth::{AuthAction, AuthConstraint, AuthError};
use crate::ports::WriteRequestValidator;
use parking_lot::RwLock;
use shared_types::{Did, Request, Role, LEDGERS_FREEZE};
use std::collections::HashMap;
use tracing::debug;

/// Policy evaluator backed by an in-memory rule map and identity roster.
pub struct AuthRuleValidator {
    rules: RwLock<HashMap<String, AuthConstraint>>,
    roles: RwLock<HashMap<Did, Role>>,
}

impl AuthRuleValidator {
    /// Empty rule map: every action is rejected until a rule is added.
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(HashMap::new()),
            roles: RwLock::new(HashMap::new()),
        }
    }

    /// Default rules: freezing ledgers, first time or again, takes trustee
    /// signatures.
    pub fn with_config(config: &ConfigLedgerConfig) -> Self {
        let validator = Self::new();
        let trustees = AuthConstraint::role(Role::Trustee, config.trustee_signatures_required);
        validator.set_rule(&AuthAction::add_any(LEDGERS_FREEZE), trustees.clone());
        validator.set_rule(&AuthAction::edit_any(LEDGERS_FREEZE), trustees);
        validator
    }

    pub fn set_rule(&self, action: &AuthAction, constraint: AuthConstraint) {
        self.rules.write().insert(action.rule_key(), constraint);
    }

    pub fn register_identity(&self, did: impl Into<Did>, role: Role) {
        self.roles.write().insert(did.into(), role);
    }

    fn role_of(&self, did: &str) -> Option<Role> {
        self.roles.read().get(did).copied()
    }

    /// Why `constraint` is not met by `signers`, or `None` if it is.
    fn unmet(&self, constraint: &AuthConstraint, signers: &[&str]) -> Option<String> {
        match constraint {
            AuthConstraint::Role { role, sig_count } => {
                let matching = signers
                    .iter()
                    .filter(|did| match role {
                        Some(required) => self.role_of(did) == Some(*required),
                        None => true,
                    })
                    .count();
                if matching >= *sig_count {
                    None
                } else {
                    let role_name = role.map_or("any".to_string(), |r| r.to_string());
                    Some(format!(
                        "Not enough {role_name} signatures: need {sig_count}, got {matching}"
                    ))
                }
            }
            AuthConstraint::AnyOf(inner) => {
                let mut reasons = Vec::with_capacity(inner.len());
                for c in inner {
                    match self.unmet(c, signers) {
                        None => return None,
                        Some(reason) => reasons.push(reason),
                    }
                }
                Some(reasons.join("; "))
            }
            AuthConstraint::Forbidden => Some("action is forbidden".to_string()),
        }
    }
}

impl Default for AuthRuleValidator {
    fn default() -> Self {
        Self::with_config(&ConfigLedgerConfig::default())
    }
}

impl WriteRequestValidator for AuthRuleValidator {
    fn validate(&self, request: &Request, actions: &[AuthAction]) -> Result<(), AuthError> {
        let signers = request.signers();
        for action in actions {
            let constraint = self
                .rules
                .read()
                .get(&action.rule_key())
                .cloned()
                .unwrap_or(AuthConstraint::Forbidden);

            if let Some(reason) = self.unmet(&constraint, &signers) {
                return Err(AuthError {
                    action: action.clone(),
                    constraint: constraint.to_string(),
                    reason,
                });
            }
            debug!(action = %action, "Authorization rule satisfied");
        }
        Ok(())
    }
}
