use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::errors::DomainError;

/// Lifecycle of a purchased license. `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseState {
    Active,
    Cancelled,
}

impl PurchaseState {
    pub fn as_str(self) -> &'static str {
        match self {
            PurchaseState::Active => "Active",
            PurchaseState::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for PurchaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(PurchaseState::Active),
            "Cancelled" => Ok(PurchaseState::Cancelled),
            other => Err(DomainError::Internal(format!(
                "unknown purchase state '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchasedSoftware {
    /// Assigned by the store on first insert.
    pub id: Option<i64>,
    pub account_id: i64,
    pub name: String,
    pub quantity: i32,
    pub state: PurchaseState,
    pub valid_to: DateTime<Utc>,
}

impl PurchasedSoftware {
    pub const ENTITY: &'static str = "PurchasedSoftware";

    /// A fresh, not yet persisted, active purchase.
    pub fn new(
        account_id: i64,
        name: impl Into<String>,
        quantity: i32,
        valid_to: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        ensure_positive_quantity(quantity)?;
        Ok(Self {
            id: None,
            account_id,
            name: name.into(),
            quantity,
            state: PurchaseState::Active,
            valid_to,
        })
    }

    pub fn is_active(&self) -> bool {
        self.state == PurchaseState::Active
    }

    /// Returns `false` when the purchase was already cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.state == PurchaseState::Cancelled {
            return false;
        }
        self.state = PurchaseState::Cancelled;
        true
    }

    pub fn change_quantity(&mut self, quantity: i32) -> Result<(), DomainError> {
        ensure_positive_quantity(quantity)?;
        self.ensure_active()?;
        self.quantity = quantity;
        Ok(())
    }

    pub fn extend_expiry(&mut self, valid_to: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_active()?;
        self.valid_to = valid_to;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_active() {
            return Ok(());
        }
        let id = self
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "<unsaved>".to_string());
        Err(DomainError::Conflict(format!(
            "Purchase with id {id} is cancelled and can no longer be changed."
        )))
    }
}

fn ensure_positive_quantity(quantity: i32) -> Result<(), DomainError> {
    if quantity > 0 {
        Ok(())
    } else {
        Err(DomainError::InvalidArgument(format!(
            "Quantity must be a positive number, got {quantity}."
        )))
    }
}
