//! Order status
//!
//! Orders start at `To ship` and move forward to `Completed`. Either party can
//! ask to cancel an order that has not completed; the other party accepts or
//! denies the request.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::labels::UnknownLabel;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed, waiting for the seller to ship.
    #[serde(rename = "To ship")]
    ToShip,

    /// Handed to the carrier.
    #[serde(rename = "Shipping")]
    Shipping,

    /// Received by the customer.
    #[serde(rename = "Completed")]
    Completed,

    /// A cancellation request is waiting for a reply.
    #[serde(rename = "Cancelling")]
    Cancelling,

    /// Cancelled. Terminal.
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// All statuses.
    pub const ALL: [Self; 5] = [
        Self::ToShip,
        Self::Shipping,
        Self::Completed,
        Self::Cancelling,
        Self::Cancelled,
    ];

    /// Canonical label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ToShip => "To ship",
            Self::Shipping => "Shipping",
            Self::Completed => "Completed",
            Self::Cancelling => "Cancelling",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Advance the order on behalf of `party`.
    ///
    /// The seller moves `To ship → Shipping → Completed`; the customer can only
    /// confirm `Shipping → Completed`. Advancing a completed order leaves it
    /// completed.
    ///
    /// # Errors
    ///
    /// Returns [`OrderStatusError::InvalidTransition`] for any other state.
    pub fn advance(self, party: Party) -> Result<Self, OrderStatusError> {
        match (party, self) {
            (Party::Seller, Self::ToShip) => Ok(Self::Shipping),
            (_, Self::Shipping) => Ok(Self::Completed),
            (_, Self::Completed) => Ok(Self::Completed),
            (party, from) => Err(OrderStatusError::InvalidTransition { from, party }),
        }
    }

    /// Ask to cancel the order.
    ///
    /// # Errors
    ///
    /// Only orders that are `To ship` or `Shipping` can be cancelled.
    pub fn request_cancellation(
        self,
        requested_by: Party,
    ) -> Result<PendingCancellation, OrderStatusError> {
        match self {
            Self::ToShip | Self::Shipping => Ok(PendingCancellation {
                previous: self,
                requested_by,
            }),
            from => Err(OrderStatusError::NotCancellable(from)),
        }
    }

    /// Check the customer can rate the order.
    ///
    /// # Errors
    ///
    /// The order must be completed and not rated yet.
    pub fn ensure_reviewable(self, already_reviewed: bool) -> Result<(), OrderStatusError> {
        if self != Self::Completed {
            return Err(OrderStatusError::NotReviewable(self));
        }

        if already_reviewed {
            return Err(OrderStatusError::AlreadyReviewed);
        }

        Ok(())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == value)
            .ok_or_else(|| UnknownLabel::new("order status", value))
    }
}

/// Which side of an order a member acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    /// The member who listed the books.
    Seller,

    /// The member who bought them.
    Customer,
}

impl Party {
    /// Canonical label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Seller => "seller",
            Self::Customer => "customer",
        }
    }

    /// The other side of the order.
    pub const fn counterpart(self) -> Self {
        match self {
            Self::Seller => Self::Customer,
            Self::Customer => Self::Seller,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Party {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "seller" => Ok(Self::Seller),
            "customer" => Ok(Self::Customer),
            _ => Err(UnknownLabel::new("party", value)),
        }
    }
}

/// An outstanding cancellation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCancellation {
    /// Status before the request; restored on denial.
    pub previous: OrderStatus,

    /// Who asked.
    pub requested_by: Party,
}

impl PendingCancellation {
    /// Status the order moves to while the request is pending.
    pub const fn status(self) -> OrderStatus {
        OrderStatus::Cancelling
    }

    /// Resolve the request on behalf of `replier`.
    ///
    /// # Errors
    ///
    /// Only the counterpart of the requester may reply.
    pub fn resolve(
        self,
        replier: Party,
        reply: CancellationReply,
    ) -> Result<OrderStatus, OrderStatusError> {
        if replier == self.requested_by {
            return Err(OrderStatusError::NotCounterparty);
        }

        Ok(match reply {
            CancellationReply::Accept => OrderStatus::Cancelled,
            CancellationReply::Deny => self.previous,
        })
    }
}

/// Answer to a cancellation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationReply {
    /// Cancel the order.
    Accept,

    /// Keep the order going.
    Deny,
}

impl From<bool> for CancellationReply {
    fn from(accept: bool) -> Self {
        if accept { Self::Accept } else { Self::Deny }
    }
}

/// Resolve a cancellation request against the stored order state.
///
/// # Errors
///
/// The order must be `Cancelling` with a recorded request, and `replier` must be
/// the requester's counterpart.
pub fn resolve_cancellation(
    status: OrderStatus,
    pending: Option<PendingCancellation>,
    replier: Party,
    reply: CancellationReply,
) -> Result<OrderStatus, OrderStatusError> {
    match (status, pending) {
        (OrderStatus::Cancelling, Some(pending)) => pending.resolve(replier, reply),
        (status, _) => Err(OrderStatusError::NotCancelling(status)),
    }
}

/// A 1 to 5 star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stars(u8);

impl Stars {
    /// Fewest stars.
    pub const MIN: u8 = 1;

    /// Most stars.
    pub const MAX: u8 = 5;

    /// Validate a star count.
    ///
    /// # Errors
    ///
    /// Returns an error outside `1..=5`.
    pub fn new(stars: u8) -> Result<Self, OrderStatusError> {
        if (Self::MIN..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(OrderStatusError::StarsOutOfRange(stars))
        }
    }

    /// Star count.
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Order listing filter, matching the dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatusFilter {
    /// Every order.
    #[default]
    All,

    /// `To ship` orders.
    ToShip,

    /// `Shipping` orders.
    Shipping,

    /// `Completed` orders.
    Completed,

    /// `Cancelling` and `Cancelled` orders.
    Cancellation,
}

impl OrderStatusFilter {
    /// Statuses included by this filter.
    pub fn statuses(self) -> &'static [OrderStatus] {
        match self {
            Self::All => &OrderStatus::ALL,
            Self::ToShip => &[OrderStatus::ToShip],
            Self::Shipping => &[OrderStatus::Shipping],
            Self::Completed => &[OrderStatus::Completed],
            Self::Cancellation => &[OrderStatus::Cancelling, OrderStatus::Cancelled],
        }
    }
}

impl FromStr for OrderStatusFilter {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().replace(' ', "_").as_str() {
            "all" => Ok(Self::All),
            "to_ship" => Ok(Self::ToShip),
            "shipping" => Ok(Self::Shipping),
            "completed" => Ok(Self::Completed),
            "cancellation" => Ok(Self::Cancellation),
            _ => Err(UnknownLabel::new("order filter", value)),
        }
    }
}

/// Rejected order status changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderStatusError {
    /// `party` cannot advance an order in `from`.
    #[error("{party} cannot advance an order that is {from}")]
    InvalidTransition {
        /// Current status.
        from: OrderStatus,

        /// Acting party.
        party: Party,
    },

    /// Cancellation requested outside `To ship`/`Shipping`.
    #[error("an order that is {0} cannot be cancelled")]
    NotCancellable(OrderStatus),

    /// Reply sent for an order without a pending request.
    #[error("order is {0}, not awaiting a cancellation reply")]
    NotCancelling(OrderStatus),

    /// The requester tried to answer their own request.
    #[error("only the other party can reply to a cancellation request")]
    NotCounterparty,

    /// Rating an order that is not completed.
    #[error("an order that is {0} cannot be rated")]
    NotReviewable(OrderStatus),

    /// Rating an order twice.
    #[error("order has already been rated")]
    AlreadyReviewed,

    /// Star count outside `1..=5`.
    #[error("stars must be between 1 and 5, got {0}")]
    StarsOutOfRange(u8),
}
