//! Orders, as seen by the customer who placed them and by the vendor who
//! fulfils them.

pub mod customer;
pub mod returns;
pub mod vendor;

use serde::Serialize;

pub use customer::{CustomerOrder, CustomerOrderItem};
pub use returns::{
    CreateOrderReturn, OrderReturn, ReturnItem, ReturnReason, ReturnRequestItem, ReturnStatus,
};
pub use vendor::{Order, OrderAddress, OrderItem, OrderSummary, OrderTax};

/// Lifecycle state of an order.
///
/// Customer endpoints spell states out (`STANDBY_VENDOR`); vendor endpoints
/// use single-letter codes (`P`). Both spellings parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    StandbyBilling,
    StandbyVendor,
    StandbySupplying,
    ProcessingShipping,
    Processed,
    Completed,
    BillingFailed,
    VendorDeclined,
    Unpaid,
    Refunded,
    Cancelled,
    Incomplete,
}

impl OrderStatus {
    pub const ALL: [Self; 12] = [
        Self::StandbyBilling,
        Self::StandbyVendor,
        Self::StandbySupplying,
        Self::ProcessingShipping,
        Self::Processed,
        Self::Completed,
        Self::BillingFailed,
        Self::VendorDeclined,
        Self::Unpaid,
        Self::Refunded,
        Self::Cancelled,
        Self::Incomplete,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StandbyBilling => "STANDBY_BILLING",
            Self::StandbyVendor => "STANDBY_VENDOR",
            Self::StandbySupplying => "STANDBY_SUPPLYING",
            Self::ProcessingShipping => "PROCESSING_SHIPPING",
            Self::Processed => "PROCESSED",
            Self::Completed => "COMPLETED",
            Self::BillingFailed => "BILLING_FAILED",
            Self::VendorDeclined => "VENDOR_DECLINED",
            Self::Unpaid => "UNPAID",
            Self::Refunded => "REFUNDED",
            Self::Cancelled => "CANCELLED",
            Self::Incomplete => "INCOMPLETE",
        }
    }

    /// Single-letter code used by the vendor API.
    #[must_use]
    pub fn as_code(self) -> &'static str {
        match self {
            Self::StandbyBilling => "O",
            Self::StandbyVendor => "P",
            Self::StandbySupplying => "B",
            Self::ProcessingShipping => "E",
            Self::Processed => "C",
            Self::Completed => "H",
            Self::BillingFailed => "F",
            Self::VendorDeclined => "D",
            Self::Unpaid => "G",
            Self::Refunded => "A",
            Self::Cancelled => "I",
            Self::Incomplete => "N",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s || status.as_code() == s)
            .ok_or_else(|| format!("unknown order status \"{s}\""))
    }
}
