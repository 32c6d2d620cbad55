//! Permission strings referenced by the route table and the built-in roles.
//!
//! Permissions are opaque `<area>.<action>` strings. Nothing here implies a
//! hierarchy: `orders.write` does not imply `orders.read`.

pub const CATALOG_WRITE: &str = "catalog.write";

pub const INVENTORY_READ: &str = "inventory.read";
pub const INVENTORY_WRITE: &str = "inventory.write";

pub const GROWTH_READ: &str = "growth.read";
pub const GROWTH_WRITE: &str = "growth.write";

pub const ORDERS_READ: &str = "orders.read";
pub const ORDERS_WRITE: &str = "orders.write";
pub const FINANCE_WRITE: &str = "finance.write";

pub const CUSTOMERS_READ: &str = "customers.read";
pub const CUSTOMERS_WRITE: &str = "customers.write";

pub const PROMOTIONS_READ: &str = "promotions.read";
pub const PROMOTIONS_WRITE: &str = "promotions.write";

pub const REVIEWS_MODERATE: &str = "reviews.moderate";

pub const CONTENT_WRITE: &str = "content.write";

pub const REPORTS_READ: &str = "reports.read";

pub const STAFF_READ: &str = "staff.read";
pub const STAFF_WRITE: &str = "staff.write";

pub const ALL: &[&str] = &[
    CATALOG_WRITE,
    INVENTORY_READ,
    INVENTORY_WRITE,
    GROWTH_READ,
    GROWTH_WRITE,
    ORDERS_READ,
    ORDERS_WRITE,
    FINANCE_WRITE,
    CUSTOMERS_READ,
    CUSTOMERS_WRITE,
    PROMOTIONS_READ,
    PROMOTIONS_WRITE,
    REVIEWS_MODERATE,
    CONTENT_WRITE,
    REPORTS_READ,
    STAFF_READ,
    STAFF_WRITE,
];
