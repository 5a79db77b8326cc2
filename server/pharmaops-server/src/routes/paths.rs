//! Route path constants shared by the router and the OpenAPI annotations

pub mod health {
    pub const HEALTH: &str = "/health";
    pub const VERSION: &str = "/version";
}

pub mod api_v1 {
    pub const DASHBOARD_METRICS: &str = "/api/v1/dashboard/metrics";
    pub const DASHBOARD_INVENTORY: &str = "/api/v1/dashboard/inventory";

    pub const REFERENCE_PATIENTS: &str = "/api/v1/reference/patients";
    pub const REFERENCE_DOCTORS: &str = "/api/v1/reference/doctors";
    pub const REFERENCE_PHARMACISTS: &str = "/api/v1/reference/pharmacists";
    pub const REFERENCE_DRUGS: &str = "/api/v1/reference/drugs";
    pub const REFERENCE_SUPPLIERS: &str = "/api/v1/reference/suppliers";
    pub const REFERENCE_POLICIES: &str = "/api/v1/reference/policies";

    pub const DISPENSES: &str = "/api/v1/dispenses";
    pub const DISPENSE_BY_ID: &str = "/api/v1/dispenses/:dispense_id";
    pub const DISPENSE_COVERAGE: &str = "/api/v1/dispenses/:dispense_id/coverage";

    pub const ORDERS: &str = "/api/v1/orders";
    pub const ORDER_ITEMS: &str = "/api/v1/orders/:order_id/items";
    pub const ORDER_REVISIONS: &str = "/api/v1/orders/:order_id/revisions";
    pub const ORDER_CANCEL: &str = "/api/v1/orders/:order_id/cancel";

    pub const COVERAGE: &str = "/api/v1/coverage";
    pub const COVERAGE_BY_KEY: &str = "/api/v1/coverage/:dispense_id/:policy_id";
}
