//! Per-page list configuration.
//!
//! Each dashboard page declares what its search box looks at, which facets
//! it offers and which columns sort, then hands everything else to the
//! shared pipeline in `fieldops_seeker`.

use fieldops_seeker::{FacetFilterConfig, ListConfig, SortSpec};

use crate::entities::{
    ClientStatus, EntityKind, Priority, ProjectStatus, QuoteStatus, TechnicianStatus,
    WorkOrderStatus,
};

/// A column of the plain-text table for a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    /// Field path read through `Seekable`.
    pub field: &'static str,
    /// Widest the column may grow before values are truncated.
    pub max_width: usize,
}

const fn col(header: &'static str, field: &'static str, max_width: usize) -> Column {
    Column {
        header,
        field,
        max_width,
    }
}

fn enum_facet(
    key: &str,
    label: &str,
    options: impl Iterator<Item = (&'static str, &'static str)>,
) -> FacetFilterConfig {
    options.fold(FacetFilterConfig::new(key, label), |facet, (value, option_label)| {
        facet.option(value, option_label)
    })
}

/// The list configuration of a page.
pub fn config_for(kind: EntityKind) -> ListConfig {
    match kind {
        EntityKind::Clients => ListConfig::new()
            .search_fields(["name", "email", "phone", "industry", "address.city"])
            .facet(enum_facet("status", "Status", ClientStatus::options()))
            .facet(
                FacetFilterConfig::new("industry", "Industry")
                    .option("plumbing", "Plumbing")
                    .option("electrical", "Electrical")
                    .option("hvac", "HVAC")
                    .option("construction", "Construction")
                    .option("property_management", "Property management"),
            )
            .sort_option("name", "Name")
            .sort_option("address.city", "City")
            .sort_option("created_at", "Created")
            .default_sort(SortSpec::asc("name")),

        EntityKind::Locations => ListConfig::new()
            .search_fields(["name", "client.name", "address.street", "address.city"])
            .facet(FacetFilterConfig::boolean("is_primary", "Primary"))
            .sort_option("name", "Name")
            .sort_option("client.name", "Client")
            .sort_option("address.city", "City")
            .default_sort(SortSpec::asc("client.name")),

        EntityKind::Technicians => ListConfig::new()
            .search_fields(["name", "email", "phone", "specialty"])
            .facet(enum_facet("status", "Status", TechnicianStatus::options()))
            .sort_option("name", "Name")
            .sort_option("hourly_rate", "Rate")
            .sort_option("hired_on", "Hired")
            .default_sort(SortSpec::asc("name")),

        EntityKind::Materials => ListConfig::new()
            .search_fields(["name", "sku", "category", "supplier"])
            .facet(
                FacetFilterConfig::new("category", "Category")
                    .option("plumbing", "Plumbing")
                    .option("electrical", "Electrical")
                    .option("hvac", "HVAC")
                    .option("hardware", "Hardware"),
            )
            .facet(FacetFilterConfig::boolean("low_stock", "Low stock"))
            .sort_option("name", "Name")
            .sort_option("quantity_in_stock", "In stock")
            .sort_option("unit_cost", "Unit cost")
            .default_sort(SortSpec::asc("name")),

        EntityKind::WorkOrders => ListConfig::new()
            .search_fields(["title", "description", "client.name", "technician.name"])
            .facet(enum_facet("status", "Status", WorkOrderStatus::options()))
            .facet(enum_facet("priority", "Priority", Priority::options()))
            .sort_option("created_at", "Created")
            .sort_option("scheduled_date", "Scheduled")
            .sort_option("priority_rank", "Priority")
            .sort_option("client.name", "Client")
            .sort_option("technician.name", "Technician")
            .default_sort(SortSpec::desc("created_at")),

        EntityKind::Quotes => ListConfig::new()
            .search_fields(["quote_number", "title", "client.name"])
            .facet(enum_facet("status", "Status", QuoteStatus::options()))
            .sort_option("created_at", "Created")
            .sort_option("quote_number", "Number")
            .sort_option("total", "Total")
            .sort_option("valid_until", "Valid until")
            .sort_option("client.name", "Client")
            .default_sort(SortSpec::desc("created_at")),

        EntityKind::Projects => ListConfig::new()
            .search_fields(["name", "client.name"])
            .facet(enum_facet("status", "Status", ProjectStatus::options()))
            .sort_option("name", "Name")
            .sort_option("start_date", "Start")
            .sort_option("end_date", "End")
            .sort_option("budget", "Budget")
            .sort_option("client.name", "Client")
            .default_sort(SortSpec::asc("name")),
    }
}

/// Columns of the plain-text table for a page.
pub fn columns(kind: EntityKind) -> &'static [Column] {
    const CLIENTS: &[Column] = &[
        col("ID", "id", 6),
        col("Name", "name", 28),
        col("Email", "email", 28),
        col("Industry", "industry", 16),
        col("City", "address.city", 16),
        col("Status", "status", 10),
    ];
    const LOCATIONS: &[Column] = &[
        col("ID", "id", 6),
        col("Name", "name", 24),
        col("Client", "client.name", 24),
        col("City", "address.city", 16),
        col("Primary", "is_primary", 7),
    ];
    const TECHNICIANS: &[Column] = &[
        col("ID", "id", 6),
        col("Name", "name", 24),
        col("Specialty", "specialty", 18),
        col("Rate", "hourly_rate", 8),
        col("Status", "status", 10),
    ];
    const MATERIALS: &[Column] = &[
        col("ID", "id", 6),
        col("Name", "name", 28),
        col("SKU", "sku", 12),
        col("Stock", "quantity_in_stock", 8),
        col("Unit cost", "unit_cost", 10),
        col("Low", "low_stock", 5),
    ];
    const WORK_ORDERS: &[Column] = &[
        col("ID", "id", 6),
        col("Title", "title", 28),
        col("Client", "client.name", 20),
        col("Technician", "technician.name", 18),
        col("Priority", "priority", 8),
        col("Status", "status", 12),
        col("Scheduled", "scheduled_date", 10),
    ];
    const QUOTES: &[Column] = &[
        col("No.", "quote_number", 6),
        col("Title", "title", 28),
        col("Client", "client.name", 20),
        col("Total", "total", 12),
        col("Status", "status", 10),
    ];
    const PROJECTS: &[Column] = &[
        col("ID", "id", 6),
        col("Name", "name", 28),
        col("Client", "client.name", 20),
        col("Budget", "budget", 12),
        col("Status", "status", 10),
    ];

    match kind {
        EntityKind::Clients => CLIENTS,
        EntityKind::Locations => LOCATIONS,
        EntityKind::Technicians => TECHNICIANS,
        EntityKind::Materials => MATERIALS,
        EntityKind::WorkOrders => WORK_ORDERS,
        EntityKind::Quotes => QUOTES,
        EntityKind::Projects => PROJECTS,
    }
}
