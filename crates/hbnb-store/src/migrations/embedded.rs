//! Schema migrations compiled into the binary

/// One forward-only schema step
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// Every migration, in application order
pub const MIGRATIONS: &[Migration] = &[Migration {
    id: "001_initial_schema",
    sql: include_str!("../../migrations/001_initial_schema.sql"),
}];

/// Tables created by the migrations, children before parents
pub const TABLES_DROP_ORDER: &[&str] = &[
    "place_amenity",
    "reviews",
    "places",
    "cities",
    "amenities",
    "states",
    "users",
    "schema_version",
];
