//! Table definitions and schema metadata SQL.

/// Current schema version, stored in the `metadata` table.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key/value store for schema bookkeeping.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Facilities. Seeded by administrators, read-only for booking flows.
pub const CREATE_FACILITIES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS facilities (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )";

/// Campsites. `active = 0` marks a soft-deleted campsite.
pub const CREATE_CAMPSITES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS campsites (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        loop_name TEXT NOT NULL,
        name TEXT NOT NULL,
        facility_id INTEGER NOT NULL REFERENCES facilities(id),
        capacity INTEGER NOT NULL CHECK (capacity > 0),
        active INTEGER NOT NULL DEFAULT 1 CHECK (active IN (0, 1))
    )";

/// (facility, loop, name) is unique among active campsites only.
pub const CREATE_ACTIVE_CAMPSITE_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_campsites_active_identity
    ON campsites(facility_id, loop_name, name) WHERE active = 1";

/// Reservations. Dates are `YYYY-MM-DD` text, `created_at` is epoch
/// microseconds.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        check_in TEXT NOT NULL,
        check_out TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        user_id INTEGER NOT NULL,
        campsite_id INTEGER NOT NULL REFERENCES campsites(id)
    )";

/// Speeds up occupancy counts and evictions.
pub const CREATE_RESERVATIONS_CAMPSITE_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_campsite
    ON reservations(campsite_id, check_in, check_out)";

/// Speeds up per-user listings and overlap checks.
pub const CREATE_RESERVATIONS_USER_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_user
    ON reservations(user_id, campsite_id)";

/// Attribute name catalog.
pub const CREATE_ATTRIBUTES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS attributes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )";

/// Equipment name catalog.
pub const CREATE_EQUIPMENT_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS equipment (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )";

/// Campsite to attribute join, carrying the value.
pub const CREATE_CAMPSITE_ATTRIBUTES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS campsite_attributes (
        campsite_id INTEGER NOT NULL REFERENCES campsites(id),
        attribute_id INTEGER NOT NULL REFERENCES attributes(id),
        value TEXT NOT NULL,
        PRIMARY KEY (campsite_id, attribute_id)
    )";

/// Campsite to equipment join.
pub const CREATE_CAMPSITE_EQUIPMENT_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS campsite_equipment (
        campsite_id INTEGER NOT NULL REFERENCES campsites(id),
        equipment_id INTEGER NOT NULL REFERENCES equipment(id),
        PRIMARY KEY (campsite_id, equipment_id)
    )";

/// Every DDL statement, in creation order.
pub const ALL_TABLES: [&str; 11] = [
    CREATE_METADATA_TABLE,
    CREATE_FACILITIES_TABLE,
    CREATE_CAMPSITES_TABLE,
    CREATE_ACTIVE_CAMPSITE_INDEX,
    CREATE_RESERVATIONS_TABLE,
    CREATE_RESERVATIONS_CAMPSITE_INDEX,
    CREATE_RESERVATIONS_USER_INDEX,
    CREATE_ATTRIBUTES_TABLE,
    CREATE_EQUIPMENT_TABLE,
    CREATE_CAMPSITE_ATTRIBUTES_TABLE,
    CREATE_CAMPSITE_EQUIPMENT_TABLE,
];

/// Reads the schema version.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// Writes the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
