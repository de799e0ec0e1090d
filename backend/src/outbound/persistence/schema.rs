//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Read-only product catalogue.
    products (id) {
        id -> Int8,
        name -> Text,
        width -> Float4,
        length -> Float4,
        height -> Float4,
        weight -> Float4,
        /// Origin address of the product.
        place -> Text,
    }
}

diesel::table! {
    /// Delivery orders. Rows are inserted once and never updated.
    orders (id) {
        id -> Int8,
        product_id -> Int8,
        /// Product name at order time.
        name -> Text,
        /// Product origin at order time.
        from_place -> Text,
        destination -> Text,
        time -> Timestamptz,
    }
}
