pub mod api;
pub mod header;
pub mod middleware;

#[derive(Clone, Debug)]
pub struct ConnectionInfo {
    pub account_url: String,
    pub database_id: String,
    pub collection_id: String,
    pub primary_or_secondary_key: String,
}
