pub mod delete_document;

mod future;

use crate::ConnectionInfo;

#[derive(Debug, thiserror::Error)]
pub enum Error<S, B> {
    #[error(transparent)]
    Http(http::Error),
    #[error(transparent)]
    Service(S),
    #[error(transparent)]
    Body(B),
    #[error(transparent)]
    Json(serde_json::Error),
    #[error(transparent)]
    Header(headers::Error),

    #[error("A {code} error occured during DocumentDB querying. Error Message: {message}")]
    Api {
        status: http::StatusCode,
        code: String,
        message: String,
    },
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

fn uri(connection_info: &ConnectionInfo, document_id: &str) -> String {
    format!(
        "{}/dbs/{}/colls/{}/docs/{}",
        connection_info.account_url.trim_end_matches('/'),
        connection_info.database_id,
        connection_info.collection_id,
        document_id,
    )
}
