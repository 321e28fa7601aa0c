// https://learn.microsoft.com/en-us/rest/api/cosmos-db/access-control-on-cosmosdb-resources

use base64::prelude::{Engine, BASE64_STANDARD};
use headers::Header;
use hmac::{Hmac, Mac};
use http::header::AUTHORIZATION;
use http::{HeaderName, HeaderValue, Method};
use percent_encoding::NON_ALPHANUMERIC;
use sha2::Sha256;
use std::task::{Context, Poll};
use std::time::SystemTime;

static X_MS_DATE: HeaderName = HeaderName::from_static("x-ms-date");

#[derive(Debug, thiserror::Error)]
pub enum InvalidKey {
    #[error(transparent)]
    Base64(base64::DecodeError),
    #[error(transparent)]
    Length(hmac::digest::InvalidLength),
}

#[derive(Clone)]
pub struct Layer {
    mac: Hmac<Sha256>,
}

impl Layer {
    pub fn new(primary_or_secondary_key: &str) -> Result<Self, InvalidKey> {
        let key = BASE64_STANDARD
            .decode(primary_or_secondary_key)
            .map_err(InvalidKey::Base64)?;
        let mac = Hmac::new_from_slice(&key).map_err(InvalidKey::Length)?;
        Ok(Self { mac })
    }
}

impl<S> tower::Layer<S> for Layer {
    type Service = Service<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Service {
            inner,
            mac: self.mac.clone(),
        }
    }
}

#[derive(Clone)]
pub struct Service<S> {
    inner: S,
    mac: Hmac<Sha256>,
}

impl<S, T> tower::Service<http::Request<T>> for Service<S>
where
    S: tower::Service<http::Request<T>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: http::Request<T>) -> Self::Future {
        let date = http_date(SystemTime::now());
        let authorization = authorization(
            self.mac.clone(),
            request.method(),
            request.uri().path(),
            &date,
        );
        request.headers_mut().insert(&X_MS_DATE, date);
        request.headers_mut().insert(AUTHORIZATION, authorization);
        self.inner.call(request)
    }
}

fn http_date(time: SystemTime) -> HeaderValue {
    let mut values = Vec::with_capacity(1);
    headers::Date::from(time).encode(&mut values);
    values.pop().unwrap()
}

fn authorization(
    mut mac: Hmac<Sha256>,
    method: &Method,
    path: &str,
    date: &HeaderValue,
) -> HeaderValue {
    let (resource_type, resource_link) = resource(path);
    mac.update(method.as_str().to_ascii_lowercase().as_bytes());
    mac.update(b"\n");
    mac.update(resource_type.to_ascii_lowercase().as_bytes());
    mac.update(b"\n");
    mac.update(resource_link.as_bytes());
    mac.update(b"\n");
    mac.update(&date.as_bytes().to_ascii_lowercase());
    mac.update(b"\n\n");
    let signature = BASE64_STANDARD.encode(mac.finalize().into_bytes());
    let token = format!("type=master&ver=1.0&sig={signature}");
    HeaderValue::from_str(
        &percent_encoding::percent_encode(token.as_bytes(), NON_ALPHANUMERIC).to_string(),
    )
    .unwrap()
}

// An even number of path segments addresses a single resource (the type is
// the second-to-last segment), an odd number addresses a feed (the type is
// the last segment and is excluded from the link).
fn resource(path: &str) -> (&str, &str) {
    let link = path.trim_matches('/');
    match link.rsplit_once('/') {
        Some((init, last)) => {
            if link.split('/').count() % 2 == 0 {
                match init.rsplit_once('/') {
                    Some((_, resource_type)) => (resource_type, link),
                    None => (init, link),
                }
            } else {
                (last, init)
            }
        }
        None => (link, ""),
    }
}

#[cfg(test)]
mod tests {
    use http::{HeaderValue, Method, Request, Response};
    use std::convert::Infallible;
    use tower::{Layer, ServiceExt};

    const KEY: &str = "dsZQi3KtZmCv1ljt3VNWNm7sQUF1y5rJfC6kv5JiwvW0EndXdDku/dkKBp8/ufDToSxL";

    #[test]
    fn test_resource() {
        assert_eq!(
            super::resource("/dbs/D/colls/C/docs/X"),
            ("docs", "dbs/D/colls/C/docs/X"),
        );
        assert_eq!(super::resource("/dbs/ToDoList"), ("dbs", "dbs/ToDoList"));
        assert_eq!(
            super::resource("/dbs/D/colls/C/docs"),
            ("docs", "dbs/D/colls/C"),
        );
        assert_eq!(super::resource("/dbs"), ("dbs", ""));
    }

    #[test]
    fn test_authorization() {
        let layer = super::Layer::new(KEY).unwrap();
        let date = HeaderValue::from_static("Thu, 27 Apr 2017 00:51:12 GMT");
        assert_eq!(
            super::authorization(layer.mac.clone(), &Method::GET, "/dbs/ToDoList", &date),
            "type%3Dmaster%26ver%3D1%2E0%26sig%3DKvBM8vONofkv3yKm%2F8zD9MEGlbu6jjHDJBp4E9c2ZZI%3D",
        );
        assert_eq!(
            super::authorization(
                layer.mac.clone(),
                &Method::DELETE,
                "/dbs/D/colls/C/docs/X",
                &date,
            ),
            "type%3Dmaster%26ver%3D1%2E0%26sig%3DL%2Fbgu5X9RIwCJi3wbxNYla2DjmO7qL6sL7Lj1UlRYLk%3D",
        );
    }

    #[test]
    fn test_invalid_key() {
        assert!(super::Layer::new("not base64!").is_err());
    }

    #[tokio::test]
    async fn test_service_signs_request() {
        let service = super::Layer::new(KEY).unwrap().layer(tower::service_fn(
            |request: Request<()>| async move {
                assert!(request.headers().contains_key("x-ms-date"));
                let authorization = request.headers()[http::header::AUTHORIZATION]
                    .to_str()
                    .unwrap()
                    .to_owned();
                assert!(authorization.starts_with("type%3Dmaster%26ver%3D1%2E0%26sig%3D"));
                Ok::<_, Infallible>(Response::new(()))
            },
        ));
        service
            .oneshot(
                Request::delete("https://example.documents.azure.com/dbs/D/colls/C/docs/X")
                    .body(())
                    .unwrap(),
            )
            .await
            .unwrap();
    }
}
