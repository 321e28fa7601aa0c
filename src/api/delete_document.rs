// https://learn.microsoft.com/en-us/rest/api/cosmos-db/delete-a-document

use super::future::{oneshot, Oneshot};
use super::Error;
use crate::header::{ConsistencyLevel, PartitionKey, RequestCharge, SessionToken};
use crate::ConnectionInfo;
use headers::{HeaderMapExt, UserAgent};
use http::header::{ACCEPT, USER_AGENT};
use http::{HeaderMap, HeaderValue, Request};
use std::future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

pub fn builder<I>(connection_info: &ConnectionInfo, document_id: I) -> Builder
where
    I: Into<String>,
{
    // the server treats an empty optional header as absent
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert("x-ms-version", HeaderValue::from_static("2016-07-11"));
    headers.insert("x-ms-consistency-level", HeaderValue::from_static(""));
    headers.insert(USER_AGENT, HeaderValue::from_static(""));
    headers.typed_insert(PartitionKey::default());
    headers.typed_insert(SessionToken::default());
    Builder {
        uri: super::uri(connection_info, &document_id.into()),
        headers,
    }
}

pub struct Builder {
    uri: String,
    headers: HeaderMap,
}

impl Builder {
    pub fn partition_key<V>(mut self, value: V) -> Self
    where
        V: Into<String>,
    {
        self.headers.typed_insert(PartitionKey(Some(value.into())));
        self
    }

    pub fn consistency_level(mut self, value: ConsistencyLevel) -> Self {
        self.headers.typed_insert(value);
        self
    }

    pub fn session_token<V>(mut self, value: V) -> Self
    where
        V: Into<String>,
    {
        self.headers.typed_insert(SessionToken(value.into()));
        self
    }

    pub fn user_agent(mut self, value: UserAgent) -> Self {
        self.headers.typed_insert(value);
        self
    }

    pub fn send<S, T, U>(self, service: S) -> Future<S, T, U>
    where
        S: tower::Service<Request<T>, Response = http::Response<U>>,
        T: Default,
        U: http_body::Body,
    {
        let Self { uri, headers } = self;
        let mut builder = Request::delete(uri);
        if let Some(h) = builder.headers_mut() {
            *h = headers;
        }
        let request = builder.body(T::default()).map_err(Error::Http);
        Future(oneshot(service, request))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub request_charge: f64,
    pub session_token: String,
}

#[pin_project::pin_project]
pub struct Future<S, T, U>(#[pin] Oneshot<S, T, U>)
where
    S: tower::Service<Request<T>>,
    U: http_body::Body;
impl<S, T, U> future::Future for Future<S, T, U>
where
    S: tower::Service<Request<T>, Response = http::Response<U>>,
    U: http_body::Body,
{
    type Output = Result<Response, Error<S::Error, U::Error>>;
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let response = ready!(self.project().0.poll(cx))?;
        let RequestCharge(request_charge) = response
            .headers()
            .typed_try_get()
            .map_err(Error::Header)?
            .ok_or_else(|| Error::Header(headers::Error::invalid()))?;
        let session_token = response
            .headers()
            .typed_try_get::<SessionToken>()
            .map_err(Error::Header)?
            .map(|SessionToken(token)| token)
            .unwrap_or_default();
        Poll::Ready(Ok(Response {
            request_charge,
            session_token,
        }))
    }
}
