use http::{HeaderName, HeaderValue};

// https://learn.microsoft.com/en-us/rest/api/cosmos-db/common-cosmosdb-rest-request-headers
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartitionKey(pub Option<String>);

impl headers::Header for PartitionKey {
    fn name() -> &'static HeaderName {
        static NAME: HeaderName = HeaderName::from_static("x-ms-documentdb-partitionkey");
        &NAME
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(headers::Error::invalid)?;
        if value.is_empty() {
            return Ok(Self(None));
        }
        let [value]: [String; 1] =
            serde_json::from_slice(value.as_bytes()).map_err(|_| headers::Error::invalid())?;
        Ok(Self(Some(value)))
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        // an empty key means "no key", never the JSON array [""]
        let value = match self.0.as_deref() {
            Some("") | None => HeaderValue::from_static(""),
            Some(value) => {
                HeaderValue::from_str(&serde_json::to_string(&[value]).unwrap()).unwrap()
            }
        };
        values.extend([value]);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsistencyLevel {
    Strong,
    Bounded,
    Session,
    Eventual,
}

impl ConsistencyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Bounded => "Bounded",
            Self::Session => "Session",
            Self::Eventual => "Eventual",
        }
    }
}

impl headers::Header for ConsistencyLevel {
    fn name() -> &'static HeaderName {
        static NAME: HeaderName = HeaderName::from_static("x-ms-consistency-level");
        &NAME
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>,
    {
        match values.next().map(HeaderValue::as_bytes) {
            Some(b"Strong") => Ok(Self::Strong),
            Some(b"Bounded") => Ok(Self::Bounded),
            Some(b"Session") => Ok(Self::Session),
            Some(b"Eventual") => Ok(Self::Eventual),
            _ => Err(headers::Error::invalid()),
        }
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        values.extend([HeaderValue::from_static(self.as_str())]);
    }
}

// https://learn.microsoft.com/en-us/rest/api/cosmos-db/common-cosmosdb-rest-response-headers
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RequestCharge(pub f64);

impl headers::Header for RequestCharge {
    fn name() -> &'static HeaderName {
        static NAME: HeaderName = HeaderName::from_static("x-ms-request-charge");
        &NAME
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values
            .next()
            .ok_or_else(headers::Error::invalid)?
            .to_str()
            .map_err(|_| headers::Error::invalid())?
            .parse()
            .map_err(|_| headers::Error::invalid())?;
        Ok(Self(value))
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        values.extend([HeaderValue::from_str(&self.0.to_string()).unwrap()]);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionToken(pub String);

impl headers::Header for SessionToken {
    fn name() -> &'static HeaderName {
        static NAME: HeaderName = HeaderName::from_static("x-ms-session-token");
        &NAME
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values
            .next()
            .ok_or_else(headers::Error::invalid)?
            .to_str()
            .map_err(|_| headers::Error::invalid())?;
        Ok(Self(value.to_owned()))
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        values.extend([HeaderValue::from_str(&self.0).unwrap()]);
    }
}
