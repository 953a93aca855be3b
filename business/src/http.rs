//! Thin HTTP client with Send-safe futures.
//!
//! Requests are described with plain data ([`RequestBuilder`]) and turned into
//! a reqwest request only when sent, so commands can build them from a
//! snapshot and move them into a spawned task. Responses are read fully into
//! a [`Response`] before returning.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully-read HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    /// Response headers (lowercased keys)
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.clone())
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("HTTP error: {message}")]
pub struct HttpError {
    pub message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

/// One field of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Body {
    Bytes(Vec<u8>),
    Multipart(Vec<FormField>),
}

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<Body>,
}

impl RequestBuilder {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        let json_bytes = serde_json::to_vec(value)?;
        self.body = Some(Body::Bytes(json_bytes));
        self.headers
            .insert("content-type".to_string(), "application/json".to_string());
        Ok(self)
    }

    /// Append a text field, switching the body to `multipart/form-data`.
    pub fn text_field(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(FormField::Text {
            name: name.into(),
            value: value.into(),
        })
    }

    /// Append a file field, switching the body to `multipart/form-data`.
    pub fn file_field(
        self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.field(FormField::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        })
    }

    fn field(mut self, field: FormField) -> Self {
        match &mut self.body {
            Some(Body::Multipart(fields)) => fields.push(field),
            _ => self.body = Some(Body::Multipart(vec![field])),
        }
        self
    }

    pub async fn send(self) -> HttpResult<Response> {
        let client = reqwest::Client::new();

        let mut request = match self.method {
            Method::Get => client.get(&self.url),
            Method::Post => client.post(&self.url),
        };

        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        match self.body {
            Some(Body::Bytes(bytes)) => request = request.body(bytes),
            Some(Body::Multipart(fields)) => request = request.multipart(build_form(fields)?),
            None => {}
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?;

        // Extract status and headers before consuming the response
        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.as_str().to_lowercase(), v.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?
            .to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

fn build_form(fields: Vec<FormField>) -> HttpResult<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let part = reqwest::multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&mime)
                    .map_err(|e| HttpError::new(e.to_string()))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

pub struct Client;

impl Client {
    pub fn get(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Post, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_success() {
        let response = Response {
            status: 200,
            headers: HashMap::new(),
            body: Vec::new(),
        };
        assert!(response.is_success());

        let response = Response {
            status: 401,
            headers: HashMap::new(),
            body: Vec::new(),
        };
        assert!(!response.is_success());
    }

    #[test]
    fn test_response_header_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        let response = Response {
            status: 200,
            headers,
            body: Vec::new(),
        };

        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn test_request_builder_json() {
        #[derive(serde::Serialize)]
        struct Credentials {
            user: String,
        }

        let builder = Client::post("https://example.com")
            .json(&Credentials {
                user: "admin".to_string(),
            })
            .unwrap();

        assert_eq!(
            builder.headers.get("content-type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(
            builder.body,
            Some(Body::Bytes(br#"{"user":"admin"}"#.to_vec()))
        );
    }

    #[test]
    fn test_multipart_fields_accumulate_in_order() {
        let builder = Client::post("https://example.com")
            .file_field("photo", "ana.png", "image/png", vec![1, 2, 3])
            .text_field("firstName", "Ana");

        let Some(Body::Multipart(fields)) = builder.body else {
            panic!("expected a multipart body");
        };
        assert_eq!(fields.len(), 2);
        assert!(matches!(&fields[0], FormField::File { name, .. } if name == "photo"));
        assert_eq!(
            fields[1],
            FormField::Text {
                name: "firstName".into(),
                value: "Ana".into()
            }
        );
    }

    #[test]
    fn test_invalid_mime_is_reported() {
        let fields = vec![FormField::File {
            name: "photo".into(),
            file_name: "x".into(),
            mime: "not a mime".into(),
            bytes: Vec::new(),
        }];
        assert!(build_form(fields).is_err());
    }
}
