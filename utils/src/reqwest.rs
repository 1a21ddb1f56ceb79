//! Thin wrapper over `reqwest` that tags every failure with the stage it
//! happened at and the request that caused it.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use url::Url;

use crate::serde::{SerdePathError, SerdeResponseParseAsync};

#[derive(Debug)]
pub enum ReqwestStage {
    Send,
    Status,
    DecodeText,
    Deserialise,
}

fn parse_url<U: ToString>(url: U) -> crate::Result<Url> {
    url.to_string()
        .parse::<Url>()
        .map_err(|_| crate::Error::InvalidUrl(url.to_string()))
}

#[derive(Debug)]
pub struct ReqwestErrorContext {
    pub url: Url,
    pub query: String,
    pub json_body: String,
}

#[derive(Debug)]
pub enum ReqwestInnerError {
    Reqwest(reqwest::Error),
    SerdePath(SerdePathError),
}

pub struct Reqwest {
    builder: RequestBuilder,
    error_context: Option<ReqwestErrorContext>,
}

impl Reqwest {
    pub fn get<U: ToString>(client: &Client, url: U) -> crate::Result<Self> {
        let url = parse_url(url)?;
        Ok(Self::new(client.get(url.clone()), url))
    }

    pub fn post<U: ToString>(client: &Client, url: U) -> crate::Result<Self> {
        let url = parse_url(url)?;
        Ok(Self::new(client.post(url.clone()), url))
    }

    fn new(builder: RequestBuilder, url: Url) -> Self {
        Self {
            builder,
            error_context: Some(ReqwestErrorContext {
                url,
                query: String::new(),
                json_body: String::new(),
            }),
        }
    }

    pub fn query<T: serde::Serialize + Debug>(mut self, query: &T) -> Self {
        if let Some(context) = self.error_context.as_mut() {
            context.query = format!("{query:?}");
        }
        self.builder = self.builder.query(query);
        self
    }

    pub fn json_body<T: serde::Serialize + Debug>(mut self, json_body: &T) -> Self {
        if let Some(context) = self.error_context.as_mut() {
            context.json_body = format!("{json_body:?}");
        }
        self.builder = self.builder.json(json_body);
        self
    }

    async fn receive_text_internal(mut self) -> crate::Result<(String, Box<ReqwestErrorContext>)> {
        let error_context = Box::new(
            self.error_context
                .take()
                .ok_or(crate::Error::ReqwestErrorContextMissing)?,
        );

        tracing::debug!(url = %error_context.url, "sending request");

        let response = match self.builder.send().await {
            Ok(response) => response,
            Err(err) if err.is_connect() => {
                return Err(crate::Error::Internet(error_context.url));
            }
            Err(err) => {
                return Err(crate::Error::ReqwestFailed {
                    stage: ReqwestStage::Send,
                    context: error_context,
                    inner: ReqwestInnerError::Reqwest(err),
                });
            }
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(err) => {
                return Err(crate::Error::ReqwestFailed {
                    stage: ReqwestStage::Status,
                    context: error_context,
                    inner: ReqwestInnerError::Reqwest(err),
                });
            }
        };

        match response.text().await {
            Ok(text) => Ok((text, error_context)),
            Err(err) => Err(crate::Error::ReqwestFailed {
                stage: ReqwestStage::DecodeText,
                context: error_context,
                inner: ReqwestInnerError::Reqwest(err),
            }),
        }
    }

    pub async fn receive_json<J: Debug + DeserializeOwned>(self) -> crate::Result<J> {
        let (text, error_context) = self.receive_text_internal().await?;

        text.as_str()
            .serde_parse_custom()
            .await
            .map_err(|err| crate::Error::ReqwestFailed {
                stage: ReqwestStage::Deserialise,
                context: error_context,
                inner: ReqwestInnerError::SerdePath(err),
            })
    }
}
