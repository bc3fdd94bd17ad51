//! Repositories: the capability through which paginated queries run.

use crate::domain::{ObjectType, Page, Query};
use crate::error::NapiClientError;
use crate::napi_client::NapiClient;

use std::future::Future;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Executes a query and returns one page of results.
pub trait Repository {
    type Item;

    fn get(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<Page<Self::Item>, NapiClientError>> + Send;
}

/// Repository backed by a collection endpoint of the content API.
///
/// Items are deserialized as `T`; the default keeps them as raw JSON.
pub struct ApiRepository<T = Value> {
    client: NapiClient,
    object_type: ObjectType,
    _item: PhantomData<fn() -> T>,
}

impl<T> ApiRepository<T>
where
    T: DeserializeOwned,
{
    pub fn new(client: NapiClient, object_type: ObjectType) -> Self {
        Self {
            client,
            object_type,
            _item: PhantomData,
        }
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn client(&self) -> &NapiClient {
        &self.client
    }

    /// A fresh query for this repository's object type.
    pub fn query(&self) -> Query {
        Query::new(self.object_type)
    }
}

impl<T> Repository for ApiRepository<T>
where
    T: DeserializeOwned + Send,
{
    type Item = T;

    async fn get(&self, query: &Query) -> Result<Page<T>, NapiClientError> {
        self.client
            .get_page(self.object_type.endpoint(), query)
            .await
    }
}

impl<T> Clone for ApiRepository<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            object_type: self.object_type,
            _item: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for ApiRepository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRepository")
            .field("object_type", &self.object_type)
            .field("base_url", &self.client.base_url().as_str())
            .finish()
    }
}
