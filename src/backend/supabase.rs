// SPDX-License-Identifier: MPL-2.0
//! [`GalleryStore`] adapter speaking PostgREST over HTTP.
//!
//! Every request carries the public key twice, as `apikey` and as a bearer
//! token. Filters use PostgREST operators (`code=eq.ABC123`,
//! `order=order_index.asc`).

use super::{validate_comment, BackendError, BackendResult, GalleryStore};
use crate::config::Config;
use crate::domain::folder::sort_newest_first;
use crate::domain::{Comment, CommentDraft, FolderMedia, FolderSource, MemoryFolder, ShortCode};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug)]
struct Endpoint {
    rest_url: String,
    anon_key: String,
}

/// HTTP client for the hosted record store.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: Client,
    endpoint: Arc<Endpoint>,
}

impl SupabaseStore {
    /// Creates a store for the project at `url` (e.g. `https://xyz.supabase.co`).
    #[must_use]
    pub fn new(client: Client, url: &str, anon_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: Arc::new(Endpoint {
                rest_url: format!("{}/rest/v1", url.trim_end_matches('/')),
                anon_key: anon_key.into(),
            }),
        }
    }

    /// Builds a store from the `[backend]` settings and their env overrides.
    ///
    /// # Errors
    ///
    /// [`BackendError::MissingCredentials`] when the URL or key is unset.
    pub fn from_config(client: Client, config: &Config) -> BackendResult<Self> {
        match (config.backend_url(), config.anon_key()) {
            (Some(url), Some(key)) => Ok(Self::new(client, &url, key)),
            _ => Err(BackendError::MissingCredentials),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.endpoint.rest_url, table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.endpoint.anon_key)
            .bearer_auth(&self.endpoint.anon_key)
    }
}

async fn read_rows<T: DeserializeOwned>(response: Response) -> BackendResult<Vec<T>> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn first_row<T: DeserializeOwned>(response: Response) -> BackendResult<Option<T>> {
    Ok(read_rows(response).await?.into_iter().next())
}

impl GalleryStore for SupabaseStore {
    fn fetch_folder(&self, code: &ShortCode) -> BoxFuture<'static, BackendResult<MemoryFolder>> {
        let store = self.clone();
        let filter = format!("eq.{code}");
        async move {
            for source in [FolderSource::Folder, FolderSource::LegacyMemory] {
                let request = store
                    .client
                    .get(store.table_url(source.folder_table()))
                    .query(&[("select", "*"), ("code", filter.as_str()), ("limit", "1")]);
                let response = store.authorize(request).send().await?;
                if let Some(folder) = first_row::<MemoryFolder>(response).await? {
                    tracing::info!(code = %folder.code, ?source, "folder found");
                    return Ok(folder.with_source(source));
                }
                tracing::debug!(?source, "no folder row for code");
            }
            Err(BackendError::NotFound)
        }
        .boxed()
    }

    fn fetch_media(&self, folder: &MemoryFolder) -> BoxFuture<'static, BackendResult<Vec<FolderMedia>>> {
        let store = self.clone();
        let source = folder.source;
        let filter = format!("eq.{}", folder.id);
        async move {
            let request = store.client.get(store.table_url(source.media_table())).query(&[
                ("select", "*"),
                (source.foreign_key(), filter.as_str()),
                ("order", "order_index.asc"),
            ]);
            let response = store.authorize(request).send().await?;
            read_rows(response).await
        }
        .boxed()
    }

    fn increment_view_count(&self, folder: &MemoryFolder) -> BoxFuture<'static, BackendResult<u64>> {
        let store = self.clone();
        let source = folder.source;
        let filter = format!("eq.{}", folder.id);
        let next = folder.view_count + 1;
        async move {
            if source == FolderSource::LegacyMemory {
                // Legacy rows have no counter column.
                return Ok(next - 1);
            }
            let request = store
                .client
                .patch(store.table_url(source.folder_table()))
                .query(&[("id", filter.as_str())])
                .json(&json!({ "view_count": next }));
            let response = store.authorize(request).send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(BackendError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            Ok(next)
        }
        .boxed()
    }

    fn fetch_comments(&self, folder: &MemoryFolder) -> BoxFuture<'static, BackendResult<Vec<Comment>>> {
        let store = self.clone();
        let source = folder.source;
        let filter = format!("eq.{}", folder.id);
        async move {
            let request = store.client.get(store.table_url(source.comments_table())).query(&[
                ("select", "*"),
                (source.foreign_key(), filter.as_str()),
                ("order", "created_at.desc"),
            ]);
            let response = store.authorize(request).send().await?;
            let mut comments: Vec<Comment> = read_rows(response).await?;
            sort_newest_first(&mut comments);
            Ok(comments)
        }
        .boxed()
    }

    fn add_comment(
        &self,
        folder: &MemoryFolder,
        draft: &CommentDraft,
    ) -> BoxFuture<'static, BackendResult<Comment>> {
        let store = self.clone();
        let source = folder.source;
        let folder_id = folder.id.clone();
        let validated = validate_comment(folder, draft);
        async move {
            let (name, comment) = validated?;
            let mut row = serde_json::Map::new();
            row.insert(source.foreign_key().to_string(), json!(folder_id));
            row.insert("name".to_string(), json!(name));
            row.insert("comment".to_string(), json!(comment));

            let request = store
                .client
                .post(store.table_url(source.comments_table()))
                .header("Prefer", "return=representation")
                .json(&[row]);
            let response = store.authorize(request).send().await?;
            first_row(response)
                .await?
                .ok_or_else(|| BackendError::Decode("insert returned no row".to_string()))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_url_is_normalized() {
        let store = SupabaseStore::new(Client::new(), "https://xyz.supabase.co/", "key");
        assert_eq!(
            store.table_url("memory_folders"),
            "https://xyz.supabase.co/rest/v1/memory_folders"
        );
    }

    #[test]
    fn from_config_requires_credentials() {
        if std::env::var(crate::config::ENV_BACKEND_URL).is_ok() {
            return;
        }
        let config = Config::default();
        assert!(matches!(
            SupabaseStore::from_config(Client::new(), &config),
            Err(BackendError::MissingCredentials)
        ));
    }
}
