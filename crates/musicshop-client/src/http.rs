//! [`ShopBackend`] over the shop HTTP API.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use musicshop_core::{
    DeleteResponse, JoinedSong, Party, PartyDraft, PartyKind, RecordId, SongDraft,
};

use crate::backend::ShopBackend;
use crate::error::ClientError;

const SONGS: &str = "songs";

/// Talks to a running shop server rooted at `base_url` (e.g. `http://host:3001/api`).
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        HttpBackend {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let request = req.build()?;
        tracing::debug!(method = %request.method(), url = %request.url(), "shop api request");

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            return Err(error_from_response(status, &body_text));
        }

        serde_json::from_str(&body_text)
            .map_err(|err| ClientError::Decode(format!("{} ({})", err, status)))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Maps a non-2xx response back onto the client error taxonomy.
fn error_from_response(status: StatusCode, body_text: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorBody>(body_text)
        .map(|body| body.error)
        .unwrap_or_else(|_| format!("server returned {}: {}", status, body_text));

    match status {
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        _ => ClientError::Store(message),
    }
}

impl ShopBackend for HttpBackend {
    async fn list_parties(&self, kind: PartyKind) -> Result<Vec<Party>, ClientError> {
        self.execute(self.client.get(self.url(kind.collection())))
            .await
    }

    async fn create_party(
        &self,
        kind: PartyKind,
        draft: &PartyDraft,
    ) -> Result<Party, ClientError> {
        self.execute(self.client.post(self.url(kind.collection())).json(draft))
            .await
    }

    async fn update_party(
        &self,
        kind: PartyKind,
        id: RecordId,
        draft: &PartyDraft,
    ) -> Result<Party, ClientError> {
        let path = format!("{}/{}", kind.collection(), id);
        self.execute(self.client.put(self.url(&path)).json(draft))
            .await
    }

    async fn delete_party(
        &self,
        kind: PartyKind,
        id: RecordId,
    ) -> Result<DeleteResponse, ClientError> {
        let path = format!("{}/{}", kind.collection(), id);
        self.execute(self.client.delete(self.url(&path))).await
    }

    async fn list_songs(&self) -> Result<Vec<JoinedSong>, ClientError> {
        self.execute(self.client.get(self.url(SONGS))).await
    }

    async fn search_songs(&self, term: &str) -> Result<Vec<JoinedSong>, ClientError> {
        let req = self
            .client
            .get(self.url("search/songs"))
            .query(&[("term", term)]);
        self.execute(req).await
    }

    async fn create_song(&self, draft: &SongDraft) -> Result<JoinedSong, ClientError> {
        self.execute(self.client.post(self.url(SONGS)).json(draft))
            .await
    }

    async fn update_song(
        &self,
        id: RecordId,
        draft: &SongDraft,
    ) -> Result<JoinedSong, ClientError> {
        let path = format!("{}/{}", SONGS, id);
        self.execute(self.client.put(self.url(&path)).json(draft))
            .await
    }

    async fn delete_song(&self, id: RecordId) -> Result<DeleteResponse, ClientError> {
        let path = format!("{}/{}", SONGS, id);
        self.execute(self.client.delete(self.url(&path))).await
    }
}
