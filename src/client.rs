use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::{Result, UsersError};
use crate::store::UserBackend;
use crate::types::{User, UserDraft};

pub struct UsersClient {
    http: Client,
    endpoint: Url,
    remote_writes: bool,
}

impl UsersClient {
    pub fn new(http: Client, endpoint: Url, remote_writes: bool) -> Self {
        Self {
            http,
            endpoint,
            remote_writes,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::new(http, config.endpoint()?, config.remote_writes))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn remote_writes(&self) -> bool {
        self.remote_writes
    }

    fn record_url(&self, id: u64) -> String {
        format!("{}/{id}", self.endpoint.as_str().trim_end_matches('/'))
    }

    async fn check(response: Response) -> Result<Response> {
        if !response.status().is_success() {
            return Err(UsersError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }
        Ok(response)
    }
}

impl UserBackend for UsersClient {
    async fn fetch_all(&self) -> Result<Vec<User>> {
        debug!(endpoint = %self.endpoint, "GET users");
        let response = self.http.get(self.endpoint.clone()).send().await?;
        let users = Self::check(response).await?.json().await?;
        Ok(users)
    }

    async fn create(&self, draft: &UserDraft) -> Result<()> {
        if !self.remote_writes {
            return Ok(());
        }
        debug!(endpoint = %self.endpoint, "POST user");
        let response = self.http.post(self.endpoint.clone()).json(draft).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<()> {
        if !self.remote_writes {
            return Ok(());
        }
        let url = self.record_url(user.id);
        debug!(%url, "PUT user");
        let response = self.http.put(url).json(user).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<()> {
        if !self.remote_writes {
            return Ok(());
        }
        let url = self.record_url(id);
        debug!(%url, "DELETE user");
        let response = self.http.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
