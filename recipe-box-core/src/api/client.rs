//! reqwest-backed implementation of [`RecipeApi`].

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::{
    RecipeApi, CREATE_RECIPE_FAILED, DELETE_RECIPE_FAILED, FETCH_RECIPES_FAILED,
    FETCH_RECIPE_FAILED, FETCH_TAGS_FAILED, UPDATE_RECIPE_FAILED,
};
use crate::config::{ClientConfig, DEFAULT_SERVER, DEFAULT_USER_AGENT};
use crate::error::ApiError;
use crate::types::{
    ErrorsEnvelope, Recipe, RecipeId, RecipePayload, RecipesEnvelope, Tag, TagsEnvelope,
};

const JSON: &str = "application/json";

/// Configuration for [`HttpApi`].
#[derive(Clone, Debug)]
pub struct HttpApiBuilder {
    server: String,
    user_agent: String,
}

impl Default for HttpApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpApiBuilder {
    /// Builder pointed at the default local backend.
    pub fn new() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Builder seeded from a loaded [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            server: config.server.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Set the backend base URL.
    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Set the `User-Agent` header sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client. Fails if the server is not a usable base URL.
    pub fn build(self) -> Result<HttpApi, ApiError> {
        // A trailing slash makes `Url::join` append instead of replacing the last segment.
        let mut server = self.server.trim().to_string();
        if !server.ends_with('/') {
            server.push('/');
        }
        let base_url = Url::parse(&server).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                self.server
            )));
        }

        let inner = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .build()?;

        Ok(HttpApi { inner, base_url })
    }
}

/// Production API client.
#[derive(Clone, Debug)]
pub struct HttpApi {
    inner: reqwest::Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(server: &str) -> Result<Self, ApiError> {
        HttpApiBuilder::new().server(server).build()
    }

    pub fn builder() -> HttpApiBuilder {
        HttpApiBuilder::new()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.inner
            .request(method, url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request.build()?;
        tracing::debug!(method = %request.method(), url = %request.url(), "api request");
        let response = self.inner.execute(request).await?;
        tracing::debug!(url = %response.url(), status = %response.status(), "api response");
        Ok(response)
    }

    /// Fail with a fixed message on any non-success status.
    fn check_status(response: Response, message: &str) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: response.status().as_u16(),
                message: message.to_string(),
            })
        }
    }

    /// Fail with the server's `errors` list, or the fallback when it sent none.
    async fn check_validation(response: Response, fallback: &str) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let envelope: ErrorsEnvelope = serde_json::from_str(&body).unwrap_or_default();
        match envelope.errors {
            Some(errors) if !errors.is_empty() => Err(ApiError::Validation {
                status: status.as_u16(),
                errors,
            }),
            _ => Err(ApiError::Status {
                status: status.as_u16(),
                message: fallback.to_string(),
            }),
        }
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl RecipeApi for HttpApi {
    async fn list_recipes(&self, tag: Option<&str>) -> Result<Vec<Recipe>, ApiError> {
        let mut url = self.endpoint("recipes")?;
        if let Some(tag) = tag.filter(|t| !t.is_empty()) {
            url.query_pairs_mut().append_pair("tag", tag);
        }

        let response = self.send(self.request(Method::GET, url)).await?;
        let response = Self::check_status(response, FETCH_RECIPES_FAILED)?;
        let envelope: RecipesEnvelope = Self::json(response).await?;
        Ok(envelope.recipes)
    }

    async fn get_recipe(&self, id: RecipeId) -> Result<Recipe, ApiError> {
        let url = self.endpoint(&format!("recipes/{}", id))?;
        let response = self.send(self.request(Method::GET, url)).await?;
        let response = Self::check_status(response, FETCH_RECIPE_FAILED)?;
        Self::json(response).await
    }

    async fn create_recipe(&self, payload: &RecipePayload) -> Result<Recipe, ApiError> {
        let url = self.endpoint("recipes")?;
        let response = self
            .send(self.request(Method::POST, url).json(payload))
            .await?;
        let response = Self::check_validation(response, CREATE_RECIPE_FAILED).await?;
        Self::json(response).await
    }

    async fn update_recipe(
        &self,
        id: RecipeId,
        payload: &RecipePayload,
    ) -> Result<Recipe, ApiError> {
        let url = self.endpoint(&format!("recipes/{}", id))?;
        let response = self
            .send(self.request(Method::PATCH, url).json(payload))
            .await?;
        let response = Self::check_validation(response, UPDATE_RECIPE_FAILED).await?;
        Self::json(response).await
    }

    async fn delete_recipe(&self, id: RecipeId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("recipes/{}", id))?;
        let response = self.send(self.request(Method::DELETE, url)).await?;
        Self::check_status(response, DELETE_RECIPE_FAILED)?;
        Ok(())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        let url = self.endpoint("tags")?;
        let response = self.send(self.request(Method::GET, url)).await?;
        let response = Self::check_status(response, FETCH_TAGS_FAILED)?;
        let envelope: TagsEnvelope = Self::json(response).await?;
        Ok(envelope.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_bare_origin() {
        let api = HttpApi::new("http://localhost:3000").unwrap();
        assert_eq!(
            api.endpoint("/recipes/5").unwrap().as_str(),
            "http://localhost:3000/recipes/5"
        );
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let api = HttpApi::new("http://example.com/api").unwrap();
        assert_eq!(
            api.endpoint("tags").unwrap().as_str(),
            "http://example.com/api/tags"
        );
    }

    #[test]
    fn test_invalid_server_rejected() {
        let err = HttpApi::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_builder_from_config() {
        let config = ClientConfig::default().with_server("http://recipes.internal:8080");
        let api = HttpApiBuilder::from_config(&config).build().unwrap();
        assert_eq!(api.base_url().as_str(), "http://recipes.internal:8080/");
    }
}
