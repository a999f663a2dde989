//! This module provides a thin client to the hosted auth provider
//!
//! The core assumes a valid user identity exists before any goal store operation; this
//! client is how a calling app obtains one. Session refresh and storage are out of scope.

use std::error::Error;

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config;
use crate::goal::UserId;
use crate::resource::Resource;

/// A signed-in (or signed-up) user
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
}

/// The outcome of a successful sign-in: the user, plus the access token to present to the
/// record store
#[derive(Clone, Debug, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// A client for the `/auth/v1` endpoints of the hosted backend
pub struct AuthClient {
    resource: Resource,
}

impl AuthClient {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>, T: ToString>(base_url: S, api_key: T) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let url = Url::parse(base_url.as_ref())?;

        Ok(Self {
            resource: Resource::new(url, api_key.to_string(), String::new()),
        })
    }

    fn endpoint(&self, path: &str) -> Url {
        self.resource.combine(path).url().clone()
    }

    fn request(&self, method: Method, url: &Url) -> reqwest::RequestBuilder {
        reqwest::Client::new()
            .request(method, url.as_str())
            .header("apikey", self.resource.api_key())
            .header("X-Client-Info", config::CLIENT_NAME.lock().unwrap().clone())
            .header(CONTENT_TYPE, "application/json")
    }

    /// Register a new user. Depending on the server settings, the account may need an
    /// email confirmation before [`Self::sign_in`] succeeds
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<User, Box<dyn Error + Send + Sync>> {
        let url = self.endpoint("auth/v1/signup");

        let response = self.request(Method::POST, &url)
            .json(&Credentials { email, password })
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        Ok(response.json().await?)
    }

    /// Exchange credentials for a session
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, Box<dyn Error + Send + Sync>> {
        let mut url = self.endpoint("auth/v1/token");
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self.request(Method::POST, &url)
            .json(&Credentials { email, password })
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        Ok(response.json().await?)
    }

    /// Invalidate a session on the server
    pub async fn sign_out(&self, session: &Session) -> Result<(), Box<dyn Error + Send + Sync>> {
        let url = self.endpoint("auth/v1/logout");

        let response = self.request(Method::POST, &url)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        Ok(())
    }

    /// Returns the user an access token belongs to, or `None` if the token is not (or no
    /// longer) valid
    pub async fn current_user(&self, access_token: &str) -> Result<Option<User>, Box<dyn Error + Send + Sync>> {
        let url = self.endpoint("auth/v1/user");

        let response = self.request(Method::GET, &url)
            .bearer_auth(access_token)
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED || response.status() == reqwest::StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        Ok(Some(response.json().await?))
    }

    /// Asks the server to email a password-reset link
    pub async fn send_password_reset(&self, email: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let url = self.endpoint("auth/v1/recover");

        #[derive(Serialize)]
        struct Recover<'a> { email: &'a str }

        let response = self.request(Method::POST, &url)
            .json(&Recover { email })
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        Ok(())
    }

    /// Changes the password of the signed-in user
    pub async fn update_password(&self, session: &Session, new_password: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let url = self.endpoint("auth/v1/user");

        #[derive(Serialize)]
        struct NewPassword<'a> { password: &'a str }

        let response = self.request(Method::PUT, &url)
            .bearer_auth(&session.access_token)
            .json(&NewPassword { password: new_password })
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        Ok(())
    }
}
