use url::Url;

/// Just a wrapper around a URL and credentials
#[derive(Clone)]
pub struct Resource {
    url: Url,
    api_key: String,
    access_token: String,
}

impl Resource {
    pub fn new(url: Url, api_key: String, access_token: String) -> Self {
        Self { url, api_key, access_token }
    }

    pub fn url(&self) -> &Url { &self.url }
    pub fn api_key(&self) -> &String { &self.api_key }
    pub fn access_token(&self) -> &String { &self.access_token }

    /// Build a new Resource by keeping the same credentials, scheme and server from `base` but changing the path part
    pub fn combine(&self, new_path: &str) -> Resource {
        let mut built = (*self).clone();
        built.url.set_path(&new_path);
        built
    }
}
