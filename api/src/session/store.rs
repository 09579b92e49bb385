use rocket::http::{Cookie, CookieJar, SameSite};

/// Role-keyed persistent client state holding session tokens.
pub trait TokenStore {
    fn token(&self, key: &str) -> Option<String>;
    fn store_token(&self, key: &'static str, value: String);
    fn clear_token(&self, key: &'static str);
}

impl TokenStore for CookieJar<'_> {
    fn token(&self, key: &str) -> Option<String> {
        CookieJar::get(self, key).map(|cookie| cookie.value().to_string())
    }

    fn store_token(&self, key: &'static str, value: String) {
        self.add(
            Cookie::build((key, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        );
    }

    fn clear_token(&self, key: &'static str) {
        self.remove(Cookie::build(key).path("/"));
    }
}
