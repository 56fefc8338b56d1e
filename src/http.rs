use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use tap::Pipe;

use crate::library::{LibraryError, MusicLibrary};
use crate::song::Song;

/// Blocking JSON client for the library service.
///
/// Endpoints, relative to the base URL:
/// `POST auth/login`, `GET songs`, `DELETE songs/{id}`, `POST auth/logout`.
/// Everything but login carries the session token as a bearer token.
pub struct HttpLibrary {
    client: Client,
    base: Url,
    token: Option<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct Session {
    token: String,
}

impl HttpLibrary {
    pub fn new(base: Url) -> Result<Self, LibraryError> {
        if base.cannot_be_a_base() {
            return Err(LibraryError::InvalidUrl(base.to_string()));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base,
            token: None,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, LibraryError> {
        let token = self.token.as_deref().ok_or(LibraryError::NotLoggedIn)?;
        Ok(request.bearer_auth(token))
    }

    fn check(response: Response) -> Result<Response, LibraryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        log::warn!("{} returned {}", response.url(), status);
        Err(LibraryError::Status {
            status,
            url: response.url().to_string(),
        })
    }
}

impl MusicLibrary for HttpLibrary {
    fn login(&mut self, user: &str, pass: &str) -> Result<(), LibraryError> {
        let url = self.endpoint(&["auth", "login"]);
        log::debug!("POST {url} as {user}");

        let response = self
            .client
            .post(url)
            .json(&Credentials {
                username: user,
                password: pass,
            })
            .send()?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            let status = response.status();
            let reason = response
                .text()
                .ok()
                .map(|body| body.trim().to_owned())
                .filter(|body| !body.is_empty())
                .unwrap_or_else(|| status.to_string());
            return Err(LibraryError::Authentication(reason));
        }

        let session: Session = Self::check(response)?.json()?;
        self.token = Some(session.token);
        log::debug!("session established for {user}");
        Ok(())
    }

    fn songs(&mut self) -> Result<Vec<Song>, LibraryError> {
        let url = self.endpoint(&["songs"]);
        log::debug!("GET {url}");

        let songs: Vec<Song> = self
            .client
            .get(url)
            .pipe(|request| self.authorized(request))?
            .send()?
            .pipe(Self::check)?
            .json()?;

        log::debug!("fetched {} songs", songs.len());
        Ok(songs)
    }

    fn delete_song(&mut self, id: &str) -> Result<(), LibraryError> {
        let url = self.endpoint(&["songs", id]);
        log::debug!("DELETE {url}");

        self.client
            .delete(url)
            .pipe(|request| self.authorized(request))?
            .send()?
            .pipe(Self::check)?;
        Ok(())
    }

    fn logout(&mut self) -> Result<(), LibraryError> {
        // the local session ends whatever the service answers
        let Some(token) = self.token.take() else {
            return Ok(());
        };

        let url = self.endpoint(&["auth", "logout"]);
        log::debug!("POST {url}");

        self.client
            .post(url)
            .bearer_auth(token)
            .send()?
            .pipe(Self::check)?;
        Ok(())
    }
}
