//! Anti-forgery token issuance.
//!
//! Tokens are embedded in every rendered page. Checking them on submission
//! belongs to whatever sits in front of the handlers.

use rand::RngCore;

use crate::domain::Error;

use super::session::SessionContext;

const TOKEN_BYTES: usize = 32;

/// Issues the token embedded in rendered forms.
pub trait CsrfTokens: Send + Sync {
    /// Token for the session behind `session`.
    fn token_for(&self, session: &SessionContext) -> Result<String, Error>;
}

/// One random token per session, kept in the session itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCsrfTokens;

fn fresh_token() -> String {
    let mut bytes = [0_u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

impl CsrfTokens for SessionCsrfTokens {
    fn token_for(&self, session: &SessionContext) -> Result<String, Error> {
        if let Some(token) = session.csrf_token()? {
            return Ok(token);
        }
        let token = fresh_token();
        session.store_csrf_token(&token)?;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    #[::core::prelude::v1::test]
    fn fresh_tokens_are_64_hex_chars_and_differ() {
        let first = fresh_token();
        let second = fresh_token();

        assert_eq!(first.len(), TOKEN_BYTES * 2);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }

    #[actix_web::test]
    async fn token_is_stable_within_a_session() {
        let app = test::init_service(App::new().wrap(test_session_middleware()).route(
            "/token",
            web::get().to(|session: SessionContext| async move {
                let token = SessionCsrfTokens.token_for(&session)?;
                Ok::<_, Error>(HttpResponse::Ok().body(token))
            }),
        ))
        .await;

        let first = test::call_service(&app, test::TestRequest::get().uri("/token").to_request())
            .await;
        let cookie = session_cookie(&first).expect("session cookie");
        let first_token = test::read_body(first).await;

        let second = test::call_service(
            &app,
            test::TestRequest::get().uri("/token").cookie(cookie).to_request(),
        )
        .await;
        let second_token = test::read_body(second).await;

        assert_eq!(first_token, second_token);
    }
}
