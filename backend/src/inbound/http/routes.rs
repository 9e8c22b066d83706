//! Route table.
//!
//! Account pages under `/user` are public. Everything else requires a
//! signed-in caller (enforced by [`CurrentUser`](super::guard::CurrentUser)
//! in each handler). Both scopes are served with `Cache-Control: no-store`,
//! since every page carries a CSRF token or a flash message.

use actix_web::{middleware::DefaultHeaders, web};

use crate::domain::{Error, Goal, Quote, StudySession};

use super::cache_control::no_store_header;
use super::{forms, home, study_sessions, users};

/// Where anonymous callers are sent.
pub const LOGIN_PATH: &str = "/user/login";

fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _req| Error::invalid_request(format!("malformed form: {err}")).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| Error::invalid_request(format!("malformed query: {err}")).into())
}

/// Register the create, list, edit and delete routes of one record kind.
fn record_routes<R: forms::FormResource>(
    cfg: &mut web::ServiceConfig,
    form_path: &str,
    list_path: &str,
) {
    cfg.service(
        web::resource(form_path)
            .route(web::get().to(forms::show_create_form::<R>))
            .route(web::post().to(forms::submit_create::<R>)),
    )
    .route(list_path, web::get().to(forms::list::<R>))
    .service(
        web::resource(format!("{list_path}/edit"))
            .route(web::get().to(forms::show_edit_form::<R>))
            .route(web::post().to(forms::submit_edit_form::<R>)),
    )
    .route(
        &format!("{list_path}/delete"),
        web::post().to(forms::delete::<R>),
    );
}

/// Mount every route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        .app_data(query_config())
        .service(
            web::scope("/user")
                .wrap(DefaultHeaders::new().add(no_store_header()))
                .service(
                    web::resource("/signup")
                        .route(web::get().to(users::show_signup))
                        .route(web::post().to(users::signup)),
                )
                .service(
                    web::resource("/login")
                        .route(web::get().to(users::show_login))
                        .route(web::post().to(users::login)),
                )
                .route("/logout", web::post().to(users::logout)),
        )
        .service(
            web::scope("")
                .wrap(DefaultHeaders::new().add(no_store_header()))
                .route("/", web::get().to(home::show))
                .route("/sessions/start", web::get().to(study_sessions::show_start))
                .configure(|cfg| record_routes::<Goal>(cfg, "/goal", "/goals"))
                .configure(|cfg| record_routes::<StudySession>(cfg, "/session", "/sessions"))
                .configure(|cfg| record_routes::<Quote>(cfg, "/quote", "/quotes")),
        );
}
