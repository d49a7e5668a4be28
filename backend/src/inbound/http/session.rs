//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The domain [`Session`] travels in the encrypted Actix session cookie.
//! Handlers load it, hand it to the session service and store it back, so
//! no server-side session state is shared between clients.

use actix_session::Session as CookieSession;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Session};

pub(crate) const SESSION_KEY: &str = "shell_session";

/// Newtype wrapper that exposes domain-level session persistence.
#[derive(Clone)]
pub struct SessionContext(CookieSession);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: CookieSession) -> Self {
        Self(session)
    }

    /// Load the domain session carried by the cookie.
    ///
    /// A missing entry yields an empty session. An entry that no longer
    /// deserialises (stale schema, invalid user record) is dropped with a
    /// warning and the client starts over unauthenticated.
    pub fn load(&self) -> Session {
        match self.0.get::<Session>(SESSION_KEY) {
            Ok(Some(session)) => session,
            Ok(None) => Session::new(),
            Err(error) => {
                warn!(%error, "discarding unreadable session state");
                self.0.remove(SESSION_KEY);
                Session::new()
            }
        }
    }

    /// Persist `session` in the cookie. An empty session removes the entry.
    pub fn store(&self, session: &Session) -> Result<(), Error> {
        if *session == Session::new() {
            self.0.remove(SESSION_KEY);
            return Ok(());
        }
        self.0
            .insert(SESSION_KEY, session)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Rotate the session key after a privilege change.
    pub fn renew(&self) {
        self.0.renew();
    }

    /// Drop every entry and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = CookieSession::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, SessionPhase};
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/get",
                web::get().to(|session: SessionContext| async move {
                    let phase = session.load().phase();
                    HttpResponse::Ok().json(phase)
                }),
            )
    }

    #[actix_web::test]
    async fn round_trips_selected_role() {
        let app = test::init_service(session_test_app().route(
            "/set",
            web::get().to(|session: SessionContext| async move {
                let mut state = session.load();
                state.select_role(Role::Agent);
                session.store(&state)?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res).expect("session cookie set");

        let get_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        let phase: SessionPhase = test::read_body_json(get_res).await;
        assert_eq!(phase, SessionPhase::RoleChosen);
    }

    #[actix_web::test]
    async fn missing_cookie_loads_empty_session() {
        let app = test::init_service(session_test_app()).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        let phase: SessionPhase = test::read_body_json(res).await;
        assert_eq!(phase, SessionPhase::Unauthenticated);
    }

    #[actix_web::test]
    async fn unreadable_state_is_discarded() {
        let app = test::init_service(session_test_app().route(
            "/set-invalid",
            web::get().to(|session: CookieSession| async move {
                session
                    .insert(SESSION_KEY, serde_json::json!({ "selectedRole": "landlord" }))
                    .expect("set invalid session state");
                HttpResponse::Ok()
            }),
        ))
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = session_cookie(&set_res).expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let phase: SessionPhase = test::read_body_json(res).await;
        assert_eq!(phase, SessionPhase::Unauthenticated);
    }
}
