pub mod intake;
pub mod plan;
pub mod report;
pub mod session;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/sessions",
            post(session::create_session).delete(session::end_session),
        )
        .route("/consent", post(intake::submit_consent))
        .route("/profile", post(intake::submit_profile))
        .route("/plan", get(plan::view_plan))
        .route("/plan/acknowledge", post(plan::acknowledge_plan))
        .route("/report", get(report::get_report))
        .route("/overview", get(report::get_overview))
        .route("/stores", get(report::list_stores))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::session::SESSION_HEADER;
    use crate::{app::build_app, state::AppState};

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        session: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(id) = session {
            req = req.header(SESSION_HEADER, id);
        }
        let req = match body {
            Some(b) => req
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = call(app, Method::POST, "/api/v1/sessions", None, None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    fn profile() -> Value {
        json!({
            "sex": "male",
            "age": 30,
            "weight_kg": 80.0,
            "height_cm": 180.0,
            "activity_level": "moderate",
            "allergies": "peanut"
        })
    }

    #[tokio::test]
    async fn full_session_flow() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_app(AppState::fake(tmp.path()));
        let sid = new_session(&app).await;
        let sid = Some(sid.as_str());

        let (status, body) =
            call(&app, Method::POST, "/api/v1/consent", sid, Some(json!({"granted": false}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.as_str().unwrap().contains("consent"));

        let (status, body) =
            call(&app, Method::POST, "/api/v1/consent", sid, Some(json!({"granted": true}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["consent_given"], json!(true));

        let (status, body) = call(&app, Method::POST, "/api/v1/profile", sid, Some(profile())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meals_received"], json!(3));
        assert_eq!(body["plan_diagnostic"], Value::Null);

        let (status, body) = call(&app, Method::GET, "/api/v1/plan", sid, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meals_planned"], json!(3));
        assert_eq!(body["days"][0]["day"], json!("Monday"));
        assert_eq!(body["days"][1]["day"], json!("Tuesday"));
        assert_eq!(
            body["days"][0]["meals"][0]["image_url"],
            json!("https://fake.local/img/porridge.jpg")
        );

        let (status, body) = call(&app, Method::POST, "/api/v1/plan/acknowledge", sid, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meals_planned"], json!(3));

        let (status, body) = call(&app, Method::GET, "/api/v1/report", sid, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_meals_planned"], json!(3));
        assert_eq!(body["time_series"].as_array().unwrap().len(), 1);
        assert_eq!(body["profile"]["calorie_target"], json!(2874));
        assert_eq!(body["profile"]["height_feet_inches"], json!("5'11\""));
        assert_eq!(body["profile"]["activity_level"], json!("moderate"));

        let (status, body) = call(&app, Method::GET, "/api/v1/overview", sid, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["average_prep_minutes"], json!(25.0));
    }

    #[tokio::test]
    async fn missing_or_unknown_session_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_app(AppState::fake(tmp.path()));

        let (status, _) = call(&app, Method::GET, "/api/v1/plan", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(&app, Method::GET, "/api/v1/plan", Some("not-a-uuid"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let unknown = uuid::Uuid::new_v4().to_string();
        let (status, _) = call(&app, Method::GET, "/api/v1/plan", Some(unknown.as_str()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bad_activity_level_is_unprocessable() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_app(AppState::fake(tmp.path()));
        let sid = new_session(&app).await;

        let mut body = profile();
        body["activity_level"] = json!("couch_potato");
        let (status, _) = call(&app, Method::POST, "/api/v1/profile", Some(sid.as_str()), Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, view) = call(&app, Method::GET, "/api/v1/plan", Some(sid.as_str()), None).await;
        assert_eq!(view["meals_planned"], json!(0));
    }

    #[tokio::test]
    async fn stores_and_health() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_app(AppState::fake(tmp.path()));

        let (status, body) = call(&app, Method::GET, "/api/v1/stores", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], json!(2));
        assert_eq!(body["stores"][0]["name"], json!("Publix"));

        let (status, body) = call(&app, Method::GET, "/api/v1/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("ok"));
    }

    #[tokio::test]
    async fn ended_session_is_gone() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_app(AppState::fake(tmp.path()));
        let sid = new_session(&app).await;

        let (status, _) = call(&app, Method::DELETE, "/api/v1/sessions", Some(sid.as_str()), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, Method::GET, "/api/v1/report", Some(sid.as_str()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
