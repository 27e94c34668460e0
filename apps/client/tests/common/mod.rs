//! Common test utilities for integration tests.
//!
//! Serves a stub lesson backend on an ephemeral local port so tests exercise
//! the real HTTP client.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

/// Canned reply for `GET /api/lessons/:id`.
#[derive(Clone)]
pub enum LessonReply {
    Json(Value),
    Status(u16, Value),
    Text(&'static str),
}

/// One request received by the tracking endpoint.
#[derive(Debug, Clone)]
pub struct TrackedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

struct StubState {
    lesson: LessonReply,
    resume: Value,
    tracked: Mutex<Vec<TrackedRequest>>,
    lesson_requests: Mutex<Vec<i64>>,
}

pub struct StubBackend {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubBackend {
    pub async fn start(lesson: LessonReply) -> Self {
        Self::start_with_resume(lesson, json!({"lesson_id": "lesson_1"})).await
    }

    pub async fn start_with_resume(lesson: LessonReply, resume: Value) -> Self {
        let state = Arc::new(StubState {
            lesson,
            resume,
            tracked: Mutex::new(Vec::new()),
            lesson_requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/lessons/:id", get(lesson_handler))
            .route("/api/v1/learning/track", post(track_handler))
            .route("/api/v1/learning/resume", get(resume_handler))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn tracked(&self) -> Vec<TrackedRequest> {
        self.state.tracked.lock().unwrap().clone()
    }

    pub fn lesson_requests(&self) -> Vec<i64> {
        self.state.lesson_requests.lock().unwrap().clone()
    }
}

async fn lesson_handler(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Response {
    state.lesson_requests.lock().unwrap().push(id);
    match &state.lesson {
        LessonReply::Json(body) => Json(body.clone()).into_response(),
        LessonReply::Status(code, body) => {
            let status = StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(body.clone())).into_response()
        }
        LessonReply::Text(text) => (*text).into_response(),
    }
}

async fn track_handler(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .tracked
        .lock()
        .unwrap()
        .push(TrackedRequest { authorization, body });
    Json(json!({"status": "ok"}))
}

async fn resume_handler(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(state.resume.clone())
}

/// Lesson body with two words, only the first having examples.
pub fn sample_lesson() -> Value {
    json!({
        "hsk_level": 1,
        "title": "Chào hỏi",
        "vocabulary": [
            {
                "id": 1,
                "word": "你好",
                "pinyin": "nǐ hǎo",
                "meaning": "Xin chào",
                "examples": [
                    {"id": 11, "chinese": "你好，老师！", "pinyin": "Nǐ hǎo, lǎoshī!", "vietnamese": "Chào thầy!"},
                    {"id": 12, "sentence": "你好吗？", "sentence_pinyin": "Nǐ hǎo ma?", "translation": "Bạn khỏe không?"}
                ]
            },
            {"id": 2, "character": "谢谢", "pinyin": "xièxie", "translation": "Cảm ơn"}
        ],
        "grammar": []
    })
}
