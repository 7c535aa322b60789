//! In-memory exam-portal backend used by integration tests.
//!
//! Implements the REST contract the data-access layer assumes: one
//! collection per resource under `/api`, JSON bodies, sequential string ids
//! assigned by the server, partial-replace semantics on PUT. Resource DTOs
//! are defined here independently from the core crate; integration tests
//! catch schema drift.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// A record type the server can keep a table of.
pub trait Stored: Clone + Serialize + Send + Sync + 'static {
    type Create: DeserializeOwned + Send + 'static;
    type Update: DeserializeOwned + Send + 'static;

    fn id(&self) -> &str;
    fn from_create(id: String, input: Self::Create) -> Self;
    /// Apply the fields present in the payload; absent fields stay unchanged.
    fn apply_update(&mut self, input: Self::Update);
}

/// One in-memory collection with insertion order preserved and a sequential
/// id counter.
pub struct Table<T> {
    rows: Vec<T>,
    next_id: u64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 0,
        }
    }
}

pub type Db<T> = Arc<RwLock<Table<T>>>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exam {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration_minutes: u32,
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreateExam {
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration_minutes: u32,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "upcoming".to_string()
}

#[derive(Deserialize)]
pub struct UpdateExam {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub duration_minutes: Option<u32>,
    pub status: Option<String>,
}

impl Stored for Exam {
    type Create = CreateExam;
    type Update = UpdateExam;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, input: CreateExam) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            category: input.category,
            duration_minutes: input.duration_minutes,
            status: input.status,
        }
    }

    fn apply_update(&mut self, input: UpdateExam) {
        if let Some(title) = input.title {
            self.title = title;
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(category) = input.category {
            self.category = category;
        }
        if let Some(duration_minutes) = input.duration_minutes {
            self.duration_minutes = duration_minutes;
        }
        if let Some(status) = input.status {
            self.status = status;
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl Stored for User {
    type Create = CreateUser;
    type Update = UpdateUser;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, input: CreateUser) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            role: input.role,
        }
    }

    fn apply_update(&mut self, input: UpdateUser) {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(email) = input.email {
            self.email = email;
        }
        if let Some(role) = input.role {
            self.role = role;
        }
    }
}

/// CRUD routes for one resource collection backed by a fresh table.
fn resource_routes<T: Stored>(path: &str) -> Router {
    let db: Db<T> = Db::default();
    Router::new()
        .route(path, get(list_rows::<T>).post(create_row::<T>))
        .route(
            &format!("{path}/{{id}}"),
            get(get_row::<T>).put(update_row::<T>).delete(delete_row::<T>),
        )
        .with_state(db)
}

pub fn app() -> Router {
    Router::new().nest(
        "/api",
        resource_routes::<Exam>("/exams").merge(resource_routes::<User>("/users")),
    )
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_rows<T: Stored>(State(db): State<Db<T>>) -> Json<Vec<T>> {
    Json(db.read().await.rows.clone())
}

async fn create_row<T: Stored>(
    State(db): State<Db<T>>,
    Json(input): Json<T::Create>,
) -> (StatusCode, Json<T>) {
    let mut table = db.write().await;
    table.next_id += 1;
    let row = T::from_create(table.next_id.to_string(), input);
    table.rows.push(row.clone());
    (StatusCode::CREATED, Json(row))
}

async fn get_row<T: Stored>(
    State(db): State<Db<T>>,
    Path(id): Path<String>,
) -> Result<Json<T>, StatusCode> {
    let table = db.read().await;
    table
        .rows
        .iter()
        .find(|row| row.id() == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_row<T: Stored>(
    State(db): State<Db<T>>,
    Path(id): Path<String>,
    Json(input): Json<T::Update>,
) -> Result<Json<T>, StatusCode> {
    let mut table = db.write().await;
    let row = table
        .rows
        .iter_mut()
        .find(|row| row.id() == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    row.apply_update(input);
    Ok(Json(row.clone()))
}

async fn delete_row<T: Stored>(
    State(db): State<Db<T>>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut table = db.write().await;
    let before = table.rows.len();
    table.rows.retain(|row| row.id() != id);
    if table.rows.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}
