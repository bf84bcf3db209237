use crate::model::staff::{Staff, StaffRole};
use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreateStaff {
    #[schema(example = "Alice Rahman")]
    pub name: String,
    #[schema(example = "nurse")]
    pub role: StaffRole,
    #[schema(example = "alice@hospital.org", format = "email")]
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateStaff {
    pub name: Option<String>,
    pub role: Option<StaffRole>,
    pub email: Option<String>,
    /// Deactivated staff stay in the directory but are no longer offered
    /// as shift assignees.
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct StaffQuery {
    /// Filter by active flag (the shift form passes active=true)
    pub active: Option<bool>,
}

/// List staff, ordered by name
#[utoipa::path(
    get,
    path = "/api/v1/staff",
    params(StaffQuery),
    responses(
        (status = 200, description = "Staff directory, name ascending", body = [Staff]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn list_staff(
    pool: web::Data<MySqlPool>,
    query: web::Query<StaffQuery>,
) -> actix_web::Result<impl Responder> {
    let sql = match query.active {
        Some(_) => {
            "SELECT id, name, role, email, active, created_at FROM staff WHERE active = ? ORDER BY name ASC"
        }
        None => "SELECT id, name, role, email, active, created_at FROM staff ORDER BY name ASC",
    };
    debug!(sql = %sql, active = ?query.active, "Fetching staff directory");

    let mut data_query = sqlx::query_as::<_, Staff>(sql);
    if let Some(active) = query.active {
        data_query = data_query.bind(active);
    }

    let staff = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch staff directory");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(staff))
}

/// Add a staff member
#[utoipa::path(
    post,
    path = "/api/v1/staff",
    request_body = CreateStaff,
    responses(
        (status = 201, description = "Staff member created", body = Object, example = json!({
            "message": "Staff member created"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn create_staff(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateStaff>,
) -> impl Responder {
    // id, active and created_at are defaulted by the database
    let result = sqlx::query(
        r#"
        INSERT INTO staff (name, role, email)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&payload.name)
    .bind(payload.role)
    .bind(&payload.email)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => HttpResponse::Created().json(json!({
            "message": "Staff member created"
        })),
        Err(e) => {
            error!(error = %e, "Failed to create staff member");
            HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            }))
        }
    }
}

/// Update a staff member (partial)
#[utoipa::path(
    put,
    path = "/api/v1/staff/{staff_id}",
    params(
        ("staff_id", Path, description = "Staff ID")
    ),
    request_body = UpdateStaff,
    responses(
        (status = 200, description = "Staff member updated"),
        (status = 400, description = "No fields provided"),
        (status = 404, description = "Staff member not found"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn update_staff(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpdateStaff>,
) -> actix_web::Result<impl Responder> {
    let staff_id = path.into_inner();

    enum Bind {
        Str(String),
        Bool(bool),
    }

    let mut clauses: Vec<&str> = Vec::new();
    let mut binds: Vec<Bind> = Vec::new();

    if let Some(name) = &payload.name {
        clauses.push("name = ?");
        binds.push(Bind::Str(name.clone()));
    }
    if let Some(role) = payload.role {
        clauses.push("role = ?");
        binds.push(Bind::Str(role.to_string()));
    }
    if let Some(email) = &payload.email {
        clauses.push("email = ?");
        binds.push(Bind::Str(email.clone()));
    }
    if let Some(active) = payload.active {
        clauses.push("active = ?");
        binds.push(Bind::Bool(active));
    }

    if clauses.is_empty() {
        return Err(actix_web::error::ErrorBadRequest(
            "No fields provided for update",
        ));
    }

    let sql = format!("UPDATE staff SET {} WHERE id = ?", clauses.join(", "));
    debug!(sql = %sql, staff_id, "Updating staff member");

    let mut update_query = sqlx::query(&sql);
    for b in binds {
        update_query = match b {
            Bind::Str(v) => update_query.bind(v),
            Bind::Bool(v) => update_query.bind(v),
        };
    }
    update_query = update_query.bind(staff_id);

    let result = update_query.execute(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, staff_id, "Failed to update staff member");
        ErrorInternalServerError("Database error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Staff member not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Staff member updated"
    })))
}

/// Remove a staff member
#[utoipa::path(
    delete,
    path = "/api/v1/staff/{staff_id}",
    params(
        ("staff_id", Path, description = "Staff ID")
    ),
    responses(
        (status = 200, description = "Staff member removed"),
        (status = 404, description = "Staff member not found"),
        (status = 409, description = "Staff member still has shifts assigned"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn delete_staff(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let staff_id = path.into_inner();

    let result = sqlx::query(r#"DELETE FROM staff WHERE id = ?"#)
        .bind(staff_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(res) => {
            if res.rows_affected() == 0 {
                return Ok(HttpResponse::NotFound().json(json!({
                    "message": "Staff member not found"
                })));
            }

            Ok(HttpResponse::Ok().json(json!({
                "message": "Staff member removed"
            })))
        }

        Err(e) => {
            // Shifts reference staff; the FK keeps history intact
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "message": "Staff member still has shifts assigned"
                    })));
                }
            }

            error!(error = %e, staff_id, "Failed to delete staff member");

            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}
