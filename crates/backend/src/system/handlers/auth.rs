use axum::{extract::Json, http::StatusCode, Extension};
use contracts::system::auth::{ActorInfo, LoginRequest, LoginResponse, TokenClaims};
use uuid::Uuid;

use crate::domain::{a002_admin, a003_subadmin};
use crate::system::auth::jwt;

fn admin_info(admin: &contracts::domain::a002_admin::aggregate::Admin) -> ActorInfo {
    ActorInfo {
        id: admin.base.id.value().to_string(),
        name: admin.base.description.clone(),
        email: admin.email.clone(),
        role: "admin".into(),
        districts: None,
        page_access: None,
    }
}

fn subadmin_info(subadmin: &contracts::domain::a003_subadmin::aggregate::Subadmin) -> ActorInfo {
    ActorInfo {
        id: subadmin.base.id.value().to_string(),
        name: subadmin.base.description.clone(),
        email: subadmin.email.clone(),
        role: "subadmin".into(),
        districts: Some(subadmin.districts.clone()),
        page_access: Some(subadmin.page_access.clone()),
    }
}

/// POST /api/auth/login
pub async fn login(
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, StatusCode> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let user = match request.role.as_str() {
        "admin" => {
            let admin = a002_admin::service::verify_credentials(&request.email, &request.password)
                .await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
                .ok_or(StatusCode::UNAUTHORIZED)?;
            admin_info(&admin)
        }
        "subadmin" => {
            let subadmin =
                a003_subadmin::service::verify_credentials(&request.email, &request.password)
                    .await
                    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
                    .ok_or(StatusCode::UNAUTHORIZED)?;
            subadmin_info(&subadmin)
        }
        _ => return Err(StatusCode::BAD_REQUEST),
    };

    let access_token = jwt::generate_access_token(&user.id, &user.email, &user.role)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(LoginResponse { access_token, user }))
}

/// GET /api/auth/me (behind require_auth)
pub async fn current_user(
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<ActorInfo>, StatusCode> {
    let id = Uuid::parse_str(&claims.sub).map_err(|_| StatusCode::UNAUTHORIZED)?;

    let info = match claims.role.as_str() {
        "admin" => {
            let admin = a002_admin::service::get_by_id(id)
                .await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
                .ok_or(StatusCode::UNAUTHORIZED)?;
            admin_info(&admin)
        }
        "subadmin" => {
            let subadmin = a003_subadmin::service::get_by_id(id)
                .await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
                .ok_or(StatusCode::UNAUTHORIZED)?;
            subadmin_info(&subadmin)
        }
        _ => return Err(StatusCode::UNAUTHORIZED),
    };

    Ok(Json(info))
}
