//! Profile handlers.

use actix_web::{HttpResponse, web};

use suitter_core::domain::Address;
use suitter_shared::ApiResponse;

use super::convert;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/profiles
pub async fn list_profiles(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let profiles = state.reader.list_profiles().await?;
    Ok(HttpResponse::Ok().json(convert::listed(convert::list(profiles, convert::profile))))
}

/// GET /api/profiles/{address}
///
/// An address without a profile answers `has_profile: false`, never 404.
pub async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let address: Address = path.parse()?;

    let lookup = state.reader.find_profile(&address).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(convert::profile_status(lookup))))
}
