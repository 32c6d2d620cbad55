/*
 * Responsibility
 * - Route handlers grouped by resource
 * - Handlers never check permissions; guards are bound in routes.rs
 */
pub mod auth;
pub mod catalog;
pub mod content;
pub mod customers;
pub mod growth;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod promotions;
pub mod reports;
pub mod reviews;
pub mod staff;
pub mod storefront;

use crate::error::AppError;

/// DTO validation result -> 400.
pub(crate) fn check(result: Result<(), &'static str>) -> Result<(), AppError> {
    result.map_err(AppError::invalid_request)
}
