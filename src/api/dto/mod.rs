/*
 * Responsibility
 * - Request/response DTOs per area (camelCase on the wire)
 * - Shape checks live in validate(); handlers map failures to 400
 */
pub mod auth;
pub mod catalog;
pub mod common;
pub mod content;
pub mod customers;
pub mod inventory;
pub mod orders;
pub mod promotions;
pub mod reviews;
pub mod staff;
pub mod storefront;
