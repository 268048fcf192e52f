//! Client library for the ViaggiaTreno train information service.
//!
//! Looks up trains and stations, fetches live train status and stop lists,
//! departure and arrival boards, and route segment listings.

pub mod api;
pub mod domain;
