//! Infrastructure layer: concrete implementations of the domain interfaces
//! and the wire DTOs.

pub mod catalog;
pub mod dto;
pub mod message_pusher;
pub mod public_ip;
pub mod repository;
