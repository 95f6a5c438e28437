//! Shared Kernel - Domain-crossing minimal core
//!
//! The small vocabulary every crate in the board agrees on:
//! - Error classification and the unified [`error::app_error::AppError`]
//! - Typed entity identifiers ([`id::ConfessionId`], [`id::ReplyId`], ...)
//!
//! Only things with the same meaning in every bounded context belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
