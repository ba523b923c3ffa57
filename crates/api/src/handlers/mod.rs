pub mod admin;
pub mod auth;
pub mod content;
pub mod course;
pub mod form;
pub mod purchase;
pub mod refund;
