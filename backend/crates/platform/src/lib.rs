//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, salted, zeroized cleartext handling)
//! - Cookie building and parsing

pub mod cookie;
pub mod password;
