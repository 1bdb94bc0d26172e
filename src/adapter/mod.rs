//! Boundary adapters: the HTTP surface and the collaborator clients.

pub mod http;
pub mod jwt;
pub mod rest;
