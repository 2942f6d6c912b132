//! End-to-End Integration Tests
//!
//! These tests run the attribute and authorization service clients against
//! a wiremock server standing in for ESGF SAML endpoints.

mod attribute_service;
mod authorization_service;
mod common;
