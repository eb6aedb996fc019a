//! Tests for the OTP service

mod concurrency_tests;
