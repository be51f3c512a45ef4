//! Unit tests for pswait CLI
//!
//! These tests use hand-written fakes for every port and run fast without
//! external I/O.

mod release_wait_service;
