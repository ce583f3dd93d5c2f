//! Integration tests for pcmconv
//!
//! This module contains integration tests covering:
//! - Container muxing/demuxing round-trips
//! - Chunked transcoding through files and in-memory cursors

#[path = "../common/mod.rs"]
mod common;

mod format_tests;
mod transcode_tests;
