//! Integration tests for tubesift

mod helpers;

mod comments_test;
mod config_test;
mod transcript_test;
