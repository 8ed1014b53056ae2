//! Integration tests: full submission flow against the in-memory stores

mod submission_flow;
