//! Integration tests for workspace inspection

mod cli_contracts;
mod inspector_flow;
mod support;
