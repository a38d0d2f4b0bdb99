//! Test suite for the client facade.

mod support;
