//! Unit tests for task synchronisation.

mod support;
