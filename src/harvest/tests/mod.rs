//! Harvest pipeline tests
