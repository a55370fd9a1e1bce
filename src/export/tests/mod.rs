//! Unit tests for descriptor building, dynamic invocation and the exporter.
