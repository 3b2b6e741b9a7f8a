//! Integration tests driving the svc-impact binary


mod test_affected;
mod test_graph;
