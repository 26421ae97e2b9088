use super::*;

#[test]
fn log_dir_is_created_under_a_logs_folder() {
    let dir = ensure_log_dir().unwrap();
    assert!(dir.is_dir());
    assert!(dir.ends_with("logs"));
}
