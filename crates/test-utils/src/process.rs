use std::path::Path;
use std::time::Duration;

/// Whether `pid` is a live (non-zombie) process.
///
/// Zombies count as gone: in containers nobody may reap reparented
/// grandchildren, but they have stopped running.
#[cfg(target_os = "linux")]
pub fn is_running(pid: i32) -> bool {
    match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
        // The state letter follows the parenthesised command name.
        Ok(stat) => stat
            .rsplit_once(')')
            .map(|(_, rest)| !rest.trim_start().starts_with('Z'))
            .unwrap_or(false),
        Err(_) => false,
    }
}

/// Poll until `pid` stops running or `limit` passes. Returns whether it stopped.
#[cfg(target_os = "linux")]
pub async fn wait_until_gone(pid: i32, limit: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + limit;
    while tokio::time::Instant::now() < deadline {
        if !is_running(pid) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    !is_running(pid)
}

/// Poll until `path` exists, then return its contents.
pub async fn wait_for_file(path: &Path, limit: Duration) -> Option<String> {
    let deadline = tokio::time::Instant::now() + limit;
    while tokio::time::Instant::now() < deadline {
        if let Ok(contents) = std::fs::read_to_string(path) {
            return Some(contents);
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    None
}

/// Parse whitespace-separated pids.
pub fn parse_pids(contents: &str) -> Vec<i32> {
    contents
        .split_whitespace()
        .filter_map(|s| s.parse().ok())
        .collect()
}
