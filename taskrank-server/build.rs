use std::process::Command;

// Embeds the short git SHA as TASKRANK_BUILD_SHA. A value already present in
// the environment (e.g. from a packaging script) wins over git.
fn main() {
    println!("cargo:rerun-if-env-changed=TASKRANK_BUILD_SHA");

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo_root = format!("{manifest_dir}/..");
    println!("cargo:rerun-if-changed={repo_root}/.git/HEAD");

    let sha = std::env::var("TASKRANK_BUILD_SHA")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| git_short_sha(&repo_root))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=TASKRANK_BUILD_SHA={sha}");
}

fn git_short_sha(repo_root: &str) -> Option<String> {
    let out = Command::new("git")
        .args(["-C", repo_root, "rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}
