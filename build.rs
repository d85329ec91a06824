use std::process::Command;

fn main() {
    // Prefer values injected by CI over local commands
    let git_sha = std::env::var("GIT_SHA")
        .unwrap_or_else(|_| command_output("git", &["rev-parse", "--short", "HEAD"]));
    println!("cargo:rustc-env=GIT_SHA={}", git_sha);

    let build_date =
        std::env::var("BUILD_DATE").unwrap_or_else(|_| command_output("date", &["+%Y-%m-%d"]));
    println!("cargo:rustc-env=BUILD_DATE={}", build_date);
}

fn command_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
