//! Build script: embeds the `CONVENTIONS_VERSION` used by the `version` command.

use std::process::Command;

fn main() {
    // CONVENTIONS_VERSION wins (release builds); otherwise describe the checkout.
    if let Ok(version) = std::env::var("CONVENTIONS_VERSION") {
        println!("cargo:rustc-env=CONVENTIONS_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=CONVENTIONS_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=CONVENTIONS_VERSION");
}
