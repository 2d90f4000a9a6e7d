fn main() {
    // The document preamble reports the runtime version; capture the
    // compiler's own report at build time.
    let version = std::process::Command::new(std::env::var("RUSTC").unwrap_or("rustc".into()))
        .arg("--version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "rustc (unknown version)".to_string());

    println!("cargo:rustc-env=LABWIKI_RUSTC_VERSION={version}");
}
